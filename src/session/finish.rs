use core::sync::atomic::Ordering;

use tracing::info;

use crate::engine::MatchEngine;
use crate::scoring::ScoreRecord;

use super::{Session, SessionState};

/// Applies the end-of-game adjustment to a score.
///
/// The score grows by `elapsed % score` when more seconds elapsed than
/// points were scored, and by `score % elapsed` otherwise. A zero divisor
/// adds nothing.
///
/// ```
/// use pairs::session::final_score;
///
/// assert_eq!(final_score(10, 25), 15);
/// assert_eq!(final_score(25, 10), 30);
/// assert_eq!(final_score(0, 25), 0);
/// ```
#[must_use]
pub const fn final_score(score: u32, elapsed: u32) -> u32 {
    let bonus = if elapsed > score {
        elapsed.checked_rem(score)
    } else {
        score.checked_rem(elapsed)
    };

    match bonus {
        Some(bonus) => score.saturating_add(bonus),
        None => score,
    }
}

impl Session {
    /// Ends the running session and clears its board.
    ///
    /// Returns the result to hand to a scoring service, or `None` if no
    /// session is running.
    pub fn end(&self) -> Option<ScoreRecord> {
        self.end_engine(None)
    }

    /// Ends the session if the board in play belongs to `engine_id`, or
    /// whatever board is in play when `engine_id` is `None`.
    pub(super) fn end_engine(&self, engine_id: Option<u64>) -> Option<ScoreRecord> {
        let mut state = self.state.lock();
        if *state != SessionState::Running {
            return None;
        }

        let engine = {
            let mut current = self.engine.lock();
            if engine_id.is_some() && current.as_ref().map(MatchEngine::id) != engine_id {
                return None;
            }
            current.take()?
        };
        let elapsed = self.elapsed.load(Ordering::SeqCst);
        let score = final_score(engine.score(), elapsed);
        let record = ScoreRecord::new(
            &self.player.lock(),
            engine.mode(),
            engine.board().len() as u32,
            score,
            elapsed,
        );

        self.last_record.replace(Some(record.clone()));
        *state = SessionState::Ended;
        drop(state);

        info!(
            player = %record.name,
            score = record.score,
            time = %record.time,
            "session ended"
        );

        Some(record)
    }

    /// Discards the board in play without recording a result.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        self.engine.take();
        self.elapsed.store(0, Ordering::SeqCst);
        *state = SessionState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use crate::engine::MatchEngine;
    use crate::options::SessionOptions;

    use super::{Session, SessionState};

    fn current_engine_id(session: &Session) -> Option<u64> {
        session.engine.lock().as_ref().map(MatchEngine::id)
    }

    #[test]
    fn ending_an_earlier_board_leaves_the_new_one_running() {
        let session = Session::new(SessionOptions::default().with_board_size(6), 21);
        session.start("ada").unwrap();
        let first = current_engine_id(&session).unwrap();

        session.start("grace").unwrap();
        let second = current_engine_id(&session).unwrap();
        assert_ne!(first, second);

        assert_eq!(session.end_engine(Some(first)), None);
        assert_eq!(session.state(), SessionState::Running);
        assert_eq!(current_engine_id(&session), Some(second));

        let record = session.end_engine(Some(second)).unwrap();
        assert_eq!(record.name, "grace");
        assert_eq!(session.state(), SessionState::Ended);
    }
}
