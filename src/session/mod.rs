//! Game session and lifecycle management.

use core::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use core::time::Duration;

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::sync::Mutex;

use crate::board::Board;
use crate::card::Card;
use crate::clock::format_clock;
use crate::engine::{FaceState, MatchEngine};
use crate::error::{BoardError, StartError};
use crate::options::SessionOptions;
use crate::scoring::ScoreRecord;

mod finish;
mod flip;
pub mod state;

pub use finish::final_score;
pub use state::{Resolved, SessionState};

/// A memory game session that owns the board, score and clock.
///
/// The session is driven by discrete commands: [`Session::start`],
/// [`Session::flip`], [`Session::resolve`] once the reveal delay has
/// passed, [`Session::tick`] once per second, and [`Session::end`] or
/// [`Session::clear`]. All commands take `&self`, so a timer and an input
/// handler can share one session.
pub struct Session {
    /// Options used for the next start.
    pub options: Mutex<SessionOptions>,
    /// Current lifecycle state.
    pub state: Mutex<SessionState>,
    /// Match engine for the board in play.
    pub engine: Mutex<Option<MatchEngine>>,
    /// Name of the current player.
    player: Mutex<String>,
    /// Seconds elapsed since the board was dealt.
    elapsed: AtomicU32,
    /// Id for the next match engine.
    next_engine_id: AtomicU64,
    /// Result of the last finished board.
    last_record: Mutex<Option<ScoreRecord>>,
    /// Random number generator.
    rng: Mutex<ChaCha8Rng>,
}

impl Session {
    /// Creates an idle session with the given seed.
    ///
    /// # Example
    ///
    /// ```
    /// use pairs::{Session, SessionOptions};
    ///
    /// let session = Session::new(SessionOptions::default().with_board_size(6), 42);
    /// session.start("ada").unwrap();
    /// assert_eq!(session.board().map(|board| board.len()), Some(6));
    /// ```
    #[must_use]
    pub fn new(options: SessionOptions, seed: u64) -> Self {
        Self {
            options: Mutex::new(options),
            state: Mutex::new(SessionState::Idle),
            engine: Mutex::new(None),
            player: Mutex::new(String::new()),
            elapsed: AtomicU32::new(0),
            next_engine_id: AtomicU64::new(0),
            last_record: Mutex::new(None),
            rng: Mutex::new(ChaCha8Rng::seed_from_u64(seed)),
        }
    }

    /// Replaces the options used for the next start.
    ///
    /// # Errors
    ///
    /// Returns an error if the board size is not valid for the mode.
    pub fn configure(&self, options: SessionOptions) -> Result<(), BoardError> {
        options.validate()?;
        *self.options.lock() = options;
        Ok(())
    }

    /// Deals a new board and starts the clock.
    ///
    /// Any board in play is discarded first; score, streak, face states and
    /// the clock all start from zero.
    ///
    /// # Errors
    ///
    /// Returns an error if the player name is blank or the configured board
    /// cannot be composed.
    pub fn start(&self, player: &str) -> Result<(), StartError> {
        if player.trim().is_empty() {
            return Err(StartError::InvalidPlayerName);
        }

        let options = self.options.lock().clone();
        let board = Board::generate(options.mode, options.board_size, &mut *self.rng.lock())?;
        let id = self.next_engine_id.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state.lock();
        let previous = self.engine.replace(Some(MatchEngine::new(
            id,
            board,
            options.mode,
            options.mismatch_penalty,
        )));
        self.player.replace(player.to_string());
        self.last_record.take();
        self.elapsed.store(0, Ordering::SeqCst);
        *state = SessionState::Running;
        drop(state);

        if let Some(previous) = previous {
            debug!(
                engine_id = previous.id(),
                remaining = previous.remaining(),
                "unfinished board discarded"
            );
        }

        info!(
            player,
            mode = options.mode.id(),
            cards = options.board_size,
            "session started"
        );

        Ok(())
    }

    /// Advances the clock by one second.
    ///
    /// Returns the new elapsed time, or `None` if no session is running.
    pub fn tick(&self) -> Option<u32> {
        let state = self.state.lock();
        if *state != SessionState::Running {
            return None;
        }
        let elapsed = self.elapsed.fetch_add(1, Ordering::SeqCst) + 1;
        drop(state);
        Some(elapsed)
    }

    /// Returns the current lifecycle state.
    pub fn state(&self) -> SessionState {
        *self.state.lock()
    }

    /// Returns the current player name.
    pub fn player(&self) -> String {
        self.player.lock().clone()
    }

    /// Returns the seconds elapsed on the current board.
    pub fn elapsed(&self) -> u32 {
        self.elapsed.load(Ordering::SeqCst)
    }

    /// Returns the elapsed time as `HH:MM:SS`.
    pub fn clock(&self) -> String {
        format_clock(self.elapsed())
    }

    /// Returns how long a revealed pair stays face up.
    pub fn reveal_delay(&self) -> Duration {
        self.options.lock().reveal_delay
    }

    /// Returns the score of the board in play, or the final score of the
    /// last finished board.
    pub fn score(&self) -> u32 {
        if let Some(engine) = self.engine.lock().as_ref() {
            return engine.score();
        }
        self.last_record.lock().as_ref().map_or(0, |record| record.score)
    }

    /// Returns the current streak of consecutive matches.
    pub fn streak(&self) -> u32 {
        self.engine.lock().as_ref().map_or(0, MatchEngine::streak)
    }

    /// Returns a clone of the board in play.
    pub fn board(&self) -> Option<Board> {
        self.engine.lock().as_ref().map(|engine| engine.board().clone())
    }

    /// Returns the face state of a card on the board in play.
    pub fn face(&self, card: &Card) -> Option<FaceState> {
        self.engine.lock().as_ref().and_then(|engine| engine.face_of(card))
    }

    /// Returns every face state of the board in play, in board order.
    pub fn faces(&self) -> Vec<FaceState> {
        self.engine
            .lock()
            .as_ref()
            .map(|engine| engine.faces().to_vec())
            .unwrap_or_default()
    }

    /// Returns the result of the last finished board.
    pub fn last_record(&self) -> Option<ScoreRecord> {
        self.last_record.lock().clone()
    }
}
