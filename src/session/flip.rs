use tracing::debug;

use crate::card::Card;
use crate::engine::{FlipOutcome, PairOutcome, Resolution, RevealedPair};
use crate::error::{FlipError, ResolveError};

use super::{Resolved, Session, SessionState};

impl Session {
    /// Flips a card face up.
    ///
    /// Flipping a card that is already showing or removed, or any card
    /// while a pair is waiting to resolve, returns [`FlipOutcome::Ignored`].
    /// When the flip completes a pair, schedule [`Session::resolve`] after
    /// [`Session::reveal_delay`].
    ///
    /// # Errors
    ///
    /// Returns an error if no session is running or the card is not on the
    /// board.
    pub fn flip(&self, card: &Card) -> Result<FlipOutcome, FlipError> {
        if *self.state.lock() != SessionState::Running {
            return Err(FlipError::NotRunning);
        }

        let mut engine = self.engine.lock();
        let engine = engine.as_mut().ok_or(FlipError::NotRunning)?;
        let index = engine
            .board()
            .position(card)
            .ok_or(FlipError::CardNotOnBoard)?;

        let outcome = engine.flip(index);
        if let FlipOutcome::PairShown(pair) = outcome {
            debug!(
                first = pair.first,
                second = pair.second,
                matched = pair.outcome == PairOutcome::Match,
                streak = engine.streak(),
                "pair revealed"
            );
        }

        Ok(outcome)
    }

    /// Resolves a revealed pair after its reveal delay.
    ///
    /// If the match clears the board the session ends and the returned
    /// [`Resolved::record`] holds the result to hand to a scoring service.
    ///
    /// # Errors
    ///
    /// Returns an error if no session is running, or the pair belongs to an
    /// earlier board, was already resolved, or is not the pair this board
    /// revealed. Either way nothing changes.
    pub fn resolve(&self, pair: &RevealedPair) -> Result<Resolved, ResolveError> {
        if *self.state.lock() != SessionState::Running {
            return Err(ResolveError::NotRunning);
        }

        let (resolution, score) = {
            let mut engine = self.engine.lock();
            let engine = engine.as_mut().ok_or(ResolveError::NotRunning)?;
            let resolution = engine
                .resolve(pair, &mut *self.rng.lock())
                .inspect_err(|_| debug!(engine_id = pair.engine_id, "stale pair ignored"))?;
            (resolution, engine.score())
        };

        debug!(?resolution, score, "pair resolved");

        // A restart between the resolution and here must not end the new board.
        let record = match resolution {
            Resolution::Matched { cleared: true, .. } => self.end_engine(Some(pair.engine_id)),
            _ => None,
        };

        Ok(Resolved { resolution, record })
    }
}
