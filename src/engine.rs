//! Match-resolution state machine.
//!
//! The engine tracks the face state of every card on a [`Board`]. At most
//! two cards are face up at once. Showing the second card evaluates the
//! pair immediately (updating the streak), while the visible effect of the
//! evaluation is deferred until the caller resolves the [`RevealedPair`]
//! after the reveal delay.

use alloc::vec;
use alloc::vec::Vec;

use rand::Rng;

use crate::board::Board;
use crate::card::Card;
use crate::error::ResolveError;
use crate::options::PairingMode;
use crate::select::random_int;

/// Face state of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceState {
    /// Face down and selectable.
    Hidden,
    /// Face up, waiting for its pair to resolve.
    Showing,
    /// Matched and taken off the board.
    Removed,
}

/// Whether a revealed pair matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairOutcome {
    /// The cards pair up under the active mode.
    Match,
    /// The cards do not pair up.
    Mismatch,
}

/// Two face-up cards awaiting resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevealedPair {
    /// Engine that revealed the pair.
    pub engine_id: u64,
    /// Position of the first card shown.
    pub first: usize,
    /// Position of the second card shown.
    pub second: usize,
    /// Evaluation of the pair.
    pub outcome: PairOutcome,
}

/// Result of a flip request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlipOutcome {
    /// The card was not hidden, or two cards are already showing.
    Ignored,
    /// The card is now showing; one more card may be flipped.
    Shown,
    /// The card is now showing and completes a pair.
    PairShown(RevealedPair),
}

/// Effect of resolving a revealed pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// Both cards were removed and points awarded.
    Matched {
        /// Points added to the score.
        reward: u32,
        /// Whether every card is now removed.
        cleared: bool,
    },
    /// Both cards were turned face down and points deducted.
    Missed {
        /// Points actually taken off the score.
        penalty: u32,
    },
}

/// Tracks face states, score and streak for one board.
#[derive(Debug, Clone)]
pub struct MatchEngine {
    id: u64,
    board: Board,
    mode: PairingMode,
    mismatch_penalty: u32,
    faces: Vec<FaceState>,
    showing: Vec<usize>,
    remaining: usize,
    score: u32,
    streak: u32,
}

impl MatchEngine {
    /// Creates an engine with every card hidden.
    ///
    /// `id` distinguishes pairs revealed by this engine from pairs of an
    /// engine it replaces.
    #[must_use]
    pub fn new(id: u64, board: Board, mode: PairingMode, mismatch_penalty: u32) -> Self {
        let len = board.len();
        Self {
            id,
            faces: vec![FaceState::Hidden; len],
            showing: Vec::with_capacity(2),
            remaining: len,
            board,
            mode,
            mismatch_penalty,
            score: 0,
            streak: 0,
        }
    }

    /// Flips the card at `index` face up.
    ///
    /// Out-of-range positions, cards that are not hidden, and flips while a
    /// pair is showing are ignored.
    pub fn flip(&mut self, index: usize) -> FlipOutcome {
        if self.showing.len() >= 2 || self.faces.get(index) != Some(&FaceState::Hidden) {
            return FlipOutcome::Ignored;
        }

        self.faces[index] = FaceState::Showing;
        self.showing.push(index);

        let Some(pair) = self.revealed() else {
            return FlipOutcome::Shown;
        };

        match pair.outcome {
            PairOutcome::Match => self.streak += 1,
            PairOutcome::Mismatch => self.streak = 0,
        }

        FlipOutcome::PairShown(pair)
    }

    fn is_pair(&self, first: usize, second: usize) -> bool {
        match (self.board.get(first), self.board.get(second)) {
            (Some(a), Some(b)) => self.mode.is_pair(&a, &b),
            _ => false,
        }
    }

    /// The pair currently showing, as it was handed out by [`Self::flip`].
    fn revealed(&self) -> Option<RevealedPair> {
        let [first, second] = self.showing[..] else {
            return None;
        };
        let outcome = if self.is_pair(first, second) {
            PairOutcome::Match
        } else {
            PairOutcome::Mismatch
        };

        Some(RevealedPair {
            engine_id: self.id,
            first,
            second,
            outcome,
        })
    }

    /// Applies a revealed pair once its reveal delay has passed.
    ///
    /// A match removes both cards and awards `streak + random_int(n/2, n)`
    /// points for a board of `n` cards. A mismatch hides both cards again
    /// and deducts the mismatch penalty, never going below zero.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Stale`] unless `pair` is exactly the pair
    /// this engine revealed last and has not resolved yet.
    pub fn resolve<R: Rng + ?Sized>(
        &mut self,
        pair: &RevealedPair,
        rng: &mut R,
    ) -> Result<Resolution, ResolveError> {
        if self.revealed() != Some(*pair) {
            return Err(ResolveError::Stale);
        }

        self.showing.clear();

        let resolution = match pair.outcome {
            PairOutcome::Match => {
                self.faces[pair.first] = FaceState::Removed;
                self.faces[pair.second] = FaceState::Removed;
                self.remaining -= 2;

                let size = self.board.len() as u32;
                let reward = self.streak + random_int(rng, size / 2, size);
                self.score = self.score.saturating_add(reward);

                Resolution::Matched {
                    reward,
                    cleared: self.remaining == 0,
                }
            }
            PairOutcome::Mismatch => {
                self.faces[pair.first] = FaceState::Hidden;
                self.faces[pair.second] = FaceState::Hidden;

                let penalty = self.mismatch_penalty.min(self.score);
                self.score -= penalty;

                Resolution::Missed { penalty }
            }
        };

        Ok(resolution)
    }

    /// Returns the engine id.
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }

    /// Returns the board.
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the pairing mode.
    #[must_use]
    pub const fn mode(&self) -> PairingMode {
        self.mode
    }

    /// Returns the face state of the card at `index`.
    #[must_use]
    pub fn face(&self, index: usize) -> Option<FaceState> {
        self.faces.get(index).copied()
    }

    /// Returns the face state of a card by identity.
    #[must_use]
    pub fn face_of(&self, card: &Card) -> Option<FaceState> {
        self.board.position(card).and_then(|index| self.face(index))
    }

    /// Returns every face state in board order.
    #[must_use]
    pub fn faces(&self) -> &[FaceState] {
        &self.faces
    }

    /// Returns the positions of the cards currently showing.
    #[must_use]
    pub fn showing(&self) -> &[usize] {
        &self.showing
    }

    /// Returns the number of cards not yet removed.
    #[must_use]
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Returns whether every card has been removed.
    #[must_use]
    pub const fn is_cleared(&self) -> bool {
        self.remaining == 0
    }

    /// Returns the current score.
    #[must_use]
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Returns the number of consecutive matches.
    #[must_use]
    pub const fn streak(&self) -> u32 {
        self.streak
    }
}
