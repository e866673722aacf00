//! Session configuration options.

use core::time::Duration;

use crate::board::check_size;
use crate::card::Card;
use crate::error::BoardError;

/// Rule deciding when two cards form a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PairingMode {
    /// Any two cards of the same value.
    #[default]
    SameValue,
    /// Same value and same suit colour group.
    SameSuitAndValue,
}

impl PairingMode {
    /// Returns whether the two cards pair up under this mode.
    #[must_use]
    pub fn is_pair(self, first: &Card, second: &Card) -> bool {
        match self {
            Self::SameValue => first.value == second.value,
            Self::SameSuitAndValue => {
                first.value == second.value
                    && first.suit.color_group() == second.suit.color_group()
            }
        }
    }

    /// Returns the human readable label shown in score tables.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::SameValue => "Same value",
            Self::SameSuitAndValue => "Same suit and value",
        }
    }

    /// Returns the form identifier (`same-value` or `same-suit-and-value`).
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::SameValue => "same-value",
            Self::SameSuitAndValue => "same-suit-and-value",
        }
    }

    /// Returns the largest board this mode can fill.
    #[must_use]
    pub const fn max_board_size(self) -> usize {
        match self {
            Self::SameValue => 26,
            Self::SameSuitAndValue => 52,
        }
    }
}

/// Smallest playable board.
pub const MIN_BOARD_SIZE: usize = 6;

/// Configuration options for a game session.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use pairs::{PairingMode, SessionOptions};
///
/// let options = SessionOptions::default()
///     .with_mode(PairingMode::SameSuitAndValue)
///     .with_board_size(52);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// Pairing relation for the board.
    pub mode: PairingMode,
    /// Number of cards on the board.
    pub board_size: usize,
    /// How long a revealed pair stays face up before it resolves.
    pub reveal_delay: Duration,
    /// Points deducted on a mismatch.
    pub mismatch_penalty: u32,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            mode: PairingMode::SameValue,
            board_size: 20,
            reveal_delay: Duration::from_secs(1),
            mismatch_penalty: 5,
        }
    }
}

impl SessionOptions {
    /// Sets the pairing mode.
    ///
    /// # Example
    ///
    /// ```
    /// use pairs::{PairingMode, SessionOptions};
    ///
    /// let options = SessionOptions::default().with_mode(PairingMode::SameSuitAndValue);
    /// assert_eq!(options.mode, PairingMode::SameSuitAndValue);
    /// ```
    #[must_use]
    pub const fn with_mode(mut self, mode: PairingMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the number of cards on the board.
    ///
    /// # Example
    ///
    /// ```
    /// use pairs::SessionOptions;
    ///
    /// let options = SessionOptions::default().with_board_size(6);
    /// assert_eq!(options.board_size, 6);
    /// ```
    #[must_use]
    pub const fn with_board_size(mut self, board_size: usize) -> Self {
        self.board_size = board_size;
        self
    }

    /// Sets how long a revealed pair stays face up.
    #[must_use]
    pub const fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay = delay;
        self
    }

    /// Sets the points deducted on a mismatch.
    #[must_use]
    pub const fn with_mismatch_penalty(mut self, penalty: u32) -> Self {
        self.mismatch_penalty = penalty;
        self
    }

    /// Checks that the board size can be composed under the pairing mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the size is odd, below the minimum, or larger
    /// than the mode can fill.
    pub const fn validate(&self) -> Result<(), BoardError> {
        check_size(self.mode, self.board_size)
    }
}
