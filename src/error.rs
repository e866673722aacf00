//! Error types for game operations.

use thiserror::Error;

/// Errors that can occur while parsing a card key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CardKeyError {
    /// Key has no `-` between value and suit.
    #[error("card key has no value-suit separator")]
    MissingSeparator,
    /// Value part is not a known card value.
    #[error("unknown card value")]
    UnknownValue,
    /// Suit part is not a known suit.
    #[error("unknown card suit")]
    UnknownSuit,
}

/// Errors that can occur while composing a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    /// Board size is odd.
    #[error("board size must be even")]
    OddSize,
    /// Board size is below the minimum or above what the mode can fill.
    #[error("board size is out of range for the pairing mode")]
    SizeOutOfRange,
}

/// Errors that can occur when starting a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StartError {
    /// Player name is empty or whitespace.
    #[error("player name is empty")]
    InvalidPlayerName,
    /// Board could not be composed.
    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Errors that can occur when flipping a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FlipError {
    /// No session is running.
    #[error("no session is running")]
    NotRunning,
    /// Card is not on the board.
    #[error("card is not on the board")]
    CardNotOnBoard,
}

/// Errors that can occur when resolving a revealed pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ResolveError {
    /// No session is running.
    #[error("no session is running")]
    NotRunning,
    /// Pair belongs to an earlier session or was already resolved.
    #[error("pair is stale")]
    Stale,
}

/// Errors reported by a scoring service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ScoringError {
    /// Query string is not a list of `key=value` pairs.
    #[error("malformed query string")]
    MalformedQuery,
    /// Query names an action other than `filter` or `sort`.
    #[error("unknown action")]
    UnknownAction,
    /// Sort criteria is not a score record field.
    #[error("unknown sort criteria")]
    UnknownCriteria,
    /// Sort order is neither `asc` nor `desc`.
    #[error("unknown sort order")]
    UnknownOrder,
    /// A required query parameter is missing.
    #[error("missing query parameter")]
    MissingParameter,
    /// Time is not formatted as `HH:MM:SS`.
    #[error("invalid time format")]
    InvalidTime,
    /// Request body is not a valid score record.
    #[error("malformed request body")]
    MalformedBody,
    /// Response could not be encoded.
    #[error("failed to encode response")]
    Encoding,
    /// Request method is not supported.
    #[error("unsupported request method")]
    UnsupportedMethod,
    /// Service could not be reached.
    #[error("scoring service unavailable")]
    Unavailable,
}
