//! Session state types.

use crate::engine::Resolution;
use crate::scoring::ScoreRecord;

/// Session lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No board is in play.
    Idle,
    /// A board is in play and the clock is running.
    Running,
    /// The last board was cleared and its result recorded.
    Ended,
}

/// Outcome of resolving a revealed pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    /// What happened to the pair.
    pub resolution: Resolution,
    /// Result of the session, if the pair cleared the board.
    pub record: Option<ScoreRecord>,
}
