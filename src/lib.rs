//! A memory-matching card game engine with optional `no_std` support.
//!
//! The crate provides a [`Session`] type that deals a board of paired cards,
//! tracks which cards are face up, resolves pairs, keeps the score and the
//! clock, and produces a [`ScoreRecord`] when the board is cleared.
//!
//! # Example
//!
//! ```no_run
//! use pairs::{FlipOutcome, Session, SessionOptions};
//!
//! let session = Session::new(SessionOptions::default(), 42);
//! session.start("ada").unwrap();
//! let board = session.board().unwrap();
//! if let Ok(FlipOutcome::PairShown(pair)) = session.flip(&board.cards()[0]) {
//!     let _ = session.resolve(&pair);
//! }
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod board;
pub mod card;
pub mod clock;
pub mod engine;
pub mod error;
pub mod options;
pub mod scoring;
pub mod select;
pub mod session;
mod sync;

// Re-export main types
pub use board::Board;
pub use card::{Card, ColorGroup, DECK_SIZE, Suit, Value};
pub use engine::{FaceState, FlipOutcome, MatchEngine, PairOutcome, Resolution, RevealedPair};
pub use error::{BoardError, CardKeyError, FlipError, ResolveError, ScoringError, StartError};
pub use options::{PairingMode, SessionOptions};
pub use scoring::{
    ScoreQuery, ScoreRecord, ScoreStore, ScoresResponse, ScoringService, SortCriteria, SortOrder,
};
pub use session::{Resolved, Session, SessionState};
