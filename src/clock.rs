//! `HH:MM:SS` clock strings.

use alloc::format;
use alloc::string::String;

use crate::error::ScoringError;

/// Formats elapsed seconds as `HH:MM:SS`.
///
/// Hours are not wrapped, so long games keep counting past `99`.
///
/// ```
/// assert_eq!(pairs::clock::format_clock(3_725), "01:02:05");
/// ```
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    let hours = seconds / 3600;
    let minutes = seconds % 3600 / 60;
    let seconds = seconds % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Parses an `HH:MM:SS` string into seconds.
///
/// # Errors
///
/// Returns [`ScoringError::InvalidTime`] if the string does not have three
/// numeric fields.
pub fn parse_clock(clock: &str) -> Result<u32, ScoringError> {
    let mut fields = clock.split(':').map(|field| field.trim().parse::<u32>());

    let (Some(Ok(hours)), Some(Ok(minutes)), Some(Ok(seconds)), None) =
        (fields.next(), fields.next(), fields.next(), fields.next())
    else {
        return Err(ScoringError::InvalidTime);
    };

    hours
        .checked_mul(3600)
        .and_then(|total| total.checked_add(minutes.checked_mul(60)?))
        .and_then(|total| total.checked_add(seconds))
        .ok_or(ScoringError::InvalidTime)
}
