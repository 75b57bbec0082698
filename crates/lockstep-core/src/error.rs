//! Library error type
//!
//! The reconciliation core itself has no failing operations: out-of-range
//! seeks are clamped and premature entries are suppressed, never surfaced.
//! Errors only arise at the command boundary: the input surface may
//! reference a channel that does not exist, or push into a full queue.

use thiserror::Error;

/// Errors arising at the command boundary
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MixerError {
    /// A command referenced a channel index that is not present
    #[error("unknown channel index {0}")]
    UnknownChannel(usize),
    /// The command queue was full; the command was not enqueued
    #[error("command queue full, command dropped")]
    QueueFull,
}
