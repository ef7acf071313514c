//! Error types for the animation core.
//!
//! These are programming errors reported by the low-level driver and
//! timeline API. The scheduler and the top view log them and carry on.

use thiserror::Error;

use super::types::{AnimationId, TimelineId};

/// Result type for animation operations.
pub type Result<T> = std::result::Result<T, AnimError>;

/// Errors raised by misuse of drivers and timelines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnimError {
    /// A driver was started twice.
    #[error("{0} was already started")]
    AnimAlreadyStarted(AnimationId),

    /// A timeline was started twice.
    #[error("{0} was already started")]
    TimelineAlreadyStarted(TimelineId),

    /// A member was added to a timeline that is already running.
    #[error("cannot add members to {0} after start")]
    AddAfterStart(TimelineId),

    /// The scheduler does not know this timeline.
    #[error("unknown {0}")]
    UnknownTimeline(TimelineId),
}
