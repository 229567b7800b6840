//! Store error types.

use crate::domain::{LineId, SectionError, StationId};

/// Errors returned by [`SubwayStore`](super::SubwayStore) operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No station with this id
    #[error("station {0} not found")]
    StationNotFound(StationId),

    /// No line with this id
    #[error("line {0} not found")]
    LineNotFound(LineId),

    /// A name was empty or only whitespace
    #[error("{0} name must not be empty")]
    EmptyName(&'static str),

    /// Another station already has this name
    #[error("station name already in use: {0}")]
    DuplicateStationName(String),

    /// Another line already has this name
    #[error("line name already in use: {0}")]
    DuplicateLineName(String),

    /// The station is still part of a line
    #[error("station {station} is still on line {line}")]
    StationInUse { station: StationId, line: LineId },

    /// The section chain rejected the change
    #[error(transparent)]
    Section(#[from] SectionError),

    /// Reading or writing the snapshot failed
    #[error("snapshot error: {message}")]
    Snapshot { message: String },
}
