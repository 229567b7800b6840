//! Section chain error types.
//!
//! Every error here is detected before the chain is touched, so a failed
//! operation never leaves a partially applied change behind.

use super::{Distance, StationId};

/// Errors raised while building or editing a line's section chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SectionError {
    /// A section cannot start and end at the same station
    #[error("section must connect two different stations (got {0} -> {0})")]
    SameStations(StationId),

    /// Neither station of the candidate is on the line
    #[error("neither station {up} nor {down} is on the line")]
    NoAttachmentPoint { up: StationId, down: StationId },

    /// Both stations of the candidate are already on the line
    #[error("stations {up} and {down} are both already on the line")]
    BothEndpointsAlreadyPresent { up: StationId, down: StationId },

    /// Validation passed but no place to insert was found
    #[error("no insertion point for section {up} -> {down}")]
    NoInsertionPoint { up: StationId, down: StationId },

    /// Splitting would leave a section with a non-positive length
    #[error("section of length {requested} does not fit inside existing section of length {existing}")]
    InvalidSplitLength {
        existing: Distance,
        requested: Distance,
    },

    /// Merging two sections would exceed the largest representable length
    #[error("merged section length {front} + {back} is too large")]
    DistanceOverflow { front: Distance, back: Distance },

    /// The line would be left without any section
    #[error("a line must keep at least one section")]
    MinimumChainLength,

    /// The station to remove is not on the line
    #[error("station {0} is not on the line")]
    StationNotInChain(StationId),

    /// A loaded collection does not form a single simple path
    #[error("sections do not form a single chain: {0}")]
    BrokenChain(&'static str),
}
