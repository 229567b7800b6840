//! Station and line storage.
//!
//! Keeps every station and line in memory behind a single lock and,
//! when configured, mirrors the whole registry to a JSON snapshot on disk
//! after each successful change.

mod error;
mod snapshot;
mod subway;

pub use error::StoreError;
pub use snapshot::{Snapshot, SnapshotFile, SnapshotLine};
pub use subway::{LineDetails, SubwayStore};
