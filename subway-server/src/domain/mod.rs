//! Domain types for the subway line service.
//!
//! This module contains the validated value types that the section chain
//! and the store work with. All types enforce their invariants at
//! construction time, so code that receives them can trust their validity.

mod distance;
mod error;
mod line;
mod section;
mod station;

pub use distance::{Distance, InvalidDistance};
pub use error::SectionError;
pub use line::{Line, LineId};
pub use section::Section;
pub use station::{Station, StationId};
