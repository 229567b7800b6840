//! Web layer for the subway line server.
//!
//! Provides JSON endpoints for managing stations, lines, and their sections.

mod dto;
mod extract;
mod routes;
mod state;

pub use dto::*;
pub use extract::{AppJson, AppPath, AppQuery};
pub use routes::{AppError, create_router};
pub use state::AppState;
