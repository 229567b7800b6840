//! Subway line server.
//!
//! Keeps each line's stations as a chain of sections and answers with the
//! stations in order, however the sections were added or removed.

pub mod config;
pub mod domain;
pub mod sections;
pub mod store;
pub mod web;
