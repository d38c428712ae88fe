//! Ledgerbook server library.
//!
//! Exposes the API router, configuration, and application state so that
//! integration tests and auxiliary binaries can drive the server without
//! spawning a process.

pub mod api;
pub mod config;
pub mod error;
mod main_lib;

pub use main_lib::{build_state, init_tracing, AppState};
