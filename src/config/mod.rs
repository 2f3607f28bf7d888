//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, progress interval, endpoints)
//! - CLI option types and parsing
//! - Normalization of Go-style single-dash long flags

mod constants;
mod types;

// Re-export all constants
pub use constants::*;
pub use types::{normalize_args, Config, LogFormat, LogLevel};
