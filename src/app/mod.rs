//! Main application modules.
//!
//! This module provides progress logging and statistics printing used by the
//! scan drivers and the orchestrator.

pub mod logging;
pub mod statistics;

// Re-export public API
pub use logging::ProgressTracker;
pub use statistics::{print_error_statistics, print_summary};
