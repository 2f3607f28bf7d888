//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions for initialization, configuration and remote queries
//! - Processing statistics tracking for records that were skipped or failed
//!
//! Only configuration errors stop a run. Everything counted by
//! `ProcessingStats` is recovered from and reported at the end.

mod stats;
mod types;

// Re-export public API
pub use stats::ProcessingStats;
pub use types::{ConfigError, CtError, ErrorType, InitializationError};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        assert_eq!(stats.total_errors(), 0);
    }

    #[test]
    fn test_processing_stats_increment() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::MalformedRecord);
        stats.increment_error(ErrorType::MalformedRecord);
        stats.increment_error(ErrorType::CtStatusError);
        assert_eq!(stats.get_error_count(ErrorType::MalformedRecord), 2);
        assert_eq!(stats.get_error_count(ErrorType::CtStatusError), 1);
        assert_eq!(stats.total_errors(), 3);
    }

    #[test]
    fn test_processing_stats_concurrent_increments() {
        let stats = std::sync::Arc::new(ProcessingStats::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let stats = std::sync::Arc::clone(&stats);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        stats.increment_error(ErrorType::MalformedRecord);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(stats.get_error_count(ErrorType::MalformedRecord), 4000);
    }

    #[test]
    fn test_ct_error_maps_to_error_type() {
        assert_eq!(
            CtError::Status(503).error_type(),
            ErrorType::CtStatusError
        );
        assert_eq!(
            CtError::Decode(serde_json::from_str::<u8>("x").unwrap_err()).error_type(),
            ErrorType::CtDecodeError
        );
    }
}
