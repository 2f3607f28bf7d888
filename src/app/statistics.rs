//! Statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ProcessingStats};
use crate::scan::SourceReport;

/// Prints the counts of skipped records and failed queries to the log.
pub fn print_error_statistics(error_stats: &ProcessingStats) {
    let total_errors = error_stats.total_errors();
    if total_errors == 0 {
        return;
    }

    info!("Error Counts ({} total):", total_errors);
    for error_type in ErrorType::iter() {
        let count = error_stats.get_error_count(error_type);
        if count > 0 {
            info!("   {}: {}", error_type.as_str(), count);
        }
    }
}

/// Prints one line per source with its processed and matched counts.
pub fn print_summary(sources: &[SourceReport]) {
    for source in sources {
        info!(
            "{}: {} processed, {} valid in {:.1}s",
            source.label, source.processed, source.matched, source.elapsed_seconds
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_error_statistics_no_errors() {
        let stats = ProcessingStats::new();
        print_error_statistics(&stats);
    }

    #[test]
    fn test_print_error_statistics_with_errors() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::MalformedRecord);
        stats.increment_error(ErrorType::CtRequestError);
        print_error_statistics(&stats);
    }

    #[test]
    fn test_print_summary() {
        print_summary(&[SourceReport {
            label: "FDNS",
            processed: 2,
            matched: 1,
            elapsed_seconds: 0.5,
        }]);
    }
}
