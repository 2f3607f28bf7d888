//! Logger initialization.
//!
//! All diagnostics go to stderr. Stdout is reserved for matched hostnames so
//! the output can be piped straight into other tools.

use std::io::{IsTerminal, Write};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first and the `level` argument overrides it, so
/// `RUST_LOG=debug` works for quick debugging while `--log-level` stays
/// authoritative. Colors are only emitted when stderr is a terminal.
///
/// ```bash
/// RUST_LOG=debug fdns_filter -file fdns.json.gz -domains targets.txt
/// fdns_filter -file fdns.json.gz -domains targets.txt -log-format json 2> scan.log
/// ```
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(std::io::stderr().is_terminal());

    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stderr);
    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    builder.filter_module("hyper_util", LevelFilter::Info);
    builder.filter_module("fdns_filter", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{{\"ts\":{},\"level\":\"{}\",\"target\":\"{}\",\"msg\":{}}}",
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    serde_json::to_string(&record.args().to_string())
                        .unwrap_or_else(|_| "\"\"".into())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let colored_level = match level {
                    log::Level::Error => level.to_string().red(),
                    log::Level::Warn => level.to_string().yellow(),
                    log::Level::Info => level.to_string().green(),
                    log::Level::Debug => level.to_string().blue(),
                    log::Level::Trace => level.to_string().purple(),
                };
                writeln!(
                    buf,
                    "{} [{}] {}",
                    chrono::Local::now()
                        .format("%Y/%m/%d %H:%M:%S")
                        .to_string()
                        .dimmed(),
                    colored_level,
                    record.args()
                )
            });
        }
    }

    // try_init so tests that initialize more than once don't panic
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}
