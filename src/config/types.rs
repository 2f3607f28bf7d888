//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use crate::config::constants::{
    CT_TIMEOUT_SECS, DEFAULT_CT_URL, DEFAULT_USER_AGENT, GO_STYLE_FLAGS, PROGRESS_INTERVAL,
};
use crate::error_handling::ConfigError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Scan configuration.
///
/// Parsed from the command line by `clap`, or constructed programmatically
/// through `Default` when the crate is used as a library.
///
/// # Examples
///
/// ```bash
/// # Bulk scan restricted to the domains and networks in targets.txt
/// fdns_filter -file fdns_a.json.gz -domains targets.txt
///
/// # Same, minus an internal zone, without querying crt.sh
/// fdns_filter -file fdns_a.json.gz -domains targets.txt -bdomains internal.txt -catransoff
/// ```
///
/// ```no_run
/// use fdns_filter::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("fdns_a.json.gz"),
///     domains: Some(PathBuf::from("targets.txt")),
///     catransoff: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "fdns_filter",
    version,
    about = "Filters FDNS dumps and certificate transparency logs for the hostnames of target organizations."
)]
pub struct Config {
    /// JSON file to parse from, gzip allowed ("-" reads stdin)
    #[arg(long, value_parser)]
    pub file: PathBuf,

    /// File containing 2nd level domains (and CIDR networks) to include
    #[arg(long, value_parser)]
    pub domains: Option<PathBuf>,

    /// File containing 2nd level domains to exclude
    #[arg(long, value_parser)]
    pub bdomains: Option<PathBuf>,

    /// Deactivate querying certificate transparency logs (crt.sh)
    #[arg(long)]
    pub catransoff: bool,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds for certificate transparency queries
    #[arg(long, default_value_t = CT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// HTTP User-Agent header value for certificate transparency queries
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Certificate transparency search endpoint
    #[arg(long, default_value = DEFAULT_CT_URL)]
    pub ct_url: String,

    /// Number of bulk records between progress log lines (0 disables)
    #[arg(long, default_value_t = PROGRESS_INTERVAL)]
    pub progress_interval: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from("fdns.json.gz"),
            domains: None,
            bdomains: None,
            catransoff: false,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: CT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            ct_url: DEFAULT_CT_URL.to_string(),
            progress_interval: PROGRESS_INTERVAL,
        }
    }
}

impl Config {
    /// Checks the settings that can be verified without touching the filesystem.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when the input path is empty, the certificate
    /// transparency endpoint is not a valid URL, or the request timeout is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.file.as_os_str().is_empty() {
            return Err(ConfigError::MissingInput);
        }
        if !self.catransoff {
            reqwest::Url::parse(&self.ct_url)
                .map_err(|e| ConfigError::InvalidCtUrl(self.ct_url.clone(), e.to_string()))?;
            if self.timeout_seconds == 0 {
                return Err(ConfigError::ZeroTimeout);
            }
        }
        Ok(())
    }

    /// Per-request timeout for certificate transparency queries.
    pub fn ct_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Rewrites Go-style single-dash long flags (`-file x`, `-catransoff`) into
/// the double-dash form clap expects. Everything after a bare `--` is left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut passthrough = false;
    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough {
                return arg;
            }
            let Some(text) = arg.to_str() else {
                return arg;
            };
            if text == "--" {
                passthrough = true;
                return arg;
            }
            match text.strip_prefix('-') {
                Some(rest) if !rest.starts_with('-') => {
                    let flag = rest.split('=').next().unwrap_or(rest);
                    if GO_STYLE_FLAGS.contains(&flag) {
                        OsString::from(format!("-{text}"))
                    } else {
                        arg
                    }
                }
                _ => arg,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        Config::try_parse_from(normalize_args(args.iter().copied()))
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_go_style_flags_are_normalized() {
        let args = normalize_args(["fdns_filter", "-file", "a.json", "-catransoff"]);
        assert_eq!(args, vec!["fdns_filter", "--file", "a.json", "--catransoff"]);
    }

    #[test]
    fn test_normalize_keeps_values_and_unknown_flags() {
        // A value that happens to start with a dash is not one of our flags
        let args = normalize_args(["fdns_filter", "-file=-", "-x", "--domains", "d.txt"]);
        assert_eq!(args, vec!["fdns_filter", "--file=-", "-x", "--domains", "d.txt"]);
    }

    #[test]
    fn test_normalize_stops_after_double_dash() {
        let args = normalize_args(["fdns_filter", "--", "-file"]);
        assert_eq!(args, vec!["fdns_filter", "--", "-file"]);
    }

    #[test]
    fn test_parse_all_flags() {
        let config = parse(&[
            "fdns_filter",
            "-file",
            "fdns.json.gz",
            "-domains",
            "allow.txt",
            "-bdomains",
            "deny.txt",
            "-catransoff",
        ])
        .expect("flags should parse");
        assert_eq!(config.file, PathBuf::from("fdns.json.gz"));
        assert_eq!(config.domains, Some(PathBuf::from("allow.txt")));
        assert_eq!(config.bdomains, Some(PathBuf::from("deny.txt")));
        assert!(config.catransoff);
        assert_eq!(config.progress_interval, PROGRESS_INTERVAL);
    }

    #[test]
    fn test_missing_file_is_a_usage_error() {
        let err = parse(&["fdns_filter", "-domains", "allow.txt"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(!config.catransoff);
        assert_eq!(config.timeout_seconds, CT_TIMEOUT_SECS);
        assert_eq!(config.ct_url, DEFAULT_CT_URL);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_file() {
        let config = Config {
            file: PathBuf::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::MissingInput)));
    }

    #[test]
    fn test_validate_rejects_bad_ct_url_only_when_enabled() {
        let mut config = Config {
            ct_url: "not a url".to_string(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidCtUrl(..))
        ));

        config.catransoff = true;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let config = Config {
            timeout_seconds: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::ZeroTimeout)));
    }
}
