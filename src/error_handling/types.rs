//! Error type definitions.
//!
//! This module defines the error enums and the counted error categories used
//! throughout the application.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Fatal configuration errors. Raised before any scan driver starts.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No bulk input path was supplied.
    #[error("No input file given")]
    MissingInput,

    /// Neither domains nor networks to filter on: the bulk scan would dump everything.
    #[error("No valid domains (0) and IPs (0) parsed")]
    NoFilters,

    /// A domain/network list file could not be read.
    #[error("Error reading domain file {}: {source}", path.display())]
    ListFile {
        /// Path of the list file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The bulk input could not be opened.
    #[error("Error opening input {}: {source}", path.display())]
    InputFile {
        /// Path of the input file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The certificate transparency endpoint is not a URL.
    #[error("Invalid certificate transparency URL '{0}': {1}")]
    InvalidCtUrl(String, String),

    /// A zero request timeout would fail every query immediately.
    #[error("Certificate transparency timeout must be at least one second")]
    ZeroTimeout,
}

/// Failure of a single certificate transparency query.
#[derive(Error, Debug)]
pub enum CtError {
    /// Connection, timeout or body transfer failure.
    #[error("request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The log answered with a non-200 status.
    #[error("unexpected HTTP status {0}")]
    Status(u16),

    /// The body was not a JSON array of certificate entries.
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl CtError {
    /// The statistics bucket this failure is counted under.
    pub fn error_type(&self) -> ErrorType {
        match self {
            CtError::Request(_) => ErrorType::CtRequestError,
            CtError::Status(_) => ErrorType::CtStatusError,
            CtError::Decode(_) => ErrorType::CtDecodeError,
        }
    }
}

/// Recoverable problems counted during a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    /// Bulk line that is not a JSON record with a name
    MalformedRecord,
    /// I/O or decompression failure; ends the bulk source
    InputReadError,
    /// Certificate transparency connection or timeout failure
    CtRequestError,
    /// Certificate transparency non-200 answer
    CtStatusError,
    /// Certificate transparency body that is not a certificate list
    CtDecodeError,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    /// Human-readable name used in the end-of-run statistics.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::MalformedRecord => "Malformed record",
            ErrorType::InputReadError => "Input read error",
            ErrorType::CtRequestError => "Certificate transparency request error",
            ErrorType::CtStatusError => "Certificate transparency HTTP status error",
            ErrorType::CtDecodeError => "Certificate transparency decode error",
        }
    }
}
