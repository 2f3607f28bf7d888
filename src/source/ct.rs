//! Certificate transparency source.
//!
//! Queries a crt.sh-compatible search endpoint once per allowed domain:
//!
//! ```text
//! GET https://crt.sh/?q=%example.com&output=json
//! ```
//!
//! The response is a JSON array of certificates whose `name_value` field holds
//! one or more newline-separated subject names. A failed query is logged and
//! counted, and the source moves on to the next domain.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use log::{info, warn};
use reqwest::StatusCode;
use serde::Deserialize;

use super::{DnsEntry, RecordSource};
use crate::error_handling::{CtError, ProcessingStats};

/// Label used in logs for the certificate transparency source.
pub const CT_LABEL: &str = "CA transparency";

#[derive(Debug, Deserialize)]
struct CertificateEntry {
    #[serde(default)]
    name_value: String,
}

/// Thin client for a crt.sh-style certificate search endpoint.
#[derive(Debug, Clone)]
pub struct CtLogClient {
    client: Arc<reqwest::Client>,
    base_url: String,
}

impl CtLogClient {
    /// Client for the search endpoint at `base_url` (e.g. `https://crt.sh/`).
    pub fn new(client: Arc<reqwest::Client>, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fetches the subject names of every logged certificate under `domain`.
    ///
    /// Returns the number of certificates alongside the names they carry.
    ///
    /// # Errors
    ///
    /// Returns `CtError::Request` on transport failures or timeouts,
    /// `CtError::Status` on any status other than 200, and `CtError::Decode`
    /// when the body is not a JSON array of certificate objects.
    pub async fn fetch_names(&self, domain: &str) -> Result<(usize, Vec<String>), CtError> {
        let pattern = format!("%{domain}");
        let response = self
            .client
            .get(&self.base_url)
            .query(&[("q", pattern.as_str()), ("output", "json")])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(CtError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let certificates: Vec<CertificateEntry> = serde_json::from_slice(&body)?;
        let names = certificates
            .iter()
            .flat_map(|cert| split_names(&cert.name_value))
            .collect();
        Ok((certificates.len(), names))
    }
}

/// Splits a `name_value` field into hostnames.
///
/// Wildcard labels (`*.`) are stripped since they are not resolvable names;
/// blank entries are dropped.
pub fn split_names(name_value: &str) -> Vec<String> {
    name_value
        .split('\n')
        .map(str::trim)
        .map(|name| name.strip_prefix("*.").unwrap_or(name))
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builds the certificate transparency source over `domains`.
///
/// Queries run one after another, lazily, as the scan driver pulls records.
pub fn ct_source(
    client: CtLogClient,
    domains: Vec<String>,
    stats: Arc<ProcessingStats>,
) -> RecordSource {
    let client = Arc::new(client);
    let entries = stream::iter(domains)
        .then(move |domain| {
            let client = Arc::clone(&client);
            let stats = Arc::clone(&stats);
            async move {
                match client.fetch_names(&domain).await {
                    Ok((certificates, names)) => {
                        info!(
                            "{}: Got {} certificates for '{}'",
                            CT_LABEL, certificates, domain
                        );
                        names
                    }
                    Err(e) => {
                        warn!("Error querying {} for '{}': {}", CT_LABEL, domain, e);
                        stats.increment_error(e.error_type());
                        Vec::new()
                    }
                }
            }
        })
        .flat_map(|names| stream::iter(names.into_iter().map(DnsEntry::from_name)));

    RecordSource::new(CT_LABEL, 0, entries)
}
