//! Record filtering: the match predicate and the filter lists it runs against.
//!
//! A record is kept when its value falls inside one of the configured networks,
//! or when its name sits under one of the allowed domains, unless the name
//! also sits under a denied domain. See [`is_valid`] for the exact order.
//!
//! Key items:
//! - [`FilterSet`] - allow list, deny list and networks, shared read-only by every scan driver
//! - [`is_valid`] - the match predicate
//! - [`is_allowed`] - label-aligned domain suffix match

mod loader;

use std::net::IpAddr;
use std::path::Path;

use ipnetwork::IpNetwork;
use log::{info, warn};

use crate::error_handling::ConfigError;
use crate::source::DnsEntry;

pub use loader::{load_list_file, normalize_domain, parse_list, ListFile};

/// The three filter lists of a scan.
///
/// Loaded once before any driver starts and shared behind an `Arc`; never
/// mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterSet {
    /// Domains whose names (and subdomains) are kept
    pub allow: Vec<String>,
    /// Domains whose names (and subdomains) are dropped, even when allowed
    pub deny: Vec<String>,
    /// Networks whose addresses are kept regardless of name
    pub prefixes: Vec<IpNetwork>,
}

impl FilterSet {
    /// Builds a filter set from already-normalized lists.
    pub fn new(allow: Vec<String>, deny: Vec<String>, prefixes: Vec<IpNetwork>) -> Self {
        Self {
            allow,
            deny,
            prefixes,
        }
    }

    /// Loads the allow list file and the deny list file.
    ///
    /// Networks in the allow file become the prefix set. The deny list only
    /// applies to names, so networks found in the deny file are ignored.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ListFile` if either file cannot be read.
    pub async fn load(
        allow_path: Option<&Path>,
        deny_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut filters = FilterSet::default();

        if let Some(path) = allow_path {
            let list = load_list_file(path).await?;
            info!("Limiting to {} 2nd-lvl domains.", list.domains.len());
            if !list.networks.is_empty() {
                info!("Limiting to {} IP networks.", list.networks.len());
            }
            filters.allow = list.domains;
            filters.prefixes = list.networks;
        }

        if let Some(path) = deny_path {
            let list = load_list_file(path).await?;
            info!(
                "Limiting to {} blacklisted 2nd-lvl domains.",
                list.domains.len()
            );
            if !list.networks.is_empty() {
                warn!(
                    "Ignoring {} IP networks in {}: the deny list only applies to names",
                    list.networks.len(),
                    path.display()
                );
            }
            filters.deny = list.domains;
        }

        Ok(filters)
    }

    /// True when nothing narrows the dataset down: no allowed domain and no network.
    pub fn is_unrestricted(&self) -> bool {
        self.allow.is_empty() && self.prefixes.is_empty()
    }

    /// Applies [`is_valid`] with this set's lists.
    pub fn matches(&self, entry: &DnsEntry) -> bool {
        is_valid(entry, &self.allow, &self.deny, &self.prefixes)
    }
}

/// Decides whether a record belongs to the targets.
///
/// Evaluation order, each step short-circuiting:
/// 1. With networks configured, a value inside any of them is kept outright.
///    Otherwise the record is dropped when there is no allow list, and falls
///    through to the name checks when there is one.
/// 2. With an allow list, the name must sit under one of its domains.
/// 3. With a deny list, a name under one of its domains is dropped.
/// 4. Anything left is kept.
pub fn is_valid(
    entry: &DnsEntry,
    allow: &[String],
    deny: &[String],
    prefixes: &[IpNetwork],
) -> bool {
    if !prefixes.is_empty() {
        if let Ok(ip) = entry.value.parse::<IpAddr>() {
            if prefixes.iter().any(|network| network.contains(ip)) {
                return true;
            }
        }

        if allow.is_empty() {
            return false;
        }
    }

    if !allow.is_empty() && !is_allowed(allow, &entry.name) {
        return false;
    }

    if !deny.is_empty() && is_allowed(deny, &entry.name) {
        return false;
    }

    true
}

/// True if `name` equals one of `domains` or is a subdomain of it.
///
/// The suffix has to start on a label boundary: `example.com` covers
/// `www.example.com` but not `notexample.com`. Entries given with a leading
/// dot (`.example.com`) match subdomains only. Comparison is byte-exact; list
/// files are lower-cased when loaded.
pub fn is_allowed(domains: &[String], name: &str) -> bool {
    domains.iter().any(|domain| suffix_matches(name, domain))
}

fn suffix_matches(name: &str, domain: &str) -> bool {
    if domain.is_empty() {
        return false;
    }
    match name.strip_suffix(domain) {
        Some("") => true,
        Some(rest) => domain.starts_with('.') || rest.ends_with('.'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
