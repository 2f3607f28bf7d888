//! Domain and network list files.
//!
//! One entry per line. A line that parses as an IP network (`10.0.0.0/8`, or a
//! bare address meaning that single host) is a network; anything else is a
//! domain. Blank lines and `#` comments are skipped.

use std::path::Path;

use ipnetwork::IpNetwork;

use crate::error_handling::ConfigError;

/// Parsed contents of a list file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListFile {
    /// Normalized domains, in file order
    pub domains: Vec<String>,
    /// Networks, in file order
    pub networks: Vec<IpNetwork>,
}

/// Reads and parses a list file.
///
/// # Errors
///
/// Returns `ConfigError::ListFile` if the file cannot be read.
pub async fn load_list_file(path: &Path) -> Result<ListFile, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::ListFile {
            path: path.to_path_buf(),
            source,
        })?;
    let list = parse_list(&content);
    log::debug!(
        "Read {} domains and {} networks from {}",
        list.domains.len(),
        list.networks.len(),
        path.display()
    );
    Ok(list)
}

/// Splits list file content into domains and networks.
pub fn parse_list(content: &str) -> ListFile {
    let mut list = ListFile::default();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if let Ok(network) = trimmed.parse::<IpNetwork>() {
            list.networks.push(network);
        } else if let Some(domain) = normalize_domain(trimmed) {
            list.domains.push(domain);
        }
    }
    list
}

/// Lower-cases a domain and strips a leading `*.` or `.`.
///
/// Returns `None` when nothing is left.
pub fn normalize_domain(raw: &str) -> Option<String> {
    let domain = raw.trim();
    let domain = domain
        .strip_prefix("*.")
        .or_else(|| domain.strip_prefix('.'))
        .unwrap_or(domain);
    if domain.is_empty() {
        None
    } else {
        Some(domain.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list_splits_domains_and_networks() {
        let list = parse_list("example.com\n10.0.0.0/8\nOther.COM\n192.0.2.7\n2001:db8::/32\n");
        assert_eq!(list.domains, vec!["example.com", "other.com"]);
        assert_eq!(
            list.networks,
            vec![
                "10.0.0.0/8".parse::<IpNetwork>().unwrap(),
                "192.0.2.7/32".parse::<IpNetwork>().unwrap(),
                "2001:db8::/32".parse::<IpNetwork>().unwrap(),
            ]
        );
    }

    #[test]
    fn test_parse_list_skips_blank_and_comment_lines() {
        let list = parse_list("# targets\n\n   \nexample.com\n  # indented comment\n");
        assert_eq!(list.domains, vec!["example.com"]);
        assert!(list.networks.is_empty());
    }

    #[test]
    fn test_parse_list_handles_crlf() {
        let list = parse_list("example.com\r\nexample.org\r\n");
        assert_eq!(list.domains, vec!["example.com", "example.org"]);
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("Example.COM"), Some("example.com".to_string()));
        assert_eq!(normalize_domain(".example.com"), Some("example.com".to_string()));
        assert_eq!(normalize_domain("*.example.com"), Some("example.com".to_string()));
        assert_eq!(normalize_domain("."), None);
        assert_eq!(normalize_domain("  "), None);
    }

    #[tokio::test]
    async fn test_load_list_file_missing() {
        let err = load_list_file(Path::new("/nonexistent/fdns_filter/list.txt"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::ListFile { .. }));
    }

    #[tokio::test]
    async fn test_load_list_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("targets.txt");
        std::fs::write(&path, "example.com\n10.0.0.0/8\n").unwrap();

        let list = load_list_file(&path).await.unwrap();
        assert_eq!(list.domains, vec!["example.com"]);
        assert_eq!(list.networks.len(), 1);
    }
}
