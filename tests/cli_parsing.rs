//! Command-line parsing with both flag spellings.

use std::path::PathBuf;

use clap::Parser;
use fdns_filter::{normalize_args, Config, LogFormat};

fn parse(args: &[&str]) -> Result<Config, clap::Error> {
    Config::try_parse_from(normalize_args(args.iter().copied()))
}

#[test]
fn test_go_style_flags() {
    let config = parse(&[
        "fdns_filter",
        "-file",
        "fdns_a.json.gz",
        "-domains=targets.txt",
        "-bdomains",
        "exclude.txt",
        "-catransoff",
    ])
    .unwrap();

    assert_eq!(config.file, PathBuf::from("fdns_a.json.gz"));
    assert_eq!(config.domains, Some(PathBuf::from("targets.txt")));
    assert_eq!(config.bdomains, Some(PathBuf::from("exclude.txt")));
    assert!(config.catransoff);
}

#[test]
fn test_mixed_spellings_and_defaults() {
    let config = parse(&[
        "fdns_filter",
        "--file",
        "-",
        "-domains",
        "targets.txt",
        "--log-format",
        "json",
    ])
    .unwrap();

    assert_eq!(config.file, PathBuf::from("-"));
    assert!(!config.catransoff);
    assert!(matches!(config.log_format, LogFormat::Json));
    assert_eq!(config.progress_interval, 1_000_000);
    assert_eq!(config.ct_url, "https://crt.sh/");
}

#[test]
fn test_missing_file_is_a_usage_error() {
    let err = parse(&["fdns_filter", "-domains", "targets.txt"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    assert_ne!(err.exit_code(), 0);
}
