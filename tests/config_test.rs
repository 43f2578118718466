//! Command-line configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use grant_graph::config::Config;
use grant_graph::permissions::Locale;
use grant_graph::source::DataLocation;

#[test]
fn test_defaults_point_at_local_files_and_notifier() {
    let config = Config::try_parse_from(["grant-graph"]).unwrap();

    assert_eq!(
        config.data_location(),
        DataLocation::File(PathBuf::from("permissions_data.json"))
    );
    assert_eq!(config.fetch_timeout(), Duration::from_secs(10));
    assert_eq!(config.export_dir, PathBuf::from("."));
    assert_eq!(config.locale, Locale::En);
    assert_eq!(config.log_level, "info");

    let poll = config.poll_config().expect("polling enabled by default");
    assert_eq!(poll.url, "http://localhost:8081/update-notification");
    assert_eq!(poll.interval, Duration::from_secs(30));
}

#[test]
fn test_explicit_flags_override_defaults() {
    let config = Config::try_parse_from([
        "grant-graph",
        "--data",
        "https://example.com/permissions_data.json",
        "--poll-url",
        "http://127.0.0.1:9000/update-notification",
        "--poll-interval-secs",
        "5",
        "--fetch-timeout-secs",
        "3",
        "--export-dir",
        "/tmp/exports",
        "--locale",
        "ja",
        "--log-level",
        "debug",
    ])
    .unwrap();

    assert_eq!(
        config.data_location(),
        DataLocation::Url("https://example.com/permissions_data.json".to_owned())
    );
    assert_eq!(config.fetch_timeout(), Duration::from_secs(3));
    assert_eq!(config.export_dir, PathBuf::from("/tmp/exports"));
    assert_eq!(config.locale, Locale::Ja);
    assert_eq!(config.log_level, "debug");

    let poll = config.poll_config().expect("polling enabled");
    assert_eq!(poll.url, "http://127.0.0.1:9000/update-notification");
    assert_eq!(poll.interval, Duration::from_secs(5));
    assert_eq!(poll.timeout, Duration::from_secs(3));
}

#[test]
fn test_no_poll_disables_polling() {
    let config = Config::try_parse_from(["grant-graph", "--no-poll"]).unwrap();
    assert!(config.poll_config().is_none());
}

#[test]
fn test_blank_poll_url_disables_polling() {
    let config = Config::try_parse_from(["grant-graph", "--poll-url", " "]).unwrap();
    assert!(config.poll_config().is_none());
}

#[test]
fn test_zero_durations_are_clamped() {
    let config = Config::try_parse_from([
        "grant-graph",
        "--poll-interval-secs",
        "0",
        "--fetch-timeout-secs",
        "0",
        "--poll-url",
        "http://localhost:8081/update-notification",
    ])
    .unwrap();

    assert_eq!(config.fetch_timeout(), Duration::from_secs(1));
    let poll = config.poll_config().expect("polling enabled");
    assert_eq!(poll.interval, Duration::from_secs(1));
}

#[test]
fn test_unknown_locale_is_rejected() {
    assert!(Config::try_parse_from(["grant-graph", "--locale", "fr"]).is_err());
}
