use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::permissions::Locale;
use crate::source::{DataLocation, PollConfig};

#[derive(Clone, Debug, Parser)]
#[command(author, version, about)]
pub struct Config {
    /// Permissions document: a file path or an http(s) URL.
    #[arg(long, env = "GRANT_GRAPH_DATA", default_value = "permissions_data.json")]
    pub data: String,

    /// Endpoint announcing that a fresh permissions document is available.
    #[arg(
        long,
        env = "GRANT_GRAPH_POLL_URL",
        default_value = "http://localhost:8081/update-notification"
    )]
    pub poll_url: String,

    #[arg(long, default_value_t = 30)]
    pub poll_interval_secs: u64,

    /// Never poll for update notifications.
    #[arg(long)]
    pub no_poll: bool,

    #[arg(long, default_value_t = 10)]
    pub fetch_timeout_secs: u64,

    /// Directory exports are written to.
    #[arg(long, env = "GRANT_GRAPH_EXPORT_DIR", default_value = ".")]
    pub export_dir: PathBuf,

    #[arg(long, env = "GRANT_GRAPH_LOCALE", value_enum, default_value_t = Locale::En)]
    pub locale: Locale,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn data_location(&self) -> DataLocation {
        DataLocation::parse(&self.data)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs.max(1))
    }

    pub fn poll_config(&self) -> Option<PollConfig> {
        if self.no_poll || self.poll_url.trim().is_empty() {
            return None;
        }
        Some(PollConfig {
            url: self.poll_url.clone(),
            interval: Duration::from_secs(self.poll_interval_secs.max(1)),
            timeout: self.fetch_timeout(),
        })
    }
}
