use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

use serde::Deserialize;

use super::error::DataError;

const NO_UPDATES: &str = "No updates";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PollSignal {
    NoUpdates,
    Changed(String),
}

#[derive(Debug, Deserialize)]
struct UpdateNotification {
    #[serde(default)]
    message: String,
}

#[derive(Clone, Debug)]
pub struct PollConfig {
    pub url: String,
    pub interval: Duration,
    pub timeout: Duration,
}

pub fn interpret_notification(body: &str, url: &str) -> Result<PollSignal, DataError> {
    let notification: UpdateNotification =
        serde_json::from_str(body).map_err(|error| DataError::PollUnavailable {
            url: url.to_owned(),
            reason: format!("unexpected notification body: {error}"),
        })?;

    if notification.message == NO_UPDATES {
        Ok(PollSignal::NoUpdates)
    } else {
        Ok(PollSignal::Changed(notification.message))
    }
}

pub fn check_for_update(agent: &ureq::Agent, url: &str) -> Result<PollSignal, DataError> {
    let unavailable = |reason: String| DataError::PollUnavailable {
        url: url.to_owned(),
        reason,
    };

    let body = agent
        .get(url)
        .call()
        .map_err(|error| unavailable(error.to_string()))?
        .into_string()
        .map_err(|error| unavailable(error.to_string()))?;
    interpret_notification(&body, url)
}

/// Spawns the background poller. Only `Changed` signals are forwarded; failed
/// polls are logged and retried on the next interval. The thread stops once
/// the returned receiver is dropped.
pub fn spawn_update_poller(
    config: PollConfig,
    notify: impl Fn() + Send + 'static,
) -> Receiver<PollSignal> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let agent = ureq::AgentBuilder::new().timeout(config.timeout).build();
        tracing::info!(url = %config.url, interval = ?config.interval, "update poller started");

        loop {
            thread::sleep(config.interval);

            match check_for_update(&agent, &config.url) {
                Ok(PollSignal::NoUpdates) => tracing::trace!("no permission updates"),
                Ok(signal @ PollSignal::Changed(_)) => {
                    tracing::info!(?signal, "permission update announced");
                    if tx.send(signal).is_err() {
                        break;
                    }
                    notify();
                }
                Err(error) => tracing::debug!(%error, "update poll skipped"),
            }
        }

        tracing::debug!("update poller stopped");
    });

    rx
}
