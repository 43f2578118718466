use std::fs;
use std::io::{BufReader, ErrorKind};
use std::path::PathBuf;
use std::time::Duration;

use crate::permissions::Dataset;

use super::error::{DataError, NOT_FOUND};

/// Where the primary permissions document lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataLocation {
    File(PathBuf),
    Url(String),
}

impl DataLocation {
    pub fn parse(value: &str) -> Self {
        let trimmed = value.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_owned())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Self::File(path) => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            Self::Url(url) => url.clone(),
        }
    }
}

impl std::fmt::Display for DataLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Where a loaded dataset came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DataOrigin {
    Primary,
    /// The primary source failed; `missing` is true when it simply did not exist.
    Sample { missing: bool, reason: String },
}

#[derive(Clone, Debug)]
pub struct LoadedDataset {
    pub dataset: Dataset,
    pub origin: DataOrigin,
}

/// Parses and validates a permissions document.
pub fn parse_dataset(raw: &str, location: &DataLocation) -> Result<Dataset, DataError> {
    checked(serde_json::from_str(raw), location)
}

fn checked(
    parsed: serde_json::Result<Dataset>,
    location: &DataLocation,
) -> Result<Dataset, DataError> {
    let dataset = parsed.map_err(|error| {
        let reason = error.to_string();
        if error.is_io() {
            DataError::Unavailable {
                location: location.to_string(),
                reason: format!("failed reading response body: {reason}"),
            }
        } else {
            DataError::Malformed {
                location: location.to_string(),
                reason,
            }
        }
    })?;
    dataset.validate().map_err(|reason| DataError::Malformed {
        location: location.to_string(),
        reason,
    })?;
    Ok(dataset)
}

/// Reads the document at `location`. Response bodies are decoded as they
/// stream in, with no size cap.
pub fn fetch_dataset(location: &DataLocation, timeout: Duration) -> Result<Dataset, DataError> {
    let unavailable = |reason: String| DataError::Unavailable {
        location: location.to_string(),
        reason,
    };

    match location {
        DataLocation::File(path) => {
            let raw = fs::read_to_string(path).map_err(|error| {
                if error.kind() == ErrorKind::NotFound {
                    unavailable(NOT_FOUND.to_owned())
                } else {
                    unavailable(error.to_string())
                }
            })?;
            parse_dataset(&raw, location)
        }
        DataLocation::Url(url) => {
            let agent = ureq::AgentBuilder::new().timeout(timeout).build();
            let response = agent.get(url).call().map_err(|error| match error {
                ureq::Error::Status(404, _) => unavailable(NOT_FOUND.to_owned()),
                other => unavailable(other.to_string()),
            })?;
            checked(
                serde_json::from_reader(BufReader::new(response.into_reader())),
                location,
            )
        }
    }
}

/// Loads the primary dataset, falling back to the built-in sample on any error.
pub fn load_or_sample(location: &DataLocation, timeout: Duration) -> LoadedDataset {
    match fetch_dataset(location, timeout) {
        Ok(dataset) => {
            tracing::info!(
                %location,
                users = dataset.users.len(),
                roles = dataset.roles.len(),
                databases = dataset.databases.len(),
                "loaded permissions data"
            );
            LoadedDataset {
                dataset,
                origin: DataOrigin::Primary,
            }
        }
        Err(error) => {
            tracing::warn!(%error, "falling back to sample permissions data");
            LoadedDataset {
                dataset: Dataset::sample(),
                origin: DataOrigin::Sample {
                    missing: error.is_not_found(),
                    reason: error.to_string(),
                },
            }
        }
    }
}
