use thiserror::Error;

/// Failures at the data-source boundary. None of them are fatal to the viewer.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("permissions data unavailable at {location}: {reason}")]
    Unavailable { location: String, reason: String },
    #[error("permissions data at {location} is malformed: {reason}")]
    Malformed { location: String, reason: String },
    #[error("update notification endpoint {url} unavailable: {reason}")]
    PollUnavailable { url: String, reason: String },
}

impl DataError {
    /// Whether the source itself was missing rather than unreadable.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Unavailable { reason, .. } if reason == NOT_FOUND)
    }
}

pub(super) const NOT_FOUND: &str = "not found";
