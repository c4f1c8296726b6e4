use thiserror::Error;

/// The single failure signal for every outbound call.
///
/// Transport failures, non-success statuses and unreadable response bodies
/// all collapse into this one type. Callers show a generic notice and let
/// the user retry the action.
#[derive(Debug, Error)]
#[error("request failed: {reason}")]
pub struct RequestError {
    reason: String,
}

impl RequestError {
    pub(crate) fn status(status: reqwest::StatusCode) -> Self {
        Self {
            reason: format!("server returned {status}"),
        }
    }

    pub(crate) fn malformed(detail: impl Into<String>) -> Self {
        Self {
            reason: detail.into(),
        }
    }
}

impl From<reqwest::Error> for RequestError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            reason: err.to_string(),
        }
    }
}
