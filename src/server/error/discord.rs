use std::time::Duration;
use thiserror::Error;

use crate::server::data::retry::RetryableError;

/// A single Discord API call that failed.
///
/// Carries the endpoint for error messages and a [`RetryableError`] classification that
/// the retry policy uses to decide whether another attempt can succeed.
#[derive(Error, Debug, Clone)]
#[error("{endpoint} failed ({kind:?}): {message}")]
pub struct ApiError {
    /// Method and route of the failed call, e.g. `POST /guilds/1/channels`
    pub endpoint: String,
    /// HTTP status returned by Discord, if a response was received
    pub status: Option<u16>,
    /// Retry classification of the failure
    pub kind: RetryableError,
    /// Human-readable cause
    pub message: String,
    /// Minimum wait requested by Discord before the next attempt
    pub retry_after: Option<Duration>,
}

impl ApiError {
    /// Creates an error for a call that received an unsuccessful HTTP status.
    pub fn from_status(
        endpoint: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            status: Some(status),
            kind: RetryableError::from_status_code(status),
            message: message.into(),
            retry_after: None,
        }
    }

    /// Creates an error for a call that never produced a response.
    pub fn network(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            status: None,
            kind: RetryableError::Network,
            message: message.into(),
            retry_after: None,
        }
    }

    /// Classifies a Serenity error returned by an HTTP call.
    ///
    /// Unsuccessful responses are classified by status code. Other HTTP-level failures
    /// (connection, TLS, timeouts) are treated as network errors; anything outside the
    /// HTTP layer, such as a response that fails to deserialize, is not retried.
    pub fn from_serenity(endpoint: impl Into<String>, err: serenity::Error) -> Self {
        let message = err.to_string();

        match &err {
            serenity::Error::Http(http_err) => match http_err.status_code() {
                Some(status) => Self::from_status(endpoint, status.as_u16(), message),
                None => Self::network(endpoint, message),
            },
            _ => Self {
                endpoint: endpoint.into(),
                status: None,
                kind: RetryableError::Unknown,
                message,
                retry_after: None,
            },
        }
    }

    /// Classifies a reqwest error from a direct download.
    pub fn from_reqwest(endpoint: impl Into<String>, err: reqwest::Error) -> Self {
        Self {
            endpoint: endpoint.into(),
            status: err.status().map(|status| status.as_u16()),
            kind: RetryableError::from_reqwest_error(&err),
            message: err.to_string(),
            retry_after: None,
        }
    }

    /// Sets the minimum wait Discord asked for before retrying.
    pub fn with_retry_after(mut self, retry_after: Duration) -> Self {
        self.retry_after = Some(retry_after);
        self
    }

    /// Returns true if repeating the call may succeed.
    pub fn is_retryable(&self) -> bool {
        self.kind.should_retry()
    }
}
