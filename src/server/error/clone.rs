use thiserror::Error;

use crate::server::error::discord::ApiError;

/// Stage-level failure that stops a clone run.
///
/// Item-level failures never produce a `CloneError`; they are recorded in the
/// `CloneReport` and the run continues.
#[derive(Error, Debug)]
pub enum CloneError {
    /// A snapshot read exhausted its retries.
    ///
    /// The pipeline cannot continue without knowing what to clone. This is distinct
    /// from a read that legitimately returned an empty list.
    #[error("Failed to fetch {endpoint}")]
    FetchFailed {
        /// Endpoint that could not be read
        endpoint: String,
        /// Last error returned for the endpoint
        #[source]
        source: ApiError,
    },

    /// The caller aborted the run, for example by disconnecting.
    #[error("Clone cancelled before completion")]
    Cancelled,

    /// The run did not finish before its configured deadline.
    #[error("Clone did not complete before the deadline")]
    DeadlineExceeded,
}

impl CloneError {
    /// Wraps a failed snapshot read.
    pub fn fetch_failed(source: ApiError) -> Self {
        Self::FetchFailed {
            endpoint: source.endpoint.clone(),
            source,
        }
    }
}
