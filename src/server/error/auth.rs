use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Caller does not own the target guild.
    ///
    /// Checked before any mutating Discord call so an unauthorized request has no
    /// side effects. Results in a 403 Forbidden response.
    #[error("User {caller_id} is not the owner of guild {guild_id}")]
    NotGuildOwner {
        /// Discord user id supplied by the caller
        caller_id: u64,
        /// Target guild id
        guild_id: u64,
    },

    /// Discord rejected the supplied bot token.
    ///
    /// Surfaced when a read call returns 401. Results in a 401 Unauthorized response.
    #[error("Discord rejected the bot token while calling {endpoint}")]
    InvalidToken {
        /// Endpoint that returned 401
        endpoint: String,
    },
}

/// Converts authentication errors into HTTP responses.
///
/// Maps authentication errors to appropriate HTTP status codes and user-friendly error messages:
/// - `NotGuildOwner` → 403 Forbidden with "Forbidden: Not the server owner."
/// - `InvalidToken` → 401 Unauthorized with "Invalid bot token"
///
/// All errors are logged at debug level for diagnostics while keeping client-facing messages
/// generic to avoid information leakage.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::NotGuildOwner { .. } => (
                StatusCode::FORBIDDEN,
                Json(ErrorDto {
                    error: "Forbidden: Not the server owner.".to_string(),
                }),
            )
                .into_response(),
            Self::InvalidToken { .. } => (
                StatusCode::UNAUTHORIZED,
                Json(ErrorDto {
                    error: "Invalid bot token".to_string(),
                }),
            )
                .into_response(),
        }
    }
}
