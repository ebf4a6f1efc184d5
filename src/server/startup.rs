use std::time::Duration;

use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;

use crate::server::{config::Config, error::AppError};

/// Timeout for a single CDN download, such as the source guild icon.
const HTTP_CLIENT_TIMEOUT: Duration = Duration::from_secs(30);

/// Builds the shared HTTP client used for requests outside the Discord API.
///
/// Redirects are disabled to keep icon downloads on the CDN host the URL names.
///
/// # Returns
/// - `Ok(reqwest::Client)` - Configured client
/// - `Err(AppError::ReqwestErr)` - Client could not be built, e.g. no TLS backend
pub fn setup_reqwest_client() -> Result<reqwest::Client, AppError> {
    let client = reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .timeout(HTTP_CLIENT_TIMEOUT)
        .build()?;

    Ok(client)
}

/// Binds the listener for the HTTP server.
///
/// # Arguments
/// - `config` - Application configuration containing the bind address
///
/// # Returns
/// - `Ok(TcpListener)` - Listener bound to `config.bind_address`
/// - `Err(AppError::IoErr)` - Address in use or not permitted
pub async fn bind_listener(config: &Config) -> Result<TcpListener, AppError> {
    let listener = TcpListener::bind(config.bind_address).await?;

    tracing::info!("Listening on {}", listener.local_addr()?);

    Ok(listener)
}

/// Completes when the process receives Ctrl+C, then cancels `shutdown`.
///
/// Used as the graceful shutdown trigger. Cancelling the token makes in-flight clone
/// runs stop at their next stage barrier so their connections can drain.
pub async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
    shutdown.cancel();
}
