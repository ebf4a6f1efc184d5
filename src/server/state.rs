//! Application state shared across all request handlers.
//!
//! This module defines the `AppState` struct which holds the shared resources needed by
//! the clone endpoints. The state is initialized once during startup and then cloned
//! for each request handler through Axum's state extraction.
//!
//! The state includes:
//! - Loaded configuration for concurrency, retry and deadline settings
//! - HTTP client used to download guild icons
//! - Shutdown token that every clone run is derived from

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::server::config::Config;

/// Application state containing shared resources and dependencies.
///
/// All fields are cheap to clone: `Config` sits behind an `Arc`, while
/// `reqwest::Client` and `CancellationToken` share their state internally.
///
/// Discord clients are not part of the state. Every request carries its own bot token,
/// so the Discord handle is built per request.
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded from the environment at startup.
    pub config: Arc<Config>,

    /// HTTP client for fetching guild icons from the Discord CDN.
    ///
    /// Configured without redirects and with a request timeout.
    pub http_client: reqwest::Client,

    /// Cancelled on shutdown.
    ///
    /// Each clone run uses a child token, so an in-flight run stops at its next stage
    /// barrier and answers with its partial report.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `config` - Configuration loaded at startup
    /// - `http_client` - HTTP client for external requests
    /// - `shutdown` - Token cancelled when the server shuts down
    ///
    /// # Returns
    /// - `AppState` - Initialized application state ready for use
    pub fn new(config: Config, http_client: reqwest::Client, shutdown: CancellationToken) -> Self {
        Self {
            config: Arc::new(config),
            http_client,
            shutdown,
        }
    }
}
