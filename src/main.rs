mod model;
mod server;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::server::{config::Config, error::AppError, router, startup, state::AppState};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("guild_cloner=info,tower_http=info")),
        )
        .init();

    let config = Config::from_env()?;
    let http_client = startup::setup_reqwest_client()?;
    let listener = startup::bind_listener(&config).await?;

    tracing::info!("Starting server");

    let shutdown = CancellationToken::new();
    let app = router::router(AppState::new(config, http_client, shutdown.clone()));

    axum::serve(listener, app)
        .with_graceful_shutdown(startup::shutdown_signal(shutdown))
        .await?;

    Ok(())
}
