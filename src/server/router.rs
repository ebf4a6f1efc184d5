use axum::{http::Method, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::server::{
    controller::clone::{clone_channels, clone_guild, clone_roles, openapi, teardown_guild},
    state::AppState,
};

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(Any);

    Router::new()
        .route("/api/clone", get(clone_guild))
        .route("/api/clone/channels", get(clone_channels))
        .route("/api/clone/roles", get(clone_roles))
        .route("/api/teardown", get(teardown_guild))
        .route("/api/openapi.json", get(openapi))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
