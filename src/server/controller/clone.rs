use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tokio::time::Instant;
use utoipa::OpenApi;

use crate::{
    model::{
        api::ErrorDto,
        clone::{CloneQueryDto, CloneReportDto},
    },
    server::{
        config::Config,
        data::{
            discord::{RetryingDiscordApi, SerenityDiscordApi},
            retry::RetryPolicy,
        },
        error::AppError,
        model::clone::{CloneParams, CloneReport, TeardownParams},
        service::clone::{context::CloneContext, CloneService, CloneSettings},
        state::AppState,
    },
};

/// Tag for grouping clone endpoints in OpenAPI documentation
pub static CLONE_TAG: &str = "clone";

type DiscordClient = RetryingDiscordApi<SerenityDiscordApi>;

/// Clone a guild into another guild.
///
/// Reads the channels, roles and settings of the source guild and recreates them in the
/// target guild. With `destructive=true` every channel and role of the target is deleted
/// first, which requires the caller to own the target guild. When the run finishes a
/// summary is posted into a new channel of the target guild unless `announce=false`.
///
/// # Arguments
/// - `state` - Application state with configuration and HTTP client
/// - `query` - Bot token, guild ids, caller id and flags
///
/// # Returns
/// - `200 OK` - Pipeline completed; `errors` lists per-item failures
/// - `207 Multi-Status` - Same as 200 when multi-status answers are enabled and `errors`
///   is non-empty
/// - `400 Bad Request` - Missing or malformed parameter
/// - `401 Unauthorized` - Discord rejected the bot token
/// - `403 Forbidden` - Caller does not own the target guild
/// - `500 Internal Server Error` - Source guild could not be read; body is the partial report
/// - `503 Service Unavailable` - Run cancelled by shutdown; body is the partial report
/// - `504 Gateway Timeout` - Run exceeded its deadline; body is the partial report
#[utoipa::path(
    get,
    path = "/api/clone",
    tag = CLONE_TAG,
    params(CloneQueryDto),
    responses(
        (status = 200, description = "Clone completed", body = CloneReportDto),
        (status = 207, description = "Clone completed with per-item errors", body = CloneReportDto),
        (status = 400, description = "Missing or malformed parameter", body = ErrorDto),
        (status = 401, description = "Bot token rejected by Discord", body = ErrorDto),
        (status = 403, description = "Caller does not own the target guild", body = ErrorDto),
        (status = 500, description = "Source guild could not be read", body = CloneReportDto),
        (status = 503, description = "Run cancelled", body = CloneReportDto),
        (status = 504, description = "Run exceeded its deadline", body = CloneReportDto)
    ),
)]
pub async fn clone_guild(
    State(state): State<AppState>,
    Query(query): Query<CloneQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = CloneParams::from_dto(&query)?;
    let service = clone_service(&state, &query)?;

    let report = service.clone(&params, &run_context(&state)).await?;

    if query.announce.unwrap_or(state.config.announce) {
        // Detached; the response does not wait for the announcement.
        let _ = service.spawn_announcement(
            params.source_guild_id,
            params.target_guild_id,
            &report,
        );
    }

    Ok(report_response(&state.config, report))
}

/// Clone only the categories and channels of a guild.
///
/// Categories are created first, then every other channel under its recreated
/// category. Roles and guild settings are left untouched and the `destructive` flag is
/// ignored.
///
/// # Returns
/// - `200 OK` - Channel stages completed; `errors` lists per-item failures
/// - `400 Bad Request` - Missing or malformed parameter
/// - `401 Unauthorized` - Discord rejected the bot token
/// - `403 Forbidden` - Caller does not own the target guild
/// - `500 Internal Server Error` - Source channels could not be read
#[utoipa::path(
    get,
    path = "/api/clone/channels",
    tag = CLONE_TAG,
    params(CloneQueryDto),
    responses(
        (status = 200, description = "Channels cloned", body = CloneReportDto),
        (status = 400, description = "Missing or malformed parameter", body = ErrorDto),
        (status = 401, description = "Bot token rejected by Discord", body = ErrorDto),
        (status = 403, description = "Caller does not own the target guild", body = ErrorDto),
        (status = 500, description = "Source channels could not be read", body = CloneReportDto)
    ),
)]
pub async fn clone_channels(
    State(state): State<AppState>,
    Query(query): Query<CloneQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = CloneParams::stage_from_dto(&query)?;
    let service = clone_service(&state, &query)?;

    let report = service
        .clone_channels(&params, &run_context(&state))
        .await?;

    Ok(report_response(&state.config, report))
}

/// Clone only the roles of a guild.
///
/// `@everyone` and integration-managed roles are skipped. The `destructive` flag is
/// ignored.
///
/// # Returns
/// - `200 OK` - Role stage completed; `errors` lists per-item failures
/// - `400 Bad Request` - Missing or malformed parameter
/// - `401 Unauthorized` - Discord rejected the bot token
/// - `403 Forbidden` - Caller does not own the target guild
/// - `500 Internal Server Error` - Source roles could not be read
#[utoipa::path(
    get,
    path = "/api/clone/roles",
    tag = CLONE_TAG,
    params(CloneQueryDto),
    responses(
        (status = 200, description = "Roles cloned", body = CloneReportDto),
        (status = 400, description = "Missing or malformed parameter", body = ErrorDto),
        (status = 401, description = "Bot token rejected by Discord", body = ErrorDto),
        (status = 403, description = "Caller does not own the target guild", body = ErrorDto),
        (status = 500, description = "Source roles could not be read", body = CloneReportDto)
    ),
)]
pub async fn clone_roles(
    State(state): State<AppState>,
    Query(query): Query<CloneQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = CloneParams::stage_from_dto(&query)?;
    let service = clone_service(&state, &query)?;

    let report = service.clone_roles(&params, &run_context(&state)).await?;

    Ok(report_response(&state.config, report))
}

/// Delete every channel and role of a guild.
///
/// Only `targetGuildId`, `aid` and `token` are read. The `@everyone` role and roles
/// owned by an integration are never deleted.
///
/// # Returns
/// - `200 OK` - Every delete was attempted; `errors` lists the failed ones
/// - `400 Bad Request` - Missing or malformed parameter, or no `aid`
/// - `401 Unauthorized` - Discord rejected the bot token
/// - `403 Forbidden` - Caller does not own the target guild
/// - `500 Internal Server Error` - Target guild could not be read
#[utoipa::path(
    get,
    path = "/api/teardown",
    tag = CLONE_TAG,
    params(CloneQueryDto),
    responses(
        (status = 200, description = "Teardown completed", body = CloneReportDto),
        (status = 400, description = "Missing or malformed parameter", body = ErrorDto),
        (status = 401, description = "Bot token rejected by Discord", body = ErrorDto),
        (status = 403, description = "Caller does not own the target guild", body = ErrorDto),
        (status = 500, description = "Target guild could not be read", body = CloneReportDto)
    ),
)]
pub async fn teardown_guild(
    State(state): State<AppState>,
    Query(query): Query<CloneQueryDto>,
) -> Result<impl IntoResponse, AppError> {
    let params = TeardownParams::from_dto(&query)?;
    let service = clone_service(&state, &query)?;

    let report = service.teardown(&params, &run_context(&state)).await?;

    Ok(report_response(&state.config, report))
}

/// OpenAPI description of the clone endpoints.
#[derive(OpenApi)]
#[openapi(
    paths(clone_guild, clone_channels, clone_roles, teardown_guild),
    components(schemas(CloneReportDto, ErrorDto)),
    tags((name = "clone", description = "Discord guild cloning"))
)]
pub struct ApiDoc;

/// Serve the OpenAPI document for the clone endpoints.
pub async fn openapi() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

/// Builds a clone service authenticated with the request's bot token.
fn clone_service(
    state: &AppState,
    query: &CloneQueryDto,
) -> Result<CloneService<DiscordClient>, AppError> {
    let token = bot_token(query)?;

    let api = RetryingDiscordApi::new(
        SerenityDiscordApi::new(token, state.http_client.clone()),
        RetryPolicy::new(state.config.retry.clone()),
    );

    Ok(CloneService::new(api, CloneSettings::from_config(&state.config)))
}

fn bot_token(query: &CloneQueryDto) -> Result<&str, AppError> {
    query
        .token
        .as_deref()
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing required parameter: token".to_string()))
}

/// Run context bounded by the configured deadline and cancelled on shutdown.
fn run_context(state: &AppState) -> CloneContext {
    CloneContext::new(
        state.shutdown.child_token(),
        Instant::now() + state.config.deadline,
    )
}

fn report_status(config: &Config, report: &CloneReport) -> StatusCode {
    if config.multi_status && report.has_errors() {
        StatusCode::MULTI_STATUS
    } else {
        StatusCode::OK
    }
}

fn report_response(config: &Config, report: CloneReport) -> (StatusCode, Json<CloneReportDto>) {
    let status = report_status(config, &report);

    (status, Json(report.into_dto()))
}
