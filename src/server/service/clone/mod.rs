//! Guild clone service.
//!
//! This module provides the `CloneService` which copies the channels, roles and
//! top-level settings of one Discord guild into another. A full run is a sequence of
//! fan-out stages separated by barriers:
//!
//! Snapshot -> Teardown (destructive runs only) -> Categories -> Channels -> Roles ->
//! Metadata patch, with an optional announcement posted afterwards.
//!
//! The service is organized into separate modules by stage:
//! - `snapshot` - Reading source and target guild contents
//! - `teardown` - Deleting existing target channels and roles
//! - `channel` - Creating categories, then child channels under them
//! - `role` - Creating roles
//! - `metadata` - Copying guild name, icon and moderation levels
//! - `announcement` - Posting a summary into a marker channel
//! - `context` - Cancellation, deadline and bounded fan-out
//!
//! Item-level failures are recorded in the `CloneReport` and never stop a stage. Only
//! a failed snapshot read, a cancelled run or an expired deadline abort the pipeline.

pub mod announcement;
pub mod channel;
pub mod context;
pub mod metadata;
pub mod role;
pub mod snapshot;
pub mod teardown;

#[cfg(test)]
mod test;

use std::time::Duration;

use crate::server::{
    config::Config,
    data::discord::DiscordApi,
    error::{auth::AuthError, clone::CloneError, discord::ApiError, AppError},
    model::clone::{CloneParams, CloneReport, TeardownParams},
};

use self::context::CloneContext;

/// Tuning for how hard a clone run drives the Discord API.
#[derive(Debug, Clone, PartialEq)]
pub struct CloneSettings {
    /// Requests in flight per resource class
    pub max_in_flight: usize,
    /// Child channels created per batch
    pub channel_batch_size: usize,
    /// Pause between child channel batches
    pub channel_batch_pause: Duration,
    /// Name of the channel the completion announcement is posted into
    pub announce_channel_name: String,
}

impl CloneSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            max_in_flight: config.max_in_flight,
            channel_batch_size: config.channel_batch_size,
            channel_batch_pause: config.channel_batch_pause,
            announce_channel_name: config.announce_channel_name.clone(),
        }
    }
}

impl Default for CloneSettings {
    fn default() -> Self {
        Self {
            max_in_flight: 5,
            channel_batch_size: 50,
            channel_batch_pause: Duration::from_millis(1000),
            announce_channel_name: "clone-report".to_string(),
        }
    }
}

/// Service running clone pipelines against one Discord API handle.
///
/// The API handle is usually a `RetryingDiscordApi` built for the caller's bot token,
/// so a service instance lives for a single request.
pub struct CloneService<A> {
    api: A,
    settings: CloneSettings,
}

impl<A: DiscordApi> CloneService<A> {
    /// Creates a new CloneService instance.
    ///
    /// # Arguments
    /// - `api` - Discord API handle authenticated with the caller's bot token
    /// - `settings` - Concurrency and batching limits
    ///
    /// # Returns
    /// - `CloneService` - New service instance
    pub fn new(api: A, settings: CloneSettings) -> Self {
        Self { api, settings }
    }

    /// Runs the full clone pipeline.
    ///
    /// Authorizes the caller against the target guild's owner before any other call,
    /// reads the source guild, optionally tears down the target, then recreates
    /// categories, channels and roles and finally copies the guild settings.
    ///
    /// # Arguments
    /// - `params` - Validated source, target, destructive flag and caller id
    /// - `ctx` - Cancellation token and deadline for this run
    ///
    /// # Returns
    /// - `Ok(CloneReport)` - Pipeline completed, possibly with per-item errors
    /// - `Err(AppError::AuthErr)` - Caller does not own the target guild, or the bot
    ///   token was rejected
    /// - `Err(AppError::CloneAborted)` - Snapshot failed, run cancelled, or deadline
    ///   exceeded; carries the partial report
    pub async fn clone(
        &self,
        params: &CloneParams,
        ctx: &CloneContext,
    ) -> Result<CloneReport, AppError> {
        self.authorize(params.target_guild_id, params.caller_id).await?;

        tracing::info!(
            "Cloning guild {} into guild {} (destructive: {})",
            params.source_guild_id,
            params.target_guild_id,
            params.destructive
        );

        let mut report = CloneReport::new();
        match self.run_clone(params, ctx, &mut report).await {
            Ok(()) => Ok(report),
            Err(error) => Err(abort(error, report)),
        }
    }

    async fn run_clone(
        &self,
        params: &CloneParams,
        ctx: &CloneContext,
        report: &mut CloneReport,
    ) -> Result<(), CloneError> {
        let source = self.read_source(params.source_guild_id).await?;
        report.info(format!(
            "Fetched {} channels and {} roles from source.",
            source.channels.len(),
            source.roles.len()
        ));
        ctx.ensure_active()?;

        if params.destructive {
            let target = self.read_target(params.target_guild_id).await?;
            report.info(format!(
                "Fetched {} channels and {} roles from target guild.",
                target.channels.len(),
                target.roles.len()
            ));

            self.delete_target_resources(ctx, params.target_guild_id, &target, report)
                .await;
            ctx.ensure_active()?;
            report.info("Deletion of channels and roles completed.");
        }

        let categories = self
            .create_categories(ctx, params.target_guild_id, &source.channels, report)
            .await;
        ctx.ensure_active()?;

        self.create_child_channels(
            ctx,
            params.target_guild_id,
            &source.channels,
            &categories,
            report,
        )
        .await;
        ctx.ensure_active()?;

        self.create_roles(ctx, params.target_guild_id, &source.roles, report)
            .await;
        ctx.ensure_active()?;

        self.patch_metadata(params.target_guild_id, &source.guild, report)
            .await;

        report.info("Server cloning completed.");
        tracing::info!(
            "Cloned guild {} into guild {} with {} errors",
            params.source_guild_id,
            params.target_guild_id,
            report.errors().len()
        );

        Ok(())
    }

    /// Recreates the source guild's categories and channels without touching roles.
    ///
    /// # Arguments
    /// - `params` - Validated source and target; the destructive flag is ignored
    /// - `ctx` - Cancellation token and deadline for this run
    ///
    /// # Returns
    /// - `Ok(CloneReport)` - Both channel phases completed
    /// - `Err(AppError)` - Authorization failed or the run was aborted
    pub async fn clone_channels(
        &self,
        params: &CloneParams,
        ctx: &CloneContext,
    ) -> Result<CloneReport, AppError> {
        self.authorize(params.target_guild_id, params.caller_id).await?;

        let mut report = CloneReport::new();
        let result = async {
            let channels = self.read_channels(params.source_guild_id).await?;
            report.info(format!(
                "Fetched {} channels from source guild.",
                channels.len()
            ));
            ctx.ensure_active()?;

            let categories = self
                .create_categories(ctx, params.target_guild_id, &channels, &mut report)
                .await;
            ctx.ensure_active()?;

            self.create_child_channels(
                ctx,
                params.target_guild_id,
                &channels,
                &categories,
                &mut report,
            )
            .await;
            ctx.ensure_active()
        }
        .await;

        match result {
            Ok(()) => Ok(report),
            Err(error) => Err(abort(error, report)),
        }
    }

    /// Recreates the source guild's roles without touching channels.
    ///
    /// # Arguments
    /// - `params` - Validated source and target; the destructive flag is ignored
    /// - `ctx` - Cancellation token and deadline for this run
    ///
    /// # Returns
    /// - `Ok(CloneReport)` - Role stage completed
    /// - `Err(AppError)` - Authorization failed or the run was aborted
    pub async fn clone_roles(
        &self,
        params: &CloneParams,
        ctx: &CloneContext,
    ) -> Result<CloneReport, AppError> {
        self.authorize(params.target_guild_id, params.caller_id).await?;

        let mut report = CloneReport::new();
        let result = async {
            let roles = self.read_roles(params.source_guild_id).await?;
            report.info(format!("Fetched {} roles from source guild.", roles.len()));
            ctx.ensure_active()?;

            self.create_roles(ctx, params.target_guild_id, &roles, &mut report)
                .await;
            ctx.ensure_active()
        }
        .await;

        match result {
            Ok(()) => Ok(report),
            Err(error) => Err(abort(error, report)),
        }
    }

    /// Deletes every channel and every role except `@everyone` and managed roles in the
    /// target guild.
    ///
    /// # Arguments
    /// - `params` - Target guild and the caller id that must own it
    /// - `ctx` - Cancellation token and deadline for this run
    ///
    /// # Returns
    /// - `Ok(CloneReport)` - Every delete was attempted
    /// - `Err(AppError)` - Authorization failed or the run was aborted
    pub async fn teardown(
        &self,
        params: &TeardownParams,
        ctx: &CloneContext,
    ) -> Result<CloneReport, AppError> {
        self.authorize(params.target_guild_id, Some(params.caller_id)).await?;

        tracing::info!("Tearing down guild {}", params.target_guild_id);

        let mut report = CloneReport::new();
        let result = async {
            let target = self.read_target(params.target_guild_id).await?;
            report.info(format!(
                "Fetched {} channels and {} roles from target guild.",
                target.channels.len(),
                target.roles.len()
            ));
            ctx.ensure_active()?;

            self.delete_target_resources(ctx, params.target_guild_id, &target, &mut report)
                .await;
            ctx.ensure_active()?;

            report.info("Deletion of channels and roles completed.");
            Ok::<(), CloneError>(())
        }
        .await;

        match result {
            Ok(()) => Ok(report),
            Err(error) => Err(abort(error, report)),
        }
    }

    /// Verifies the caller owns the target guild.
    ///
    /// Runs before any mutating call. Without a caller id there is nothing to check.
    async fn authorize(
        &self,
        target_guild_id: u64,
        caller_id: Option<u64>,
    ) -> Result<(), AppError> {
        let Some(caller_id) = caller_id else {
            return Ok(());
        };

        let guild = self
            .api
            .get_guild(target_guild_id)
            .await
            .map_err(|e| abort(CloneError::fetch_failed(e), CloneReport::new()))?;

        if !guild.is_owned_by(caller_id) {
            tracing::warn!(
                "Rejected clone request: user {} does not own guild {}",
                caller_id,
                target_guild_id
            );
            return Err(AuthError::NotGuildOwner {
                caller_id,
                guild_id: target_guild_id,
            }
            .into());
        }

        Ok(())
    }
}

/// Converts a stage-level failure into the error returned to the controller.
///
/// A snapshot read rejected with 401 means the bot token itself is bad, which is
/// reported as an authentication error rather than a failed clone.
fn abort(error: CloneError, report: CloneReport) -> AppError {
    if let CloneError::FetchFailed { source, .. } = &error {
        if source.status == Some(401) {
            return AuthError::InvalidToken {
                endpoint: source.endpoint.clone(),
            }
            .into();
        }
    }

    AppError::clone_aborted(error, report)
}

/// Short cause appended to a failure line in the report.
fn failure_reason(err: &ApiError) -> String {
    match err.status {
        Some(status) => format!("HTTP {}", status),
        None => "no response".to_string(),
    }
}
