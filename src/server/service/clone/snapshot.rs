//! Snapshot reads of source and target guilds.
//!
//! Reads are the only stage that aborts the pipeline. A read that exhausts its retries
//! becomes `CloneError::FetchFailed`; an empty list is a valid snapshot and is never
//! confused with a failure.

use crate::server::{
    data::discord::DiscordApi,
    error::clone::CloneError,
    model::discord::{GuildMetadata, SourceChannel, SourceRole},
};

use super::CloneService;

/// Everything read from the source guild for a full clone.
#[derive(Debug, Clone)]
pub struct SourceSnapshot {
    /// Channels in the order Discord returned them
    pub channels: Vec<SourceChannel>,
    /// Roles in the order Discord returned them
    pub roles: Vec<SourceRole>,
    pub guild: GuildMetadata,
}

/// Existing target guild contents, read before a teardown.
#[derive(Debug, Clone)]
pub struct TargetSnapshot {
    pub channels: Vec<SourceChannel>,
    pub roles: Vec<SourceRole>,
}

impl<A: DiscordApi> CloneService<A> {
    /// Reads channels, roles and metadata of the source guild concurrently.
    ///
    /// # Arguments
    /// - `guild_id` - Source guild
    ///
    /// # Returns
    /// - `Ok(SourceSnapshot)` - All three reads succeeded
    /// - `Err(CloneError::FetchFailed)` - Any read failed after retries
    pub async fn read_source(&self, guild_id: u64) -> Result<SourceSnapshot, CloneError> {
        let (channels, roles, guild) = tokio::try_join!(
            self.api.get_channels(guild_id),
            self.api.get_roles(guild_id),
            self.api.get_guild(guild_id),
        )
        .map_err(CloneError::fetch_failed)?;

        tracing::info!(
            "Read {} channels and {} roles from source guild {}",
            channels.len(),
            roles.len(),
            guild_id
        );

        Ok(SourceSnapshot {
            channels,
            roles,
            guild,
        })
    }

    /// Reads the channels and roles currently in the target guild.
    pub async fn read_target(&self, guild_id: u64) -> Result<TargetSnapshot, CloneError> {
        let (channels, roles) = tokio::try_join!(
            self.api.get_channels(guild_id),
            self.api.get_roles(guild_id),
        )
        .map_err(CloneError::fetch_failed)?;

        tracing::info!(
            "Read {} channels and {} roles from target guild {}",
            channels.len(),
            roles.len(),
            guild_id
        );

        Ok(TargetSnapshot { channels, roles })
    }

    pub(super) async fn read_channels(
        &self,
        guild_id: u64,
    ) -> Result<Vec<SourceChannel>, CloneError> {
        self.api
            .get_channels(guild_id)
            .await
            .map_err(CloneError::fetch_failed)
    }

    pub(super) async fn read_roles(&self, guild_id: u64) -> Result<Vec<SourceRole>, CloneError> {
        self.api
            .get_roles(guild_id)
            .await
            .map_err(CloneError::fetch_failed)
    }
}
