use crate::server::{
    data::retry::RetryPolicy,
    error::discord::ApiError,
    model::discord::{
        Announcement, CreateChannelPayload, CreateRolePayload, CreatedChannel, EditGuildPayload,
        GuildMetadata, SourceChannel, SourceRole,
    },
};

use super::DiscordApi;

/// Decorates a [`DiscordApi`] so that every call runs under one [`RetryPolicy`].
///
/// Stages never retry on their own; an error that reaches them has either exhausted
/// its attempts or was not retryable in the first place.
#[derive(Clone)]
pub struct RetryingDiscordApi<A> {
    inner: A,
    policy: RetryPolicy,
}

impl<A: DiscordApi> RetryingDiscordApi<A> {
    pub fn new(inner: A, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }
}

impl<A: DiscordApi> DiscordApi for RetryingDiscordApi<A> {
    async fn get_channels(&self, guild_id: u64) -> Result<Vec<SourceChannel>, ApiError> {
        self.policy
            .execute(|| self.inner.get_channels(guild_id))
            .await
    }

    async fn get_roles(&self, guild_id: u64) -> Result<Vec<SourceRole>, ApiError> {
        self.policy.execute(|| self.inner.get_roles(guild_id)).await
    }

    async fn get_guild(&self, guild_id: u64) -> Result<GuildMetadata, ApiError> {
        self.policy.execute(|| self.inner.get_guild(guild_id)).await
    }

    async fn create_channel(
        &self,
        guild_id: u64,
        payload: &CreateChannelPayload,
    ) -> Result<CreatedChannel, ApiError> {
        self.policy
            .execute(|| self.inner.create_channel(guild_id, payload))
            .await
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), ApiError> {
        self.policy
            .execute(|| self.inner.delete_channel(channel_id))
            .await
    }

    async fn create_role(
        &self,
        guild_id: u64,
        payload: &CreateRolePayload,
    ) -> Result<u64, ApiError> {
        self.policy
            .execute(|| self.inner.create_role(guild_id, payload))
            .await
    }

    async fn delete_role(&self, guild_id: u64, role_id: u64) -> Result<(), ApiError> {
        self.policy
            .execute(|| self.inner.delete_role(guild_id, role_id))
            .await
    }

    async fn edit_guild(&self, guild_id: u64, payload: &EditGuildPayload) -> Result<(), ApiError> {
        self.policy
            .execute(|| self.inner.edit_guild(guild_id, payload))
            .await
    }

    async fn send_message(
        &self,
        channel_id: u64,
        announcement: &Announcement,
    ) -> Result<(), ApiError> {
        self.policy
            .execute(|| self.inner.send_message(channel_id, announcement))
            .await
    }
}
