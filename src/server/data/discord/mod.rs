//! Discord REST access for the clone pipeline.
//!
//! The pipeline talks to Discord only through [`DiscordApi`]. The production
//! implementation wraps Serenity's HTTP client and is decorated with
//! [`RetryingDiscordApi`] so every call shares one retry policy. Tests drive the
//! pipeline with an in-memory fake instead.

pub mod http;
pub mod retrying;

#[cfg(test)]
pub mod fake;

pub use http::SerenityDiscordApi;
pub use retrying::RetryingDiscordApi;

use std::future::Future;

use crate::server::{
    error::discord::ApiError,
    model::discord::{
        Announcement, CreateChannelPayload, CreateRolePayload, CreatedChannel, EditGuildPayload,
        GuildMetadata, SourceChannel, SourceRole,
    },
};

/// Discord REST calls consumed by the clone pipeline.
///
/// Every method maps to a single Discord endpoint and reports failures as an
/// [`ApiError`] carrying that endpoint. Implementations convert Serenity models into
/// domain models before returning.
pub trait DiscordApi: Send + Sync {
    /// `GET /guilds/{id}/channels`, in the order Discord returns them.
    fn get_channels(
        &self,
        guild_id: u64,
    ) -> impl Future<Output = Result<Vec<SourceChannel>, ApiError>> + Send;

    /// `GET /guilds/{id}/roles`, in the order Discord returns them.
    fn get_roles(
        &self,
        guild_id: u64,
    ) -> impl Future<Output = Result<Vec<SourceRole>, ApiError>> + Send;

    /// `GET /guilds/{id}`
    fn get_guild(
        &self,
        guild_id: u64,
    ) -> impl Future<Output = Result<GuildMetadata, ApiError>> + Send;

    /// `POST /guilds/{id}/channels`
    fn create_channel(
        &self,
        guild_id: u64,
        payload: &CreateChannelPayload,
    ) -> impl Future<Output = Result<CreatedChannel, ApiError>> + Send;

    /// `DELETE /channels/{id}`
    fn delete_channel(&self, channel_id: u64)
        -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `POST /guilds/{id}/roles`, returning the id of the created role.
    fn create_role(
        &self,
        guild_id: u64,
        payload: &CreateRolePayload,
    ) -> impl Future<Output = Result<u64, ApiError>> + Send;

    /// `DELETE /guilds/{id}/roles/{role_id}`
    fn delete_role(
        &self,
        guild_id: u64,
        role_id: u64,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `PATCH /guilds/{id}`
    fn edit_guild(
        &self,
        guild_id: u64,
        payload: &EditGuildPayload,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `POST /channels/{id}/messages` with a single embed.
    fn send_message(
        &self,
        channel_id: u64,
        announcement: &Announcement,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}
