use serenity::{
    all::{ChannelId, CreateAttachment, CreateEmbed, CreateMessage, GuildId, RoleId},
    http::Http,
};
use std::{sync::Arc, time::Duration};

use crate::server::{
    error::discord::ApiError,
    model::discord::{
        Announcement, CreateChannelPayload, CreateRolePayload, CreatedChannel, EditGuildPayload,
        GuildMetadata, SourceChannel, SourceRole,
    },
};

use super::DiscordApi;

/// [`DiscordApi`] backed by Serenity's HTTP client.
///
/// Serenity handles authentication and Discord's per-route rate limit buckets. The
/// reqwest client is only used to download guild icons so they can be re-uploaded.
#[derive(Clone)]
pub struct SerenityDiscordApi {
    /// Discord HTTP client authenticated with the caller's bot token
    http: Arc<Http>,
    /// Client for CDN downloads, configured without redirects
    client: reqwest::Client,
}

impl SerenityDiscordApi {
    /// Creates an adapter for one bot token.
    ///
    /// # Arguments
    /// - `token` - Bot token supplied by the caller, with or without the `Bot ` prefix
    /// - `client` - Shared reqwest client used for icon downloads
    pub fn new(token: &str, client: reqwest::Client) -> Self {
        Self {
            http: Arc::new(Http::new(token)),
            client,
        }
    }

    /// Downloads a guild icon and encodes it as a data URI.
    ///
    /// The CDN serves webp by default, so the PNG rendition is requested instead.
    async fn fetch_icon(&self, icon_url: &str) -> Result<String, ApiError> {
        let url = png_icon_url(icon_url);
        let endpoint = format!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(endpoint.clone(), e))?;

        let status = response.status();
        if !status.is_success() {
            let error = ApiError::from_status(endpoint, status.as_u16(), status.to_string());
            return Err(match retry_after(&response) {
                Some(wait) => error.with_retry_after(wait),
                None => error,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| ApiError::from_reqwest(endpoint, e))?;

        Ok(CreateAttachment::bytes(bytes.to_vec(), "icon.png").to_base64())
    }
}

impl DiscordApi for SerenityDiscordApi {
    async fn get_channels(&self, guild_id: u64) -> Result<Vec<SourceChannel>, ApiError> {
        let channels = self
            .http
            .get_channels(GuildId::new(guild_id))
            .await
            .map_err(|e| ApiError::from_serenity(format!("GET /guilds/{}/channels", guild_id), e))?;

        Ok(channels.into_iter().map(SourceChannel::from_serenity).collect())
    }

    async fn get_roles(&self, guild_id: u64) -> Result<Vec<SourceRole>, ApiError> {
        let roles = self
            .http
            .get_guild_roles(GuildId::new(guild_id))
            .await
            .map_err(|e| ApiError::from_serenity(format!("GET /guilds/{}/roles", guild_id), e))?;

        Ok(roles.into_iter().map(SourceRole::from_serenity).collect())
    }

    async fn get_guild(&self, guild_id: u64) -> Result<GuildMetadata, ApiError> {
        let guild = self
            .http
            .get_guild(GuildId::new(guild_id))
            .await
            .map_err(|e| ApiError::from_serenity(format!("GET /guilds/{}", guild_id), e))?;

        Ok(GuildMetadata::from_serenity(guild))
    }

    async fn create_channel(
        &self,
        guild_id: u64,
        payload: &CreateChannelPayload,
    ) -> Result<CreatedChannel, ApiError> {
        let channel = self
            .http
            .create_channel(GuildId::new(guild_id), payload, None)
            .await
            .map_err(|e| {
                ApiError::from_serenity(format!("POST /guilds/{}/channels", guild_id), e)
            })?;

        Ok(CreatedChannel {
            id: channel.id.get(),
            name: channel.name,
        })
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), ApiError> {
        self.http
            .delete_channel(ChannelId::new(channel_id), None)
            .await
            .map_err(|e| ApiError::from_serenity(format!("DELETE /channels/{}", channel_id), e))?;

        Ok(())
    }

    async fn create_role(
        &self,
        guild_id: u64,
        payload: &CreateRolePayload,
    ) -> Result<u64, ApiError> {
        let role = self
            .http
            .create_role(GuildId::new(guild_id), payload, None)
            .await
            .map_err(|e| ApiError::from_serenity(format!("POST /guilds/{}/roles", guild_id), e))?;

        Ok(role.id.get())
    }

    async fn delete_role(&self, guild_id: u64, role_id: u64) -> Result<(), ApiError> {
        self.http
            .delete_role(GuildId::new(guild_id), RoleId::new(role_id), None)
            .await
            .map_err(|e| {
                ApiError::from_serenity(format!("DELETE /guilds/{}/roles/{}", guild_id, role_id), e)
            })
    }

    async fn edit_guild(&self, guild_id: u64, payload: &EditGuildPayload) -> Result<(), ApiError> {
        let mut payload = payload.clone();
        if let Some(icon_url) = payload.icon_url.as_deref() {
            payload.icon = Some(self.fetch_icon(icon_url).await?);
        }

        self.http
            .edit_guild(GuildId::new(guild_id), &payload, None)
            .await
            .map_err(|e| ApiError::from_serenity(format!("PATCH /guilds/{}", guild_id), e))?;

        Ok(())
    }

    async fn send_message(
        &self,
        channel_id: u64,
        announcement: &Announcement,
    ) -> Result<(), ApiError> {
        let mut embed = CreateEmbed::new()
            .title(&announcement.title)
            .description(&announcement.description)
            .color(announcement.color);
        for (name, value) in &announcement.fields {
            embed = embed.field(name, value, false);
        }
        if let Some(finished_at) = announcement.finished_at {
            embed = embed.timestamp(finished_at);
        }

        ChannelId::new(channel_id)
            .send_message(&self.http, CreateMessage::new().embed(embed))
            .await
            .map_err(|e| {
                ApiError::from_serenity(format!("POST /channels/{}/messages", channel_id), e)
            })?;

        Ok(())
    }
}

/// Whole seconds from a `Retry-After` header, if the CDN sent one.
fn retry_after(response: &reqwest::Response) -> Option<Duration> {
    response
        .headers()
        .get(reqwest::header::RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse::<u64>()
        .ok()
        .map(Duration::from_secs)
}

/// Rewrites a CDN icon URL to its PNG rendition, leaving animated GIFs untouched.
fn png_icon_url(icon_url: &str) -> String {
    match icon_url.strip_suffix(".webp") {
        Some(base) => format!("{}.png", base),
        None => icon_url.to_string(),
    }
}
