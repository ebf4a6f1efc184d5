//! Discord guild channel domain models.
//!
//! Provides the domain model for channels read from a guild snapshot and the payload
//! used to recreate them in another guild. Handles conversion from Serenity's
//! `GuildChannel` at the data-layer boundary so the clone pipeline never depends on
//! the full Serenity model.

use serde::Serialize;
use serenity::all::{ChannelType, ForumTag, GuildChannel, PermissionOverwrite};

use crate::server::model::clone::CategoryMap;

/// Bitrate applied to voice-capable channels when the source has none.
pub const DEFAULT_BITRATE: u32 = 64_000;

/// Channel within a guild snapshot with every field needed to recreate it.
///
/// Ids are assigned by Discord; `parent_id` refers to a category in the *same* guild
/// the channel was read from.
#[derive(Debug, Clone)]
pub struct SourceChannel {
    /// Discord channel ID as a u64.
    pub id: u64,
    /// Channel kind discriminant (text, voice, category, ...).
    pub kind: ChannelType,
    /// Channel display name.
    pub name: String,
    /// Position among siblings.
    pub position: i32,
    /// Category this channel sits under, if any.
    pub parent_id: Option<u64>,
    pub topic: Option<String>,
    pub nsfw: bool,
    pub bitrate: Option<u32>,
    pub user_limit: Option<u32>,
    /// Slow-mode interval in seconds.
    pub rate_limit_per_user: Option<u16>,
    pub permission_overwrites: Vec<PermissionOverwrite>,
    /// Tags available on forum channels.
    pub available_tags: Vec<ForumTag>,
}

impl SourceChannel {
    /// Converts a Serenity channel to a domain model at the data-layer boundary.
    ///
    /// # Arguments
    /// - `channel` - Channel returned by the Discord API
    ///
    /// # Returns
    /// - `SourceChannel` - Domain model carrying the fields the clone pipeline copies
    pub fn from_serenity(channel: GuildChannel) -> Self {
        Self {
            id: channel.id.get(),
            kind: channel.kind,
            name: channel.name,
            position: i32::from(channel.position),
            parent_id: channel.parent_id.map(|id| id.get()),
            topic: channel.topic,
            nsfw: channel.nsfw,
            bitrate: channel.bitrate,
            user_limit: channel.user_limit,
            rate_limit_per_user: channel.rate_limit_per_user.map(u16::from),
            permission_overwrites: channel.permission_overwrites,
            available_tags: channel.available_tags,
        }
    }

    /// Returns true if this channel is a category.
    pub fn is_category(&self) -> bool {
        self.kind == ChannelType::Category
    }
}

/// Channel returned by Discord after a successful create call.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatedChannel {
    pub id: u64,
    pub name: String,
}

/// JSON body of a `POST /guilds/{id}/channels` request.
///
/// Built either for a category (Phase A) or for a child channel (Phase B). Optional
/// fields are skipped so category payloads never carry topic, bitrate or similar.
#[derive(Debug, Clone, Serialize)]
pub struct CreateChannelPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ChannelType,
    pub position: i32,
    /// Always serialized for child channels; `null` detaches the channel from any category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<Option<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nsfw: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bitrate: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate_limit_per_user: Option<u16>,
    pub permission_overwrites: Vec<PermissionOverwrite>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_tags: Option<Vec<ForumTag>>,
}

impl CreateChannelPayload {
    /// Builds the payload for recreating a category.
    ///
    /// Categories carry only name, kind, position and permission overwrites.
    ///
    /// # Arguments
    /// - `source` - Category channel from the source snapshot
    ///
    /// # Returns
    /// - `CreateChannelPayload` - Payload for the Phase A create call
    pub fn category(source: &SourceChannel) -> Self {
        Self {
            name: source.name.clone(),
            kind: source.kind,
            position: source.position,
            parent_id: None,
            topic: None,
            nsfw: None,
            bitrate: None,
            user_limit: None,
            rate_limit_per_user: None,
            permission_overwrites: source.permission_overwrites.clone(),
            available_tags: None,
        }
    }

    /// Builds the payload for recreating a non-category channel.
    ///
    /// The parent is resolved through `categories`; a source parent that was never
    /// materialized in the target resolves to `null` instead of the stale source id.
    /// Missing numeric fields fall back to Discord's defaults (64000 bitrate, no user
    /// limit, no slow-mode). Forum channels keep their tag list, stage channels restate
    /// bitrate and user limit, announcement channels restate the nsfw flag.
    ///
    /// # Arguments
    /// - `source` - Channel from the source snapshot
    /// - `categories` - Source-to-target category ids populated by Phase A
    ///
    /// # Returns
    /// - `CreateChannelPayload` - Payload for the Phase B create call
    pub fn child(source: &SourceChannel, categories: &CategoryMap) -> Self {
        let parent_id = source
            .parent_id
            .and_then(|source_parent| categories.get(source_parent));

        let mut payload = Self {
            name: source.name.clone(),
            kind: source.kind,
            position: source.position,
            parent_id: Some(parent_id),
            topic: Some(source.topic.clone()),
            nsfw: Some(source.nsfw),
            bitrate: Some(source.bitrate.unwrap_or(DEFAULT_BITRATE)),
            user_limit: Some(source.user_limit.unwrap_or(0)),
            rate_limit_per_user: Some(source.rate_limit_per_user.unwrap_or(0)),
            permission_overwrites: source.permission_overwrites.clone(),
            available_tags: None,
        };

        // Stage and announcement channels need no extra fields: bitrate, user limit and
        // nsfw are already set above for every child kind.
        if source.kind == ChannelType::Forum {
            payload.available_tags = Some(source.available_tags.clone());
        }

        payload
    }

    /// Builds the payload for the text channel that carries the clone announcement.
    ///
    /// # Arguments
    /// - `name` - Display name of the marker channel
    ///
    /// # Returns
    /// - `CreateChannelPayload` - Text channel at the top of the guild with no parent
    pub fn marker(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ChannelType::Text,
            position: 0,
            parent_id: None,
            topic: None,
            nsfw: None,
            bitrate: None,
            user_limit: None,
            rate_limit_per_user: None,
            permission_overwrites: Vec::new(),
            available_tags: None,
        }
    }

    /// Resolved target parent, `None` when the channel is created without a category.
    pub fn resolved_parent(&self) -> Option<u64> {
        self.parent_id.flatten()
    }
}
