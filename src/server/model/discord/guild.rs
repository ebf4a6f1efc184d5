//! Discord guild metadata domain models.
//!
//! Provides the top-level guild settings the clone pipeline reads from the source
//! guild, uses for the ownership check on the target guild, and writes back with a
//! `PATCH /guilds/{id}` request.

use serde::Serialize;
use serenity::all::{
    DefaultMessageNotificationLevel, ExplicitContentFilter, PartialGuild, VerificationLevel,
};

/// Top-level guild settings and ownership.
#[derive(Debug, Clone, PartialEq)]
pub struct GuildMetadata {
    /// Discord guild ID as a u64.
    pub id: u64,
    /// Guild display name.
    pub name: String,
    /// CDN URL of the guild icon, if one is set.
    pub icon_url: Option<String>,
    /// Discord user ID of the guild owner.
    pub owner_id: u64,
    pub verification_level: VerificationLevel,
    pub default_message_notifications: DefaultMessageNotificationLevel,
    pub explicit_content_filter: ExplicitContentFilter,
}

impl GuildMetadata {
    /// Converts a Serenity partial guild to a domain model at the data-layer boundary.
    ///
    /// # Arguments
    /// - `guild` - Guild returned by `GET /guilds/{id}`
    ///
    /// # Returns
    /// - `GuildMetadata` - Domain model with the settings the clone pipeline copies
    pub fn from_serenity(guild: PartialGuild) -> Self {
        Self {
            id: guild.id.get(),
            icon_url: guild.icon_url(),
            name: guild.name,
            owner_id: guild.owner_id.get(),
            verification_level: guild.verification_level,
            default_message_notifications: guild.default_message_notifications,
            explicit_content_filter: guild.explicit_content_filter,
        }
    }

    /// Returns true if `user_id` owns this guild.
    pub fn is_owned_by(&self, user_id: u64) -> bool {
        self.owner_id == user_id
    }
}

/// JSON body of a `PATCH /guilds/{id}` request.
///
/// `icon_url` is never sent; the Discord adapter downloads it and fills `icon` with a
/// data URI, since the API only accepts inline image data. A source without an icon
/// sends `icon: null`, which clears the target's icon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditGuildPayload {
    pub name: String,
    #[serde(skip)]
    pub icon_url: Option<String>,
    pub icon: Option<String>,
    pub verification_level: VerificationLevel,
    pub default_message_notifications: DefaultMessageNotificationLevel,
    pub explicit_content_filter: ExplicitContentFilter,
}

impl EditGuildPayload {
    /// Builds the payload that copies `source` settings onto another guild.
    pub fn from_metadata(source: &GuildMetadata) -> Self {
        Self {
            name: source.name.clone(),
            icon_url: source.icon_url.clone(),
            icon: None,
            verification_level: source.verification_level,
            default_message_notifications: source.default_message_notifications,
            explicit_content_filter: source.explicit_content_filter,
        }
    }
}
