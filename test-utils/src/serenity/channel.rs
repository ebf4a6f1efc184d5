//! Test factory for creating Serenity GuildChannel objects.

use serenity::all::GuildChannel;

/// Creates a test Serenity GuildChannel with customizable fields.
///
/// Topic, bitrate, user limit and slow-mode are left unset so conversions exercise
/// their defaults. Permission overwrites and forum tags are empty.
///
/// # Arguments
/// - `channel_id` - Discord channel ID (snowflake)
/// - `guild_id` - Guild the channel belongs to
/// - `name` - Channel name
/// - `kind` - Raw channel type (0 text, 2 voice, 4 category, 5 news, 13 stage, 15 forum)
/// - `position` - Position among siblings
/// - `parent_id` - Category the channel sits under, if any
///
/// # Returns
/// - `GuildChannel` - A valid Serenity GuildChannel struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a GuildChannel (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::channel::create_test_channel;
///
/// let category = create_test_channel(100, 1, "General", 4, 0, None);
/// let text = create_test_channel(101, 1, "chat", 0, 1, Some(100));
/// ```
pub fn create_test_channel(
    channel_id: u64,
    guild_id: u64,
    name: &str,
    kind: u8,
    position: u16,
    parent_id: Option<u64>,
) -> GuildChannel {
    serde_json::from_value(serde_json::json!({
        "id": channel_id.to_string(),
        "guild_id": guild_id.to_string(),
        "type": kind,
        "name": name,
        "position": position,
        "parent_id": parent_id.map(|id| id.to_string()),
        "topic": null,
        "nsfw": false,
        "bitrate": null,
        "user_limit": null,
        "rate_limit_per_user": null,
        "last_message_id": null,
        "permission_overwrites": [],
        "available_tags": [],
        "applied_tags": [],
        "flags": 0,
    }))
    .expect("Failed to create test channel - invalid JSON structure")
}
