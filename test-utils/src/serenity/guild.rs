//! Test factory for creating Serenity PartialGuild objects.
//!
//! `GET /guilds/{id}` returns a partial guild, which is what the clone pipeline reads
//! for metadata and for the ownership check.

use serenity::all::PartialGuild;

/// Creates a test Serenity PartialGuild with customizable fields.
///
/// The icon hash is automatically padded to 32 characters (Discord's icon hash format)
/// if it's shorter. Verification, notification and content filter levels are all 0.
///
/// # Arguments
/// - `guild_id` - Discord guild ID (snowflake)
/// - `name` - Guild name
/// - `icon_hash` - Optional icon hash (will be padded to 32 characters if shorter)
/// - `owner_id` - Discord user ID of the guild owner
///
/// # Returns
/// - `PartialGuild` - A valid Serenity PartialGuild struct for testing
///
/// # Panics
/// - If the JSON cannot be deserialized into a PartialGuild (indicates invalid test data)
///
/// # Examples
///
/// ```rust,ignore
/// use test_utils::serenity::guild::create_test_guild;
///
/// let guild = create_test_guild(123456789, "Test Guild", Some("abc123"), 42);
/// assert_eq!(guild.owner_id.get(), 42);
/// ```
pub fn create_test_guild(
    guild_id: u64,
    name: &str,
    icon_hash: Option<&str>,
    owner_id: u64,
) -> PartialGuild {
    // Animated icons carry an "a_" prefix in front of the 32 hex chars
    let formatted_icon = icon_hash.map(|hash| {
        if hash.starts_with("a_") {
            format!("{:0<34}", hash)
        } else {
            format!("{:0<32}", hash)
        }
    });

    serde_json::from_value(serde_json::json!({
        "id": guild_id.to_string(),
        "name": name,
        "icon": formatted_icon,
        "icon_hash": formatted_icon,
        "splash": null,
        "discovery_splash": null,
        "owner_id": owner_id.to_string(),
        "afk_channel_id": null,
        "afk_timeout": 300,
        "verification_level": 0,
        "default_message_notifications": 0,
        "explicit_content_filter": 0,
        "roles": [],
        "emojis": [],
        "stickers": [],
        "features": [],
        "mfa_level": 0,
        "system_channel_id": null,
        "system_channel_flags": 0,
        "rules_channel_id": null,
        "premium_tier": 0,
        "premium_subscription_count": 0,
        "premium_progress_bar_enabled": false,
        "preferred_locale": "en-US",
        "nsfw_level": 0,
        "max_presences": 25000,
        "max_members": 100000,
    }))
    .expect("Failed to create test guild - invalid JSON structure")
}
