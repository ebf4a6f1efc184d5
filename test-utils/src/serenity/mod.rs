//! Test factories for creating Serenity API objects.
//!
//! This module provides factory functions for creating mock Serenity structs
//! (PartialGuild, Role, GuildChannel) for testing purposes. These factories create
//! valid Serenity objects by deserializing JSON, simulating what Discord's API
//! would return from the endpoints the clone pipeline reads.
//!
//! # Available Factories
//!
//! - `guild::create_test_guild` - `GET /guilds/{id}` response
//! - `role::create_test_role` - One entry of `GET /guilds/{id}/roles`
//! - `channel::create_test_channel` - One entry of `GET /guilds/{id}/channels`

pub mod channel;
pub mod guild;
pub mod role;

// Re-export commonly used functions for convenience
pub use channel::create_test_channel;
pub use guild::create_test_guild;
pub use role::create_test_role;
