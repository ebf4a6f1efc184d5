//! Discord guild role domain models.
//!
//! Provides the domain model for roles read from a guild snapshot and the payload
//! used to recreate them. Handles conversion from Serenity's `Role` at the data-layer
//! boundary.

use serde::Serialize;
use serenity::all::{Permissions, Role};

/// Name of the per-guild default role, which can never be created or deleted.
pub const EVERYONE_ROLE_NAME: &str = "@everyone";

/// Role within a guild snapshot with display properties and permissions.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceRole {
    /// Discord role ID as a u64.
    pub id: u64,
    /// Role display name.
    pub name: String,
    /// Role color as a 24-bit RGB integer.
    pub color: u32,
    /// Whether members with this role are listed separately.
    pub hoist: bool,
    /// Role position in the guild's role hierarchy (higher = more important).
    pub position: i32,
    pub permissions: Permissions,
    /// Owned by an integration (bot, booster, ...) rather than by users.
    pub managed: bool,
    pub mentionable: bool,
}

impl SourceRole {
    /// Converts a Serenity role to a domain model at the data-layer boundary.
    ///
    /// # Arguments
    /// - `role` - Role returned by the Discord API
    ///
    /// # Returns
    /// - `SourceRole` - Domain model carrying the fields the clone pipeline copies
    pub fn from_serenity(role: Role) -> Self {
        Self {
            id: role.id.get(),
            name: role.name,
            color: role.colour.0,
            hoist: role.hoist,
            position: i32::from(role.position),
            permissions: role.permissions,
            managed: role.managed,
            mentionable: role.mentionable,
        }
    }

    /// Returns true for the structural `@everyone` role.
    ///
    /// Matches the exact name only; a user role called `@Everyone` is an ordinary role.
    pub fn is_everyone(&self) -> bool {
        self.name == EVERYONE_ROLE_NAME
    }
}

/// JSON body of a `POST /guilds/{id}/roles` request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateRolePayload {
    pub name: String,
    pub color: u32,
    pub hoist: bool,
    pub position: i32,
    pub permissions: Permissions,
    pub managed: bool,
    pub mentionable: bool,
}

impl CreateRolePayload {
    /// Builds the payload for recreating `source` in another guild.
    pub fn from_role(source: &SourceRole) -> Self {
        Self {
            name: source.name.clone(),
            color: source.color,
            hoist: source.hoist,
            position: source.position,
            permissions: source.permissions,
            managed: source.managed,
            mentionable: source.mentionable,
        }
    }
}
