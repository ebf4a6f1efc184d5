//! Discord access layer.
//!
//! This module contains everything that talks to Discord: the `DiscordApi` trait with
//! its Serenity-backed implementation, and the retry policy applied to every remote
//! call. Serenity models are converted to domain models here, so the service layer
//! never handles raw API objects.

pub mod discord;
pub mod retry;
