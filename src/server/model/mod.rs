//! Server-side domain models and parameter types.
//!
//! This module contains domain models used throughout the service layer, representing
//! guild resources and clone operation parameters. Domain models are converted from
//! Serenity models at the data-layer boundary and transformed to DTOs at the controller
//! boundary.

pub mod clone;
pub mod discord;
