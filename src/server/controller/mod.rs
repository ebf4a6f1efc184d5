//! HTTP request handlers.
//!
//! Controllers parse query parameters into validated params, build a per-request
//! Discord client from the supplied bot token and hand off to the service layer.

pub mod clone;
