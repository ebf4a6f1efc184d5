//! Request and response DTOs shared by the HTTP layer.

pub mod api;
pub mod clone;
