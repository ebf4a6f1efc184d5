//! Guild Cloner Test Utils
//!
//! Provides shared testing utilities for the guild cloner. The clone pipeline reads
//! Serenity models from Discord and converts them into domain models at the data-layer
//! boundary, so tests need realistic Serenity objects without talking to Discord.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{create_test_channel, create_test_guild, create_test_role};
//!
//! #[test]
//! fn converts_snapshot() {
//!     let guild = create_test_guild(1, "Source", Some("abc123"), 42);
//!     let category = create_test_channel(10, 1, "General", 4, 0, None);
//!     let role = create_test_role(20, "Helper", 0x3498db, 1);
//!     // Convert and assert...
//! }
//! ```

pub mod serenity;
