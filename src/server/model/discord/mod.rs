//! Discord domain models used by the clone pipeline.
//!
//! Serenity types are converted into these models at the data-layer boundary. Payload
//! types serialize to the JSON bodies of the corresponding Discord REST calls.

pub mod announcement;
pub mod channel;
pub mod guild;
pub mod role;

pub use announcement::Announcement;
pub use channel::{CreateChannelPayload, CreatedChannel, SourceChannel};
pub use guild::{EditGuildPayload, GuildMetadata};
pub use role::{CreateRolePayload, SourceRole};
