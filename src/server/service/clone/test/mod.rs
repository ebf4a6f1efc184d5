use std::time::Duration;

use serenity::all::ChannelType;
use test_utils::serenity::{create_test_channel, create_test_guild, create_test_role};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::server::{
    data::discord::fake::{FakeCall, FakeDiscordApi, FakeOp},
    error::{auth::AuthError, clone::CloneError, AppError},
    model::{
        clone::{CloneParams, TeardownParams},
        discord::{GuildMetadata, SourceChannel, SourceRole},
    },
    service::clone::{context::CloneContext, CloneService, CloneSettings},
};

mod announcement;
mod clone;

const SOURCE_GUILD: u64 = 1;
const TARGET_GUILD: u64 = 2;
const OWNER: u64 = 42;

const TEXT: u8 = 0;
const VOICE: u8 = 2;
const CATEGORY: u8 = 4;

/// Fake with a source guild and a target guild owned by `OWNER`.
fn fake_with_guilds() -> FakeDiscordApi {
    let fake = FakeDiscordApi::new();
    fake.add_guild(GuildMetadata::from_serenity(create_test_guild(
        SOURCE_GUILD,
        "Source Guild",
        Some("abc123"),
        7,
    )));
    fake.add_guild(GuildMetadata::from_serenity(create_test_guild(
        TARGET_GUILD,
        "Target Guild",
        None,
        OWNER,
    )));
    fake
}

fn channel(id: u64, guild_id: u64, name: &str, kind: u8, parent_id: Option<u64>) -> SourceChannel {
    SourceChannel::from_serenity(create_test_channel(id, guild_id, name, kind, 0, parent_id))
}

fn role(id: u64, name: &str, position: u16) -> SourceRole {
    SourceRole::from_serenity(create_test_role(id, name, 0, position))
}

fn service(fake: &FakeDiscordApi) -> CloneService<FakeDiscordApi> {
    CloneService::new(
        fake.clone(),
        CloneSettings {
            max_in_flight: 5,
            channel_batch_size: 50,
            channel_batch_pause: Duration::ZERO,
            announce_channel_name: "clone-report".to_string(),
        },
    )
}

fn context() -> CloneContext {
    CloneContext::new(
        CancellationToken::new(),
        Instant::now() + Duration::from_secs(900),
    )
}

fn clone_params(destructive: bool, caller_id: Option<u64>) -> CloneParams {
    CloneParams::new(SOURCE_GUILD, TARGET_GUILD, destructive, caller_id).unwrap()
}

/// `(payload name, resolved parent, created id)` of every channel create call.
fn channel_creates(fake: &FakeDiscordApi) -> Vec<(String, Option<u64>, Option<u64>)> {
    fake.calls()
        .into_iter()
        .filter_map(|call| match call {
            FakeCall::CreateChannel {
                payload,
                created_id,
                ..
            } => Some((payload.name.clone(), payload.resolved_parent(), created_id)),
            _ => None,
        })
        .collect()
}

/// Id assigned to the channel created with `name`.
fn created_id_of(fake: &FakeDiscordApi, name: &str) -> Option<u64> {
    channel_creates(fake)
        .into_iter()
        .find(|(created_name, _, _)| created_name == name)
        .and_then(|(_, _, id)| id)
}

/// Resolved parent of the channel created with `name`.
fn parent_of(fake: &FakeDiscordApi, name: &str) -> Option<u64> {
    channel_creates(fake)
        .into_iter()
        .find(|(created_name, _, _)| created_name == name)
        .and_then(|(_, parent, _)| parent)
}
