//! In-memory [`DiscordApi`] for driving the clone pipeline in tests.
//!
//! Guild contents are seeded up front, every call is recorded in order, and failures
//! can be injected per operation and per resource name or id.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
    time::Duration,
};

use crate::server::{
    error::discord::ApiError,
    model::discord::{
        Announcement, CreateChannelPayload, CreateRolePayload, CreatedChannel, EditGuildPayload,
        GuildMetadata, SourceChannel, SourceRole,
    },
};

use super::DiscordApi;

/// First id handed out to resources created through the fake.
pub const FIRST_CREATED_ID: u64 = 9000;

/// Operation kinds that failures can be injected into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FakeOp {
    GetChannels,
    GetRoles,
    GetGuild,
    CreateChannel,
    DeleteChannel,
    CreateRole,
    DeleteRole,
    EditGuild,
    SendMessage,
}

/// One call received by the fake, in arrival order.
#[derive(Debug, Clone)]
pub enum FakeCall {
    GetChannels(u64),
    GetRoles(u64),
    GetGuild(u64),
    CreateChannel {
        guild_id: u64,
        payload: CreateChannelPayload,
        /// Id assigned to the channel, `None` when the call failed
        created_id: Option<u64>,
    },
    DeleteChannel(u64),
    CreateRole {
        guild_id: u64,
        payload: CreateRolePayload,
    },
    DeleteRole {
        guild_id: u64,
        role_id: u64,
    },
    EditGuild {
        guild_id: u64,
        payload: EditGuildPayload,
    },
    SendMessage {
        channel_id: u64,
        announcement: Announcement,
    },
}

#[derive(Debug)]
struct Failure {
    op: FakeOp,
    /// Resource name for creates, id for everything else; `None` matches any call
    target: Option<String>,
    status: u16,
    /// Remaining injected failures, `None` fails forever
    remaining: Option<u32>,
}

#[derive(Debug)]
struct FakeState {
    guilds: HashMap<u64, GuildMetadata>,
    channels: HashMap<u64, Vec<SourceChannel>>,
    roles: HashMap<u64, Vec<SourceRole>>,
    failures: Vec<Failure>,
    calls: Vec<FakeCall>,
    latency: Duration,
    next_id: u64,
}

/// Cloneable handle to shared fake state.
#[derive(Debug, Clone)]
pub struct FakeDiscordApi {
    state: Arc<Mutex<FakeState>>,
}

impl Default for FakeDiscordApi {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeDiscordApi {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                guilds: HashMap::new(),
                channels: HashMap::new(),
                roles: HashMap::new(),
                failures: Vec::new(),
                calls: Vec::new(),
                latency: Duration::ZERO,
                next_id: FIRST_CREATED_ID,
            })),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().unwrap()
    }

    pub fn add_guild(&self, guild: GuildMetadata) {
        self.lock().guilds.insert(guild.id, guild);
    }

    pub fn add_channel(&self, guild_id: u64, channel: SourceChannel) {
        self.lock().channels.entry(guild_id).or_default().push(channel);
    }

    pub fn add_role(&self, guild_id: u64, role: SourceRole) {
        self.lock().roles.entry(guild_id).or_default().push(role);
    }

    /// Delays every call by `latency` before it is handled.
    pub fn set_latency(&self, latency: Duration) {
        self.lock().latency = latency;
    }

    /// Makes every matching call fail with `status`.
    pub fn fail(&self, op: FakeOp, target: Option<&str>, status: u16) {
        self.push_failure(op, target, status, None);
    }

    /// Makes the next `times` matching calls fail with `status`.
    pub fn fail_times(&self, op: FakeOp, target: Option<&str>, status: u16, times: u32) {
        self.push_failure(op, target, status, Some(times));
    }

    fn push_failure(&self, op: FakeOp, target: Option<&str>, status: u16, remaining: Option<u32>) {
        self.lock().failures.push(Failure {
            op,
            target: target.map(str::to_string),
            status,
            remaining,
        });
    }

    /// All calls received so far, in arrival order.
    pub fn calls(&self) -> Vec<FakeCall> {
        self.lock().calls.clone()
    }

    /// Number of recorded calls matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&FakeCall) -> bool) -> usize {
        self.lock().calls.iter().filter(|call| predicate(call)).count()
    }

    /// Returns true if any call issued so far writes to Discord.
    pub fn has_mutations(&self) -> bool {
        self.lock().calls.iter().any(|call| {
            !matches!(
                call,
                FakeCall::GetChannels(_) | FakeCall::GetRoles(_) | FakeCall::GetGuild(_)
            )
        })
    }

    async fn simulate_latency(&self) {
        let latency = self.lock().latency;
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    /// Consumes a matching injected failure, if any.
    fn injected_failure(&self, op: FakeOp, target: &str, endpoint: &str) -> Option<ApiError> {
        let mut state = self.lock();

        let failure = state.failures.iter_mut().find(|failure| {
            failure.op == op
                && failure.target.as_deref().map_or(true, |t| t == target)
                && failure.remaining != Some(0)
        })?;

        if let Some(remaining) = failure.remaining.as_mut() {
            *remaining -= 1;
        }

        Some(ApiError::from_status(endpoint, failure.status, "injected failure"))
    }

    fn record(&self, call: FakeCall) {
        self.lock().calls.push(call);
    }

    fn next_id(&self) -> u64 {
        let mut state = self.lock();
        let id = state.next_id;
        state.next_id += 1;
        id
    }
}

impl DiscordApi for FakeDiscordApi {
    async fn get_channels(&self, guild_id: u64) -> Result<Vec<SourceChannel>, ApiError> {
        self.simulate_latency().await;
        self.record(FakeCall::GetChannels(guild_id));

        let endpoint = format!("GET /guilds/{}/channels", guild_id);
        let target = guild_id.to_string();
        if let Some(err) = self.injected_failure(FakeOp::GetChannels, &target, &endpoint) {
            return Err(err);
        }

        Ok(self.lock().channels.get(&guild_id).cloned().unwrap_or_default())
    }

    async fn get_roles(&self, guild_id: u64) -> Result<Vec<SourceRole>, ApiError> {
        self.simulate_latency().await;
        self.record(FakeCall::GetRoles(guild_id));

        let endpoint = format!("GET /guilds/{}/roles", guild_id);
        let target = guild_id.to_string();
        if let Some(err) = self.injected_failure(FakeOp::GetRoles, &target, &endpoint) {
            return Err(err);
        }

        Ok(self.lock().roles.get(&guild_id).cloned().unwrap_or_default())
    }

    async fn get_guild(&self, guild_id: u64) -> Result<GuildMetadata, ApiError> {
        self.simulate_latency().await;
        self.record(FakeCall::GetGuild(guild_id));

        let endpoint = format!("GET /guilds/{}", guild_id);
        let target = guild_id.to_string();
        if let Some(err) = self.injected_failure(FakeOp::GetGuild, &target, &endpoint) {
            return Err(err);
        }

        self.lock()
            .guilds
            .get(&guild_id)
            .cloned()
            .ok_or_else(|| ApiError::from_status(endpoint, 404, "Unknown Guild"))
    }

    async fn create_channel(
        &self,
        guild_id: u64,
        payload: &CreateChannelPayload,
    ) -> Result<CreatedChannel, ApiError> {
        self.simulate_latency().await;

        let endpoint = format!("POST /guilds/{}/channels", guild_id);
        let result = match self.injected_failure(FakeOp::CreateChannel, &payload.name, &endpoint) {
            Some(err) => Err(err),
            None => Ok(CreatedChannel {
                id: self.next_id(),
                name: payload.name.clone(),
            }),
        };

        self.record(FakeCall::CreateChannel {
            guild_id,
            payload: payload.clone(),
            created_id: result.as_ref().ok().map(|created| created.id),
        });

        result
    }

    async fn delete_channel(&self, channel_id: u64) -> Result<(), ApiError> {
        self.simulate_latency().await;
        self.record(FakeCall::DeleteChannel(channel_id));

        let endpoint = format!("DELETE /channels/{}", channel_id);
        match self.injected_failure(FakeOp::DeleteChannel, &channel_id.to_string(), &endpoint) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn create_role(
        &self,
        guild_id: u64,
        payload: &CreateRolePayload,
    ) -> Result<u64, ApiError> {
        self.simulate_latency().await;
        self.record(FakeCall::CreateRole {
            guild_id,
            payload: payload.clone(),
        });

        let endpoint = format!("POST /guilds/{}/roles", guild_id);
        match self.injected_failure(FakeOp::CreateRole, &payload.name, &endpoint) {
            Some(err) => Err(err),
            None => Ok(self.next_id()),
        }
    }

    async fn delete_role(&self, guild_id: u64, role_id: u64) -> Result<(), ApiError> {
        self.simulate_latency().await;
        self.record(FakeCall::DeleteRole { guild_id, role_id });

        let endpoint = format!("DELETE /guilds/{}/roles/{}", guild_id, role_id);
        match self.injected_failure(FakeOp::DeleteRole, &role_id.to_string(), &endpoint) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn edit_guild(&self, guild_id: u64, payload: &EditGuildPayload) -> Result<(), ApiError> {
        self.simulate_latency().await;
        self.record(FakeCall::EditGuild {
            guild_id,
            payload: payload.clone(),
        });

        let endpoint = format!("PATCH /guilds/{}", guild_id);
        match self.injected_failure(FakeOp::EditGuild, &guild_id.to_string(), &endpoint) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn send_message(
        &self,
        channel_id: u64,
        announcement: &Announcement,
    ) -> Result<(), ApiError> {
        self.simulate_latency().await;
        self.record(FakeCall::SendMessage {
            channel_id,
            announcement: announcement.clone(),
        });

        let endpoint = format!("POST /channels/{}/messages", channel_id);
        match self.injected_failure(FakeOp::SendMessage, &channel_id.to_string(), &endpoint) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}
