//! Completion announcement posted into the target guild.
//!
//! The announcement is a courtesy notification. It runs detached from the request
//! and its failures are only logged.

use tokio::task::JoinHandle;

use crate::server::{
    data::discord::DiscordApi,
    error::discord::ApiError,
    model::{
        clone::CloneReport,
        discord::{Announcement, CreateChannelPayload},
    },
};

use super::CloneService;

impl<A: DiscordApi + Clone + 'static> CloneService<A> {
    /// Posts a summary of `report` into a new marker channel in the background.
    ///
    /// # Arguments
    /// - `source_guild_id` - Guild that was cloned, shown in the summary
    /// - `target_guild_id` - Guild receiving the marker channel
    /// - `report` - Report of the finished run
    ///
    /// # Returns
    /// - `JoinHandle<()>` - Handle of the detached task; callers may drop it
    pub fn spawn_announcement(
        &self,
        source_guild_id: u64,
        target_guild_id: u64,
        report: &CloneReport,
    ) -> JoinHandle<()> {
        let api = self.api.clone();
        let channel_name = self.settings.announce_channel_name.clone();
        let announcement = Announcement::from_report(source_guild_id, report);

        tokio::spawn(async move {
            match announce(&api, target_guild_id, &channel_name, &announcement).await {
                Ok(()) => tracing::info!("Posted clone announcement in guild {}", target_guild_id),
                Err(err) => tracing::warn!(
                    "Failed to post clone announcement in guild {}: {}",
                    target_guild_id,
                    err
                ),
            }
        })
    }
}

/// Creates the marker channel at the top of the guild and posts `announcement` in it.
pub async fn announce<A: DiscordApi>(
    api: &A,
    guild_id: u64,
    channel_name: &str,
    announcement: &Announcement,
) -> Result<(), ApiError> {
    let channel = api
        .create_channel(guild_id, &CreateChannelPayload::marker(channel_name))
        .await?;

    api.send_message(channel.id, announcement).await
}
