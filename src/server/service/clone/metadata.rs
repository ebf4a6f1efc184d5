use crate::server::{
    data::discord::DiscordApi,
    model::{
        clone::CloneReport,
        discord::{EditGuildPayload, GuildMetadata},
    },
};

use super::{failure_reason, CloneService};

impl<A: DiscordApi> CloneService<A> {
    /// Copies name, icon and moderation levels of the source guild onto the target.
    ///
    /// Runs after every channel and role call has finished, since Discord may reject
    /// channel creation while some guild setting changes are still being applied.
    /// A failure is recorded and does not abort the run.
    ///
    /// # Arguments
    /// - `guild_id` - Target guild
    /// - `source` - Metadata read from the source guild
    /// - `report` - Receives one line for the patch
    pub(super) async fn patch_metadata(
        &self,
        guild_id: u64,
        source: &GuildMetadata,
        report: &mut CloneReport,
    ) {
        let payload = EditGuildPayload::from_metadata(source);

        match self.api.edit_guild(guild_id, &payload).await {
            Ok(()) => report.success("Updated target guild details."),
            Err(err) => {
                tracing::warn!("Failed to update guild {}: {}", guild_id, err);
                report.failure(format!(
                    "Failed to update target guild details. ({})",
                    failure_reason(&err)
                ));
            }
        }
    }
}
