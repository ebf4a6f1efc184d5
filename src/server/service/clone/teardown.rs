//! Best-effort deletion of existing target guild resources.

use futures::FutureExt;

use crate::server::{data::discord::DiscordApi, model::clone::CloneReport};

use super::{
    context::{run_bounded, CloneContext},
    failure_reason,
    snapshot::TargetSnapshot,
    CloneService,
};

impl<A: DiscordApi> CloneService<A> {
    /// Deletes every target channel and every role except `@everyone` and roles owned
    /// by an integration.
    ///
    /// Channel deletes and role deletes run side by side, each class bounded by
    /// `max_in_flight`. A failed delete is recorded and the remaining deletes still
    /// run. The `@everyone` role is skipped by exact name no matter where it appears
    /// in the snapshot. Managed roles are skipped with an informational line.
    ///
    /// # Arguments
    /// - `ctx` - Run context; no new deletes start once it is cancelled
    /// - `guild_id` - Target guild
    /// - `target` - Snapshot of the target guild taken just before
    /// - `report` - Receives one line per attempted delete
    pub(super) async fn delete_target_resources(
        &self,
        ctx: &CloneContext,
        guild_id: u64,
        target: &TargetSnapshot,
        report: &mut CloneReport,
    ) {
        let limit = self.settings.max_in_flight;

        let mut deletable_roles = Vec::with_capacity(target.roles.len());
        for role in target.roles.iter().filter(|role| !role.is_everyone()) {
            if role.managed {
                report.info(format!("Skipped managed role: {}", role.name));
            } else {
                deletable_roles.push(role);
            }
        }

        let channel_deletes = run_bounded(ctx, limit, &target.channels, |channel| {
            async move { (channel, self.api.delete_channel(channel.id).await) }.boxed()
        });

        let role_deletes = run_bounded(ctx, limit, deletable_roles, |role| {
            async move { (role, self.api.delete_role(guild_id, role.id).await) }.boxed()
        });

        let (channel_results, role_results) = tokio::join!(channel_deletes, role_deletes);

        for (channel, result) in channel_results {
            match result {
                Ok(()) => report.success(format!("Deleted channel: {}", channel.name)),
                Err(err) => {
                    tracing::warn!("Failed to delete channel {}: {}", channel.id, err);
                    report.failure(format!(
                        "Failed to delete channel: {} ({})",
                        channel.name,
                        failure_reason(&err)
                    ));
                }
            }
        }

        for (role, result) in role_results {
            match result {
                Ok(()) => report.success(format!("Deleted role: {}", role.name)),
                Err(err) => {
                    tracing::warn!("Failed to delete role {}: {}", role.id, err);
                    report.failure(format!(
                        "Failed to delete role: {} ({})",
                        role.name,
                        failure_reason(&err)
                    ));
                }
            }
        }
    }
}
