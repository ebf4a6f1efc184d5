use futures::FutureExt;

use crate::server::{
    data::discord::DiscordApi,
    model::{
        clone::CloneReport,
        discord::{CreateRolePayload, SourceRole},
    },
};

use super::{
    context::{run_bounded, CloneContext},
    failure_reason, CloneService,
};

impl<A: DiscordApi> CloneService<A> {
    /// Recreates source roles in the target guild.
    ///
    /// `@everyone` is never sent. Roles owned by an integration cannot be created by a
    /// bot, so they are skipped with an informational line rather than counted as
    /// failures.
    ///
    /// # Arguments
    /// - `ctx` - Run context; no new creates start once it is cancelled
    /// - `guild_id` - Target guild
    /// - `roles` - Source role snapshot
    /// - `report` - Receives one line per role
    pub(super) async fn create_roles(
        &self,
        ctx: &CloneContext,
        guild_id: u64,
        roles: &[SourceRole],
        report: &mut CloneReport,
    ) {
        let mut creatable = Vec::with_capacity(roles.len());
        for role in roles.iter().filter(|role| !role.is_everyone()) {
            if role.managed {
                report.info(format!("Skipped managed role: {}", role.name));
            } else {
                creatable.push(role);
            }
        }

        let limit = self.settings.max_in_flight;
        let results = run_bounded(ctx, limit, creatable, |role| {
            async move {
                let payload = CreateRolePayload::from_role(role);
                (role, self.api.create_role(guild_id, &payload).await)
            }
            .boxed()
        })
        .await;

        for (role, result) in results {
            match result {
                Ok(_) => report.success(format!("Created role: {}", role.name)),
                Err(err) => {
                    tracing::warn!("Failed to create role {}: {}", role.name, err);
                    report.failure(format!(
                        "Failed to create role: {} ({})",
                        role.name,
                        failure_reason(&err)
                    ));
                }
            }
        }
    }
}
