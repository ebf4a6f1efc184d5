//! Category-then-channel materialization.
//!
//! Phase A creates every category and fills a `CategoryMap`. Only after Phase A has
//! fully completed does Phase B build child payloads, so the map is never read while
//! it is still being written.

use futures::FutureExt;

use crate::server::{
    data::discord::DiscordApi,
    model::{
        clone::{CategoryMap, CloneReport},
        discord::{CreateChannelPayload, SourceChannel},
    },
};

use super::{
    context::{run_bounded, CloneContext},
    failure_reason, CloneService,
};

impl<A: DiscordApi> CloneService<A> {
    /// Phase A: creates every category channel of the source snapshot.
    ///
    /// # Arguments
    /// - `ctx` - Run context; no new creates start once it is cancelled
    /// - `guild_id` - Target guild
    /// - `channels` - Full source channel list; non-categories are ignored
    /// - `report` - Receives one line per attempted category
    ///
    /// # Returns
    /// - `CategoryMap` - Source to target ids of the categories that were created
    pub(super) async fn create_categories(
        &self,
        ctx: &CloneContext,
        guild_id: u64,
        channels: &[SourceChannel],
        report: &mut CloneReport,
    ) -> CategoryMap {
        let categories: Vec<&SourceChannel> = channels
            .iter()
            .filter(|channel| channel.is_category())
            .collect();

        let limit = self.settings.max_in_flight;
        let results = run_bounded(ctx, limit, categories, |category| {
            async move {
                let payload = CreateChannelPayload::category(category);
                (category, self.api.create_channel(guild_id, &payload).await)
            }
            .boxed()
        })
        .await;

        let mut category_map = CategoryMap::default();
        for (category, result) in results {
            match result {
                Ok(created) => {
                    category_map.insert(category.id, created.id);
                    report.success(format!("Created category: {}", created.name));
                }
                Err(err) => {
                    tracing::warn!("Failed to create category {}: {}", category.name, err);
                    report.failure(format!(
                        "Failed to create category: {} ({})",
                        category.name,
                        failure_reason(&err)
                    ));
                }
            }
        }

        tracing::info!(
            "Created {} categories in guild {}",
            category_map.len(),
            guild_id
        );

        category_map
    }

    /// Phase B: creates every non-category channel under its recreated category.
    ///
    /// Channels are sent in batches of `channel_batch_size` with a pause between
    /// batches. A channel whose category was not created is still created, without a
    /// parent.
    ///
    /// # Arguments
    /// - `ctx` - Run context; remaining batches are skipped once it is cancelled
    /// - `guild_id` - Target guild
    /// - `channels` - Full source channel list; categories are ignored
    /// - `categories` - Map produced by Phase A
    /// - `report` - Receives one line per attempted channel
    pub(super) async fn create_child_channels(
        &self,
        ctx: &CloneContext,
        guild_id: u64,
        channels: &[SourceChannel],
        categories: &CategoryMap,
        report: &mut CloneReport,
    ) {
        let children: Vec<&SourceChannel> = channels
            .iter()
            .filter(|channel| !channel.is_category())
            .collect();

        for channel in &children {
            if let Some(parent_id) = channel.parent_id {
                if categories.get(parent_id).is_none() {
                    report.info(format!(
                        "Category of {} was not created, creating it without a parent",
                        channel.name
                    ));
                }
            }
        }

        let batch_size = self.settings.channel_batch_size.max(1);
        for (index, batch) in children.chunks(batch_size).enumerate() {
            if index > 0 && !self.settings.channel_batch_pause.is_zero() {
                tracing::debug!(
                    "Pausing {:?} before channel batch {}",
                    self.settings.channel_batch_pause,
                    index + 1
                );
                tokio::select! {
                    _ = tokio::time::sleep(self.settings.channel_batch_pause) => {}
                    _ = ctx.cancelled() => {}
                }
            }

            if ctx.ensure_active().is_err() {
                return;
            }

            let results = run_bounded(
                ctx,
                self.settings.max_in_flight,
                batch.iter().copied(),
                |channel| {
                    async move {
                        let payload = CreateChannelPayload::child(channel, categories);
                        (channel, self.api.create_channel(guild_id, &payload).await)
                    }
                    .boxed()
                },
            )
            .await;

            for (channel, result) in results {
                match result {
                    Ok(_) => report.success(format!("Created channel: {}", channel.name)),
                    Err(err) => {
                        tracing::warn!("Failed to create channel {}: {}", channel.name, err);
                        report.failure(format!(
                            "Failed to create channel: {} ({})",
                            channel.name,
                            failure_reason(&err)
                        ));
                    }
                }
            }
        }
    }
}
