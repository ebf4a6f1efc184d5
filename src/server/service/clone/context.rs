//! Cancellation, deadline and bounded fan-out for a single clone run.

use std::future::Future;

use futures::{future::BoxFuture, stream, StreamExt};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::server::error::clone::CloneError;

/// Per-run control handle threaded through every stage.
///
/// Cancelling the token or passing the deadline stops in-flight fan-outs from starting
/// new requests; the orchestrator then aborts at the next stage barrier with the
/// partial report.
#[derive(Debug, Clone)]
pub struct CloneContext {
    cancel: CancellationToken,
    deadline: Instant,
}

impl CloneContext {
    pub fn new(cancel: CancellationToken, deadline: Instant) -> Self {
        Self { cancel, deadline }
    }

    pub fn cancel_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Completes once the run is cancelled or its deadline has passed.
    pub async fn cancelled(&self) {
        tokio::select! {
            _ = self.cancel.cancelled() => {}
            _ = tokio::time::sleep_until(self.deadline) => {}
        }
    }

    /// Checks the run may continue past a stage barrier.
    ///
    /// # Returns
    /// - `Ok(())` - Neither cancelled nor past the deadline
    /// - `Err(CloneError::Cancelled)` - The token was cancelled
    /// - `Err(CloneError::DeadlineExceeded)` - The deadline has passed
    pub fn ensure_active(&self) -> Result<(), CloneError> {
        if self.cancel.is_cancelled() {
            return Err(CloneError::Cancelled);
        }

        if Instant::now() >= self.deadline {
            return Err(CloneError::DeadlineExceeded);
        }

        Ok(())
    }
}

/// Runs `op` over `items` with at most `limit` futures in flight.
///
/// Results are returned in completion order. Once `ctx` is cancelled no further items
/// are started and results of unfinished ones are dropped, so the returned vector may
/// be shorter than the input.
/// `op` must return a boxed `Send` future.
pub fn run_bounded<'a, 'c, I, F, T>(
    ctx: &'c CloneContext,
    limit: usize,
    items: I,
    op: F,
) -> impl Future<Output = Vec<T>> + Send + use<'a, 'c, I, F, T>
where
    I: IntoIterator + Send,
    I::IntoIter: Send,
    I::Item: Send,
    F: FnMut(I::Item) -> BoxFuture<'a, T> + Send,
    T: Send + 'a,
{
    async move {
        stream::iter(items)
            .map(op)
            .buffer_unordered(limit.max(1))
            .take_until(ctx.cancelled())
            .collect()
            .await
    }
}
