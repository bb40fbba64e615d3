//! Transport seam: one interface, two request paths.
//!
//! The streaming and whole-response paths produce the same accumulator
//! transition sequence, so the rendering side is agnostic to which one ran.
//! Selection happens by configuration (`service.streaming`) or the
//! `--no-stream` flag — a failed stream is never silently retried over the
//! fallback path.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::accumulator::SearchAccumulator;
use crate::error::SearchError;
use crate::models::SearchQuery;

/// How one transport run ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The transfer ran to end-of-stream (or whole-response arrival).
    Completed,
    /// Cancellation was observed; the accumulator is frozen as-is.
    Cancelled,
}

/// A request path that drives one search into an accumulator.
#[async_trait]
pub trait SearchTransport: Send + Sync {
    /// Short label for logs (`"stream"`, `"fallback"`).
    fn name(&self) -> &str;

    /// Run a single attempt. On transport failure the implementation sets
    /// `phase = Failed` before returning the error; no retry is performed.
    async fn run(
        &self,
        query: &SearchQuery,
        accumulator: &mut SearchAccumulator,
        cancel: &CancellationToken,
    ) -> Result<RunOutcome, SearchError>;
}
