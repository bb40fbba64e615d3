//! Whole-response search for environments without chunked streaming.
//!
//! The entire JSON array arrives before any result is visible, then the
//! accumulator is populated in response order and completed in one step —
//! the final state is indistinguishable from a completed streaming run.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::accumulator::{SearchAccumulator, SearchPhase};
use crate::error::SearchError;
use crate::models::{ResultItem, SearchQuery};
use crate::transport::{RunOutcome, SearchTransport};

/// The non-streaming request path.
pub struct FallbackTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl FallbackTransport {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/search", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl SearchTransport for FallbackTransport {
    fn name(&self) -> &str {
        "fallback"
    }

    /// Not cancellable mid-flight: the whole response must arrive before
    /// any result is visible, so the token is only honored between runs.
    async fn run(
        &self,
        query: &SearchQuery,
        accumulator: &mut SearchAccumulator,
        _cancel: &CancellationToken,
    ) -> Result<RunOutcome, SearchError> {
        let response = match self.client.post(&self.endpoint).json(query).send().await {
            Ok(response) => response,
            Err(e) => {
                accumulator.set_phase(SearchPhase::Failed);
                return Err(SearchError::Transport(e));
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::error!(%status, endpoint = %self.endpoint, "fallback request failed");
            accumulator.set_phase(SearchPhase::Failed);
            return Err(SearchError::Status {
                url: self.endpoint.clone(),
                status,
            });
        }

        let items: Vec<ResultItem> = match response.json().await {
            Ok(items) => items,
            Err(e) => {
                accumulator.set_phase(SearchPhase::Failed);
                return Err(SearchError::Transport(e));
            }
        };

        let n = items.len() as u64;
        for item in items {
            accumulator.append(item);
        }
        accumulator.set_progress(n, n);
        accumulator.set_phase(SearchPhase::Completed);
        Ok(RunOutcome::Completed)
    }
}
