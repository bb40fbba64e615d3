//! Progressive search over the streaming endpoint.
//!
//! One POST, then a read loop over the response body: bytes go through the
//! [`LineFramer`](crate::framer::LineFramer), each completed line through
//! [`decode_record`](crate::record::decode_record), and each decoded record
//! into the accumulator — all while the transfer is still in flight. The
//! loop is a single logical sequence of suspend points (one per chunk), so
//! records are applied strictly in arrival order and the view never sees
//! counters move backwards.

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::accumulator::{SearchAccumulator, SearchPhase};
use crate::error::SearchError;
use crate::framer::LineFramer;
use crate::models::SearchQuery;
use crate::record::decode_record;
use crate::transport::{RunOutcome, SearchTransport};

/// The progressive (NDJSON) request path.
pub struct StreamingTransport {
    client: reqwest::Client,
    endpoint: String,
}

impl StreamingTransport {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        Self {
            client,
            endpoint: format!("{}/api/search/stream", base_url.trim_end_matches('/')),
        }
    }
}

#[async_trait]
impl SearchTransport for StreamingTransport {
    fn name(&self) -> &str {
        "stream"
    }

    async fn run(
        &self,
        query: &SearchQuery,
        accumulator: &mut SearchAccumulator,
        cancel: &CancellationToken,
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
            tracing::error!(%status, endpoint = %self.endpoint, "stream establishment failed");
            accumulator.set_phase(SearchPhase::Failed);
            return Err(SearchError::Status {
                url: self.endpoint.clone(),
                status,
            });
        }

        let mut body = std::pin::pin!(response.bytes_stream());
        let mut framer = LineFramer::new();

        loop {
            // Cancellation is observed at the chunk suspend point; dropping
            // `body` on any exit path releases the underlying connection.
            let chunk = tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::debug!("search cancelled mid-stream");
                    return Ok(RunOutcome::Cancelled);
                }
                chunk = body.next() => chunk,
            };

            match chunk {
                None => {
                    // A trailing fragment with no terminator may be a
                    // truncated record; it is discarded, never parsed.
                    if let Some(fragment) = framer.flush() {
                        tracing::warn!(
                            len = fragment.len(),
                            "discarding unterminated trailing fragment"
                        );
                    }
                    accumulator.set_phase(SearchPhase::Completed);
                    return Ok(RunOutcome::Completed);
                }
                Some(Err(e)) => {
                    accumulator.set_phase(SearchPhase::Failed);
                    return Err(SearchError::Transport(e));
                }
                Some(Ok(bytes)) => {
                    if accumulator.phase() == SearchPhase::Idle {
                        accumulator.set_phase(SearchPhase::Streaming);
                    }
                    for line in framer.feed(&bytes) {
                        match decode_record(&line) {
                            Ok(record) => accumulator.apply(record),
                            Err(e) => {
                                tracing::warn!(error = %e, "skipping malformed stream record");
                            }
                        }
                    }
                }
            }
        }
    }
}
