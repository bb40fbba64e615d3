//! Search orchestration: one query, one transport run, rendered results.
//!
//! Wires the pieces together for a CLI invocation: validates the query,
//! builds the HTTP client, picks the streaming or fallback path, hooks
//! Ctrl-C to the cancellation token, and renders the final accumulator
//! state. Exactly one user-visible error surfaces on failure (via the
//! anyhow boundary in `main`).

use anyhow::{Context, Result};
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use crate::accumulator::{AccumulatorState, SearchAccumulator, SearchPhase};
use crate::config::Config;
use crate::db;
use crate::fallback::FallbackTransport;
use crate::models::SearchQuery;
use crate::progress::ProgressMode;
use crate::stream::StreamingTransport;
use crate::transport::{RunOutcome, SearchTransport};

pub async fn run_search(
    config: &Config,
    query: SearchQuery,
    mode: ProgressMode,
    no_stream: bool,
) -> Result<()> {
    query.validate()?;
    let policy = config.search.duplicate_policy()?;

    // No overall timeout: a long stream must never be killed mid-transfer.
    // The caller cancels via Ctrl-C instead.
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(config.service.connect_timeout_secs))
        .build()
        .context("Failed to build HTTP client")?;

    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        });
    }

    let transport: Box<dyn SearchTransport> = if config.service.streaming && !no_stream {
        Box::new(StreamingTransport::new(client, &config.service.base_url))
    } else {
        Box::new(FallbackTransport::new(client, &config.service.base_url))
    };

    tracing::debug!(
        transport = transport.name(),
        topic = %query.topic,
        max_results = query.max_results,
        "starting search"
    );

    let mut accumulator = SearchAccumulator::new(policy, mode.observer());
    let outcome = transport
        .run(&query, &mut accumulator, &cancel)
        .await
        .with_context(|| format!("search failed ({} path)", transport.name()))?;

    if outcome == RunOutcome::Cancelled {
        eprintln!("search cancelled");
    }

    let state = accumulator.state();
    if state.items.is_empty() {
        println!("No results.");
        return Ok(());
    }

    render_results(state);

    if config.cache.enabled && state.phase == SearchPhase::Completed {
        if let Err(e) = write_cache(config, state).await {
            tracing::warn!(error = %e, "failed to write article cache");
        }
    }

    Ok(())
}

fn render_results(state: &AccumulatorState) {
    for (i, item) in state.items.iter().enumerate() {
        println!("{}. {}", i + 1, item.title);
        if let Some(year) = item.year {
            println!("    year: {}", year);
        }
        if let Some(ref origin) = item.origin {
            println!("    origin: {}", origin);
        }
        println!(
            "    summary: {}",
            item.summary_text.replace('\n', " ").trim()
        );
        println!("    id: {}", item.id);
        println!();
    }
    println!(
        "{} of {} summarized.",
        state.progress.completed, state.progress.total
    );
}

async fn write_cache(config: &Config, state: &AccumulatorState) -> Result<()> {
    let pool = db::connect(config).await?;
    db::init_schema(&pool).await?;
    let written = db::upsert_articles(&pool, &state.items).await?;
    pool.close().await;
    tracing::debug!(written, "article cache updated");
    Ok(())
}
