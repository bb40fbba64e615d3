//! # pubscout CLI
//!
//! The `pubscout` binary is a client for a remote article search and
//! summarization service. It submits a topic/filter query and renders the
//! returned article summaries — progressively while the transfer is still
//! in flight when the service streams NDJSON, or all at once over the
//! whole-response fallback.
//!
//! ## Usage
//!
//! ```bash
//! pubscout --config ./config/pubscout.toml <command>
//! ```
//!
//! ## Commands
//!
//! | Command | Description |
//! |---------|-------------|
//! | `pubscout search "<topic>"` | Run a search and render summaries |
//! | `pubscout get <id>` | Print a previously cached article |
//! | `pubscout init` | Create the local article cache database |
//!
//! ## Examples
//!
//! ```bash
//! # Stream results as they are summarized
//! pubscout search "machine learning" --origin India --max-results 20
//!
//! # Restrict to a publication window
//! pubscout search "tuberculosis screening" --from 2020-01-01 --to 2023-12-31
//!
//! # Force the whole-response path
//! pubscout search "public health" --no-stream
//!
//! # Machine-readable progress on stderr
//! pubscout search "genomics" --progress json
//! ```

use anyhow::{bail, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use pubscout::config::load_config;
use pubscout::db;
use pubscout::get;
use pubscout::models::{DateRange, SearchQuery};
use pubscout::progress::ProgressMode;
use pubscout::search;

/// pubscout — a streaming client for a remote article search and
/// summarization service.
///
/// All commands accept a `--config` flag pointing to a TOML configuration
/// file; without one, built-in defaults apply (local service at
/// `http://localhost:5000`, streaming enabled).
#[derive(Parser)]
#[command(
    name = "pubscout",
    about = "pubscout — a streaming client for a remote article search and summarization service",
    version,
    long_about = "pubscout submits topic/filter queries to a remote article search and \
    summarization service and renders the returned summaries. When the service streams \
    newline-delimited JSON, results appear incrementally while the transfer is still in \
    flight; otherwise a whole-response fallback produces the same output."
)]
struct Cli {
    /// Path to configuration file (TOML).
    ///
    /// Defaults to `./config/pubscout.toml`; when that file does not
    /// exist, built-in defaults apply.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand)]
enum Commands {
    /// Create the local article cache database.
    ///
    /// Idempotent — running it multiple times is safe.
    Init,

    /// Run a search against the summarizer service.
    ///
    /// Results stream in progressively when the service supports it;
    /// progress is reported on stderr, result cards on stdout.
    Search {
        /// Search topic, e.g. "machine learning".
        topic: String,

        /// Restrict to articles affiliated with this origin (country).
        #[arg(long)]
        origin: Option<String>,

        /// Only include articles published on or after this date (YYYY-MM-DD).
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Only include articles published on or before this date (YYYY-MM-DD).
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Maximum number of results (1-100).
        #[arg(long)]
        max_results: Option<u32>,

        /// Force the whole-response path even when streaming is configured.
        #[arg(long)]
        no_stream: bool,

        /// Progress reporting on stderr: auto, off, human, or json.
        #[arg(long, default_value = "auto")]
        progress: String,
    },

    /// Print a previously cached article by id.
    Get {
        /// Article id as shown in search results.
        id: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let explicit = cli.config.is_some();
    let config_path = cli
        .config
        .unwrap_or_else(|| PathBuf::from("./config/pubscout.toml"));
    let config = load_config(&config_path, explicit)?;

    match cli.command {
        Commands::Init => {
            let pool = db::connect(&config).await?;
            db::init_schema(&pool).await?;
            pool.close().await;
            println!(
                "Cache database initialized at {}",
                config.cache.path.display()
            );
        }

        Commands::Search {
            topic,
            origin,
            from,
            to,
            max_results,
            no_stream,
            progress,
        } => {
            let mode = match progress.as_str() {
                "auto" => ProgressMode::default_for_tty(),
                "off" => ProgressMode::Off,
                "human" => ProgressMode::Human,
                "json" => ProgressMode::Json,
                other => bail!("Unknown progress mode: {}. Use auto, off, human, or json.", other),
            };

            let query = SearchQuery {
                topic,
                origin: origin.or_else(|| config.defaults.origin.clone()),
                date_range: DateRange { start: from, end: to },
                max_results: max_results.unwrap_or(config.defaults.max_results),
            };

            search::run_search(&config, query, mode, no_stream).await?;
        }

        Commands::Get { id } => {
            get::run_get(&config, &id).await?;
        }
    }

    Ok(())
}
