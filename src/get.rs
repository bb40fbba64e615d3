//! Cached article retrieval by id.
//!
//! Looks an article up in the local cache and prints it. Used by the
//! `pubscout get` CLI command.

use anyhow::Result;

use crate::config::Config;
use crate::db;

/// CLI entry point — fetches from the cache and prints to stdout.
pub async fn run_get(config: &Config, id: &str) -> Result<()> {
    let pool = db::connect(config).await?;
    db::init_schema(&pool).await?;

    let article = db::get_article(&pool, id).await?;
    pool.close().await;

    let article = match article {
        Some(a) => a,
        None => {
            eprintln!("Error: article not cached: {}", id);
            std::process::exit(1);
        }
    };

    println!("--- Article ---");
    println!("id:        {}", article.id);
    println!("title:     {}", article.title);
    if let Some(year) = article.year {
        println!("year:      {}", year);
    }
    if let Some(ref origin) = article.origin {
        println!("origin:    {}", origin);
    }
    println!("cached_at: {}", format_ts_iso(article.cached_at));
    println!();

    println!("--- Summary ---");
    println!("{}", article.summary);
    println!();

    println!("--- Abstract ---");
    println!("{}", article.body);

    Ok(())
}

fn format_ts_iso(ts: i64) -> String {
    chrono::DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.format("%Y-%m-%dT%H:%M:%SZ").to_string())
        .unwrap_or_else(|| ts.to_string())
}
