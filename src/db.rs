//! Local article cache.
//!
//! Completed search results are written through to a SQLite database so
//! previously summarized articles can be looked up again with
//! `pubscout get <id>`. The cache only records finished results — it never
//! feeds the accumulator, so two searches can never mix.

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::str::FromStr;

use crate::config::Config;
use crate::models::ResultItem;

pub async fn connect(config: &Config) -> Result<SqlitePool> {
    let db_path = &config.cache.path;

    // Ensure parent directory exists
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", db_path.display()))?
        .create_if_missing(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Create the cache schema. Idempotent — safe to run on every connect.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS articles (
            id        TEXT PRIMARY KEY,
            title     TEXT NOT NULL,
            body      TEXT NOT NULL,
            summary   TEXT NOT NULL,
            year      INTEGER,
            origin    TEXT,
            cached_at INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Write a batch of completed results through to the cache. Later results
/// for the same id replace earlier ones.
pub async fn upsert_articles(pool: &SqlitePool, items: &[ResultItem]) -> Result<u64> {
    let now = chrono::Utc::now().timestamp();
    let mut written = 0u64;

    for item in items {
        sqlx::query(
            r#"
            INSERT OR REPLACE INTO articles (id, title, body, summary, year, origin, cached_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&item.id)
        .bind(&item.title)
        .bind(&item.body_text)
        .bind(&item.summary_text)
        .bind(item.year)
        .bind(&item.origin)
        .bind(now)
        .execute(pool)
        .await?;
        written += 1;
    }

    Ok(written)
}

/// One cached article row.
#[derive(Debug, Clone)]
pub struct CachedArticle {
    pub id: String,
    pub title: String,
    pub body: String,
    pub summary: String,
    pub year: Option<i64>,
    pub origin: Option<String>,
    pub cached_at: i64,
}

pub async fn get_article(pool: &SqlitePool, id: &str) -> Result<Option<CachedArticle>> {
    let row = sqlx::query(
        "SELECT id, title, body, summary, year, origin, cached_at FROM articles WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|row| CachedArticle {
        id: row.get("id"),
        title: row.get("title"),
        body: row.get("body"),
        summary: row.get("summary"),
        year: row.get("year"),
        origin: row.get("origin"),
        cached_at: row.get("cached_at"),
    }))
}
