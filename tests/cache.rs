//! Article cache round-trip tests through the public `db` surface.

use tempfile::TempDir;

use pubscout::config::Config;
use pubscout::db;
use pubscout::models::ResultItem;

fn cache_config(tmp: &TempDir) -> Config {
    let mut config = Config::default();
    config.cache.path = tmp.path().join("data").join("pubscout.sqlite");
    config
}

fn item(id: &str, summary: &str) -> ResultItem {
    ResultItem {
        id: id.to_string(),
        title: format!("title {}", id),
        body_text: "abstract text".to_string(),
        summary_text: summary.to_string(),
        year: Some(2023),
        origin: Some("India".to_string()),
    }
}

#[tokio::test]
async fn upsert_and_get_round_trip() {
    let tmp = TempDir::new().unwrap();
    let config = cache_config(&tmp);

    let pool = db::connect(&config).await.unwrap();
    db::init_schema(&pool).await.unwrap();

    let items = vec![item("38912345", "first summary"), item("38900001", "other")];
    let written = db::upsert_articles(&pool, &items).await.unwrap();
    assert_eq!(written, 2);

    let article = db::get_article(&pool, "38912345").await.unwrap().unwrap();
    assert_eq!(article.title, "title 38912345");
    assert_eq!(article.summary, "first summary");
    assert_eq!(article.year, Some(2023));
    assert_eq!(article.origin.as_deref(), Some("India"));
    assert!(article.cached_at > 0);

    pool.close().await;
}

#[tokio::test]
async fn upsert_replaces_existing_row() {
    let tmp = TempDir::new().unwrap();
    let config = cache_config(&tmp);

    let pool = db::connect(&config).await.unwrap();
    db::init_schema(&pool).await.unwrap();

    db::upsert_articles(&pool, &[item("A", "old")]).await.unwrap();
    db::upsert_articles(&pool, &[item("A", "new")]).await.unwrap();

    let article = db::get_article(&pool, "A").await.unwrap().unwrap();
    assert_eq!(article.summary, "new");

    pool.close().await;
}

#[tokio::test]
async fn get_missing_article_returns_none() {
    let tmp = TempDir::new().unwrap();
    let config = cache_config(&tmp);

    let pool = db::connect(&config).await.unwrap();
    db::init_schema(&pool).await.unwrap();

    assert!(db::get_article(&pool, "nope").await.unwrap().is_none());

    pool.close().await;
}

#[tokio::test]
async fn init_schema_is_idempotent() {
    let tmp = TempDir::new().unwrap();
    let config = cache_config(&tmp);

    let pool = db::connect(&config).await.unwrap();
    db::init_schema(&pool).await.unwrap();
    db::init_schema(&pool).await.unwrap();
    db::upsert_articles(&pool, &[item("A", "s")]).await.unwrap();
    assert!(db::get_article(&pool, "A").await.unwrap().is_some());

    pool.close().await;
}
