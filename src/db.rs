//! Embedded SQLite storage: pool lifecycle, schema bootstrap and catalog seeding.
//!
//! Every operation in the crate borrows a pooled connection through
//! `pool.begin()` and either commits or lets the `Transaction` guard drop,
//! which rolls back and hands the connection back to the pool.

use std::{str::FromStr, time::Duration};

use anyhow::Context;
use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use tracing::{debug, info};

mod schema;
mod seed;

pub use seed::{CATALOG, MOODS};

const BUSY_TIMEOUT: Duration = Duration::from_secs(10);

/// Open (creating if needed) the database behind `database_url`.
pub async fn connect(database_url: &str) -> anyhow::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(database_url)
        .with_context(|| format!("parse database url {database_url}"))?;
    open(options).await.context("connect to database")
}

async fn open(options: SqliteConnectOptions) -> sqlx::Result<SqlitePool> {
    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options.create_if_missing(true).busy_timeout(BUSY_TIMEOUT))
        .await
}

/// Create tables and indexes that are missing. Safe on every start.
pub async fn init_schema(db: &SqlitePool) -> sqlx::Result<()> {
    let mut tx = db.begin().await?;
    for stmt in schema::STATEMENTS {
        sqlx::query(stmt).execute(&mut *tx).await?;
    }
    tx.commit().await?;
    debug!("schema ensured");
    Ok(())
}

/// Load the fixed song catalog when the songs table is empty.
///
/// Returns how many rows were inserted, `0` if the table already had data.
pub async fn seed_if_empty(db: &SqlitePool) -> sqlx::Result<u64> {
    let mut tx = db.begin().await?;

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM songs")
        .fetch_one(&mut *tx)
        .await?;
    if count > 0 {
        tx.commit().await?;
        debug!(count, "songs already seeded");
        return Ok(0);
    }

    for song in CATALOG {
        sqlx::query(
            r#"
            INSERT INTO songs (title, artist, mood, cover_url, youtube_link)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(song.title)
        .bind(song.artist)
        .bind(song.mood)
        .bind(song.cover_url())
        .bind(song.youtube_link())
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    info!(inserted = CATALOG.len(), "song catalog seeded");
    Ok(CATALOG.len() as u64)
}

/// Fresh, migrated and seeded database inside `dir`.
#[cfg(test)]
pub(crate) async fn test_pool(dir: &tempfile::TempDir) -> SqlitePool {
    let options = SqliteConnectOptions::new().filename(dir.path().join("test.db"));
    let db = open(options).await.expect("open test db");
    init_schema(&db).await.expect("init schema");
    seed_if_empty(&db).await.expect("seed");
    db
}
