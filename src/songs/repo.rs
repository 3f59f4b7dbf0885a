use serde::Serialize;
use sqlx::{FromRow, SqlitePool};
use time::PrimitiveDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Song {
    pub song_id: i64,
    pub title: String,
    pub artist: String,
    pub mood: String,
    pub cover_url: String,
    pub youtube_link: String,
    #[serde(skip_serializing)]
    pub created_at: PrimitiveDateTime,
}

impl Song {
    /// Every song whose mood equals `mood`, ignoring ASCII case. Unordered.
    pub async fn list_by_mood(db: &SqlitePool, mood: &str) -> sqlx::Result<Vec<Song>> {
        let mut tx = db.begin().await?;
        let rows = sqlx::query_as::<_, Song>(
            r#"
            SELECT song_id, title, artist, mood, cover_url, youtube_link, created_at
            FROM songs
            WHERE mood = ? COLLATE NOCASE
            "#,
        )
        .bind(mood)
        .fetch_all(&mut *tx)
        .await?;
        tx.commit().await?;
        Ok(rows)
    }
}
