use rand::{seq::SliceRandom, Rng};
use sqlx::SqlitePool;
use tracing::debug;

use super::repo::Song;
use crate::error::AppError;

pub const MAX_RECOMMENDATIONS: usize = 10;

/// Shuffle `songs` and keep at most `limit` of them.
pub fn sample_songs<R: Rng + ?Sized>(mut songs: Vec<Song>, limit: usize, rng: &mut R) -> Vec<Song> {
    songs.shuffle(rng);
    songs.truncate(limit);
    songs
}

/// A fresh random sample of up to ten songs tagged `mood` (any case).
///
/// An unknown mood and a known mood with no catalog entries both give an
/// empty list.
pub async fn songs_by_mood(db: &SqlitePool, mood: &str) -> Result<Vec<Song>, AppError> {
    let matches = Song::list_by_mood(db, mood).await?;
    let total = matches.len();
    let sample = sample_songs(matches, MAX_RECOMMENDATIONS, &mut rand::thread_rng());
    debug!(mood, total, returned = sample.len(), "songs sampled");
    Ok(sample)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{test_pool, CATALOG};
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    fn fake_song(id: i64) -> Song {
        Song {
            song_id: id,
            title: format!("Song {id}"),
            artist: "Nobody".into(),
            mood: "Calm".into(),
            cover_url: String::new(),
            youtube_link: String::new(),
            created_at: time::macros::datetime!(2024-01-01 0:00),
        }
    }

    fn ids(songs: &[Song]) -> BTreeSet<i64> {
        songs.iter().map(|s| s.song_id).collect()
    }

    #[test]
    fn sample_is_bounded_and_drawn_from_input() {
        let input: Vec<Song> = (1..=30).map(fake_song).collect();
        let out = sample_songs(input, MAX_RECOMMENDATIONS, &mut StdRng::seed_from_u64(1));
        assert_eq!(out.len(), 10);
        assert!(ids(&out).iter().all(|id| (1..=30).contains(id)));
        assert_eq!(ids(&out).len(), 10, "no duplicates");
    }

    #[test]
    fn sample_keeps_short_inputs_whole() {
        let input: Vec<Song> = (1..=3).map(fake_song).collect();
        let out = sample_songs(input, MAX_RECOMMENDATIONS, &mut StdRng::seed_from_u64(2));
        assert_eq!(ids(&out), BTreeSet::from([1, 2, 3]));
    }

    #[test]
    fn sample_order_varies_with_the_rng() {
        let input: Vec<Song> = (1..=20).map(fake_song).collect();
        let orders: BTreeSet<Vec<i64>> = (0..8)
            .map(|seed| {
                sample_songs(input.clone(), 20, &mut StdRng::seed_from_u64(seed))
                    .iter()
                    .map(|s| s.song_id)
                    .collect()
            })
            .collect();
        assert!(orders.len() > 1);
    }

    #[tokio::test]
    async fn mood_match_ignores_case() {
        let dir = TempDir::new().unwrap();
        let db = test_pool(&dir).await;

        let lower = songs_by_mood(&db, "happy").await.unwrap();
        let upper = songs_by_mood(&db, "HAPPY").await.unwrap();
        assert_eq!(lower.len(), 5);
        assert_eq!(ids(&lower), ids(&upper));
        assert!(lower.iter().all(|s| s.mood.eq_ignore_ascii_case("happy")));
        assert!(lower
            .iter()
            .any(|s| s.title == "Happy" && s.artist == "Pharrell Williams"));
    }

    #[tokio::test]
    async fn unknown_mood_is_empty() {
        let dir = TempDir::new().unwrap();
        let db = test_pool(&dir).await;
        assert!(songs_by_mood(&db, "NonexistentMood").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn large_moods_are_capped_at_ten() {
        let dir = TempDir::new().unwrap();
        let db = test_pool(&dir).await;
        let seed = CATALOG[0];
        for i in 0..15 {
            sqlx::query(
                "INSERT INTO songs (title, artist, mood, cover_url, youtube_link) VALUES (?, ?, 'happy', ?, ?)",
            )
            .bind(format!("Extra {i}"))
            .bind(seed.artist)
            .bind(seed.cover_url())
            .bind(seed.youtube_link())
            .execute(&db)
            .await
            .unwrap();
        }

        let sample = songs_by_mood(&db, "Happy").await.unwrap();
        assert_eq!(sample.len(), MAX_RECOMMENDATIONS);
        assert!(sample.iter().all(|s| s.mood.eq_ignore_ascii_case("happy")));
    }
}
