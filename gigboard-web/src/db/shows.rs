//! Show queries and mutations
//!
//! Shows are immutable after creation: there is no update path, and
//! deletion is not exposed.

use chrono::{DateTime, Utc};
use gigboard_common::{Error, Result};
use serde::Serialize;
use sqlx::SqlitePool;

/// One show joined with both its venue and artist
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: DateTime<Utc>,
}

/// Fields accepted from the show create form
#[derive(Debug, Clone)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

/// Flat listing of every show, joined with venue and artist
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let shows = sqlx::query_as(
        "SELECT v.id AS venue_id, v.name AS venue_name,
                a.id AS artist_id, a.name AS artist_name,
                a.image_link AS artist_image_link, s.start_time
         FROM shows s
         JOIN venues v ON v.id = s.venue_id
         JOIN artists a ON a.id = s.artist_id
         ORDER BY s.start_time",
    )
    .fetch_all(pool)
    .await?;

    Ok(shows)
}

/// Insert a new show, returning its generated id.
///
/// A nonexistent artist or venue id trips the foreign key constraint
/// and surfaces as an integrity error.
pub async fn insert(pool: &SqlitePool, show: &NewShow) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO shows (artist_id, venue_id, start_time) VALUES (?, ?, ?)",
    )
    .bind(show.artist_id)
    .bind(show.venue_id)
    .bind(show.start_time)
    .execute(&mut *tx)
    .await
    .map_err(Error::from_sqlx)?;

    tx.commit().await?;

    Ok(result.last_insert_rowid())
}
