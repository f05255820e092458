//! Artist queries and mutations

use chrono::{DateTime, Utc};
use gigboard_common::db::models::Artist;
use gigboard_common::{Error, Result};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::SqlitePool;

use super::SearchOutcome;

/// Flat id/name row for the artists listing page
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ArtistRef {
    pub id: i64,
    pub name: String,
}

/// Artist row annotated with its upcoming show count
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ArtistSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// One show on an artist's schedule, joined with the hosting venue
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: String,
    pub start_time: DateTime<Utc>,
}

/// Artist detail view: the record plus its schedule split around `now`
#[derive(Debug, Serialize)]
pub struct ArtistDetail {
    pub artist: Artist,
    pub past_shows: Vec<ArtistShow>,
    pub upcoming_shows: Vec<ArtistShow>,
    pub num_past_shows: usize,
    pub num_upcoming_shows: usize,
}

/// Fields accepted from the artist create/edit forms
#[derive(Debug, Clone)]
pub struct NewArtist {
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub website: String,
    pub facebook_link: String,
}

/// Flat listing of all artists
pub async fn list_all(pool: &SqlitePool) -> Result<Vec<ArtistRef>> {
    let artists = sqlx::query_as("SELECT id, name FROM artists ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(artists)
}

/// Case-insensitive substring match on artist name
pub async fn search(
    pool: &SqlitePool,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchOutcome<ArtistSummary>> {
    let data: Vec<ArtistSummary> = sqlx::query_as(
        "SELECT a.id, a.name,
                (SELECT COUNT(*) FROM shows s
                 WHERE s.artist_id = a.id AND s.start_time > ?) AS num_upcoming_shows
         FROM artists a
         WHERE instr(lower(a.name), lower(?)) > 0
         ORDER BY a.name",
    )
    .bind(now)
    .bind(term)
    .fetch_all(pool)
    .await?;

    Ok(SearchOutcome {
        count: data.len() as i64,
        data,
    })
}

/// Fetch one artist record, or a typed not-found error
pub async fn find(pool: &SqlitePool, id: i64) -> Result<Artist> {
    sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("artist {id}")))
}

/// Artist record plus its schedule partitioned into past and upcoming.
/// Same boundary rule as the venue detail: upcoming is strictly after
/// `now`.
pub async fn detail(pool: &SqlitePool, id: i64, now: DateTime<Utc>) -> Result<ArtistDetail> {
    let artist = find(pool, id).await?;

    let shows: Vec<ArtistShow> = sqlx::query_as(
        "SELECT v.id AS venue_id, v.name AS venue_name,
                v.image_link AS venue_image_link, s.start_time
         FROM shows s
         JOIN venues v ON v.id = s.venue_id
         WHERE s.artist_id = ?
         ORDER BY s.start_time",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let (upcoming_shows, past_shows): (Vec<_>, Vec<_>) =
        shows.into_iter().partition(|s| s.start_time > now);

    Ok(ArtistDetail {
        artist,
        num_past_shows: past_shows.len(),
        num_upcoming_shows: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

/// Insert a new artist, returning its generated id
pub async fn insert(pool: &SqlitePool, artist: &NewArtist) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO artists (name, genres, city, state, phone, image_link,
                              seeking_venue, seeking_description, website, facebook_link)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&artist.name)
    .bind(Json(&artist.genres))
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(&artist.image_link)
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .bind(&artist.website)
    .bind(&artist.facebook_link)
    .execute(&mut *tx)
    .await
    .map_err(Error::from_sqlx)?;

    tx.commit().await?;

    Ok(result.last_insert_rowid())
}

/// Overwrite an artist's mutable fields (last writer wins)
pub async fn update(pool: &SqlitePool, id: i64, artist: &NewArtist) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE artists
         SET name = ?, genres = ?, city = ?, state = ?, phone = ?, image_link = ?,
             seeking_venue = ?, seeking_description = ?, website = ?, facebook_link = ?
         WHERE id = ?",
    )
    .bind(&artist.name)
    .bind(Json(&artist.genres))
    .bind(&artist.city)
    .bind(&artist.state)
    .bind(&artist.phone)
    .bind(&artist.image_link)
    .bind(artist.seeking_venue)
    .bind(&artist.seeking_description)
    .bind(&artist.website)
    .bind(&artist.facebook_link)
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(Error::from_sqlx)?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {id}")));
    }

    tx.commit().await?;

    Ok(())
}
