//! Venue queries and mutations

use chrono::{DateTime, Utc};
use gigboard_common::db::models::Venue;
use gigboard_common::{Error, Result};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::SqlitePool;

use super::SearchOutcome;

/// Venue row annotated with its upcoming show count
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: i64,
}

/// Venues sharing one (city, state) pair
#[derive(Debug, Serialize)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

/// One show on a venue's schedule, joined with the booked artist
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: String,
    pub start_time: DateTime<Utc>,
}

/// Venue detail view: the record plus its schedule split around `now`
#[derive(Debug, Serialize)]
pub struct VenueDetail {
    pub venue: Venue,
    pub past_shows: Vec<VenueShow>,
    pub upcoming_shows: Vec<VenueShow>,
    pub num_past_shows: usize,
    pub num_upcoming_shows: usize,
}

/// Fields accepted from the venue create/edit forms
#[derive(Debug, Clone)]
pub struct NewVenue {
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: String,
    pub seeking_talent: bool,
    pub seeking_description: String,
    pub website: String,
    pub facebook_link: String,
}

const UPCOMING_COUNT: &str =
    "(SELECT COUNT(*) FROM shows s WHERE s.venue_id = v.id AND s.start_time > ?)";

/// All venues grouped by (city, state), each annotated with a count of
/// upcoming shows at that venue.
pub async fn list_grouped_by_city(
    pool: &SqlitePool,
    now: DateTime<Utc>,
) -> Result<Vec<CityGroup>> {
    let cities: Vec<(String, String)> = sqlx::query_as(
        "SELECT city, state FROM venues GROUP BY city, state ORDER BY state, city",
    )
    .fetch_all(pool)
    .await?;

    let mut groups = Vec::with_capacity(cities.len());
    for (city, state) in cities {
        let venues: Vec<VenueSummary> = sqlx::query_as(&format!(
            "SELECT v.id, v.name, {UPCOMING_COUNT} AS num_upcoming_shows
             FROM venues v
             WHERE v.city = ? AND v.state = ?
             ORDER BY v.name"
        ))
        .bind(now)
        .bind(&city)
        .bind(&state)
        .fetch_all(pool)
        .await?;

        groups.push(CityGroup { city, state, venues });
    }

    Ok(groups)
}

/// Case-insensitive substring match on venue name.
///
/// `instr` keeps the term literal; SQL LIKE wildcards in the user's
/// input carry no meaning here.
pub async fn search(
    pool: &SqlitePool,
    term: &str,
    now: DateTime<Utc>,
) -> Result<SearchOutcome<VenueSummary>> {
    let data: Vec<VenueSummary> = sqlx::query_as(&format!(
        "SELECT v.id, v.name, {UPCOMING_COUNT} AS num_upcoming_shows
         FROM venues v
         WHERE instr(lower(v.name), lower(?)) > 0
         ORDER BY v.name"
    ))
    .bind(now)
    .bind(term)
    .fetch_all(pool)
    .await?;

    Ok(SearchOutcome {
        count: data.len() as i64,
        data,
    })
}

/// Fetch one venue record, or a typed not-found error
pub async fn find(pool: &SqlitePool, id: i64) -> Result<Venue> {
    sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("venue {id}")))
}

/// Venue record plus its schedule partitioned into past and upcoming.
///
/// A show starting exactly at `now` counts as past: upcoming means
/// strictly later than the query time.
pub async fn detail(pool: &SqlitePool, id: i64, now: DateTime<Utc>) -> Result<VenueDetail> {
    let venue = find(pool, id).await?;

    let shows: Vec<VenueShow> = sqlx::query_as(
        "SELECT a.id AS artist_id, a.name AS artist_name,
                a.image_link AS artist_image_link, s.start_time
         FROM shows s
         JOIN artists a ON a.id = s.artist_id
         WHERE s.venue_id = ?
         ORDER BY s.start_time",
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    let (upcoming_shows, past_shows): (Vec<_>, Vec<_>) =
        shows.into_iter().partition(|s| s.start_time > now);

    Ok(VenueDetail {
        venue,
        num_past_shows: past_shows.len(),
        num_upcoming_shows: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

/// Insert a new venue, returning its generated id
pub async fn insert(pool: &SqlitePool, venue: &NewVenue) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "INSERT INTO venues (name, genres, city, state, address, phone, image_link,
                             seeking_talent, seeking_description, website, facebook_link)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&venue.name)
    .bind(Json(&venue.genres))
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .bind(&venue.website)
    .bind(&venue.facebook_link)
    .execute(&mut *tx)
    .await
    .map_err(Error::from_sqlx)?;

    tx.commit().await?;

    Ok(result.last_insert_rowid())
}

/// Overwrite a venue's mutable fields. Last writer wins; there is no
/// optimistic concurrency check.
pub async fn update(pool: &SqlitePool, id: i64, venue: &NewVenue) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        "UPDATE venues
         SET name = ?, genres = ?, city = ?, state = ?, address = ?, phone = ?,
             image_link = ?, seeking_talent = ?, seeking_description = ?,
             website = ?, facebook_link = ?
         WHERE id = ?",
    )
    .bind(&venue.name)
    .bind(Json(&venue.genres))
    .bind(&venue.city)
    .bind(&venue.state)
    .bind(&venue.address)
    .bind(&venue.phone)
    .bind(&venue.image_link)
    .bind(venue.seeking_talent)
    .bind(&venue.seeking_description)
    .bind(&venue.website)
    .bind(&venue.facebook_link)
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(Error::from_sqlx)?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {id}")));
    }

    tx.commit().await?;

    Ok(())
}

/// Delete a venue by id.
///
/// Dependent shows make the foreign key constraint reject the delete,
/// surfacing as an integrity error.
pub async fn delete(pool: &SqlitePool, id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(Error::from_sqlx)?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {id}")));
    }

    tx.commit().await?;

    Ok(())
}
