//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;

/// A location that hosts shows
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    /// Ordered genre list, stored as a JSON array column
    pub genres: Json<Vec<String>>,
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

/// A performer who can be booked into shows
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub genres: Json<Vec<String>>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: String,
    pub seeking_venue: bool,
    pub seeking_description: String,
    pub website: String,
    pub facebook_link: String,
}

/// A scheduled pairing of one artist and one venue at a start time.
/// Shows are immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Show {
    pub id: i64,
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

/// Split a comma-separated form field into an ordered genre list.
///
/// Whitespace around each entry is trimmed and empty entries dropped.
/// This is the only place commas carry meaning; storage is a JSON
/// array, so genre values themselves round-trip unmodified.
pub fn parse_genre_field(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}
