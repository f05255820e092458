//! Show handlers: listing and creation
//!
//! A show pairs one artist with one venue at a required start time; it
//! cannot be edited or deleted once listed.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use chrono::{DateTime, NaiveDateTime, Utc};
use gigboard_common::Error;
use serde::Deserialize;
use tracing::warn;

use crate::api::pages::{self, escape};
use crate::db::shows::{self, NewShow};
use crate::error::{status_for, PageResult};
use crate::AppState;

/// Raw show create form submission
#[derive(Debug, Deserialize)]
pub struct ShowForm {
    #[serde(default)]
    pub artist_id: String,
    #[serde(default)]
    pub venue_id: String,
    #[serde(default)]
    pub start_time: String,
}

impl ShowForm {
    /// Validate the submission: both ids and the start time are
    /// required, and the start time is never defaulted to "now".
    fn validate(self) -> Result<NewShow, Error> {
        let artist_id: i64 = self
            .artist_id
            .trim()
            .parse()
            .map_err(|_| Error::Validation("Artist id must be a number".to_string()))?;
        let venue_id: i64 = self
            .venue_id
            .trim()
            .parse()
            .map_err(|_| Error::Validation("Venue id must be a number".to_string()))?;
        let start_time = parse_start_time(&self.start_time)?;

        Ok(NewShow {
            artist_id,
            venue_id,
            start_time,
        })
    }
}

/// Parse the start time form field.
///
/// Accepts RFC 3339 as well as the `datetime-local` input formats
/// (`2030-01-01T20:00` / `2030-01-01T20:00:00`, read as UTC).
fn parse_start_time(raw: &str) -> Result<DateTime<Utc>, Error> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::Validation("Show start time is required".to_string()));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(naive.and_utc());
        }
    }

    Err(Error::Validation(format!(
        "Could not parse show start time: {raw}"
    )))
}

/// GET /shows
pub async fn list(State(state): State<AppState>) -> PageResult<Html<String>> {
    let shows = shows::list_all(&state.db).await?;

    let mut body = String::from("<h1>Shows</h1>\n<ul>\n");
    for s in &shows {
        body.push_str(&format!(
            "<li><a href=\"/artists/{}\">{}</a> at <a href=\"/venues/{}\">{}</a>, {}</li>\n",
            s.artist_id,
            escape(&s.artist_name),
            s.venue_id,
            escape(&s.venue_name),
            s.start_time.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    body.push_str("</ul>");

    Ok(pages::layout("Shows", &body))
}

/// GET /shows/create
pub async fn create_form() -> Html<String> {
    pages::layout("New Show", &form_body(None))
}

/// POST /shows/create
pub async fn create_submit(
    State(state): State<AppState>,
    Form(form): Form<ShowForm>,
) -> Response {
    let show = match form.validate() {
        Ok(show) => show,
        Err(e) => {
            let body = form_body(Some(&e.to_string()));
            return (StatusCode::BAD_REQUEST, pages::layout("New Show", &body))
                .into_response();
        }
    };

    match shows::insert(&state.db, &show).await {
        Ok(_) => pages::home_page(Some("Show was successfully listed!")).into_response(),
        Err(e) => {
            warn!("Show create failed: {}", e);
            let notice = match e {
                Error::Integrity(_) => {
                    "Show could not be listed: no such artist or venue.".to_string()
                }
                _ => "Show could not be listed.".to_string(),
            };
            (status_for(&e), pages::home_page(Some(&notice))).into_response()
        }
    }
}

fn form_body(notice: Option<&str>) -> String {
    format!(
        "{}<h1>Show</h1>\n<form method=\"post\" action=\"/shows/create\">\n\
         <label>Artist id <input name=\"artist_id\"></label><br>\n\
         <label>Venue id <input name=\"venue_id\"></label><br>\n\
         <label>Start time <input type=\"datetime-local\" name=\"start_time\"></label><br>\n\
         <button type=\"submit\">Save</button>\n</form>",
        pages::notice_block(notice)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_time_accepts_datetime_local() {
        let dt = parse_start_time("2030-06-15T20:00").expect("should parse");
        assert_eq!(dt.to_rfc3339(), "2030-06-15T20:00:00+00:00");
    }

    #[test]
    fn start_time_accepts_rfc3339() {
        let dt = parse_start_time("2030-06-15T20:00:00+02:00").expect("should parse");
        assert_eq!(dt.to_rfc3339(), "2030-06-15T18:00:00+00:00");
    }

    #[test]
    fn empty_start_time_is_rejected() {
        assert!(matches!(
            parse_start_time("  "),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn garbage_start_time_is_rejected() {
        assert!(matches!(
            parse_start_time("next tuesday"),
            Err(Error::Validation(_))
        ));
    }

    #[test]
    fn non_numeric_ids_are_rejected() {
        let form = ShowForm {
            artist_id: "abc".to_string(),
            venue_id: "1".to_string(),
            start_time: "2030-06-15T20:00".to_string(),
        };
        assert!(matches!(form.validate(), Err(Error::Validation(_))));
    }
}
