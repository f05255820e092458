//! Venue handlers: browse, search, detail, create, edit, delete

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use chrono::Utc;
use gigboard_common::db::models::{parse_genre_field, Venue};
use gigboard_common::Error;
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::api::pages::{self, escape};
use crate::db::venues::{self, CityGroup, NewVenue, VenueDetail, VenueSummary};
use crate::error::{status_for, PageResult};
use crate::AppState;

/// Search form body: single `search_term` field
#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Raw venue create/edit form submission.
///
/// Checkboxes arrive only when checked, so `seeking_talent` is an
/// `Option`; the genre field is a single comma-separated text input.
#[derive(Debug, Deserialize)]
pub struct VenueForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub image_link: String,
    pub seeking_talent: Option<String>,
    #[serde(default)]
    pub seeking_description: String,
    #[serde(default)]
    pub website_link: String,
    #[serde(default)]
    pub facebook_link: String,
}

impl VenueForm {
    /// Validate the submission; only the name is required
    fn validate(self) -> Result<NewVenue, Error> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Venue name is required".to_string()));
        }

        Ok(NewVenue {
            name: self.name.trim().to_string(),
            genres: parse_genre_field(&self.genres),
            city: self.city,
            state: self.state,
            address: self.address,
            phone: self.phone,
            image_link: self.image_link,
            seeking_talent: self.seeking_talent.is_some(),
            seeking_description: self.seeking_description,
            website: self.website_link,
            facebook_link: self.facebook_link,
        })
    }
}

/// GET /venues
pub async fn list(State(state): State<AppState>) -> PageResult<Html<String>> {
    let groups = venues::list_grouped_by_city(&state.db, Utc::now()).await?;
    Ok(pages::layout("Venues", &groups_body(&groups)))
}

/// POST /venues/search
pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> PageResult<Html<String>> {
    let outcome = venues::search(&state.db, &form.search_term, Utc::now()).await?;

    let mut body = format!(
        "<h1>Venue Search</h1>\n<p>{} result(s) for &quot;{}&quot;</p>\n<ul>\n",
        outcome.count,
        escape(&form.search_term)
    );
    for v in &outcome.data {
        body.push_str(&summary_item(v));
    }
    body.push_str("</ul>");

    Ok(pages::layout("Venue Search", &body))
}

/// GET /venues/:id
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> PageResult<Html<String>> {
    let detail = venues::detail(&state.db, id, Utc::now()).await?;
    Ok(pages::layout(&detail.venue.name, &detail_body(&detail)))
}

/// GET /venues/create
pub async fn create_form() -> Html<String> {
    pages::layout("New Venue", &form_body("/venues/create", None, None))
}

/// POST /venues/create
pub async fn create_submit(
    State(state): State<AppState>,
    Form(form): Form<VenueForm>,
) -> Response {
    let name = form.name.clone();

    let venue = match form.validate() {
        Ok(venue) => venue,
        Err(e) => {
            let body = form_body("/venues/create", None, Some(&e.to_string()));
            return (StatusCode::BAD_REQUEST, pages::layout("New Venue", &body))
                .into_response();
        }
    };

    match venues::insert(&state.db, &venue).await {
        Ok(_) => {
            pages::home_page(Some(&format!("Venue {name} was successfully listed!")))
                .into_response()
        }
        Err(e) => {
            warn!("Venue create failed: {}", e);
            let notice = format!("Venue {name} could not be listed.");
            (status_for(&e), pages::home_page(Some(&notice))).into_response()
        }
    }
}

/// GET /venues/:id/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> PageResult<Html<String>> {
    let venue = venues::find(&state.db, id).await?;
    let body = form_body(&format!("/venues/{id}/edit"), Some(&venue), None);
    Ok(pages::layout("Edit Venue", &body))
}

/// POST /venues/:id/edit
///
/// Edit failures surface a notice exactly like create failures.
pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<VenueForm>,
) -> Response {
    let venue = match form.validate() {
        Ok(venue) => venue,
        Err(e) => {
            let body = form_body(&format!("/venues/{id}/edit"), None, Some(&e.to_string()));
            return (StatusCode::BAD_REQUEST, pages::layout("Edit Venue", &body))
                .into_response();
        }
    };

    match venues::update(&state.db, id, &venue).await {
        Ok(()) => Redirect::to(&format!("/venues/{id}")).into_response(),
        Err(Error::NotFound(what)) => {
            pages::error_page(StatusCode::NOT_FOUND, &format!("Not found: {what}"))
        }
        Err(e) => {
            warn!("Venue edit failed: {}", e);
            let body = form_body(
                &format!("/venues/{id}/edit"),
                None,
                Some(&format!("Venue {} could not be updated.", venue.name)),
            );
            (status_for(&e), pages::layout("Edit Venue", &body)).into_response()
        }
    }
}

/// DELETE /venues/:id
///
/// Responds with a JSON success indicator rather than a page. A venue
/// with dependent shows is rejected with 409; a missing id yields 404.
pub async fn delete(State(state): State<AppState>, Path(id): Path<i64>) -> Response {
    match venues::delete(&state.db, id).await {
        Ok(()) => Json(json!({ "success": true })).into_response(),
        Err(e) => {
            warn!("Venue delete failed: {}", e);
            let status = status_for(&e);
            (status, Json(json!({ "success": false, "error": e.to_string() })))
                .into_response()
        }
    }
}

fn summary_item(v: &VenueSummary) -> String {
    format!(
        "<li><a href=\"/venues/{}\">{}</a> ({} upcoming)</li>\n",
        v.id,
        escape(&v.name),
        v.num_upcoming_shows
    )
}

fn groups_body(groups: &[CityGroup]) -> String {
    let mut body = String::from("<h1>Venues</h1>\n");
    for group in groups {
        body.push_str(&format!(
            "<h2>{}, {}</h2>\n<ul>\n",
            escape(&group.city),
            escape(&group.state)
        ));
        for v in &group.venues {
            body.push_str(&summary_item(v));
        }
        body.push_str("</ul>\n");
    }
    body
}

fn detail_body(detail: &VenueDetail) -> String {
    let v = &detail.venue;
    let mut body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p>{}, {} — {}</p>\n<p>Phone: {}</p>\n",
        escape(&v.name),
        escape(&v.genres.join(" / ")),
        escape(&v.city),
        escape(&v.state),
        escape(&v.address),
        escape(&v.phone),
    );
    if v.seeking_talent {
        body.push_str(&format!(
            "<p>Seeking talent: {}</p>\n",
            escape(&v.seeking_description)
        ));
    }

    body.push_str(&format!(
        "<h2>Upcoming shows ({})</h2>\n<ul>\n",
        detail.num_upcoming_shows
    ));
    for s in &detail.upcoming_shows {
        body.push_str(&format!(
            "<li><a href=\"/artists/{}\">{}</a> at {}</li>\n",
            s.artist_id,
            escape(&s.artist_name),
            s.start_time.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    body.push_str(&format!(
        "</ul>\n<h2>Past shows ({})</h2>\n<ul>\n",
        detail.num_past_shows
    ));
    for s in &detail.past_shows {
        body.push_str(&format!(
            "<li><a href=\"/artists/{}\">{}</a> at {}</li>\n",
            s.artist_id,
            escape(&s.artist_name),
            s.start_time.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    body.push_str(&format!(
        "</ul>\n<p><a href=\"/venues/{}/edit\">Edit venue</a></p>",
        v.id
    ));
    body
}

fn form_body(action: &str, prefill: Option<&Venue>, notice: Option<&str>) -> String {
    let text = |f: fn(&Venue) -> &str| prefill.map(f).map(escape).unwrap_or_default();
    let genres = prefill
        .map(|v| escape(&v.genres.join(", ")))
        .unwrap_or_default();
    let checked = if prefill.is_some_and(|v| v.seeking_talent) {
        " checked"
    } else {
        ""
    };

    format!(
        "{}<h1>Venue</h1>\n<form method=\"post\" action=\"{}\">\n\
         <label>Name <input name=\"name\" value=\"{}\"></label><br>\n\
         <label>Genres (comma separated) <input name=\"genres\" value=\"{}\"></label><br>\n\
         <label>City <input name=\"city\" value=\"{}\"></label><br>\n\
         <label>State <input name=\"state\" value=\"{}\"></label><br>\n\
         <label>Address <input name=\"address\" value=\"{}\"></label><br>\n\
         <label>Phone <input name=\"phone\" value=\"{}\"></label><br>\n\
         <label>Image link <input name=\"image_link\" value=\"{}\"></label><br>\n\
         <label>Seeking talent <input type=\"checkbox\" name=\"seeking_talent\"{}></label><br>\n\
         <label>Seeking description <input name=\"seeking_description\" value=\"{}\"></label><br>\n\
         <label>Website <input name=\"website_link\" value=\"{}\"></label><br>\n\
         <label>Facebook link <input name=\"facebook_link\" value=\"{}\"></label><br>\n\
         <button type=\"submit\">Save</button>\n</form>",
        pages::notice_block(notice),
        escape(action),
        text(|v| &v.name),
        genres,
        text(|v| &v.city),
        text(|v| &v.state),
        text(|v| &v.address),
        text(|v| &v.phone),
        text(|v| &v.image_link),
        checked,
        text(|v| &v.seeking_description),
        text(|v| &v.website),
        text(|v| &v.facebook_link),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_form() -> VenueForm {
        VenueForm {
            name: String::new(),
            genres: String::new(),
            city: String::new(),
            state: String::new(),
            address: String::new(),
            phone: String::new(),
            image_link: String::new(),
            seeking_talent: None,
            seeking_description: String::new(),
            website_link: String::new(),
            facebook_link: String::new(),
        }
    }

    #[test]
    fn missing_name_is_rejected() {
        let result = blank_form().validate();
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn checkbox_presence_maps_to_bool() {
        let mut form = blank_form();
        form.name = "The Musical Hop".to_string();
        form.seeking_talent = Some("on".to_string());
        let venue = form.validate().expect("form should validate");
        assert!(venue.seeking_talent);
    }

    #[test]
    fn genre_field_is_split_on_commas() {
        let mut form = blank_form();
        form.name = "The Musical Hop".to_string();
        form.genres = "Jazz, Reggae, Swing".to_string();
        let venue = form.validate().expect("form should validate");
        assert_eq!(venue.genres, vec!["Jazz", "Reggae", "Swing"]);
    }
}
