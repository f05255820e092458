//! Artist handlers: browse, search, detail, create, edit
//!
//! Artists cannot be deleted; the lifecycle is create then edit.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use chrono::Utc;
use gigboard_common::db::models::{parse_genre_field, Artist};
use gigboard_common::Error;
use serde::Deserialize;
use tracing::warn;

use crate::api::pages::{self, escape};
use crate::api::venues::SearchForm;
use crate::db::artists::{self, ArtistDetail, NewArtist};
use crate::error::{status_for, PageResult};
use crate::AppState;

/// Raw artist create/edit form submission
#[derive(Debug, Deserialize)]
pub struct ArtistForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub image_link: String,
    pub seeking_venue: Option<String>,
    #[serde(default)]
    pub seeking_description: String,
    #[serde(default)]
    pub website_link: String,
    #[serde(default)]
    pub facebook_link: String,
}

impl ArtistForm {
    fn validate(self) -> Result<NewArtist, Error> {
        if self.name.trim().is_empty() {
            return Err(Error::Validation("Artist name is required".to_string()));
        }

        Ok(NewArtist {
            name: self.name.trim().to_string(),
            genres: parse_genre_field(&self.genres),
            city: self.city,
            state: self.state,
            phone: self.phone,
            image_link: self.image_link,
            seeking_venue: self.seeking_venue.is_some(),
            seeking_description: self.seeking_description,
            website: self.website_link,
            facebook_link: self.facebook_link,
        })
    }
}

/// GET /artists
pub async fn list(State(state): State<AppState>) -> PageResult<Html<String>> {
    let artists = artists::list_all(&state.db).await?;

    let mut body = String::from("<h1>Artists</h1>\n<ul>\n");
    for a in &artists {
        body.push_str(&format!(
            "<li><a href=\"/artists/{}\">{}</a></li>\n",
            a.id,
            escape(&a.name)
        ));
    }
    body.push_str("</ul>");

    Ok(pages::layout("Artists", &body))
}

/// POST /artists/search
pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> PageResult<Html<String>> {
    let outcome = artists::search(&state.db, &form.search_term, Utc::now()).await?;

    let mut body = format!(
        "<h1>Artist Search</h1>\n<p>{} result(s) for &quot;{}&quot;</p>\n<ul>\n",
        outcome.count,
        escape(&form.search_term)
    );
    for a in &outcome.data {
        body.push_str(&format!(
            "<li><a href=\"/artists/{}\">{}</a> ({} upcoming)</li>\n",
            a.id,
            escape(&a.name),
            a.num_upcoming_shows
        ));
    }
    body.push_str("</ul>");

    Ok(pages::layout("Artist Search", &body))
}

/// GET /artists/:id
pub async fn detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> PageResult<Html<String>> {
    let detail = artists::detail(&state.db, id, Utc::now()).await?;
    Ok(pages::layout(&detail.artist.name, &detail_body(&detail)))
}

/// GET /artists/create
pub async fn create_form() -> Html<String> {
    pages::layout("New Artist", &form_body("/artists/create", None, None))
}

/// POST /artists/create
pub async fn create_submit(
    State(state): State<AppState>,
    Form(form): Form<ArtistForm>,
) -> Response {
    let name = form.name.clone();

    let artist = match form.validate() {
        Ok(artist) => artist,
        Err(e) => {
            let body = form_body("/artists/create", None, Some(&e.to_string()));
            return (StatusCode::BAD_REQUEST, pages::layout("New Artist", &body))
                .into_response();
        }
    };

    match artists::insert(&state.db, &artist).await {
        Ok(_) => {
            pages::home_page(Some(&format!("Artist {name} was successfully listed!")))
                .into_response()
        }
        Err(e) => {
            warn!("Artist create failed: {}", e);
            let notice = format!("Artist {name} could not be listed.");
            (status_for(&e), pages::home_page(Some(&notice))).into_response()
        }
    }
}

/// GET /artists/:id/edit
pub async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> PageResult<Html<String>> {
    let artist = artists::find(&state.db, id).await?;
    let body = form_body(&format!("/artists/{id}/edit"), Some(&artist), None);
    Ok(pages::layout("Edit Artist", &body))
}

/// POST /artists/:id/edit
///
/// Edit failures surface a notice exactly like create failures.
pub async fn edit_submit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<ArtistForm>,
) -> Response {
    let artist = match form.validate() {
        Ok(artist) => artist,
        Err(e) => {
            let body = form_body(&format!("/artists/{id}/edit"), None, Some(&e.to_string()));
            return (StatusCode::BAD_REQUEST, pages::layout("Edit Artist", &body))
                .into_response();
        }
    };

    match artists::update(&state.db, id, &artist).await {
        Ok(()) => Redirect::to(&format!("/artists/{id}")).into_response(),
        Err(Error::NotFound(what)) => {
            pages::error_page(StatusCode::NOT_FOUND, &format!("Not found: {what}"))
        }
        Err(e) => {
            warn!("Artist edit failed: {}", e);
            let body = form_body(
                &format!("/artists/{id}/edit"),
                None,
                Some(&format!("Artist {} could not be updated.", artist.name)),
            );
            (status_for(&e), pages::layout("Edit Artist", &body)).into_response()
        }
    }
}

fn detail_body(detail: &ArtistDetail) -> String {
    let a = &detail.artist;
    let mut body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p>{}, {}</p>\n<p>Phone: {}</p>\n",
        escape(&a.name),
        escape(&a.genres.join(" / ")),
        escape(&a.city),
        escape(&a.state),
        escape(&a.phone),
    );
    if a.seeking_venue {
        body.push_str(&format!(
            "<p>Seeking a venue: {}</p>\n",
            escape(&a.seeking_description)
        ));
    }

    body.push_str(&format!(
        "<h2>Upcoming shows ({})</h2>\n<ul>\n",
        detail.num_upcoming_shows
    ));
    for s in &detail.upcoming_shows {
        body.push_str(&format!(
            "<li><a href=\"/venues/{}\">{}</a> at {}</li>\n",
            s.venue_id,
            escape(&s.venue_name),
            s.start_time.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    body.push_str(&format!(
        "</ul>\n<h2>Past shows ({})</h2>\n<ul>\n",
        detail.num_past_shows
    ));
    for s in &detail.past_shows {
        body.push_str(&format!(
            "<li><a href=\"/venues/{}\">{}</a> at {}</li>\n",
            s.venue_id,
            escape(&s.venue_name),
            s.start_time.format("%Y-%m-%d %H:%M UTC")
        ));
    }
    body.push_str(&format!(
        "</ul>\n<p><a href=\"/artists/{}/edit\">Edit artist</a></p>",
        a.id
    ));
    body
}

fn form_body(action: &str, prefill: Option<&Artist>, notice: Option<&str>) -> String {
    let text = |f: fn(&Artist) -> &str| prefill.map(f).map(escape).unwrap_or_default();
    let genres = prefill
        .map(|a| escape(&a.genres.join(", ")))
        .unwrap_or_default();
    let checked = if prefill.is_some_and(|a| a.seeking_venue) {
        " checked"
    } else {
        ""
    };

    format!(
        "{}<h1>Artist</h1>\n<form method=\"post\" action=\"{}\">\n\
         <label>Name <input name=\"name\" value=\"{}\"></label><br>\n\
         <label>Genres (comma separated) <input name=\"genres\" value=\"{}\"></label><br>\n\
         <label>City <input name=\"city\" value=\"{}\"></label><br>\n\
         <label>State <input name=\"state\" value=\"{}\"></label><br>\n\
         <label>Phone <input name=\"phone\" value=\"{}\"></label><br>\n\
         <label>Image link <input name=\"image_link\" value=\"{}\"></label><br>\n\
         <label>Seeking a venue <input type=\"checkbox\" name=\"seeking_venue\"{}></label><br>\n\
         <label>Seeking description <input name=\"seeking_description\" value=\"{}\"></label><br>\n\
         <label>Website <input name=\"website_link\" value=\"{}\"></label><br>\n\
         <label>Facebook link <input name=\"facebook_link\" value=\"{}\"></label><br>\n\
         <button type=\"submit\">Save</button>\n</form>",
        pages::notice_block(notice),
        escape(action),
        text(|a| &a.name),
        genres,
        text(|a| &a.city),
        text(|a| &a.state),
        text(|a| &a.phone),
        text(|a| &a.image_link),
        checked,
        text(|a| &a.seeking_description),
        text(|a| &a.website),
        text(|a| &a.facebook_link),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blank_form() -> ArtistForm {
        ArtistForm {
            name: String::new(),
            genres: String::new(),
            city: String::new(),
            state: String::new(),
            phone: String::new(),
            image_link: String::new(),
            seeking_venue: None,
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
    fn name_is_trimmed() {
        let mut form = blank_form();
        form.name = "  Guns N Petals  ".to_string();
        let artist = form.validate().expect("form should validate");
        assert_eq!(artist.name, "Guns N Petals");
    }
}
