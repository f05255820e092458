//! Page shell and static pages
//!
//! Server-side rendering is deliberately thin: a shared layout, an
//! escaping helper, and per-page body builders in the handler modules.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

/// Escape text for interpolation into HTML element content or
/// double-quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Wrap a page body in the shared shell with navigation
pub fn layout(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>{} | Gigboard</title>\n</head>\n<body>\n\
         <nav><a href=\"/\">Home</a> | <a href=\"/venues\">Venues</a> | \
         <a href=\"/artists\">Artists</a> | <a href=\"/shows\">Shows</a></nav>\n\
         {}\n</body>\n</html>\n",
        escape(title),
        body
    ))
}

/// Transient user-facing message, rendered at the top of a page body
pub fn notice_block(notice: Option<&str>) -> String {
    match notice {
        Some(msg) => format!("<div class=\"notice\">{}</div>\n", escape(msg)),
        None => String::new(),
    }
}

/// Home page body, with an optional flash notice
pub fn home_page(notice: Option<&str>) -> Html<String> {
    let body = format!(
        "{}<h1>Gigboard</h1>\n\
         <p>Browse <a href=\"/venues\">venues</a>, <a href=\"/artists\">artists</a> \
         and <a href=\"/shows\">shows</a>, or list a new \
         <a href=\"/venues/create\">venue</a>, <a href=\"/artists/create\">artist</a> \
         or <a href=\"/shows/create\">show</a>.</p>",
        notice_block(notice)
    );
    layout("Home", &body)
}

/// GET /
pub async fn home() -> Html<String> {
    home_page(None)
}

/// Static error page with the given status
pub fn error_page(status: StatusCode, message: &str) -> Response {
    let title = match status {
        StatusCode::NOT_FOUND => "Not Found",
        StatusCode::BAD_REQUEST => "Bad Request",
        StatusCode::CONFLICT => "Conflict",
        _ => "Server Error",
    };
    let body = format!(
        "<h1>{} {}</h1>\n<p>{}</p>",
        status.as_u16(),
        title,
        escape(message)
    );
    (status, layout(title, &body)).into_response()
}

/// Fallback handler for unmatched routes
pub async fn not_found() -> Response {
    error_page(StatusCode::NOT_FOUND, "This page does not exist")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_handles_markup_characters() {
        assert_eq!(
            escape("<b>\"Guns & Petals\"</b>"),
            "&lt;b&gt;&quot;Guns &amp; Petals&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape("The Musical Hop"), "The Musical Hop");
    }

    #[test]
    fn notice_block_escapes_message() {
        let block = notice_block(Some("<script>"));
        assert!(block.contains("&lt;script&gt;"));
        assert!(!block.contains("<script>"));
    }

    #[test]
    fn notice_block_empty_without_message() {
        assert!(notice_block(None).is_empty());
    }
}
