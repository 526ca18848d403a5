use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use tracing::warn;

use super::render::{render, render_document, PLACEHOLDER_SVG};
use super::source::UpstreamMovieSource;
use super::state::{BrowserState, MovieBrowser};
use crate::movies::parse_page;
use crate::server::AppState;
use crate::util::QueryParams;

/// `GET /?page=N` renders the movie list for page N on the server. A bad page
/// number is shown as the page's error view, never as JSON.
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<QueryParams>,
) -> Response {
    let image_base = &state.config.tmdb.image_base;

    let page = match parse_page(&params) {
        Ok(page) => page,
        Err(e) => {
            warn!("{}", e);
            let invalid = BrowserState {
                error: Some(e.to_string()),
                ..BrowserState::new(1)
            };
            let body = render(&invalid, image_base);
            return (e.status(), Html(render_document(&body))).into_response();
        }
    };

    let source = UpstreamMovieSource::new(state.tmdb.clone());
    let mut browser = MovieBrowser::with_page(source, page);
    browser.mount().await;

    let body = render(browser.state(), image_base);
    Html(render_document(&body)).into_response()
}

pub async fn placeholder() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "max-age=86400"),
        ],
        PLACEHOLDER_SVG,
    )
}
