use std::fmt::Write;

use super::state::{BrowserState, View};
use crate::tmdb::Movie;

pub const PLACEHOLDER_PATH: &str = "/placeholder.svg";

const LOADING_TEXT: &str = "영화를 불러오는 중...";
const ERROR_PREFIX: &str = "오류: ";
const NO_OVERVIEW: &str = "줄거리가 제공되지 않았습니다.";
const PREVIOUS_LABEL: &str = "이전 페이지";
const NEXT_LABEL: &str = "다음 페이지";

pub const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="300" viewBox="0 0 200 300"><rect width="200" height="300" fill="#ddd"/><text x="100" y="155" font-family="sans-serif" font-size="16" fill="#888" text-anchor="middle">No Image</text></svg>"##;

const STYLE: &str = "body{font-family:sans-serif;margin:0 auto;max-width:800px;padding:20px}\
ul{list-style:none;padding:0}\
.movie-item{display:flex;gap:16px;border-bottom:1px solid #eee;padding:12px 0}\
.movie-poster{width:100px;height:150px;object-fit:cover}\
.overview{color:#555}\
.pagination{display:flex;gap:12px;align-items:center;justify-content:center;margin:20px 0}";

/// Render the browser state as an HTML fragment. Exactly one of the loading
/// indicator, the error text or the movie list is shown.
pub fn render(state: &BrowserState, image_base: &str) -> String {
    match state.view() {
        View::Loading => format!("<p>{}</p>", escape(LOADING_TEXT)),
        View::Error(message) => format!("<p>{}{}</p>", escape(ERROR_PREFIX), escape(message)),
        View::List(movies) => render_list(state, movies, image_base),
    }
}

/// Wrap a fragment into a complete page.
pub fn render_document(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"ko\">\n<head>\n<meta charset=\"utf-8\">\n\
         <title>인기 영화 목록</title>\n<style>{}</style>\n</head>\n<body>\n{}\n</body>\n</html>\n",
        STYLE, body
    )
}

fn render_list(state: &BrowserState, movies: &[Movie], image_base: &str) -> String {
    let mut out = String::new();
    let _ = write!(
        out,
        "<div class=\"container\">\n<h1>인기 영화 목록 (TMDB) - 페이지 {}</h1>\n<ul>\n",
        state.page
    );
    for movie in movies {
        render_movie(&mut out, movie, image_base);
    }
    out.push_str("</ul>\n");
    render_pagination(&mut out, state);
    out.push_str("</div>");
    out
}

fn render_movie(out: &mut String, movie: &Movie, image_base: &str) {
    let poster = movie
        .poster_url(image_base)
        .unwrap_or_else(|| PLACEHOLDER_PATH.to_string());
    let title = escape(&movie.title);
    let _ = write!(
        out,
        "<li class=\"movie-item\">\
         <img src=\"{}\" alt=\"{}\" class=\"movie-poster\">\
         <div class=\"movie-info\">\
         <h2>{} ({})</h2>\
         <p>평점: {} (TMDb)</p>\
         <p class=\"overview\">{}</p>\
         </div></li>\n",
        escape(&poster),
        title,
        title,
        escape(movie.release_year().unwrap_or("N/A")),
        movie.vote_average,
        escape(movie.overview.as_deref().unwrap_or(NO_OVERVIEW)),
    );
}

fn render_pagination(out: &mut String, state: &BrowserState) {
    out.push_str("<div class=\"pagination\">\n");
    render_control(out, PREVIOUS_LABEL, state.can_go_previous(), state.page.saturating_sub(1));
    let _ = writeln!(out, "<span> 현재 페이지: {} </span>", state.page);
    render_control(out, NEXT_LABEL, state.can_go_next(), state.page.saturating_add(1));
    out.push_str("</div>\n");
}

fn render_control(out: &mut String, label: &str, enabled: bool, target: u32) {
    if enabled {
        let _ = writeln!(out, "<a class=\"button\" href=\"/?page={}\">{}</a>", target, label);
    } else {
        let _ = writeln!(out, "<button disabled>{}</button>", label);
    }
}

fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
