use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error};

use crate::movies::ApiError;
use crate::tmdb::{MoviePage, TmdbClient};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Non-success response; carries the message shown to the user.
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
    #[error("{0}")]
    Parse(#[from] serde_json::Error),
}

/// Where the browser page gets its movie lists from.
#[async_trait]
pub trait MovieSource: Send + Sync {
    async fn fetch_page(&self, page: u32) -> Result<MoviePage, FetchError>;
}

#[derive(Deserialize)]
struct ErrorMessage {
    message: Option<String>,
}

/// Calls the `/api/movies` proxy over HTTP, the way the page in a browser does.
pub struct HttpMovieSource {
    http: reqwest::Client,
    base_url: String,
}

impl HttpMovieSource {
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self::with_client(http, base_url))
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MovieSource for HttpMovieSource {
    async fn fetch_page(&self, page: u32) -> Result<MoviePage, FetchError> {
        let url = format!("{}/api/movies?page={}", self.base_url, page);
        debug!(url = %url, "Fetching movies");

        let response = self.http.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let code = status.as_u16();
            // Unreadable or non-JSON body: "HTTP error N". JSON without a
            // message: "Error: N".
            let parsed = match response.bytes().await {
                Ok(body) => serde_json::from_slice::<ErrorMessage>(&body).ok(),
                Err(_) => None,
            };
            let message = match parsed {
                Some(e) => e
                    .message
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| format!("Error: {}", code)),
                None => format!("HTTP error {}", code),
            };
            error!(status = code, message = %message, "Movie fetch failed");
            return Err(FetchError::Status {
                status: code,
                message,
            });
        }

        let body = response.bytes().await?;
        let page: MoviePage = serde_json::from_slice(&body)?;
        Ok(page)
    }
}

/// Goes straight to TMDB without the HTTP hop; used by the server-rendered page.
pub struct UpstreamMovieSource {
    tmdb: Arc<TmdbClient>,
}

impl UpstreamMovieSource {
    pub fn new(tmdb: Arc<TmdbClient>) -> Self {
        Self { tmdb }
    }
}

#[async_trait]
impl MovieSource for UpstreamMovieSource {
    async fn fetch_page(&self, page: u32) -> Result<MoviePage, FetchError> {
        match self.tmdb.popular(page).await {
            Ok(data) => Ok(serde_json::from_value(data)?),
            Err(e) => {
                let err = ApiError::from(e);
                Err(FetchError::Status {
                    status: err.status().as_u16(),
                    message: err.body().message,
                })
            }
        }
    }
}
