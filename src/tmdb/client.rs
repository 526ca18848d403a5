use reqwest::Url;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::TmdbConfig;

const POPULAR_PATH: &str = "/3/movie/popular";
const API_KEY_PARAM: &str = "api_key";
const REDACTED: &str = "***";

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("TMDB API key is not configured")]
    MissingApiKey,
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Request to TMDB failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("TMDB API error: {status} - {reason}. Response from TMDB: {body}")]
    Status {
        status: u16,
        reason: String,
        body: String,
    },
    #[error("Invalid JSON from TMDB: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Client for the TMDB popular-movies endpoint. Holds the credential for the
/// lifetime of the process.
pub struct TmdbClient {
    http: reqwest::Client,
    api_key: Option<String>,
    api_base: String,
    language: String,
}

impl TmdbClient {
    pub fn new(config: &TmdbConfig) -> Result<Self, UpstreamError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(UpstreamError::Client)?;

        Ok(Self {
            http,
            api_key: config.api_key().map(str::to_string),
            api_base: config.api_base.trim_end_matches('/').to_string(),
            language: config.language.clone(),
        })
    }

    pub fn popular_url(&self, page: u32) -> Result<String, UpstreamError> {
        let api_key = self.api_key.as_deref().ok_or(UpstreamError::MissingApiKey)?;
        Ok(format!(
            "{}{}?api_key={}&language={}&page={}",
            self.api_base,
            POPULAR_PATH,
            urlencoding::encode(api_key),
            urlencoding::encode(&self.language),
            page
        ))
    }

    /// Fetch one page of popular movies and return the upstream JSON untouched.
    pub async fn popular(&self, page: u32) -> Result<Value, UpstreamError> {
        let url = self.popular_url(page)?;
        info!(url = %redact_api_key(&url), "Requesting popular movies from TMDB");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| UpstreamError::Transport(e.without_url()))?;

        let status = response.status();
        info!(status = status.as_u16(), "TMDB responded");

        if !status.is_success() {
            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    warn!(
                        status = status.as_u16(),
                        error = %e.without_url(),
                        "Failed to read TMDB error body"
                    );
                    String::new()
                }
            };
            error!(status = status.as_u16(), body = %body, "TMDB API error");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body,
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| UpstreamError::Transport(e.without_url()))?;
        let data: Value = serde_json::from_slice(&bytes).map_err(UpstreamError::Parse)?;

        match data.get("results").and_then(Value::as_array) {
            Some(results) => info!(count = results.len(), page, "Received popular movies"),
            None => debug!(page, "TMDB response has no results field"),
        }

        Ok(data)
    }
}

/// Replace the value of the `api_key` query parameter so the URL can be logged.
/// Accepts absolute URLs and bare `/path?query` request targets.
pub fn redact_api_key(url: &str) -> String {
    if let Ok(mut parsed) = Url::parse(url) {
        redact_query(&mut parsed);
        return parsed.to_string();
    }

    let relative = Url::parse("http://localhost").and_then(|base| base.join(url));
    match relative {
        Ok(mut parsed) => {
            redact_query(&mut parsed);
            match parsed.query() {
                Some(query) => format!("{}?{}", parsed.path(), query),
                None => parsed.path().to_string(),
            }
        }
        // Unparseable: drop the query rather than risk logging it.
        Err(_) => url.split('?').next().unwrap_or_default().to_string(),
    }
}

fn redact_query(url: &mut Url) {
    if !url.query_pairs().any(|(k, _)| k == API_KEY_PARAM) {
        return;
    }
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == API_KEY_PARAM {
                REDACTED.to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), v)
        })
        .collect();
    url.query_pairs_mut().clear().extend_pairs(pairs);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(api_key: Option<&str>) -> TmdbClient {
        let config = TmdbConfig {
            api_key: api_key.map(str::to_string),
            api_base: "https://api.example.org/".to_string(),
            ..TmdbConfig::default()
        };
        TmdbClient::new(&config).unwrap()
    }

    #[test]
    fn test_popular_url() {
        let url = client(Some("k3y")).popular_url(7).unwrap();
        assert_eq!(
            url,
            "https://api.example.org/3/movie/popular?api_key=k3y&language=ko-KR&page=7"
        );
    }

    #[test]
    fn test_popular_url_encodes_key() {
        let url = client(Some("a&b")).popular_url(1).unwrap();
        assert!(url.contains("api_key=a%26b&"));
    }

    #[test]
    fn test_missing_key() {
        let client = client(None);
        assert!(matches!(
            client.popular_url(1),
            Err(UpstreamError::MissingApiKey)
        ));
    }

    #[test]
    fn test_redact() {
        assert_eq!(
            redact_api_key("https://h/3/movie/popular?api_key=secret&language=ko-KR&page=1"),
            "https://h/3/movie/popular?api_key=***&language=ko-KR&page=1"
        );
        assert_eq!(redact_api_key("https://h/x?api_key=secret"), "https://h/x?api_key=***");
        assert_eq!(redact_api_key("https://h/x?page=1"), "https://h/x?page=1");
        assert_eq!(
            redact_api_key("/api/movies?page=2&api_key=secret"),
            "/api/movies?page=2&api_key=***"
        );
        assert_eq!(redact_api_key("/api/movies"), "/api/movies");
    }

    #[test]
    fn test_redact_only_exact_param() {
        let redacted = redact_api_key("/api/movies?tmdb_api_key=x&api_key=secret");
        assert_eq!(redacted, "/api/movies?tmdb_api_key=x&api_key=***");
        assert!(!redacted.contains("secret"));

        let redacted = redact_api_key("https://h/3/movie/popular?my_api_key=x&api_key=secret&page=1");
        assert_eq!(
            redacted,
            "https://h/3/movie/popular?my_api_key=x&api_key=***&page=1"
        );
    }

    #[test]
    fn test_status_error_message() {
        let err = UpstreamError::Status {
            status: 401,
            reason: "Unauthorized".to_string(),
            body: "{\"status_code\":7}".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "TMDB API error: 401 - Unauthorized. Response from TMDB: {\"status_code\":7}"
        );
    }
}
