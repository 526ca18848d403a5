#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use movie_proxy::config::Config;
use movie_proxy::server::{build_router, AppState};
use movie_proxy::tmdb::TmdbClient;
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "test-api-key";

/// Router wired to a mock TMDB server.
pub struct TestFixture {
    pub app: Router,
    pub config: Config,
    pub upstream: MockServer,
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("response body is not UTF-8")
    }
}

impl TestFixture {
    pub async fn new() -> Self {
        Self::with_api_key(Some(TEST_API_KEY)).await
    }

    pub async fn with_api_key(api_key: Option<&str>) -> Self {
        let upstream = MockServer::start().await;
        let mut config = Config::default();
        config.tmdb.api_key = api_key.map(str::to_string);
        config.tmdb.api_base = upstream.uri();
        config.tmdb.timeout_secs = 5;

        Self {
            app: app_for(&config),
            config,
            upstream,
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = self.app.clone().oneshot(request).await.unwrap();

        let status = response.status();
        let content_type = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();

        TestResponse {
            status,
            content_type,
            body,
        }
    }

    /// Expect exactly one upstream call for `page` and answer it with `template`.
    pub async fn expect_popular(&self, page: u32, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/3/movie/popular"))
            .and(query_param("api_key", TEST_API_KEY))
            .and(query_param("language", "ko-KR"))
            .and(query_param("page", page.to_string()))
            .respond_with(template)
            .expect(1)
            .mount(&self.upstream)
            .await;
    }

    pub async fn upstream_request_count(&self) -> usize {
        self.upstream
            .received_requests()
            .await
            .map(|r| r.len())
            .unwrap_or(0)
    }

    /// Serve the router on a real socket, for clients that speak HTTP.
    pub async fn spawn(&self) -> SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let app = self.app.clone();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }
}

pub fn app_for(config: &Config) -> Router {
    let tmdb = Arc::new(TmdbClient::new(&config.tmdb).unwrap());
    build_router(AppState::new(config.clone(), tmdb))
}

pub fn movie_json(id: u64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "poster_path": format!("/poster-{id}.jpg"),
        "release_date": "2024-03-01",
        "vote_average": 7.5,
        "overview": format!("Overview of {title}"),
        "adult": false
    })
}

pub fn popular_page(page: u32, count: u64) -> Value {
    let results: Vec<Value> = (1..=count)
        .map(|i| movie_json(i, &format!("Movie {i}")))
        .collect();
    json!({
        "page": page,
        "results": results,
        "total_pages": 500,
        "total_results": 10000
    })
}
