use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::tmdb::UpstreamError;

const FETCH_FAILED: &str = "Error fetching data from TMDB";
const MISSING_KEY: &str = "Server configuration error: TMDB API key is not set";

/// JSON body returned by `/api/movies` on failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(rename = "errorDetails", skip_serializing_if = "Option::is_none", default)]
    pub error_details: Option<String>,
    #[serde(rename = "apiKeyPresent", skip_serializing_if = "Option::is_none", default)]
    pub api_key_present: Option<bool>,
}

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Invalid page parameter: {0}")]
    InvalidPage(String),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidPage(_) => StatusCode::BAD_REQUEST,
            ApiError::Upstream(UpstreamError::Status { status, .. }) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
            }
            ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn body(&self) -> ErrorBody {
        match self {
            ApiError::InvalidPage(_) => ErrorBody {
                message: self.to_string(),
                error_details: None,
                api_key_present: None,
            },
            ApiError::Upstream(UpstreamError::MissingApiKey) => ErrorBody {
                message: MISSING_KEY.to_string(),
                error_details: None,
                api_key_present: Some(false),
            },
            ApiError::Upstream(e) => ErrorBody {
                message: FETCH_FAILED.to_string(),
                error_details: Some(e.to_string()),
                api_key_present: Some(true),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(status = status.as_u16(), "{}", self);
        } else {
            warn!(status = status.as_u16(), "{}", self);
        }
        (status, Json(self.body())).into_response()
    }
}
