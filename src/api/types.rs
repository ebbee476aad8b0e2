//! API response and query types.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::usage::{Day, Metric, UsageError};

/// Minutes for a single-period request.
#[derive(Debug, Serialize)]
pub struct MinutesResponse {
    pub metric: Metric,
    pub minutes: u64,
}

/// Minutes for one day of a month profile.
#[derive(Debug, Serialize)]
pub struct DayMinutesResponse {
    pub metric: Metric,
    pub day: Day,
    pub minutes: u64,
}

/// Optional metric selection for the month endpoint.
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// `"usage"` (default) or `"savings"`.
    pub metric: Option<String>,
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// A rejected request; always rendered as 400 with an [`ErrorResponse`].
#[derive(Debug)]
pub struct ApiError(pub String);

impl From<UsageError> for ApiError {
    fn from(e: UsageError) -> Self {
        Self(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, Json(ErrorResponse { error: self.0 })).into_response()
    }
}
