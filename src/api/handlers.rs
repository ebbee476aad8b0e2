//! Request handlers for the API endpoints.

use axum::Json;
use axum::extract::{Path, Query};
use tracing::debug;

use super::types::{ApiError, DayMinutesResponse, MinutesResponse, MonthQuery};
use crate::usage::{
    Day, Metric, MonthReport, UsageProfile, energy_savings, energy_usage, savings_for_day,
    usage_for_day,
};

/// `POST /usage` → 200 + `MinutesResponse`, 400 on `auto-off` or unsorted events.
pub async fn post_usage(
    Json(profile): Json<UsageProfile>,
) -> Result<Json<MinutesResponse>, ApiError> {
    let minutes = energy_usage(&profile)?;
    Ok(Json(MinutesResponse {
        metric: Metric::Usage,
        minutes,
    }))
}

/// `POST /savings` → 200 + `MinutesResponse`.
pub async fn post_savings(
    Json(profile): Json<UsageProfile>,
) -> Result<Json<MinutesResponse>, ApiError> {
    let minutes = energy_savings(&profile)?;
    Ok(Json(MinutesResponse {
        metric: Metric::Savings,
        minutes,
    }))
}

/// `POST /usage/day/{day}` → 200 + `DayMinutesResponse`
/// `POST /usage/day/1.5` → 400 "must be an integer"
pub async fn post_usage_for_day(
    Path(day): Path<String>,
    Json(profile): Json<UsageProfile>,
) -> Result<Json<DayMinutesResponse>, ApiError> {
    let day: Day = day.parse().map_err(crate::usage::UsageError::from)?;
    debug!(%day, "usage for day");
    let minutes = usage_for_day(&profile, day)?;
    Ok(Json(DayMinutesResponse {
        metric: Metric::Usage,
        day,
        minutes,
    }))
}

/// `POST /savings/day/{day}` → 200 + `DayMinutesResponse`
pub async fn post_savings_for_day(
    Path(day): Path<String>,
    Json(profile): Json<UsageProfile>,
) -> Result<Json<DayMinutesResponse>, ApiError> {
    let day: Day = day.parse().map_err(crate::usage::UsageError::from)?;
    let minutes = savings_for_day(&profile, day)?;
    Ok(Json(DayMinutesResponse {
        metric: Metric::Savings,
        day,
        minutes,
    }))
}

/// `POST /month` → 200 + `MonthReport`
/// `POST /month?metric=savings` → savings breakdown
/// `POST /month?metric=carbon` → 400
pub async fn post_month(
    Query(query): Query<MonthQuery>,
    Json(profile): Json<UsageProfile>,
) -> Result<Json<MonthReport>, ApiError> {
    let metric = match query.metric.as_deref() {
        None => Metric::Usage,
        Some(name) => name.parse().map_err(ApiError)?,
    };
    Ok(Json(MonthReport::from_profile(&profile, metric)?))
}
