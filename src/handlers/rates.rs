use axum::{
    extract::{rejection::PathRejection, Path, State},
    response::IntoResponse,
    Json,
};

use crate::config::AppState;
use crate::models::rate::{CrossRateQuote, RateDate, RateQuote};
use crate::utils::error::ApiError;

pub async fn get_rate(
    State(state): State<AppState>,
    path: Result<Path<(String, i32, u32, u32)>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path((code, year, month, day)) = path?;
    let date = RateDate::new(year, month, day)?;
    let rate = state.reader.exchange_rate_on(&code, date).await?;

    Ok((
        axum::http::StatusCode::OK,
        Json(RateQuote { currency: code, date: date.to_string(), rate }),
    ))
}

pub async fn get_cross_rate(
    State(state): State<AppState>,
    path: Result<Path<(String, String, i32, u32, u32)>, PathRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Path((from, to, year, month, day)) = path?;
    let date = RateDate::new(year, month, day)?;
    let rate = state.reader.cross_rate_on(&from, &to, date).await?;

    Ok((
        axum::http::StatusCode::OK,
        Json(CrossRateQuote { from, to, date: date.to_string(), rate }),
    ))
}

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    (
        axum::http::StatusCode::OK,
        Json(serde_json::json!({ "ok": true, "base_url": state.reader.base_url() })),
    )
}
