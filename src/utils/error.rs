use axum::{
    extract::rejection::PathRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Everything that can go wrong while resolving a rate for a date.
#[derive(Error, Debug)]
pub enum RateError {
    #[error("invalid date: {0}")]
    InvalidDate(String),
    #[error("could not fetch rate document: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("malformed rate document: {0}")]
    Document(#[from] xml::reader::Error),
    #[error("malformed rate record: {0}")]
    Record(String),
    #[error("rate for {code} is not a decimal number: {value:?}")]
    InvalidRate { code: String, value: String },
    #[error("currency not found: {0}")]
    CurrencyNotFound(String),
    #[error("rate for {0} is zero")]
    ZeroRate(String),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("validation: {0}")]
    Validation(String),
    #[error("not_found: {0}")]
    NotFound(String),
    #[error("external_unavailable: {0}")]
    External(String),
    #[error("bad_gateway: {0}")]
    BadGateway(String),
}

impl From<RateError> for ApiError {
    fn from(err: RateError) -> Self {
        match err {
            RateError::InvalidDate(_) => ApiError::Validation(err.to_string()),
            RateError::CurrencyNotFound(code) => ApiError::NotFound(code),
            RateError::Transport(_) => ApiError::External(err.to_string()),
            RateError::Document(_)
            | RateError::Record(_)
            | RateError::InvalidRate { .. }
            | RateError::ZeroRate(_) => {
                ApiError::BadGateway(err.to_string())
            }
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::Validation(rejection.body_text())
    }
}

#[derive(Serialize)]
pub struct ErrorBody<'a> {
    pub error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")] pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                Json(ErrorBody { error: "Validation failed", details: Some(msg) }),
            ).into_response(),
            ApiError::NotFound(code) => (
                StatusCode::NOT_FOUND,
                Json(ErrorBody { error: "Currency not found", details: Some(code) }),
            ).into_response(),
            ApiError::External(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ErrorBody { error: "External data source unavailable", details: Some(msg) }),
            ).into_response(),
            ApiError::BadGateway(msg) => (
                StatusCode::BAD_GATEWAY,
                Json(ErrorBody { error: "Malformed rate document", details: Some(msg) }),
            ).into_response(),
        }
    }
}
