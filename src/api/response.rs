use serde::Serialize;
use axum::Json;
use axum::http::StatusCode;
use chrono::Utc;

use crate::error::AppError;

/// Envelope wrapped around every payload the pipeline service returns.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub status: &'static str,
    pub status_code: u16,
    pub timestamp: String,
    pub message: Option<String>,
}

pub type Envelope<T> = (StatusCode, Json<ApiResponse<T>>);

fn meta(status: StatusCode, message: Option<String>) -> ResponseMeta {
    ResponseMeta {
        status: if status.is_success() { "success" } else { "error" },
        status_code: status.as_u16(),
        timestamp: Utc::now().to_rfc3339(),
        message,
    }
}

pub fn success<T: Serialize>(data: T) -> Envelope<T> {
    (
        StatusCode::OK,
        Json(ApiResponse {
            data: Some(data),
            meta: meta(StatusCode::OK, None),
        }),
    )
}

pub fn error<T>(err: &AppError) -> Envelope<T> {
    let status = err.status_code();
    (
        status,
        Json(ApiResponse {
            data: None,
            meta: meta(status, Some(err.to_string())),
        }),
    )
}

pub fn from_result<T: Serialize>(result: Result<T, AppError>) -> Envelope<T> {
    match result {
        Ok(data) => success(data),
        Err(err) => error(&err),
    }
}
