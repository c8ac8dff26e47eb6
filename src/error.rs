//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the application.
//! Every failure a handler can hit is mapped onto the API's response envelope:
//! client mistakes are reported with `"status": "fail"`, server-side problems with
//! `"status": "error"`.
//!
//! `AppError` implements `actix_web::error::ResponseError` so handlers can simply
//! return `Result<_, AppError>` and use the `?` operator. `From` implementations
//! exist for `std::io::Error` and `serde_json::Error`, the two failure sources of
//! the JSON file store, and for `BlockingError` from `web::block`.

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;

/// Represents all possible errors that can occur within the application.
#[derive(Debug)]
pub enum AppError {
    /// The requested tour id is out of range or unknown (HTTP 404).
    InvalidId,
    /// A malformed request, e.g. a body that is not a JSON object (HTTP 400).
    BadRequest(String),
    /// The route exists but has no implementation yet (HTTP 500).
    NotImplemented,
    /// Reading or writing the tour data file failed (HTTP 500).
    Storage(String),
    /// Invalid startup configuration. Never reaches a client.
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::InvalidId => write!(f, "Invalid ID"),
            AppError::BadRequest(msg) => write!(f, "{}", msg),
            AppError::NotImplemented => write!(f, "This route is not yet defined!"),
            AppError::Storage(msg) => write!(f, "Storage Error: {}", msg),
            AppError::Config(msg) => write!(f, "Configuration Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    /// The envelope `status` field for this error.
    pub fn status_label(&self) -> &'static str {
        match self {
            AppError::InvalidId | AppError::BadRequest(_) => "fail",
            _ => "error",
        }
    }
}

/// Converts `AppError` variants into the JSON error envelope.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidId => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotImplemented | AppError::Storage(_) | AppError::Config(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "status": self.status_label(),
            "message": self.to_string()
        }))
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> AppError {
        AppError::Storage(error.to_string())
    }
}

/// A store call moved off the worker with `web::block` was cancelled.
impl From<actix_web::error::BlockingError> for AppError {
    fn from(error: actix_web::error::BlockingError) -> AppError {
        AppError::Storage(error.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(error: serde_json::Error) -> AppError {
        AppError::Storage(error.to_string())
    }
}
