pub mod request_time;

use actix_web::{error::JsonPayloadError, web, HttpRequest};

use crate::error::AppError;

pub use request_time::{RequestTime, RequestTimeMiddleware};

/// JSON body parsing for the API. Malformed bodies become a `400` with the
/// usual `"status": "fail"` envelope instead of actix's plain-text error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    AppError::BadRequest(format!("Invalid request body: {}", err)).into()
}
