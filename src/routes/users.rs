//! User routes. Mounted so clients get a clear answer, but not implemented yet:
//! every handler responds `500 {status: "error", message: "This route is not yet defined!"}`.

use crate::error::AppError;
use actix_web::{delete, get, patch, post, HttpResponse};

#[get("")]
pub async fn get_all_users() -> Result<HttpResponse, AppError> {
    Err(AppError::NotImplemented)
}

#[post("")]
pub async fn create_user() -> Result<HttpResponse, AppError> {
    Err(AppError::NotImplemented)
}

#[get("/{id}")]
pub async fn get_user() -> Result<HttpResponse, AppError> {
    Err(AppError::NotImplemented)
}

#[patch("/{id}")]
pub async fn update_user() -> Result<HttpResponse, AppError> {
    Err(AppError::NotImplemented)
}

#[delete("/{id}")]
pub async fn delete_user() -> Result<HttpResponse, AppError> {
    Err(AppError::NotImplemented)
}
