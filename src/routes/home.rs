use actix_web::{get, HttpResponse, Responder};
use serde_json::json;

/// Greeting endpoint
///
/// Confirms the server is up and names the app.
#[get("/")]
pub async fn hello() -> impl Responder {
    HttpResponse::Ok().json(json!({
        "message": "Hello from the server side!",
        "app": "Natours"
    }))
}
