use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{http::StatusCode, rt, test, web, App, HttpServer};
use natours::config::TourPolicy;
use natours::middleware::RequestTimeMiddleware;
use natours::routes;
use natours::store::{MemoryStore, TourRepository};
use serde_json::{json, Value};
use std::net::TcpListener;
use std::sync::Arc;

fn not_defined() -> Value {
    json!({ "status": "error", "message": "This route is not yet defined!" })
}

#[actix_rt::test]
async fn test_user_routes_are_not_defined() {
    let repo: Arc<dyn TourRepository> = Arc::new(MemoryStore::default());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::from(repo))
            .app_data(web::Data::new(TourPolicy::default()))
            .configure(routes::config),
    )
    .await;

    let requests = [
        test::TestRequest::get().uri("/api/v1/users"),
        test::TestRequest::post().uri("/api/v1/users").set_json(json!({ "name": "Jonas" })),
        test::TestRequest::get().uri("/api/v1/users/1"),
        test::TestRequest::patch().uri("/api/v1/users/1"),
        test::TestRequest::delete().uri("/api/v1/users/1"),
    ];

    for req in requests {
        let resp = test::call_service(&app, req.to_request()).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, not_defined());
    }
}

#[actix_rt::test]
async fn test_running_server_answers_over_http() {
    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let server_handle = rt::spawn(async move {
        HttpServer::new(move || {
            let repo: Arc<dyn TourRepository> = Arc::new(MemoryStore::default());
            App::new()
                .app_data(web::Data::from(repo))
                .app_data(web::Data::new(TourPolicy::default()))
                .wrap(RequestTimeMiddleware)
                .wrap(Logger::default())
                .wrap(Cors::default().allow_any_origin().allow_any_method().allow_any_header().max_age(3600))
                .configure(routes::config)
        })
        .workers(1)
        .bind(("127.0.0.1", port))
        .unwrap_or_else(|_| panic!("Failed to bind to port {}", port))
        .run()
        .await
    });

    // Give the server a moment to start
    tokio::time::sleep(tokio::time::Duration::from_millis(200)).await;

    let client = reqwest::Client::new();

    let resp = client
        .get(format!("http://127.0.0.1:{}/", port))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse greeting");
    assert_eq!(body["app"], "Natours");

    let resp = client
        .get(format!("http://127.0.0.1:{}/api/v1/users", port))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), reqwest::StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = resp.json().await.expect("Failed to parse error body");
    assert_eq!(body, not_defined());

    let resp = client
        .get(format!("http://127.0.0.1:{}/api/v1/tours", port))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(resp.status(), reqwest::StatusCode::OK);
    let body: Value = resp.json().await.expect("Failed to parse tour list");
    assert_eq!(body["results"], 0);

    server_handle.abort();
}
