use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::{Condition, Logger};
use actix_web::{web, App, HttpServer};
use log::{error, info};
use natours::config::Config;
use natours::middleware::RequestTimeMiddleware;
use natours::routes;
use natours::store::{JsonFileStore, TourRepository};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::from_filename("config.env").ok();
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env().map_err(|e| {
        error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
    })?;

    let store = JsonFileStore::open(&config.tours_data_path).map_err(|e| {
        error!("{}", e);
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    let repo: Arc<dyn TourRepository> = Arc::new(store);
    let repo = web::Data::from(repo);
    let policy = web::Data::new(config.tour_policy);
    let log_requests = config.is_development();

    info!("App running on {} ({})", config.server_url(), config.app_env);
    HttpServer::new(move || {
        // The last `wrap` is the outermost layer.
        App::new()
            .app_data(repo.clone())
            .app_data(policy.clone())
            .wrap(RequestTimeMiddleware)
            .wrap(Condition::new(log_requests, Logger::new("%r %s %b - %T s")))
            .wrap(Cors::default().allow_any_origin().allow_any_method().allow_any_header().max_age(3600))
            .configure(routes::config)
    })
    .bind((config.server_host.as_str(), config.server_port))?
    .run()
    .await
}
