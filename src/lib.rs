#![doc = "The `natours` library crate."]
#![doc = ""]
#![doc = "This crate contains the tour model, the tour storage layer, the request"]
#![doc = "middleware, the routing configuration and error handling for the Natours API."]
#![doc = "It is used by the main binary (`main.rs`) to construct and run the application."]

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod store;

pub use crate::error::AppError;
pub use crate::store::TourRepository;
