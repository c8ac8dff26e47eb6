pub mod tour;

pub use tour::{Tour, TourInput, DEFAULT_PRICE};
