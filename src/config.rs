use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use crate::error::AppError;

/// How a tour id from the path is checked before a handler acts on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdCheck {
    /// Reject only ids greater than the number of stored tours. An in-range id
    /// that matches nothing still succeeds.
    Length,
    /// Reject any id that does not belong to a stored tour.
    Exists,
}

impl FromStr for IdCheck {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "length" => Ok(IdCheck::Length),
            "exists" => Ok(IdCheck::Exists),
            other => Err(AppError::Config(format!(
                "TOUR_ID_CHECK must be 'length' or 'exists', got '{}'",
                other
            ))),
        }
    }
}

/// What `PATCH` and `DELETE` on a tour actually do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationMode {
    /// Answer with canned success payloads and leave the data untouched.
    Stub,
    /// Apply the change and rewrite the data file.
    Persist,
}

impl FromStr for MutationMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stub" => Ok(MutationMode::Stub),
            "persist" => Ok(MutationMode::Persist),
            other => Err(AppError::Config(format!(
                "TOUR_MUTATIONS must be 'stub' or 'persist', got '{}'",
                other
            ))),
        }
    }
}

/// Per-request behaviour of the tour routes, shared with handlers as app data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TourPolicy {
    pub id_check: IdCheck,
    pub mutations: MutationMode,
}

impl Default for TourPolicy {
    fn default() -> Self {
        Self {
            id_check: IdCheck::Length,
            mutations: MutationMode::Stub,
        }
    }
}

pub struct Config {
    pub server_port: u16,
    pub server_host: String,
    pub app_env: String,
    pub tours_data_path: PathBuf,
    pub tour_policy: TourPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let server_port = env::var("PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse()
            .map_err(|_| AppError::Config("PORT must be a number".into()))?;

        Ok(Self {
            server_port,
            server_host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            tours_data_path: env::var("TOURS_DATA_PATH")
                .unwrap_or_else(|_| "dev-data/data/tours-simple.json".to_string())
                .into(),
            tour_policy: TourPolicy {
                id_check: env::var("TOUR_ID_CHECK")
                    .unwrap_or_else(|_| "length".to_string())
                    .parse()?,
                mutations: env::var("TOUR_MUTATIONS")
                    .unwrap_or_else(|_| "stub".to_string())
                    .parse()?,
            },
        })
    }

    pub fn is_development(&self) -> bool {
        self.app_env == "development"
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }
}
