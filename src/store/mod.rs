//! Tour persistence.
//!
//! Handlers only see the [`TourRepository`] trait, injected as
//! `web::Data<dyn TourRepository>`. Two implementations exist: [`JsonFileStore`]
//! keeps the collection in memory and rewrites a JSON array file after every
//! change, [`MemoryStore`] keeps it in memory only.

pub mod json_file;
pub mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::AppError;
use crate::models::{Tour, TourInput};

/// Storage operations needed by the tour routes.
pub trait TourRepository: Send + Sync {
    /// All tours in storage order.
    fn list(&self) -> Result<Vec<Tour>, AppError>;

    /// Number of stored tours.
    fn count(&self) -> Result<usize, AppError>;

    /// The first tour whose id equals `id`.
    fn get(&self, id: i64) -> Result<Option<Tour>, AppError>;

    /// Appends a new tour built from `input` and returns it.
    fn create(&self, input: TourInput) -> Result<Tour, AppError>;

    /// Merges `input` into the tour with `id`. `None` if there is no such tour.
    fn update(&self, id: i64, input: TourInput) -> Result<Option<Tour>, AppError>;

    /// Removes the tour with `id`. `false` if there was none.
    fn delete(&self, id: i64) -> Result<bool, AppError>;
}

/// The in-memory collection both stores wrap.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TourCollection {
    tours: Vec<Tour>,
}

impl TourCollection {
    pub fn new(tours: Vec<Tour>) -> Self {
        Self { tours }
    }

    pub fn tours(&self) -> &[Tour] {
        &self.tours
    }

    pub fn len(&self) -> usize {
        self.tours.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tours.is_empty()
    }

    pub fn find(&self, id: i64) -> Option<&Tour> {
        self.tours.iter().find(|tour| tour.id == id)
    }

    /// Id for the next created tour: the last tour's id plus one.
    ///
    /// Fails when the last id is `i64::MAX`; a client can store that id itself.
    pub fn next_id(&self) -> Result<i64, AppError> {
        match self.tours.last() {
            None => Ok(1),
            Some(tour) => tour
                .id
                .checked_add(1)
                .ok_or_else(|| AppError::BadRequest("No tour id left after the last tour".into())),
        }
    }

    pub fn insert(&mut self, input: TourInput) -> Result<Tour, AppError> {
        let next_id = match input.requested_id()? {
            Some(id) => id,
            None => self.next_id()?,
        };
        let tour = Tour::new(next_id, input)?;
        self.tours.push(tour.clone());
        Ok(tour)
    }

    pub fn update(&mut self, id: i64, input: TourInput) -> Option<Tour> {
        let tour = self.tours.iter_mut().find(|tour| tour.id == id)?;
        tour.apply(input);
        Some(tour.clone())
    }

    pub fn remove(&mut self, id: i64) -> bool {
        match self.tours.iter().position(|tour| tour.id == id) {
            Some(index) => {
                self.tours.remove(index);
                true
            }
            None => false,
        }
    }
}

pub(crate) fn read_lock<T>(lock: &RwLock<T>) -> Result<RwLockReadGuard<'_, T>, AppError> {
    lock.read()
        .map_err(|e| AppError::Storage(format!("Tour store lock poisoned: {}", e)))
}

pub(crate) fn write_lock<T>(lock: &RwLock<T>) -> Result<RwLockWriteGuard<'_, T>, AppError> {
    lock.write()
        .map_err(|e| AppError::Storage(format!("Tour store lock poisoned: {}", e)))
}
