use std::sync::RwLock;

use super::{read_lock, write_lock, TourCollection, TourRepository};
use crate::error::AppError;
use crate::models::{Tour, TourInput};

/// A `TourRepository` with no backing file.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collection: RwLock<TourCollection>,
}

impl MemoryStore {
    pub fn new(tours: Vec<Tour>) -> Self {
        Self {
            collection: RwLock::new(TourCollection::new(tours)),
        }
    }
}

impl TourRepository for MemoryStore {
    fn list(&self) -> Result<Vec<Tour>, AppError> {
        Ok(read_lock(&self.collection)?.tours().to_vec())
    }

    fn count(&self) -> Result<usize, AppError> {
        Ok(read_lock(&self.collection)?.len())
    }

    fn get(&self, id: i64) -> Result<Option<Tour>, AppError> {
        Ok(read_lock(&self.collection)?.find(id).cloned())
    }

    fn create(&self, input: TourInput) -> Result<Tour, AppError> {
        write_lock(&self.collection)?.insert(input)
    }

    fn update(&self, id: i64, input: TourInput) -> Result<Option<Tour>, AppError> {
        Ok(write_lock(&self.collection)?.update(id, input))
    }

    fn delete(&self, id: i64) -> Result<bool, AppError> {
        Ok(write_lock(&self.collection)?.remove(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_memory_store_crud() {
        let store = MemoryStore::default();
        assert_eq!(store.count().unwrap(), 0);

        let first = store.create(TourInput::default()).unwrap();
        assert_eq!(first.id, 1);
        assert_eq!(store.get(1).unwrap(), Some(first));

        let patch: TourInput = serde_json::from_value(json!({ "name": "Sea Explorer" })).unwrap();
        let updated = store.update(1, patch).unwrap().unwrap();
        assert_eq!(updated.fields["name"], json!("Sea Explorer"));

        assert!(store.delete(1).unwrap());
        assert!(store.list().unwrap().is_empty());
    }
}
