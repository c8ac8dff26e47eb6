use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use log::{error, info};

use super::{read_lock, write_lock, TourCollection, TourRepository};
use crate::error::AppError;
use crate::models::{Tour, TourInput};

/// Tours loaded once from a JSON array file and written back in full after
/// every change.
///
/// The write lock is held across the in-memory change and the file rewrite, so
/// two concurrent creates cannot both compute the same id or overwrite each
/// other's record. A change only becomes visible once the file write succeeded.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    collection: RwLock<TourCollection>,
}

impl JsonFileStore {
    /// Reads and parses the data file at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, AppError> {
        let path = path.as_ref().to_path_buf();
        let bytes = fs::read(&path).map_err(|e| {
            AppError::Storage(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let tours: Vec<Tour> = serde_json::from_slice(&bytes).map_err(|e| {
            AppError::Storage(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        info!("Loaded {} tours from {}", tours.len(), path.display());

        Ok(Self {
            path,
            collection: RwLock::new(TourCollection::new(tours)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy of the collection. When it reports a change
    /// (`Some`), the copy is persisted and only then swapped in.
    fn mutate<R>(
        &self,
        change: impl FnOnce(&mut TourCollection) -> Result<Option<R>, AppError>,
    ) -> Result<Option<R>, AppError> {
        let mut guard = write_lock(&self.collection)?;
        let mut next = guard.clone();
        let result = match change(&mut next)? {
            Some(result) => result,
            None => return Ok(None),
        };
        self.persist(&next)?;
        *guard = next;
        Ok(Some(result))
    }

    /// Rewrites the whole file through a sibling temp file and a rename.
    fn persist(&self, collection: &TourCollection) -> Result<(), AppError> {
        let bytes = serde_json::to_vec(collection.tours())?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, bytes)
            .and_then(|_| fs::rename(&tmp, &self.path))
            .map_err(|e| {
                error!("Failed to write {}: {}", self.path.display(), e);
                AppError::Storage(format!("Failed to write tour data: {}", e))
            })
    }
}

impl TourRepository for JsonFileStore {
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
        self.mutate(|collection| collection.insert(input).map(Some))?
            .ok_or_else(|| AppError::Storage("Tour was not created".into()))
    }

    fn update(&self, id: i64, input: TourInput) -> Result<Option<Tour>, AppError> {
        self.mutate(|collection| Ok(collection.update(id, input)))
    }

    fn delete(&self, id: i64) -> Result<bool, AppError> {
        self.mutate(|collection| Ok(collection.remove(id).then_some(())))
            .map(|removed| removed.is_some())
    }
}
