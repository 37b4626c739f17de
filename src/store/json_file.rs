use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::{info, warn};
use tokio::sync::Mutex;

use super::{Record, Repository, StoreError};

/// Keeps every record of one kind in a single JSON object keyed by id. The
/// whole file is rewritten through a temporary file on every change.
#[derive(Debug)]
pub struct JsonFileRepository<T: Record> {
    path: PathBuf,
    records: Mutex<BTreeMap<String, T>>,
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.display().to_string(),
        source,
    }
}

impl<T: Record> JsonFileRepository<T> {
    /// A missing file is an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let records = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(io_error(&path)(e)),
        };
        info!("Opened {} with {} records", path.display(), records.len());
        Ok(Self {
            path,
            records: Mutex::new(records),
        })
    }

    async fn persist(&self, records: &BTreeMap<String, T>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(io_error(parent))?;
        }
        let bytes = serde_json::to_vec_pretty(records)?;
        let temporary = self.path.with_extension("json.tmp");
        tokio::fs::write(&temporary, bytes)
            .await
            .map_err(io_error(&temporary))?;
        tokio::fs::rename(&temporary, &self.path)
            .await
            .map_err(io_error(&self.path))
    }
}

#[rocket::async_trait]
impl<T: Record> Repository<T> for JsonFileRepository<T> {
    async fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        Ok(self.records.lock().await.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        Ok(self.records.lock().await.values().cloned().collect())
    }

    async fn put(&self, record: T) -> Result<(), StoreError> {
        let mut records = self.records.lock().await;
        let previous = records.insert(record.id().to_string(), record.clone());
        if let Err(e) = self.persist(&records).await {
            warn!("Rolling back write to {}: {e}", self.path.display());
            match previous {
                Some(previous) => records.insert(record.id().to_string(), previous),
                None => records.remove(record.id()),
            };
            return Err(e);
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool, StoreError> {
        let mut records = self.records.lock().await;
        let Some(removed) = records.remove(id) else {
            return Ok(false);
        };
        if let Err(e) = self.persist(&records).await {
            warn!("Rolling back delete in {}: {e}", self.path.display());
            records.insert(id.to_string(), removed);
            return Err(e);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::scorekeeper::tests::new_course;
    use crate::controller::Course;
    use crate::store::tests::{exercise, note, Note};
    use tempfile::TempDir;

    #[tokio::test]
    async fn behaves_like_a_repository() {
        let dir = TempDir::new().unwrap();
        let repository = JsonFileRepository::<Note>::open(dir.path().join("notes.json"))
            .await
            .unwrap();
        exercise(&repository).await;
    }

    #[tokio::test]
    async fn survives_a_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("notes.json");
        {
            let repository = JsonFileRepository::<Note>::open(&path).await.unwrap();
            repository.put(note("a", "kept")).await.unwrap();
            repository.put(note("b", "dropped")).await.unwrap();
            repository.delete("b").await.unwrap();
        }
        let reopened = JsonFileRepository::<Note>::open(&path).await.unwrap();
        assert_eq!(reopened.list().await.unwrap(), vec![note("a", "kept")]);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn coordinates_reload_bit_for_bit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("courses.json");
        let course = new_course("Bandon Dunes", "Oregon", 18)
            .into_course("alice".to_string())
            .unwrap();
        {
            let repository = JsonFileRepository::<Course>::open(&path).await.unwrap();
            repository.put(course.clone()).await.unwrap();
        }
        let reopened = JsonFileRepository::<Course>::open(&path).await.unwrap();
        let reloaded = reopened.get(&course.id).await.unwrap().unwrap();
        for (before, after) in course.holes.iter().zip(&reloaded.holes) {
            let (before, after) = (before.green.center, after.green.center);
            assert_eq!(before.latitude.to_bits(), after.latitude.to_bits());
            assert_eq!(before.longitude.to_bits(), after.longitude.to_bits());
        }
        assert_eq!(reloaded, course);
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(
            JsonFileRepository::<Note>::open(&path).await,
            Err(StoreError::Serialization(_))
        ));
    }
}
