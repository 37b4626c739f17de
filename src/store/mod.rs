mod json_file;
mod memory;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use json_file::JsonFileRepository;
pub use memory::MemoryRepository;

/// Anything stored by id.
pub trait Record: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    fn id(&self) -> &str;
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("Storage io error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to (de)serialize records: {0}")]
    Serialization(#[from] serde_json::Error),
}

#[rocket::async_trait]
pub trait Repository<T: Record>: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<T>, StoreError>;
    async fn list(&self) -> Result<Vec<T>, StoreError>;
    /// Inserts, or replaces the record with the same id.
    async fn put(&self, record: T) -> Result<(), StoreError>;
    /// Returns whether something was removed.
    async fn delete(&self, id: &str) -> Result<bool, StoreError>;
}
