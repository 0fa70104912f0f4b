//! Collaborator interfaces for identity and per-user document storage, with
//! in-memory implementations and the user-scoped repositories built on them.

pub mod identity;
pub mod memory;
pub mod repository;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::records::UserId;

pub use identity::{AuthError, IdentityProvider, InMemoryIdentityProvider};
pub use memory::InMemoryDocumentStore;
pub use repository::{PropertyRepository, ProfileRepository, ReportRepository, RepositoryError};

/// A record that lives in a named per-user collection.
pub trait Document: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: &'static str;

    fn document_id(&self) -> &str;
}

/// Per-user collection storage, e.g. a hosted document database.
#[async_trait]
pub trait DocumentStore<T: Document>: Send + Sync {
    async fn list(&self, owner: &UserId) -> Result<Vec<T>, StoreError>;
    async fn get(&self, owner: &UserId, id: &str) -> Result<Option<T>, StoreError>;
    async fn add(&self, owner: &UserId, document: T) -> Result<(), StoreError>;
    async fn update(&self, owner: &UserId, document: T) -> Result<(), StoreError>;
    async fn delete(&self, owner: &UserId, id: &str) -> Result<(), StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("document not found")]
    NotFound,
    #[error("document already exists")]
    Conflict,
    #[error("document store unavailable: {0}")]
    Unavailable(String),
    #[error("document could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}
