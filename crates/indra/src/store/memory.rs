use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use super::{Document, DocumentStore, StoreError};
use crate::records::UserId;

type CollectionKey = (&'static str, UserId);

/// Process-local document store. Documents are kept as JSON so reads go
/// through the same serialization a hosted store would apply.
#[derive(Default, Clone)]
pub struct InMemoryDocumentStore {
    collections: Arc<Mutex<HashMap<CollectionKey, Vec<(String, Value)>>>>,
}

impl InMemoryDocumentStore {
    fn lock(&self) -> Result<MutexGuard<'_, HashMap<CollectionKey, Vec<(String, Value)>>>, StoreError> {
        self.collections
            .lock()
            .map_err(|_| StoreError::Unavailable("document store mutex poisoned".to_string()))
    }

    /// Encodes `document`, refusing values that would not decode again
    /// (non-finite floats become `null`, for instance).
    fn encode<T: Document>(document: &T) -> Result<Value, StoreError> {
        let value = serde_json::to_value(document)?;
        serde_json::from_value::<T>(value.clone())?;
        Ok(value)
    }

    /// Number of documents held for `owner` in `T`'s collection.
    pub fn count<T: Document>(&self, owner: &UserId) -> usize {
        self.lock()
            .map(|guard| {
                guard
                    .get(&(T::COLLECTION, owner.clone()))
                    .map(Vec::len)
                    .unwrap_or(0)
            })
            .unwrap_or(0)
    }
}

#[async_trait]
impl<T: Document> DocumentStore<T> for InMemoryDocumentStore {
    async fn list(&self, owner: &UserId) -> Result<Vec<T>, StoreError> {
        let guard = self.lock()?;
        let Some(entries) = guard.get(&(T::COLLECTION, owner.clone())) else {
            return Ok(Vec::new());
        };
        let documents = entries
            .iter()
            .filter_map(|(id, value)| match serde_json::from_value(value.clone()) {
                Ok(document) => Some(document),
                Err(err) => {
                    warn!(
                        collection = T::COLLECTION,
                        %id,
                        error = %err,
                        "skipping undecodable document"
                    );
                    None
                }
            })
            .collect();
        Ok(documents)
    }

    async fn get(&self, owner: &UserId, id: &str) -> Result<Option<T>, StoreError> {
        let guard = self.lock()?;
        let found = guard
            .get(&(T::COLLECTION, owner.clone()))
            .and_then(|entries| entries.iter().find(|(key, _)| key == id));
        match found {
            Some((_, value)) => Ok(Some(serde_json::from_value(value.clone())?)),
            None => Ok(None),
        }
    }

    async fn add(&self, owner: &UserId, document: T) -> Result<(), StoreError> {
        let value = Self::encode(&document)?;
        let id = document.document_id().to_string();
        let mut guard = self.lock()?;
        let entries = guard.entry((T::COLLECTION, owner.clone())).or_default();
        if entries.iter().any(|(key, _)| *key == id) {
            return Err(StoreError::Conflict);
        }
        entries.push((id, value));
        Ok(())
    }

    async fn update(&self, owner: &UserId, document: T) -> Result<(), StoreError> {
        let value = Self::encode(&document)?;
        let mut guard = self.lock()?;
        let slot = guard
            .get_mut(&(T::COLLECTION, owner.clone()))
            .and_then(|entries| {
                entries
                    .iter_mut()
                    .find(|(key, _)| key == document.document_id())
            })
            .ok_or(StoreError::NotFound)?;
        slot.1 = value;
        Ok(())
    }

    async fn delete(&self, owner: &UserId, id: &str) -> Result<(), StoreError> {
        let mut guard = self.lock()?;
        let entries = guard
            .get_mut(&(T::COLLECTION, owner.clone()))
            .ok_or(StoreError::NotFound)?;
        let position = entries
            .iter()
            .position(|(key, _)| key == id)
            .ok_or(StoreError::NotFound)?;
        entries.remove(position);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::{Report, ReportId};

    fn owner(id: &str) -> UserId {
        UserId(id.to_string())
    }

    fn report(id: &str) -> Report {
        Report {
            id: ReportId(id.to_string()),
            name: format!("Report {id}"),
            feasibility_score: 72.5,
            ..Report::default()
        }
    }

    #[tokio::test]
    async fn collections_are_scoped_per_owner() {
        let store = InMemoryDocumentStore::default();
        DocumentStore::<Report>::add(&store, &owner("a"), report("r-1"))
            .await
            .expect("adds");

        let other: Vec<Report> = store.list(&owner("b")).await.expect("lists");
        assert!(other.is_empty());
        assert_eq!(store.count::<Report>(&owner("a")), 1);
    }

    #[tokio::test]
    async fn duplicate_add_conflicts() {
        let store = InMemoryDocumentStore::default();
        DocumentStore::<Report>::add(&store, &owner("a"), report("r-1"))
            .await
            .expect("adds");
        let err = DocumentStore::<Report>::add(&store, &owner("a"), report("r-1"))
            .await
            .expect_err("duplicate rejected");
        assert!(matches!(err, StoreError::Conflict));
    }

    #[tokio::test]
    async fn update_and_delete_require_existing_document() {
        let store = InMemoryDocumentStore::default();
        let err = DocumentStore::<Report>::update(&store, &owner("a"), report("missing"))
            .await
            .expect_err("update of missing document fails");
        assert!(matches!(err, StoreError::NotFound));

        let err = DocumentStore::<Report>::delete(&store, &owner("a"), "missing")
            .await
            .expect_err("delete of missing document fails");
        assert!(matches!(err, StoreError::NotFound));
    }

    #[tokio::test]
    async fn non_finite_measurements_are_rejected_on_write() {
        let store = InMemoryDocumentStore::default();
        let mut broken = report("r-1");
        broken.roof_area = f64::INFINITY;

        let err = DocumentStore::<Report>::add(&store, &owner("a"), broken)
            .await
            .expect_err("non-finite value rejected");
        assert!(matches!(err, StoreError::Serialization(_)));
        assert_eq!(store.count::<Report>(&owner("a")), 0);
    }

    #[tokio::test]
    async fn undecodable_entry_does_not_hide_the_rest() {
        let store = InMemoryDocumentStore::default();
        for id in ["r-1", "r-2"] {
            DocumentStore::<Report>::add(&store, &owner("a"), report(id))
                .await
                .expect("adds");
        }
        store
            .lock()
            .expect("lock")
            .get_mut(&(Report::COLLECTION, owner("a")))
            .expect("collection exists")
            .push(("r-bad".to_string(), serde_json::json!({ "roofArea": null })));

        let listed: Vec<Report> = store.list(&owner("a")).await.expect("lists");
        let ids: Vec<&str> = listed.iter().map(|report| report.id.as_str()).collect();
        assert_eq!(ids, ["r-1", "r-2"]);
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = InMemoryDocumentStore::default();
        for id in ["r-3", "r-1", "r-2"] {
            DocumentStore::<Report>::add(&store, &owner("a"), report(id))
                .await
                .expect("adds");
        }
        let listed: Vec<Report> = store.list(&owner("a")).await.expect("lists");
        let ids: Vec<&str> = listed.iter().map(|report| report.id.as_str()).collect();
        assert_eq!(ids, ["r-3", "r-1", "r-2"]);
    }
}
