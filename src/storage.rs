//! Record storage.
//!
//! [`Storage`] is the capability the HTTP layer depends on: insert, list, get.
//! [`MemoryStore`] is the in-process implementation and the one the binary
//! mounts. A backend talking to a document database would implement the same
//! trait and slot in without touching the handlers.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::Record;

/// Failure reported by a storage backend.
///
/// [`MemoryStore`] never fails; these exist for backends that do I/O.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Storage capability for one record kind.
#[async_trait]
pub trait Storage<T: Record>: Send + Sync {
    /// Stores `record` under a freshly generated id and returns the stored
    /// copy, its id filled in. Any id already on `record` is replaced.
    async fn insert(&self, record: T) -> Result<T, StoreError>;

    /// Snapshot of every stored record, in no particular order.
    async fn list(&self) -> Result<Vec<T>, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<T>, StoreError>;
}

/// In-memory store: a map from id to record behind one lock.
///
/// Records are never mutated after insertion, so readers share the lock and
/// a poisoned lock is recovered rather than propagated. The lock is only
/// held for the map operation itself; callers get clones.
pub struct MemoryStore<T> {
    records: RwLock<HashMap<String, T>>,
}

impl<T> MemoryStore<T> {
    pub fn new() -> Self {
        Self { records: RwLock::new(HashMap::new()) }
    }
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> Storage<T> for MemoryStore<T> {
    async fn insert(&self, mut record: T) -> Result<T, StoreError> {
        let id = Uuid::new_v4().to_string();
        record.assign_id(id.clone());

        self.records
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id, record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<T>, StoreError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.values().cloned().collect())
    }

    async fn get(&self, id: &str) -> Result<Option<T>, StoreError> {
        let records = self.records.read().unwrap_or_else(PoisonError::into_inner);
        Ok(records.get(id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use crate::models::User;

    fn ada() -> User {
        User {
            id: String::new(),
            name: "Ada".into(),
            email: "a@x.com".into(),
            password: "p".into(),
        }
    }

    #[tokio::test]
    async fn insert_assigns_id_and_get_finds_it() {
        let store = MemoryStore::<User>::new();
        let stored = store.insert(ada()).await.unwrap();
        assert!(!stored.id.is_empty());

        let found = store.get(&stored.id).await.unwrap();
        assert_eq!(found, Some(stored));
    }

    #[tokio::test]
    async fn caller_supplied_id_is_replaced() {
        let store = MemoryStore::<User>::new();
        let mut user = ada();
        user.id = "chosen-by-client".into();

        let stored = store.insert(user).await.unwrap();
        assert_ne!(stored.id, "chosen-by-client");
        assert_eq!(store.get("chosen-by-client").await.unwrap(), None);
    }

    #[tokio::test]
    async fn list_returns_inserted_record_once() {
        let store = MemoryStore::<User>::new();
        assert!(store.list().await.unwrap().is_empty());

        let stored = store.insert(ada()).await.unwrap();
        let all = store.list().await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0], stored);
        assert_eq!(User { id: String::new(), ..all[0].clone() }, ada());
    }

    #[tokio::test]
    async fn get_unknown_id_is_none() {
        let store = MemoryStore::<User>::new();
        store.insert(ada()).await.unwrap();
        assert_eq!(store.get("never-inserted").await.unwrap(), None);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_get_distinct_ids() {
        const N: usize = 200;
        let store = Arc::new(MemoryStore::<User>::new());

        let tasks: Vec<_> = (0..N)
            .map(|_| {
                let store = Arc::clone(&store);
                tokio::spawn(async move { store.insert(ada()).await.unwrap().id })
            })
            .collect();

        let mut ids = HashSet::new();
        for task in tasks {
            ids.insert(task.await.unwrap());
        }

        assert_eq!(ids.len(), N);
        assert_eq!(store.list().await.unwrap().len(), N);
    }
}
