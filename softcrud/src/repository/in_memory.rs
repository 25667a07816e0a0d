//! In-memory reference store
//!
//! Keeps records in insertion order. `persist` only stages a record; staged
//! records become visible to the finders on `flush`, replacing any record
//! with the same id in place.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, RwLock};

use super::criteria::FilterCondition;
use super::error::{RepositoryError, RepositoryOperation};
use super::traits::{ObjectManager, Repository, RepositoryResult};
use crate::entity::Entity;

/// Vector-backed store implementing [`Repository`] and [`ObjectManager`]
///
/// # Example
///
/// ```rust,ignore
/// use std::sync::Arc;
/// use softcrud::repository::InMemoryStore;
///
/// let store = Arc::new(InMemoryStore::with_records(vec![note]));
/// ```
#[derive(Debug)]
pub struct InMemoryStore<E> {
    committed: RwLock<Vec<E>>,
    staged: Mutex<Vec<E>>,
    writes: AtomicU64,
}

impl<E: Entity> InMemoryStore<E> {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_records(Vec::new())
    }

    /// Create a store pre-populated with committed records
    pub fn with_records(records: impl IntoIterator<Item = E>) -> Self {
        Self {
            committed: RwLock::new(records.into_iter().collect()),
            staged: Mutex::new(Vec::new()),
            writes: AtomicU64::new(0),
        }
    }

    /// Every committed record, soft-deleted ones included
    pub async fn snapshot(&self) -> Vec<E> {
        self.committed.read().await.clone()
    }

    /// Number of records written by `flush` since creation
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    /// Number of records staged but not yet flushed
    pub async fn pending(&self) -> usize {
        self.staged.lock().await.len()
    }
}

impl<E: Entity> Default for InMemoryStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

fn record_matches<E: Entity>(
    record: &E,
    criteria: &[FilterCondition],
    operation: RepositoryOperation,
) -> RepositoryResult<bool> {
    let value = serde_json::to_value(record).map_err(|e| {
        RepositoryError::serialization_error(operation, e.to_string())
            .with_entity(E::ENTITY_TYPE, record.id().to_string())
    })?;
    Ok(FilterCondition::all_match(criteria, &value))
}

impl<E: Entity> Repository<E> for InMemoryStore<E> {
    async fn find_one_by(&self, criteria: &[FilterCondition]) -> RepositoryResult<Option<E>> {
        let records = self.committed.read().await;
        for record in records.iter() {
            if record_matches(record, criteria, RepositoryOperation::FindOneBy)? {
                return Ok(Some(record.clone()));
            }
        }
        Ok(None)
    }

    async fn find_by(&self, criteria: &[FilterCondition]) -> RepositoryResult<Vec<E>> {
        let records = self.committed.read().await;
        let mut found = Vec::new();
        for record in records.iter() {
            if record_matches(record, criteria, RepositoryOperation::FindBy)? {
                found.push(record.clone());
            }
        }
        Ok(found)
    }
}

impl<E: Entity> ObjectManager<E> for InMemoryStore<E> {
    async fn persist(&self, entity: &E) -> RepositoryResult<()> {
        self.staged.lock().await.push(entity.clone());
        Ok(())
    }

    async fn flush(&self) -> RepositoryResult<()> {
        let mut staged = self.staged.lock().await;
        let mut records = self.committed.write().await;

        for entity in staged.drain(..) {
            match records.iter_mut().find(|r| r.id() == entity.id()) {
                Some(existing) => *existing = entity,
                None => records.push(entity),
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
        }

        tracing::trace!(
            entity_type = E::ENTITY_TYPE,
            total = records.len(),
            "in-memory store flushed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Widget;

    #[tokio::test]
    async fn test_find_by_preserves_insertion_order() {
        let store = InMemoryStore::with_records(vec![
            Widget::live(3, "c"),
            Widget::live(1, "a"),
            Widget::live(2, "b"),
        ]);

        let found = store.find_by(&[]).await.unwrap();
        let ids: Vec<u64> = found.iter().map(|w| w.id).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_find_one_by_applies_all_conditions() {
        let store = InMemoryStore::with_records(vec![Widget::deleted(1, "a")]);

        let live = store
            .find_one_by(&[
                FilterCondition::eq("id", 1_u64),
                FilterCondition::eq("deleted", false),
            ])
            .await
            .unwrap();
        assert!(live.is_none());

        let any = store
            .find_one_by(&[FilterCondition::eq("id", 1_u64)])
            .await
            .unwrap();
        assert_eq!(any, Some(Widget::deleted(1, "a")));
    }

    #[tokio::test]
    async fn test_persist_is_invisible_until_flush() {
        let store = InMemoryStore::new();
        store.persist(&Widget::live(1, "a")).await.unwrap();

        assert!(store.find_by(&[]).await.unwrap().is_empty());
        assert_eq!(store.pending().await, 1);
        assert_eq!(store.write_count(), 0);

        store.flush().await.unwrap();

        assert_eq!(store.find_by(&[]).await.unwrap(), vec![Widget::live(1, "a")]);
        assert_eq!(store.pending().await, 0);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn test_flush_replaces_record_in_place() {
        let store = InMemoryStore::with_records(vec![Widget::live(1, "a"), Widget::live(2, "b")]);

        store.persist(&Widget::deleted(1, "a")).await.unwrap();
        store.flush().await.unwrap();

        assert_eq!(
            store.snapshot().await,
            vec![Widget::deleted(1, "a"), Widget::live(2, "b")]
        );
    }
}
