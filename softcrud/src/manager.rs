//! Soft-delete aware entity managers
//!
//! A manager mediates every read and delete against a store. All read paths
//! go through [`live_criteria`], which appends the `deleted = false`
//! condition, so a soft-deleted record can never be returned.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use softcrud::manager::{EntityManager, SoftDeleteManager};
//! use softcrud::repository::InMemoryStore;
//!
//! let manager = SoftDeleteManager::new(Arc::new(InMemoryStore::<Note>::new()));
//! let note = manager.find_by_id(&1).await?;
//! let removed = manager.delete_by_id(&1).await?;
//! assert!(removed.deleted);
//! ```

use std::future::Future;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::entity::Entity;
use crate::repository::{
    FilterCondition, Persistence, RepositoryError, RepositoryOperation, RepositoryResult,
};

/// Read and delete operations over live (non soft-deleted) entities
pub trait EntityManager<E: Entity>: Send + Sync {
    /// Find the live entity with the given id
    ///
    /// # Errors
    ///
    /// Returns a `NotFound` [`RepositoryError`] when no record has this id
    /// or the record is soft deleted.
    fn find_by_id(&self, id: &E::Id) -> impl Future<Output = RepositoryResult<E>> + Send;

    /// Find every live entity, in store order
    ///
    /// An empty result is not an error.
    fn find_all(&self) -> impl Future<Output = RepositoryResult<Vec<E>>> + Send;

    /// Soft delete the live entity with the given id and return it
    ///
    /// # Errors
    ///
    /// Fails like [`find_by_id`](Self::find_by_id) without writing anything.
    fn delete_by_id(&self, id: &E::Id) -> impl Future<Output = RepositoryResult<E>> + Send;
}

/// Append the `deleted = false` condition to a predicate set
pub fn live_criteria<E: Entity>(mut criteria: Vec<FilterCondition>) -> Vec<FilterCondition> {
    criteria.push(FilterCondition::eq(E::DELETED_FIELD, false));
    criteria
}

/// [`EntityManager`] backed by any [`Persistence`] store
pub struct SoftDeleteManager<E, S> {
    store: Arc<S>,
    _entity: PhantomData<fn() -> E>,
}

impl<E, S> SoftDeleteManager<E, S>
where
    E: Entity,
    S: Persistence<E>,
{
    /// Create a manager over a shared store
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    /// The underlying store
    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

impl<E, S> Clone for SoftDeleteManager<E, S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            _entity: PhantomData,
        }
    }
}

impl<E, S> EntityManager<E> for SoftDeleteManager<E, S>
where
    E: Entity,
    S: Persistence<E>,
{
    async fn find_by_id(&self, id: &E::Id) -> RepositoryResult<E> {
        let criteria = live_criteria::<E>(vec![FilterCondition::eq(E::ID_FIELD, id.clone())]);

        match self.store.find_one_by(&criteria).await? {
            Some(entity) => {
                tracing::debug!(entity_type = E::ENTITY_TYPE, entity_id = %id, "entity found");
                Ok(entity)
            }
            None => {
                tracing::debug!(entity_type = E::ENTITY_TYPE, entity_id = %id, "entity not found");
                Err(RepositoryError::not_found(E::ENTITY_TYPE, id.to_string()))
            }
        }
    }

    async fn find_all(&self) -> RepositoryResult<Vec<E>> {
        let entities = self.store.find_by(&live_criteria::<E>(Vec::new())).await?;
        tracing::debug!(
            entity_type = E::ENTITY_TYPE,
            count = entities.len(),
            "listed live entities"
        );
        Ok(entities)
    }

    async fn delete_by_id(&self, id: &E::Id) -> RepositoryResult<E> {
        let mut entity = self
            .find_by_id(id)
            .await
            .map_err(|e| e.with_operation(RepositoryOperation::SoftDelete))?;
        entity.set_deleted(true);

        self.store.persist(&entity).await?;
        self.store.flush().await?;

        tracing::info!(entity_type = E::ENTITY_TYPE, entity_id = %id, "entity soft deleted");
        Ok(entity)
    }
}
