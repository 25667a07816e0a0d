//! Persistence collaborator traits
//!
//! The store is treated as opaque: it answers field-equality predicate
//! lookups and accepts staged writes that become visible on flush. Methods
//! use RPITIT (Return Position Impl Trait In Traits), so implementations can
//! be written with plain `async fn`.
//!
//! - [`Repository`]: predicate finders (read side)
//! - [`ObjectManager`]: persist and flush (write side)
//! - [`Persistence`]: anything that provides both

use std::future::Future;

use super::criteria::FilterCondition;
use super::error::RepositoryError;

/// Result type for repository operations
pub type RepositoryResult<T> = std::result::Result<T, RepositoryError>;

/// Read access to stored entities
///
/// # Example
///
/// ```rust,ignore
/// use softcrud::repository::{FilterCondition, Repository, RepositoryResult};
///
/// impl Repository<Note> for NoteTable {
///     async fn find_one_by(&self, criteria: &[FilterCondition]) -> RepositoryResult<Option<Note>> {
///         let (sql, params) = where_clause(criteria);
///         // run the query...
///     }
///
///     async fn find_by(&self, criteria: &[FilterCondition]) -> RepositoryResult<Vec<Note>> {
///         // ...
///     }
/// }
/// ```
pub trait Repository<E>: Send + Sync {
    /// Find the first entity matching every condition
    ///
    /// Returns `Ok(None)` when nothing matches.
    fn find_one_by(
        &self,
        criteria: &[FilterCondition],
    ) -> impl Future<Output = RepositoryResult<Option<E>>> + Send;

    /// Find all entities matching every condition, in store order
    fn find_by(
        &self,
        criteria: &[FilterCondition],
    ) -> impl Future<Output = RepositoryResult<Vec<E>>> + Send;
}

/// Write access to stored entities
pub trait ObjectManager<E>: Send + Sync {
    /// Stage an entity for writing (insert, or replace the record with the same id)
    fn persist(&self, entity: &E) -> impl Future<Output = RepositoryResult<()>> + Send;

    /// Make all staged writes visible
    fn flush(&self) -> impl Future<Output = RepositoryResult<()>> + Send;
}

/// A store that can both read and write entities
pub trait Persistence<E>: Repository<E> + ObjectManager<E> {}

impl<E, T> Persistence<E> for T where T: Repository<E> + ObjectManager<E> {}
