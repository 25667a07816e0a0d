//! The entity contract shared by stores, managers and controllers

use std::fmt;

use serde::{de::DeserializeOwned, Serialize};

use crate::repository::FilterValue;

/// A persisted record with an immutable id and a soft-delete flag
///
/// Records with `deleted = true` are logically removed: no read path of
/// [`EntityManager`](crate::manager::EntityManager) will return them.
///
/// # Example
///
/// ```rust
/// use serde::{Deserialize, Serialize};
/// use softcrud::entity::Entity;
///
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// struct Note {
///     id: u64,
///     #[serde(default)]
///     deleted: bool,
///     title: String,
/// }
///
/// impl Entity for Note {
///     type Id = u64;
///     const ENTITY_TYPE: &'static str = "Note";
///
///     fn id(&self) -> &u64 {
///         &self.id
///     }
///
///     fn is_deleted(&self) -> bool {
///         self.deleted
///     }
///
///     fn set_deleted(&mut self, deleted: bool) {
///         self.deleted = deleted;
///     }
/// }
/// ```
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Identifier type, decoded from request paths and matched in store predicates
    type Id: Clone
        + PartialEq
        + fmt::Display
        + DeserializeOwned
        + Into<FilterValue>
        + Send
        + Sync
        + 'static;

    /// Resource name used in errors and logs
    const ENTITY_TYPE: &'static str;

    /// Serialized name of the id field
    const ID_FIELD: &'static str = "id";

    /// Serialized name of the soft-delete flag
    const DELETED_FIELD: &'static str = "deleted";

    /// The entity's identifier
    fn id(&self) -> &Self::Id;

    /// Whether the entity has been soft deleted
    fn is_deleted(&self) -> bool;

    /// Set or clear the soft-delete flag
    fn set_deleted(&mut self, deleted: bool);
}
