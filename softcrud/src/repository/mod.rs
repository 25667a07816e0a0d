//! Store access for entity managers
//!
//! # Features
//!
//! - **Predicates**: [`FilterCondition`] field-equality conditions, ANDed together
//! - **Read side**: [`Repository`] with `find_one_by` / `find_by`
//! - **Write side**: [`ObjectManager`] with `persist` / `flush`
//! - **Errors**: [`RepositoryError`] with operation and entity context
//! - **Reference store**: [`InMemoryStore`]
//!
//! # Example
//!
//! ```rust,ignore
//! use softcrud::repository::{FilterCondition, InMemoryStore, Repository};
//!
//! let store = InMemoryStore::with_records(notes);
//! let drafts = store
//!     .find_by(&[FilterCondition::eq("status", "draft"), FilterCondition::eq("deleted", false)])
//!     .await?;
//! ```

mod criteria;
mod error;
mod in_memory;
mod traits;

// Re-export all public types
pub use criteria::{FilterCondition, FilterValue};
pub use error::{RepositoryError, RepositoryErrorKind, RepositoryOperation, NOT_FOUND_MESSAGE};
pub use in_memory::InMemoryStore;
pub use traits::{ObjectManager, Persistence, Repository, RepositoryResult};
