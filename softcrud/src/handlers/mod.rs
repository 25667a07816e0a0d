//! HTTP layer for soft-delete aware REST resources
//!
//! This module binds REST verbs to an [`EntityManager`](crate::manager::EntityManager)
//! and an [`EntityService`](crate::service::EntityService).
//!
//! # Features
//!
//! - **Controller**: [`ApiController`] implements create, update, delete, get and list
//! - **Routing**: [`resource_router`] exposes a controller as an axum [`Router`](axum::Router)
//! - **Error Handling**: [`ApiError`] with automatic HTTP status code mapping
//! - **Body Policy**: [`BodyPolicy`] decides how malformed request bodies are handled
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use axum::Router;
//! use softcrud::handlers::{resource_router, ApiController};
//! use softcrud::manager::SoftDeleteManager;
//! use softcrud::repository::InMemoryStore;
//!
//! let store = Arc::new(InMemoryStore::<Note>::new());
//! let controller = ApiController::new(
//!     SoftDeleteManager::new(Arc::clone(&store)),
//!     NoteService::new(store),
//! );
//!
//! let app = Router::new().nest("/notes", resource_router(controller));
//! ```
//!
//! # Error Responses
//!
//! Errors are returned as JSON:
//!
//! ```json
//! {
//!   "error": "Resource not found.",
//!   "code": "NOT_FOUND",
//!   "status": 404,
//!   "operation": "get",
//!   "entity_type": "Note",
//!   "entity_id": "42"
//! }
//! ```

mod controller;
mod error;
mod response;
mod routes;

pub use controller::{ApiController, BodyPolicy};
pub use error::{ApiError, ApiErrorKind, ApiErrorResponse, ApiOperation, FieldError};
pub use response::ApiResponse;
pub use routes::resource_router;
