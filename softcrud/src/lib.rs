//! # softcrud
//!
//! Generic REST CRUD layer for axum services whose entities are soft deleted.
//!
//! ## Features
//!
//! - **Soft delete**: deleted records stay in the store with `deleted = true` and
//!   are invisible to every read path
//! - **Entity managers**: [`SoftDeleteManager`](manager::SoftDeleteManager) over any
//!   predicate-lookup store
//! - **Controllers**: [`ApiController`](handlers::ApiController) maps POST, GET, PUT,
//!   PATCH and DELETE onto manager and service calls
//! - **Structured errors**: JSON error bodies with stable codes (`NOT_FOUND`, ...)
//! - **Middleware stack**: request ids, body limits, timeouts, panic recovery, CORS
//! - **Graceful shutdown**: SIGTERM and SIGINT handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use softcrud::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = Config::load_for_service("notes-service")?;
//!     init_tracing(&config)?;
//!
//!     let store = Arc::new(InMemoryStore::<Note>::new());
//!     let controller = ApiController::from_config(
//!         SoftDeleteManager::new(Arc::clone(&store)),
//!         NoteService::new(store),
//!         &config.api,
//!     );
//!
//!     let app = Router::new().nest("/notes", resource_router(controller));
//!
//!     Server::new(config).serve(app).await
//! }
//! ```

pub mod config;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod manager;
pub mod middleware;
pub mod observability;
pub mod repository;
pub mod serializer;
pub mod server;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ApiConfig, Config, MiddlewareConfig, ServiceConfig};
    pub use crate::entity::Entity;
    pub use crate::error::{Error, Result};
    pub use crate::handlers::{
        resource_router, ApiController, ApiError, ApiErrorKind, ApiErrorResponse, ApiOperation,
        ApiResponse, BodyPolicy, FieldError,
    };
    pub use crate::manager::{live_criteria, EntityManager, SoftDeleteManager};
    pub use crate::middleware::{
        request_id_layer, request_id_propagation_layer, sensitive_headers_layer,
        MakeRequestUuid7,
    };
    pub use crate::observability::{init_tracing, shutdown_tracing};
    pub use crate::repository::{
        FilterCondition, FilterValue, InMemoryStore, ObjectManager, Persistence, Repository,
        RepositoryError, RepositoryErrorKind, RepositoryOperation, RepositoryResult,
    };
    pub use crate::serializer::SerializationFormat;
    pub use crate::server::Server;
    pub use crate::service::{merge_fields, EntityService, RequestData};

    pub use axum::{
        routing::{delete, get, patch, post, put},
        Router,
    };

    pub use serde::{Deserialize, Serialize};

    pub use tracing::{debug, error, info, trace, warn};

    pub use tokio;
}
