//! Axum routing for [`ApiController`]

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{rejection::PathRejection, Path, State},
    routing::{get, post},
    Router,
};

use super::controller::ApiController;
use super::error::{ApiError, ApiOperation};
use super::response::ApiResponse;
use crate::entity::Entity;
use crate::manager::EntityManager;
use crate::service::EntityService;

type Shared<E, M, S> = State<Arc<ApiController<E, M, S>>>;

/// Build the collection and item routes for one resource
///
/// ```text
/// POST   /       create
/// GET    /       list
/// GET    /{id}   get
/// PUT    /{id}   update
/// PATCH  /{id}   update
/// DELETE /{id}   delete
/// ```
///
/// Mount it under the resource path with `Router::nest`.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new().nest("/notes", resource_router(controller));
/// ```
pub fn resource_router<E, M, S>(controller: ApiController<E, M, S>) -> Router
where
    E: Entity,
    M: EntityManager<E> + 'static,
    S: EntityService<E> + 'static,
{
    Router::new()
        .route("/", post(create::<E, M, S>).get(list::<E, M, S>))
        .route(
            "/{id}",
            get(show::<E, M, S>)
                .put(update::<E, M, S>)
                .patch(update::<E, M, S>)
                .delete(destroy::<E, M, S>),
        )
        .with_state(Arc::new(controller))
}

fn entity_id<E: Entity>(
    path: Result<Path<E::Id>, PathRejection>,
    operation: ApiOperation,
) -> Result<E::Id, ApiError> {
    path.map(|Path(id)| id).map_err(|rejection| {
        ApiError::bad_request(format!("Invalid {} id: {}", E::ENTITY_TYPE, rejection.body_text()))
            .with_operation(operation)
    })
}

async fn create<E, M, S>(
    State(controller): Shared<E, M, S>,
    body: Bytes,
) -> Result<ApiResponse, ApiError>
where
    E: Entity,
    M: EntityManager<E>,
    S: EntityService<E>,
{
    controller.create(&body).await
}

async fn list<E, M, S>(State(controller): Shared<E, M, S>) -> Result<ApiResponse, ApiError>
where
    E: Entity,
    M: EntityManager<E>,
    S: EntityService<E>,
{
    controller.list().await
}

async fn show<E, M, S>(
    State(controller): Shared<E, M, S>,
    path: Result<Path<E::Id>, PathRejection>,
) -> Result<ApiResponse, ApiError>
where
    E: Entity,
    M: EntityManager<E>,
    S: EntityService<E>,
{
    let id = entity_id::<E>(path, ApiOperation::Get)?;
    controller.get(&id).await
}

async fn update<E, M, S>(
    State(controller): Shared<E, M, S>,
    path: Result<Path<E::Id>, PathRejection>,
    body: Bytes,
) -> Result<ApiResponse, ApiError>
where
    E: Entity,
    M: EntityManager<E>,
    S: EntityService<E>,
{
    let id = entity_id::<E>(path, ApiOperation::Update)?;
    controller.update(&id, &body).await
}

async fn destroy<E, M, S>(
    State(controller): Shared<E, M, S>,
    path: Result<Path<E::Id>, PathRejection>,
) -> Result<ApiResponse, ApiError>
where
    E: Entity,
    M: EntityManager<E>,
    S: EntityService<E>,
{
    let id = entity_id::<E>(path, ApiOperation::Delete)?;
    controller.delete(&id).await
}
