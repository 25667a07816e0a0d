//! Entity services: validation plus create/update persistence
//!
//! Services are supplied by the application. The controller hands them the
//! decoded request body and propagates their errors unchanged.

use std::future::Future;

use serde_json::Value;

use crate::entity::Entity;
use crate::handlers::{ApiError, ApiOperation};

/// Decoded request body; `Value::Null` when the body was empty
pub type RequestData = Value;

/// Create and update operations for one entity type
///
/// # Example
///
/// ```rust,ignore
/// use softcrud::handlers::ApiError;
/// use softcrud::service::{merge_fields, EntityService, RequestData};
///
/// impl EntityService<Note> for NoteService {
///     async fn create_validate_and_persist(&self, data: RequestData) -> Result<Note, ApiError> {
///         let note = Note::from_request(self.next_id(), &data)?;
///         self.persist(note).await
///     }
///
///     async fn update_validate_and_persist(
///         &self,
///         entity: Note,
///         data: RequestData,
///     ) -> Result<Note, ApiError> {
///         let note = merge_fields(&entity, &data)?;
///         validate(&note)?;
///         self.persist(note).await
///     }
/// }
/// ```
pub trait EntityService<E: Entity>: Send + Sync {
    /// Build a new entity from request data, validate it, assign its id and persist it
    fn create_validate_and_persist(
        &self,
        data: RequestData,
    ) -> impl Future<Output = Result<E, ApiError>> + Send;

    /// Merge request data into a live entity, validate the result and persist it
    fn update_validate_and_persist(
        &self,
        entity: E,
        data: RequestData,
    ) -> impl Future<Output = Result<E, ApiError>> + Send;
}

/// Overlay the fields of a request body onto an entity
///
/// The id and soft-delete fields are never taken from the body. A `Null`
/// body leaves the entity unchanged; any other non-object body, or a merge
/// result that no longer deserializes into `E`, is a validation failure.
///
/// # Example
///
/// ```rust,ignore
/// let note = merge_fields(&note, &json!({ "title": "renamed", "id": 99 }))?;
/// assert_eq!(note.title, "renamed");
/// assert_eq!(note.id, 1);
/// ```
pub fn merge_fields<E: Entity>(entity: &E, data: &RequestData) -> Result<E, ApiError> {
    let changes = match data {
        Value::Null => return Ok(entity.clone()),
        Value::Object(changes) => changes,
        _ => {
            return Err(ApiError::validation_failed("Request body must be a JSON object")
                .with_operation(ApiOperation::Update))
        }
    };

    let mut merged = serde_json::to_value(entity).map_err(|e| {
        tracing::error!(entity_type = E::ENTITY_TYPE, error = %e, "entity serialization failed");
        ApiError::internal("Failed to read entity").with_operation(ApiOperation::Update)
    })?;

    if let Value::Object(fields) = &mut merged {
        for (key, value) in changes {
            if key == E::ID_FIELD || key == E::DELETED_FIELD {
                continue;
            }
            fields.insert(key.clone(), value.clone());
        }
    }

    serde_json::from_value(merged).map_err(|e| {
        ApiError::validation_failed(e.to_string())
            .with_operation(ApiOperation::Update)
            .with_entity(E::ENTITY_TYPE, entity.id().to_string())
    })
}
