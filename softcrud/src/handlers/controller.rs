//! Generic REST controller binding HTTP verbs to manager and service calls
//!
//! | Verb | Action | Success |
//! |---|---|---|
//! | `POST /` | [`ApiController::create`] | 201 with the new entity |
//! | `GET /` | [`ApiController::list`] | 200 with every live entity |
//! | `GET /{id}` | [`ApiController::get`] | 200 with the entity |
//! | `PUT`/`PATCH /{id}` | [`ApiController::update`] | 200 with the updated entity |
//! | `DELETE /{id}` | [`ApiController::delete`] | 204, empty body |
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use softcrud::handlers::{ApiController, BodyPolicy};
//! use softcrud::manager::SoftDeleteManager;
//!
//! let store = Arc::new(InMemoryStore::<Note>::new());
//! let controller = ApiController::new(
//!     SoftDeleteManager::new(Arc::clone(&store)),
//!     NoteService::new(store),
//! )
//! .with_body_policy(BodyPolicy::Strict);
//!
//! let response = controller.get(&1).await?;
//! ```

use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use super::error::{ApiError, ApiOperation};
use super::response::ApiResponse;
use crate::config::ApiConfig;
use crate::entity::Entity;
use crate::manager::EntityManager;
use crate::serializer::SerializationFormat;
use crate::service::{EntityService, RequestData};

/// How request bodies that are not valid JSON are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyPolicy {
    /// Reject malformed JSON and non-object values with 400
    #[default]
    Strict,
    /// Replace malformed JSON with `null` and let the service decide
    Lenient,
}

/// REST controller for one entity type
///
/// The manager handles reads and soft deletes; the service handles
/// validation and persistence for create and update. Both are fixed at
/// construction.
pub struct ApiController<E, M, S> {
    manager: M,
    service: S,
    format: SerializationFormat,
    body_policy: BodyPolicy,
    _entity: PhantomData<fn() -> E>,
}

impl<E, M, S> ApiController<E, M, S>
where
    E: Entity,
    M: EntityManager<E>,
    S: EntityService<E>,
{
    /// Create a controller with compact JSON output and strict body decoding
    pub fn new(manager: M, service: S) -> Self {
        Self {
            manager,
            service,
            format: SerializationFormat::default(),
            body_policy: BodyPolicy::default(),
            _entity: PhantomData,
        }
    }

    /// Create a controller using the `[api]` configuration section
    pub fn from_config(manager: M, service: S, config: &ApiConfig) -> Self {
        Self::new(manager, service)
            .with_serialization_format(config.serialization_format)
            .with_body_policy(config.body_policy)
    }

    /// Set the response serialization format
    #[must_use]
    pub fn with_serialization_format(mut self, format: SerializationFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the request body policy
    #[must_use]
    pub fn with_body_policy(mut self, body_policy: BodyPolicy) -> Self {
        self.body_policy = body_policy;
        self
    }

    /// The manager used for reads and deletes
    pub fn entity_manager(&self) -> &M {
        &self.manager
    }

    /// The service used for create and update
    pub fn entity_service(&self) -> &S {
        &self.service
    }

    /// The format used for response bodies
    pub fn serialization_format(&self) -> SerializationFormat {
        self.format
    }

    /// The policy applied by [`decode_body`](Self::decode_body)
    pub fn body_policy(&self) -> BodyPolicy {
        self.body_policy
    }

    /// Decode a raw request body into [`RequestData`]
    ///
    /// An empty (or whitespace-only) body decodes to `Null` under either
    /// policy.
    ///
    /// # Errors
    ///
    /// Under [`BodyPolicy::Strict`], malformed JSON and JSON values that are
    /// not objects fail with `BadRequest`.
    pub fn decode_body(&self, body: &[u8]) -> Result<RequestData, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(RequestData::Null);
        }

        match (serde_json::from_slice::<RequestData>(body), self.body_policy) {
            (Ok(data @ RequestData::Object(_)), _) => Ok(data),
            (Ok(data), BodyPolicy::Lenient) => Ok(data),
            (Ok(_), BodyPolicy::Strict) => Err(ApiError::bad_request(
                "Request body must be a JSON object",
            )),
            (Err(e), BodyPolicy::Strict) => Err(ApiError::bad_request(format!(
                "Malformed JSON request body: {e}"
            ))),
            (Err(e), BodyPolicy::Lenient) => {
                tracing::debug!(
                    entity_type = E::ENTITY_TYPE,
                    error = %e,
                    "malformed request body treated as null"
                );
                Ok(RequestData::Null)
            }
        }
    }

    /// Create a new entity from the request body
    ///
    /// # Errors
    ///
    /// Body decoding errors, and any error from the service.
    pub async fn create(&self, body: &[u8]) -> Result<ApiResponse, ApiError> {
        let data = self
            .decode_body(body)
            .map_err(|e| e.with_operation(ApiOperation::Create))?;

        let entity = self.service.create_validate_and_persist(data).await?;
        tracing::debug!(entity_type = E::ENTITY_TYPE, entity_id = %entity.id(), "entity created");

        let content = self
            .format
            .serialize(&entity)
            .map_err(|e| e.with_operation(ApiOperation::Create))?;
        Ok(ApiResponse::created(content))
    }

    /// Update a live entity from the request body
    ///
    /// The service is never called when the entity is missing or deleted.
    ///
    /// # Errors
    ///
    /// Body decoding errors, `NotFound`, and any error from the service.
    pub async fn update(&self, id: &E::Id, body: &[u8]) -> Result<ApiResponse, ApiError> {
        let data = self
            .decode_body(body)
            .map_err(|e| e.with_operation(ApiOperation::Update))?;

        let entity = self
            .manager
            .find_by_id(id)
            .await
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Update))?;

        let updated = self.service.update_validate_and_persist(entity, data).await?;
        tracing::debug!(entity_type = E::ENTITY_TYPE, entity_id = %id, "entity updated");

        let content = self
            .format
            .serialize(&updated)
            .map_err(|e| e.with_operation(ApiOperation::Update))?;
        Ok(ApiResponse::ok(content))
    }

    /// Soft delete a live entity
    ///
    /// # Errors
    ///
    /// `NotFound` when the entity is missing or already deleted.
    pub async fn delete(&self, id: &E::Id) -> Result<ApiResponse, ApiError> {
        self.manager
            .delete_by_id(id)
            .await
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Delete))?;

        Ok(ApiResponse::no_content())
    }

    /// Fetch a single live entity
    ///
    /// # Errors
    ///
    /// `NotFound` when the entity is missing or deleted.
    pub async fn get(&self, id: &E::Id) -> Result<ApiResponse, ApiError> {
        let entity = self
            .manager
            .find_by_id(id)
            .await
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::Get))?;

        let content = self
            .format
            .serialize(&entity)
            .map_err(|e| e.with_operation(ApiOperation::Get))?;
        Ok(ApiResponse::ok(content))
    }

    /// Fetch every live entity as an array
    pub async fn list(&self) -> Result<ApiResponse, ApiError> {
        let entities = self
            .manager
            .find_all()
            .await
            .map_err(|e| ApiError::from(e).with_operation(ApiOperation::List))?;

        let content = self
            .format
            .serialize(&entities)
            .map_err(|e| e.with_operation(ApiOperation::List))?;
        Ok(ApiResponse::ok(content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::ApiErrorKind;
    use crate::repository::RepositoryResult;
    use crate::testing::{widget_stack, Widget, WidgetManager, WidgetService};
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    type WidgetController = ApiController<Widget, WidgetManager, WidgetService>;

    fn controller_with(records: Vec<Widget>) -> WidgetController {
        let (manager, service) = widget_stack(records);
        ApiController::new(manager, service)
    }

    fn body_json(response: &ApiResponse) -> Value {
        serde_json::from_slice(response.body()).unwrap()
    }

    #[test]
    fn test_decode_empty_body_is_null_under_both_policies() {
        let strict = controller_with(vec![]);
        assert_eq!(strict.decode_body(b"").unwrap(), Value::Null);
        assert_eq!(strict.decode_body(b"  \n").unwrap(), Value::Null);

        let lenient = controller_with(vec![]).with_body_policy(BodyPolicy::Lenient);
        assert_eq!(lenient.decode_body(b"").unwrap(), Value::Null);
    }

    #[test]
    fn test_decode_strict_rejects_malformed_and_non_object() {
        let controller = controller_with(vec![]);

        let err = controller.decode_body(b"{not json").unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::BadRequest);

        let err = controller.decode_body(b"[1,2]").unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::BadRequest);
    }

    #[test]
    fn test_decode_lenient_passes_null_through() {
        let controller = controller_with(vec![]).with_body_policy(BodyPolicy::Lenient);
        assert_eq!(controller.decode_body(b"{not json").unwrap(), Value::Null);
        assert_eq!(controller.decode_body(b"[1]").unwrap(), json!([1]));
    }

    #[tokio::test]
    async fn test_get_live_entity() {
        let controller = controller_with(vec![Widget::live(1, "a")]);
        let response = controller.get(&1).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(&response),
            json!({ "id": 1, "deleted": false, "name": "a" })
        );
    }

    #[tokio::test]
    async fn test_get_deleted_entity_is_not_found() {
        let controller = controller_with(vec![Widget::deleted(1, "a")]);
        let err = controller.get(&1).await.unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::NotFound);
        assert_eq!(err.operation, ApiOperation::Get);
        assert_eq!(err.message, crate::repository::NOT_FOUND_MESSAGE);
    }

    #[tokio::test]
    async fn test_list_skips_deleted_entities() {
        let controller = controller_with(vec![
            Widget::live(1, "a"),
            Widget::deleted(2, "b"),
            Widget::live(3, "c"),
        ]);
        let response = controller.list().await.unwrap();

        let ids: Vec<u64> = serde_json::from_slice::<Vec<Widget>>(response.body())
            .unwrap()
            .iter()
            .map(|w| w.id)
            .collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[tokio::test]
    async fn test_list_empty_is_empty_array() {
        let controller = controller_with(vec![]);
        let response = controller.list().await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), b"[]");
    }

    #[tokio::test]
    async fn test_create_returns_created_entity() {
        let controller = controller_with(vec![Widget::live(4, "d")]);
        let response = controller.create(br#"{"name":"e"}"#).await.unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(body_json(&response)["id"], 5);
        assert_eq!(controller.get(&5).await.unwrap().status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_propagates_service_validation_error() {
        let controller = controller_with(vec![]);
        let err = controller.create(br#"{"name":""}"#).await.unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::ValidationFailed);
        assert_eq!(err.operation, ApiOperation::Create);
        assert_eq!(err.fields.len(), 1);
    }

    #[tokio::test]
    async fn test_strict_create_rejects_before_service_call() {
        let controller = controller_with(vec![]);
        let err = controller.create(b"not json").await.unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::BadRequest);
        assert_eq!(err.operation, ApiOperation::Create);
        assert_eq!(controller.entity_service().call_count(), 0);
    }

    #[tokio::test]
    async fn test_update_merges_body() {
        let controller = controller_with(vec![Widget::live(1, "a")]);
        let response = controller.update(&1, br#"{"name":"b"}"#).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(&response)["name"], "b");
        assert_eq!(
            controller.entity_manager().find_by_id(&1).await.unwrap(),
            Widget::live(1, "b")
        );
    }

    #[tokio::test]
    async fn test_update_deleted_entity_never_reaches_service() {
        let controller = controller_with(vec![Widget::deleted(1, "a")]);
        let err = controller.update(&1, br#"{"name":"b"}"#).await.unwrap_err();

        assert_eq!(err.kind, ApiErrorKind::NotFound);
        assert_eq!(err.operation, ApiOperation::Update);
        assert_eq!(controller.entity_service().call_count(), 0);
    }

    #[tokio::test]
    async fn test_delete_then_get_is_not_found() {
        let controller = controller_with(vec![Widget::live(1, "a")]);

        let response = controller.delete(&1).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        assert!(response.body().is_empty());

        assert!(controller.get(&1).await.is_err());
        let err = controller.delete(&1).await.unwrap_err();
        assert_eq!(err.operation, ApiOperation::Delete);
        assert_eq!(err.kind, ApiErrorKind::NotFound);
    }

    /// Entity whose serialization always fails
    #[derive(Debug, Clone, Deserialize)]
    struct Unprintable {
        id: u64,
    }

    impl Serialize for Unprintable {
        fn serialize<Ser: serde::Serializer>(&self, _: Ser) -> Result<Ser::Ok, Ser::Error> {
            Err(serde::ser::Error::custom("unprintable"))
        }
    }

    impl Entity for Unprintable {
        type Id = u64;
        const ENTITY_TYPE: &'static str = "Unprintable";

        fn id(&self) -> &u64 {
            &self.id
        }

        fn is_deleted(&self) -> bool {
            false
        }

        fn set_deleted(&mut self, _deleted: bool) {}
    }

    struct UnprintableManager;

    impl EntityManager<Unprintable> for UnprintableManager {
        async fn find_by_id(&self, id: &u64) -> RepositoryResult<Unprintable> {
            Ok(Unprintable { id: *id })
        }

        async fn find_all(&self) -> RepositoryResult<Vec<Unprintable>> {
            Ok(vec![Unprintable { id: 1 }])
        }

        async fn delete_by_id(&self, id: &u64) -> RepositoryResult<Unprintable> {
            Ok(Unprintable { id: *id })
        }
    }

    struct UnprintableService;

    impl EntityService<Unprintable> for UnprintableService {
        async fn create_validate_and_persist(
            &self,
            _data: RequestData,
        ) -> Result<Unprintable, ApiError> {
            Ok(Unprintable { id: 1 })
        }

        async fn update_validate_and_persist(
            &self,
            entity: Unprintable,
            _data: RequestData,
        ) -> Result<Unprintable, ApiError> {
            Ok(entity)
        }
    }

    #[tokio::test]
    async fn test_serialization_failure_carries_action_operation() {
        let controller: ApiController<Unprintable, _, _> =
            ApiController::new(UnprintableManager, UnprintableService);

        let err = controller.create(b"{}").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::InternalError);
        assert_eq!(err.operation, ApiOperation::Create);

        let err = controller.update(&1, b"{}").await.unwrap_err();
        assert_eq!(err.kind, ApiErrorKind::InternalError);
        assert_eq!(err.operation, ApiOperation::Update);

        let err = controller.get(&1).await.unwrap_err();
        assert_eq!(err.operation, ApiOperation::Get);

        let err = controller.list().await.unwrap_err();
        assert_eq!(err.operation, ApiOperation::List);

        // nothing to serialize on delete
        assert!(controller.delete(&1).await.is_ok());
    }

    #[tokio::test]
    async fn test_pretty_format_applies_to_responses() {
        let controller = controller_with(vec![Widget::live(1, "a")])
            .with_serialization_format(SerializationFormat::JsonPretty);
        let response = controller.get(&1).await.unwrap();
        assert!(std::str::from_utf8(response.body()).unwrap().contains('\n'));
    }
}
