pub mod handlers;
pub mod models;
pub mod services;

use std::sync::Arc;

use axum::{routing::get, Router};
use softcrud::config::ApiConfig;
use softcrud::handlers::{resource_router, ApiController};
use softcrud::manager::SoftDeleteManager;
use softcrud::repository::InMemoryStore;

use crate::models::Note;
use crate::services::NoteService;

pub const SERVICE_NAME: &str = "notes-service";

/// Build the service router over a note store
///
/// Notes are served under `/notes`, the liveness probe under `/health`.
pub fn app(store: Arc<InMemoryStore<Note>>, api: &ApiConfig) -> Router {
    let controller = ApiController::from_config(
        SoftDeleteManager::new(Arc::clone(&store)),
        NoteService::new(store),
        api,
    );

    Router::new()
        .route("/health", get(handlers::health))
        .nest("/notes", resource_router(controller))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use softcrud::config::Config;
    use softcrud::server::Server;
    use tower::ServiceExt;

    async fn send(app: &Router, method: Method, uri: &str, body: Value) -> Response {
        let body = if body.is_null() {
            Body::empty()
        } else {
            Body::from(body.to_string())
        };
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(body)
            .unwrap();
        app.clone().oneshot(request).await.unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_note_lifecycle() {
        let store = Arc::new(InMemoryStore::new());
        let app = Server::new(Config::named(SERVICE_NAME))
            .apply_layers(app(Arc::clone(&store), &ApiConfig::default()));

        let response = send(&app, Method::POST, "/notes", json!({ "title": "groceries" })).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(json_body(response).await["id"], 1);

        send(&app, Method::POST, "/notes", json!({ "title": "chores" })).await;

        let response = send(&app, Method::PATCH, "/notes/2", json!({ "body": "laundry" })).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["body"], "laundry");

        let response = send(&app, Method::DELETE, "/notes/1", Value::Null).await;
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = send(&app, Method::GET, "/notes", Value::Null).await;
        let listed = json_body(response).await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["title"], "chores");

        let response = send(&app, Method::GET, "/notes/1", Value::Null).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["code"], "NOT_FOUND");

        // soft deleted, not removed
        let stored = store.snapshot().await;
        assert_eq!(stored.len(), 2);
        assert!(stored[0].deleted);
    }

    #[tokio::test]
    async fn test_validation_error_response() {
        let app = app(Arc::new(InMemoryStore::new()), &ApiConfig::default());

        let response = send(&app, Method::POST, "/notes", json!({ "body": "untitled" })).await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let error = json_body(response).await;
        assert_eq!(error["code"], "VALIDATION_FAILED");
        assert_eq!(error["fields"][0]["field"], "title");
    }

    #[tokio::test]
    async fn test_health_route() {
        let app = app(Arc::new(InMemoryStore::new()), &ApiConfig::default());
        let response = send(&app, Method::GET, "/health", Value::Null).await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
