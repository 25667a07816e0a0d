use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use softcrud::handlers::{ApiError, ApiOperation, FieldError};
use softcrud::repository::{InMemoryStore, ObjectManager};
use softcrud::service::{merge_fields, EntityService, RequestData};

use crate::models::{CreateNoteRequest, Note};

pub const MAX_TITLE_LEN: usize = 200;

/// Validates notes and writes them to the shared store
pub struct NoteService {
    store: Arc<InMemoryStore<Note>>,
    next_id: AtomicU64,
}

impl NoteService {
    pub fn new(store: Arc<InMemoryStore<Note>>) -> Self {
        Self {
            store,
            next_id: AtomicU64::new(1),
        }
    }

    async fn save(&self, note: Note, operation: ApiOperation) -> Result<Note, ApiError> {
        self.store
            .persist(&note)
            .await
            .map_err(|e| ApiError::from(e).with_operation(operation))?;
        self.store
            .flush()
            .await
            .map_err(|e| ApiError::from(e).with_operation(operation))?;
        Ok(note)
    }
}

fn validate(title: &str, operation: ApiOperation) -> Result<(), ApiError> {
    let field_error = if title.trim().is_empty() {
        FieldError::new("title", "REQUIRED", "title is required")
    } else if title.chars().count() > MAX_TITLE_LEN {
        FieldError::new(
            "title",
            "TOO_LONG",
            format!("title must be at most {MAX_TITLE_LEN} characters"),
        )
    } else {
        return Ok(());
    };

    Err(ApiError::validation_failed("Note is invalid")
        .with_operation(operation)
        .with_field_error(field_error))
}

impl EntityService<Note> for NoteService {
    async fn create_validate_and_persist(&self, data: RequestData) -> Result<Note, ApiError> {
        let request: CreateNoteRequest = match data {
            RequestData::Null => CreateNoteRequest::default(),
            data @ RequestData::Object(_) => serde_json::from_value(data).map_err(|e| {
                ApiError::validation_failed(e.to_string()).with_operation(ApiOperation::Create)
            })?,
            _ => {
                return Err(ApiError::validation_failed("Request body must be a JSON object")
                    .with_operation(ApiOperation::Create))
            }
        };
        validate(&request.title, ApiOperation::Create)?;

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let note = Note::new(id, request.title, request.body);
        tracing::debug!(note_id = id, "creating note");

        self.save(note, ApiOperation::Create).await
    }

    async fn update_validate_and_persist(
        &self,
        entity: Note,
        data: RequestData,
    ) -> Result<Note, ApiError> {
        let note = merge_fields(&entity, &data)?;
        validate(&note.title, ApiOperation::Update)?;

        self.save(note, ApiOperation::Update).await
    }
}
