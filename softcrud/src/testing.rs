//! Fixtures shared by unit tests

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::handlers::{ApiError, ApiOperation, FieldError};
use crate::manager::SoftDeleteManager;
use crate::repository::{
    FilterCondition, InMemoryStore, ObjectManager, Repository, RepositoryError,
    RepositoryOperation, RepositoryResult,
};
use crate::service::{merge_fields, EntityService, RequestData};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Widget {
    pub id: u64,
    #[serde(default)]
    pub deleted: bool,
    pub name: String,
}

impl Widget {
    pub fn live(id: u64, name: &str) -> Self {
        Self {
            id,
            deleted: false,
            name: name.to_string(),
        }
    }

    pub fn deleted(id: u64, name: &str) -> Self {
        Self {
            id,
            deleted: true,
            name: name.to_string(),
        }
    }
}

impl Entity for Widget {
    type Id = u64;
    const ENTITY_TYPE: &'static str = "Widget";

    fn id(&self) -> &u64 {
        &self.id
    }

    fn is_deleted(&self) -> bool {
        self.deleted
    }

    fn set_deleted(&mut self, deleted: bool) {
        self.deleted = deleted;
    }
}

fn require_name(widget: &Widget, operation: ApiOperation) -> Result<(), ApiError> {
    if widget.name.trim().is_empty() {
        return Err(ApiError::validation_failed("Widget name is required")
            .with_operation(operation)
            .with_field_error(FieldError::new("name", "REQUIRED", "must not be blank")));
    }
    Ok(())
}

/// Service over an in-memory store that counts its invocations
pub(crate) struct WidgetService {
    store: Arc<InMemoryStore<Widget>>,
    next_id: AtomicU64,
    pub calls: AtomicUsize,
}

impl WidgetService {
    pub fn new(store: Arc<InMemoryStore<Widget>>, next_id: u64) -> Self {
        Self {
            store,
            next_id: AtomicU64::new(next_id),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    async fn save(&self, widget: Widget) -> Result<Widget, ApiError> {
        self.store.persist(&widget).await?;
        self.store.flush().await?;
        Ok(widget)
    }
}

impl EntityService<Widget> for WidgetService {
    async fn create_validate_and_persist(&self, data: RequestData) -> Result<Widget, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let name = data
            .get("name")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        let widget = Widget {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            deleted: false,
            name,
        };
        require_name(&widget, ApiOperation::Create)?;
        self.save(widget).await
    }

    async fn update_validate_and_persist(
        &self,
        entity: Widget,
        data: RequestData,
    ) -> Result<Widget, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let widget = merge_fields(&entity, &data)?;
        require_name(&widget, ApiOperation::Update)?;
        self.save(widget).await
    }
}

pub(crate) type WidgetManager = SoftDeleteManager<Widget, InMemoryStore<Widget>>;

/// Manager and service sharing one store seeded with `records`
pub(crate) fn widget_stack(records: Vec<Widget>) -> (WidgetManager, WidgetService) {
    let next_id = records.iter().map(|w| w.id).max().unwrap_or(0) + 1;
    let store = Arc::new(InMemoryStore::with_records(records));
    (
        SoftDeleteManager::new(Arc::clone(&store)),
        WidgetService::new(store, next_id),
    )
}

/// Store whose reads always fail and whose writes are only counted
///
/// `find_one_by` times out and `find_by` reports a storage error.
#[derive(Default)]
pub(crate) struct FailingStore {
    writes: AtomicUsize,
}

impl FailingStore {
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

impl Repository<Widget> for FailingStore {
    async fn find_one_by(
        &self,
        _criteria: &[FilterCondition],
    ) -> RepositoryResult<Option<Widget>> {
        Err(RepositoryError::timeout(
            RepositoryOperation::FindOneBy,
            "store did not answer",
        ))
    }

    async fn find_by(&self, _criteria: &[FilterCondition]) -> RepositoryResult<Vec<Widget>> {
        Err(RepositoryError::storage_error(
            RepositoryOperation::FindBy,
            "disk unavailable",
        ))
    }
}

impl ObjectManager<Widget> for FailingStore {
    async fn persist(&self, _entity: &Widget) -> RepositoryResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn flush(&self) -> RepositoryResult<()> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}
