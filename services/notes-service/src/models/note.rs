use serde::{Deserialize, Serialize};
use softcrud::entity::Entity;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: u64,
    #[serde(default)]
    pub deleted: bool,
    pub title: String,
    #[serde(default)]
    pub body: String,
}

impl Note {
    pub fn new(id: u64, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            id,
            deleted: false,
            title: title.into(),
            body: body.into(),
        }
    }
}

impl Entity for Note {
    type Id = u64;
    const ENTITY_TYPE: &'static str = "Note";

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

/// Body of a create request
#[derive(Debug, Default, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
}
