//! Note model and DTOs.
//!
//! The scope columns are stored as (`entity_type`, `entity_id`); the typed
//! view is [`loretable_core::note::NoteScope`], attached on serialization.

use loretable_core::error::CoreError;
use loretable_core::note::NoteScope;
use loretable_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A note row from the `notes` table.
#[derive(Debug, Clone, FromRow)]
pub struct Note {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub body: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Note {
    /// Typed scope of this note. The check constraint keeps stored rows
    /// well-formed, so this only fails on rows written outside the API.
    pub fn scope(&self) -> Result<NoteScope, CoreError> {
        NoteScope::from_columns(self.entity_type.as_deref(), self.entity_id)
    }
}

/// External representation of a note with its typed scope.
#[derive(Debug, Clone, Serialize)]
pub struct NoteResponse {
    pub id: DbId,
    pub title: String,
    pub body: String,
    pub scope: NoteScope,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new note. The scope defaults to standalone.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateNote {
    pub title: String,
    #[serde(default)]
    pub body: String,
    pub scope: Option<NoteScope>,
}

/// DTO for updating an existing note. The scope, once set, can be replaced
/// or cleared by passing a new value.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateNote {
    pub title: Option<String>,
    pub body: Option<String>,
    pub scope: Option<NoteScope>,
}
