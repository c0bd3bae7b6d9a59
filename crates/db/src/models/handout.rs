//! Campaign handout model and DTOs.

use loretable_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A handout row from the `campaign_handouts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Handout {
    pub id: DbId,
    pub campaign_id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub body: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new handout.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHandout {
    pub title: String,
    #[serde(default)]
    pub body: String,
}

/// DTO for updating an existing handout.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateHandout {
    pub title: Option<String>,
    pub body: Option<String>,
}
