//! Scene entity model and DTOs.

use loretable_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A scene row from the `scenes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Scene {
    pub id: DbId,
    pub campaign_id: DbId,
    pub name: String,
    pub description: String,
    pub sort_order: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new scene.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScene {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Appended at the end of the ordering if omitted.
    pub sort_order: Option<i32>,
}

/// DTO for updating an existing scene. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateScene {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sort_order: Option<i32>,
}
