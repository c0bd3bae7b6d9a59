//! Map entity model and DTOs.

use loretable_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A map row from the `maps` table. At most one per scene (`uq_maps_scene`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Map {
    pub id: DbId,
    pub scene_id: DbId,
    pub name: String,
    pub image_url: Option<String>,
    pub grid_size: i32,
    pub width: i32,
    pub height: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing a scene's map.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertMap {
    pub name: String,
    pub image_url: Option<String>,
    pub grid_size: Option<i32>,
    pub width: Option<i32>,
    pub height: Option<i32>,
}
