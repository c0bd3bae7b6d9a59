//! Repository for the `maps` table.

use loretable_core::types::DbId;
use sqlx::PgPool;

use crate::models::map::{Map, UpsertMap};

const COLUMNS: &str =
    "id, scene_id, name, image_url, grid_size, width, height, created_at, updated_at";

/// Provides map access. A scene holds at most one map (`uq_maps_scene`), so
/// writes go through an upsert keyed on the scene.
pub struct MapRepo;

impl MapRepo {
    /// Create or replace the map for a scene.
    pub async fn upsert_for_scene(
        pool: &PgPool,
        scene_id: DbId,
        input: &UpsertMap,
    ) -> Result<Map, sqlx::Error> {
        let query = format!(
            "INSERT INTO maps (scene_id, name, image_url, grid_size, width, height)
             VALUES ($1, $2, $3, COALESCE($4, 50), COALESCE($5, 30), COALESCE($6, 30))
             ON CONFLICT ON CONSTRAINT uq_maps_scene DO UPDATE SET
                name = EXCLUDED.name,
                image_url = EXCLUDED.image_url,
                grid_size = EXCLUDED.grid_size,
                width = EXCLUDED.width,
                height = EXCLUDED.height,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Map>(&query)
            .bind(scene_id)
            .bind(&input.name)
            .bind(&input.image_url)
            .bind(input.grid_size)
            .bind(input.width)
            .bind(input.height)
            .fetch_one(pool)
            .await
    }

    /// Find a map by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Map>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM maps WHERE id = $1");
        sqlx::query_as::<_, Map>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the maps for a set of scenes (campaign detail assembly).
    pub async fn list_by_scenes(
        pool: &PgPool,
        scene_ids: &[DbId],
    ) -> Result<Vec<Map>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM maps WHERE scene_id = ANY($1) ORDER BY id ASC"
        );
        sqlx::query_as::<_, Map>(&query)
            .bind(scene_ids)
            .fetch_all(pool)
            .await
    }
}
