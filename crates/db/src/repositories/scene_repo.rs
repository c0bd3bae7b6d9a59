//! Repository for the `scenes` table.

use loretable_core::types::DbId;
use sqlx::PgPool;

use crate::models::scene::{CreateScene, Scene, UpdateScene};

const COLUMNS: &str = "id, campaign_id, name, description, sort_order, created_at, updated_at";

/// Provides CRUD operations for scenes.
pub struct SceneRepo;

impl SceneRepo {
    /// Insert a new scene. An omitted `sort_order` places the scene after
    /// the campaign's current last scene.
    pub async fn create(
        pool: &PgPool,
        campaign_id: DbId,
        input: &CreateScene,
    ) -> Result<Scene, sqlx::Error> {
        let query = format!(
            "INSERT INTO scenes (campaign_id, name, description, sort_order)
             VALUES ($1, $2, $3, COALESCE($4,
                 (SELECT COALESCE(MAX(sort_order), 0) + 1 FROM scenes WHERE campaign_id = $1)))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(campaign_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.sort_order)
            .fetch_one(pool)
            .await
    }

    /// Find a scene by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Scene>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM scenes WHERE id = $1");
        sqlx::query_as::<_, Scene>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a campaign's scenes ordered by the explicit sort field, id as
    /// tie-break.
    pub async fn list_by_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<Scene>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM scenes
             WHERE campaign_id = $1
             ORDER BY sort_order ASC, id ASC"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }

    /// Update a scene. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateScene,
    ) -> Result<Option<Scene>, sqlx::Error> {
        let query = format!(
            "UPDATE scenes SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                sort_order = COALESCE($4, sort_order),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Scene>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.sort_order)
            .fetch_optional(pool)
            .await
    }

    /// Delete a scene by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM scenes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
