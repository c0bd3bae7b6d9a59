//! Repository for the `campaign_handouts` table.

use loretable_core::types::DbId;
use sqlx::PgPool;

use crate::models::handout::{CreateHandout, Handout, UpdateHandout};

const COLUMNS: &str = "id, campaign_id, author_id, title, body, created_at, updated_at";

/// Provides CRUD operations for campaign handouts.
pub struct HandoutRepo;

impl HandoutRepo {
    /// Insert a new handout, returning the created row.
    pub async fn create(
        pool: &PgPool,
        campaign_id: DbId,
        author_id: DbId,
        input: &CreateHandout,
    ) -> Result<Handout, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_handouts (campaign_id, author_id, title, body)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Handout>(&query)
            .bind(campaign_id)
            .bind(author_id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_one(pool)
            .await
    }

    /// Find a handout by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Handout>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaign_handouts WHERE id = $1");
        sqlx::query_as::<_, Handout>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a campaign's handouts, oldest first.
    pub async fn list_by_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<Handout>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaign_handouts
             WHERE campaign_id = $1
             ORDER BY id ASC"
        );
        sqlx::query_as::<_, Handout>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }

    /// Update a handout. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateHandout,
    ) -> Result<Option<Handout>, sqlx::Error> {
        let query = format!(
            "UPDATE campaign_handouts SET
                title = COALESCE($2, title),
                body = COALESCE($3, body),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Handout>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.body)
            .fetch_optional(pool)
            .await
    }

    /// Delete a handout by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM campaign_handouts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
