//! Repository for the `map_tokens` table.

use loretable_core::types::DbId;
use sqlx::PgPool;

use crate::models::token::{CreateToken, MapToken, UpdateToken};

const COLUMNS: &str =
    "id, map_id, character_id, name, x, y, layer, audience, created_at, updated_at";

/// Provides CRUD operations for map tokens.
pub struct TokenRepo;

impl TokenRepo {
    /// Insert a new token on a map, returning the created row.
    pub async fn create(
        pool: &PgPool,
        map_id: DbId,
        input: &CreateToken,
    ) -> Result<MapToken, sqlx::Error> {
        let query = format!(
            "INSERT INTO map_tokens (map_id, character_id, name, x, y, layer, audience)
             VALUES ($1, $2, $3, COALESCE($4, 0), COALESCE($5, 0),
                     COALESCE($6, 'token'::token_layer), COALESCE($7, '{{}}'::text[]))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MapToken>(&query)
            .bind(map_id)
            .bind(input.character_id)
            .bind(&input.name)
            .bind(input.x)
            .bind(input.y)
            .bind(input.layer)
            .bind(&input.audience)
            .fetch_one(pool)
            .await
    }

    /// Find a token by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<MapToken>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM map_tokens WHERE id = $1");
        sqlx::query_as::<_, MapToken>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a map's tokens in insertion order.
    pub async fn list_by_map(pool: &PgPool, map_id: DbId) -> Result<Vec<MapToken>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM map_tokens WHERE map_id = $1 ORDER BY id ASC");
        sqlx::query_as::<_, MapToken>(&query)
            .bind(map_id)
            .fetch_all(pool)
            .await
    }

    /// List the tokens for a set of maps (campaign detail assembly),
    /// insertion order within each map.
    pub async fn list_by_maps(
        pool: &PgPool,
        map_ids: &[DbId],
    ) -> Result<Vec<MapToken>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM map_tokens WHERE map_id = ANY($1) ORDER BY id ASC");
        sqlx::query_as::<_, MapToken>(&query)
            .bind(map_ids)
            .fetch_all(pool)
            .await
    }

    /// Update a token. Only non-`None` fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateToken,
    ) -> Result<Option<MapToken>, sqlx::Error> {
        let query = format!(
            "UPDATE map_tokens SET
                name = COALESCE($2, name),
                x = COALESCE($3, x),
                y = COALESCE($4, y),
                layer = COALESCE($5, layer),
                audience = COALESCE($6, audience),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MapToken>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.x)
            .bind(input.y)
            .bind(input.layer)
            .bind(&input.audience)
            .fetch_optional(pool)
            .await
    }

    /// Delete a token by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM map_tokens WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
