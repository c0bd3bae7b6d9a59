//! Repository for the `notes` table, including full-text search.

use loretable_core::types::DbId;
use sqlx::PgPool;

use crate::models::note::Note;

const COLUMNS: &str = "id, user_id, title, body, entity_type, entity_id, created_at, updated_at";

/// Provides CRUD and search operations for per-user notes.
pub struct NoteRepo;

impl NoteRepo {
    /// Insert a new note, returning the created row. The scope columns must
    /// already be a valid pair (both set or both null).
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        title: &str,
        body: &str,
        entity_type: Option<&str>,
        entity_id: Option<DbId>,
    ) -> Result<Note, sqlx::Error> {
        let query = format!(
            "INSERT INTO notes (user_id, title, body, entity_type, entity_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .bind(title)
            .bind(body)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_one(pool)
            .await
    }

    /// Find a note by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Note>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM notes WHERE id = $1");
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all notes owned by a user, most recently updated first.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes WHERE user_id = $1 ORDER BY updated_at DESC, id DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Full-text search over a user's notes, best match first.
    ///
    /// Uses the same expression as the GIN index so the planner can use it.
    pub async fn search(
        pool: &PgPool,
        user_id: DbId,
        query_text: &str,
    ) -> Result<Vec<Note>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM notes
             WHERE user_id = $1
               AND to_tsvector('english', title || ' ' || body)
                   @@ websearch_to_tsquery('english', $2)
             ORDER BY ts_rank(to_tsvector('english', title || ' ' || body),
                              websearch_to_tsquery('english', $2)) DESC,
                      id DESC"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(user_id)
            .bind(query_text)
            .fetch_all(pool)
            .await
    }

    /// Update a note. Title/body use COALESCE partial-update semantics; the
    /// scope pair is always written (passing the current pair keeps it).
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        title: Option<&str>,
        body: Option<&str>,
        entity_type: Option<&str>,
        entity_id: Option<DbId>,
    ) -> Result<Option<Note>, sqlx::Error> {
        let query = format!(
            "UPDATE notes SET
                title = COALESCE($2, title),
                body = COALESCE($3, body),
                entity_type = $4,
                entity_id = $5,
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Note>(&query)
            .bind(id)
            .bind(title)
            .bind(body)
            .bind(entity_type)
            .bind(entity_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a note by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM notes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
