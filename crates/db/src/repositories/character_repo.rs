//! Repository for the `characters` table.

use loretable_core::types::DbId;
use sqlx::PgPool;

use crate::models::character::{Character, CreateCharacter, UpdateCharacter};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, class, race, level, \
     strength, dexterity, constitution, intelligence, wisdom, charisma, \
     max_hit_points, current_hit_points, armor_class, speed, proficiencies, \
     backstory, appearance, created_at, updated_at";

/// Provides CRUD operations for character sheets.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character for `user_id`, returning the created row.
    /// Omitted numeric fields fall back to the column defaults.
    pub async fn create(
        pool: &PgPool,
        user_id: DbId,
        input: &CreateCharacter,
    ) -> Result<Character, sqlx::Error> {
        let query = format!(
            "INSERT INTO characters
                (user_id, name, class, race, level,
                 strength, dexterity, constitution, intelligence, wisdom, charisma,
                 max_hit_points, current_hit_points, armor_class, speed,
                 proficiencies, backstory, appearance)
             VALUES ($1, $2, $3, $4, COALESCE($5, 1),
                 COALESCE($6, 10), COALESCE($7, 10), COALESCE($8, 10),
                 COALESCE($9, 10), COALESCE($10, 10), COALESCE($11, 10),
                 COALESCE($12, 10), COALESCE($13, 10), COALESCE($14, 10), COALESCE($15, 30),
                 COALESCE($16, '{{}}'::text[]), $17, $18)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.class)
            .bind(&input.race)
            .bind(input.level)
            .bind(input.strength)
            .bind(input.dexterity)
            .bind(input.constitution)
            .bind(input.intelligence)
            .bind(input.wisdom)
            .bind(input.charisma)
            .bind(input.max_hit_points)
            .bind(input.current_hit_points)
            .bind(input.armor_class)
            .bind(input.speed)
            .bind(&input.proficiencies)
            .bind(&input.backstory)
            .bind(&input.appearance)
            .fetch_one(pool)
            .await
    }

    /// Find a character by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all characters owned by a user, ordered by name ascending.
    pub async fn list_by_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Character>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM characters WHERE user_id = $1 ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update a character. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCharacter,
    ) -> Result<Option<Character>, sqlx::Error> {
        let query = format!(
            "UPDATE characters SET
                name = COALESCE($2, name),
                class = COALESCE($3, class),
                race = COALESCE($4, race),
                level = COALESCE($5, level),
                strength = COALESCE($6, strength),
                dexterity = COALESCE($7, dexterity),
                constitution = COALESCE($8, constitution),
                intelligence = COALESCE($9, intelligence),
                wisdom = COALESCE($10, wisdom),
                charisma = COALESCE($11, charisma),
                max_hit_points = COALESCE($12, max_hit_points),
                current_hit_points = COALESCE($13, current_hit_points),
                armor_class = COALESCE($14, armor_class),
                speed = COALESCE($15, speed),
                proficiencies = COALESCE($16, proficiencies),
                backstory = COALESCE($17, backstory),
                appearance = COALESCE($18, appearance),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.class)
            .bind(&input.race)
            .bind(input.level)
            .bind(input.strength)
            .bind(input.dexterity)
            .bind(input.constitution)
            .bind(input.intelligence)
            .bind(input.wisdom)
            .bind(input.charisma)
            .bind(input.max_hit_points)
            .bind(input.current_hit_points)
            .bind(input.armor_class)
            .bind(input.speed)
            .bind(&input.proficiencies)
            .bind(&input.backstory)
            .bind(&input.appearance)
            .fetch_optional(pool)
            .await
    }

    /// Delete a character by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM characters WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
