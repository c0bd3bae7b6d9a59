//! Repository for the `campaign_characters` link table.

use loretable_core::types::DbId;
use sqlx::PgPool;

use crate::models::campaign_character::{AttachedCharacter, CampaignCharacter};

const COLUMNS: &str = "id, campaign_id, character_id, added_by, created_at";

/// Provides campaign-character link access. Link uniqueness is enforced by
/// `uq_campaign_characters_campaign_character`.
pub struct CampaignCharacterRepo;

impl CampaignCharacterRepo {
    /// Insert a link row. A duplicate surfaces as a 23505 on the uniqueness
    /// constraint for the caller to classify -- there is no pre-check here,
    /// so a race between two identical requests has exactly one winner.
    pub async fn insert(
        pool: &PgPool,
        campaign_id: DbId,
        character_id: DbId,
        added_by: DbId,
    ) -> Result<CampaignCharacter, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_characters (campaign_id, character_id, added_by)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignCharacter>(&query)
            .bind(campaign_id)
            .bind(character_id)
            .bind(added_by)
            .fetch_one(pool)
            .await
    }

    /// Whether a link already exists for the pair.
    pub async fn exists(
        pool: &PgPool,
        campaign_id: DbId,
        character_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let found: Option<(DbId,)> = sqlx::query_as(
            "SELECT id FROM campaign_characters WHERE campaign_id = $1 AND character_id = $2",
        )
        .bind(campaign_id)
        .bind(character_id)
        .fetch_optional(pool)
        .await?;
        Ok(found.is_some())
    }

    /// Remove a link. Returns `true` if a row was removed.
    pub async fn delete(
        pool: &PgPool,
        campaign_id: DbId,
        character_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM campaign_characters WHERE campaign_id = $1 AND character_id = $2",
        )
        .bind(campaign_id)
        .bind(character_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// List a campaign's attached characters annotated with their owners'
    /// usernames, in attachment order.
    pub async fn list_attached(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<AttachedCharacter>, sqlx::Error> {
        sqlx::query_as::<_, AttachedCharacter>(
            "SELECT ch.id AS character_id, ch.name, ch.class, ch.race, ch.level,
                    u.id AS owner_id, u.username AS owner_username
             FROM campaign_characters cc
             JOIN characters ch ON ch.id = cc.character_id
             JOIN users u ON u.id = ch.user_id
             WHERE cc.campaign_id = $1
             ORDER BY cc.id ASC",
        )
        .bind(campaign_id)
        .fetch_all(pool)
        .await
    }
}
