//! Repository for the `campaigns` table.

use loretable_core::campaign::CampaignStatus;
use loretable_core::types::DbId;
use sqlx::PgPool;

use crate::models::campaign::{Campaign, CreateCampaign, UpdateCampaign};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, owner_id, name, description, visibility, status, \
                       active_scene_id, created_at, updated_at";

/// Provides CRUD operations for campaigns, including the atomic
/// campaign-plus-owner-membership creation.
pub struct CampaignRepo;

impl CampaignRepo {
    /// Insert a campaign and its owner's `accepted` `owner` membership in
    /// one transaction. Both rows commit or neither does; a campaign
    /// without an owner membership is never observable.
    pub async fn create_with_owner(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateCampaign,
    ) -> Result<Campaign, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert_query = format!(
            "INSERT INTO campaigns (owner_id, name, description, visibility)
             VALUES ($1, $2, $3, COALESCE($4, 'private'::campaign_visibility))
             RETURNING {COLUMNS}"
        );
        let campaign = sqlx::query_as::<_, Campaign>(&insert_query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.visibility)
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO campaign_members (campaign_id, user_id, role, status)
             VALUES ($1, $2, 'owner', 'accepted')",
        )
        .bind(campaign.id)
        .bind(owner_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(campaign)
    }

    /// Find a campaign by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaigns WHERE id = $1");
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all campaigns where the user holds an `accepted` membership,
    /// most recently updated first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Campaign>, sqlx::Error> {
        let query = format!(
            "SELECT c.{} FROM campaigns c
             JOIN campaign_members m ON m.campaign_id = c.id
             WHERE m.user_id = $1 AND m.status = 'accepted'
             ORDER BY c.updated_at DESC",
            COLUMNS.replace(", ", ", c.")
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update campaign attributes. Only non-`None` fields are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCampaign,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                visibility = COALESCE($4, visibility),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.visibility)
            .fetch_optional(pool)
            .await
    }

    /// Set the campaign status.
    pub async fn update_status(
        pool: &PgPool,
        id: DbId,
        status: CampaignStatus,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Set the active scene reference.
    pub async fn set_active_scene(
        pool: &PgPool,
        id: DbId,
        scene_id: DbId,
    ) -> Result<Option<Campaign>, sqlx::Error> {
        let query = format!(
            "UPDATE campaigns SET active_scene_id = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Campaign>(&query)
            .bind(id)
            .bind(scene_id)
            .fetch_optional(pool)
            .await
    }
}
