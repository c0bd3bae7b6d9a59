//! Repository for the `campaign_members` table.

use loretable_core::membership::CampaignRole;
use loretable_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::membership::{MemberWithUser, Membership};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, campaign_id, user_id, role, status, invited_by, created_at, updated_at";

/// Provides membership row access. The uniqueness invariant (one row per
/// campaign x user) is enforced by `uq_campaign_members_campaign_user`.
pub struct MembershipRepo;

impl MembershipRepo {
    /// Find the membership row for a (campaign, user) pair, any status.
    pub async fn find(
        pool: &PgPool,
        campaign_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM campaign_members WHERE campaign_id = $1 AND user_id = $2");
        sqlx::query_as::<_, Membership>(&query)
            .bind(campaign_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Find the membership row for a (campaign, user) pair inside the
    /// caller's transaction (invite redemption's already-a-member check).
    pub async fn find_in_tx(
        tx: &mut Transaction<'_, Postgres>,
        campaign_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM campaign_members WHERE campaign_id = $1 AND user_id = $2");
        sqlx::query_as::<_, Membership>(&query)
            .bind(campaign_id)
            .bind(user_id)
            .fetch_optional(&mut **tx)
            .await
    }

    /// List a campaign's members annotated with usernames, owner first,
    /// then by join time.
    pub async fn list_with_users(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<MemberWithUser>, sqlx::Error> {
        sqlx::query_as::<_, MemberWithUser>(
            "SELECT m.user_id, u.username, m.role, m.status, m.invited_by, m.created_at
             FROM campaign_members m
             JOIN users u ON u.id = m.user_id
             WHERE m.campaign_id = $1
             ORDER BY m.role DESC, m.created_at ASC, m.id ASC",
        )
        .bind(campaign_id)
        .fetch_all(pool)
        .await
    }

    /// Change a member's role. Returns `None` if no row exists.
    pub async fn update_role(
        pool: &PgPool,
        campaign_id: DbId,
        user_id: DbId,
        role: CampaignRole,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query = format!(
            "UPDATE campaign_members SET role = $3, updated_at = NOW()
             WHERE campaign_id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(campaign_id)
            .bind(user_id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }

    /// Set a member's status to `revoked`. Returns `None` if no row exists.
    pub async fn revoke(
        pool: &PgPool,
        campaign_id: DbId,
        user_id: DbId,
    ) -> Result<Option<Membership>, sqlx::Error> {
        let query = format!(
            "UPDATE campaign_members SET status = 'revoked', updated_at = NOW()
             WHERE campaign_id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(campaign_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Create or update the membership row to `accepted` with the given
    /// role, inside the caller's transaction (invite redemption).
    ///
    /// Earlier `invited_by` attribution is preserved; the new inviter is
    /// recorded only when none was set before. Relies on the uniqueness
    /// constraint as the upsert target, so a concurrent insert on the same
    /// pair cannot produce two rows.
    pub async fn upsert_accepted(
        tx: &mut Transaction<'_, Postgres>,
        campaign_id: DbId,
        user_id: DbId,
        role: CampaignRole,
        invited_by: DbId,
    ) -> Result<Membership, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_members (campaign_id, user_id, role, status, invited_by)
             VALUES ($1, $2, $3, 'accepted', $4)
             ON CONFLICT ON CONSTRAINT uq_campaign_members_campaign_user DO UPDATE SET
                role = EXCLUDED.role,
                status = 'accepted',
                invited_by = COALESCE(campaign_members.invited_by, EXCLUDED.invited_by),
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Membership>(&query)
            .bind(campaign_id)
            .bind(user_id)
            .bind(role)
            .bind(invited_by)
            .fetch_one(&mut **tx)
            .await
    }
}
