//! Repository for the `campaign_invites` table.

use loretable_core::membership::CampaignRole;
use loretable_core::types::{DbId, Timestamp};
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::invite::CampaignInvite;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, campaign_id, code, created_by, role_default, status, \
                       expires_at, redeemed_by, redeemed_at, created_at";

/// Provides invite row access. Code uniqueness is enforced by
/// `uq_campaign_invites_code`; the invite engine retries collisions.
pub struct InviteRepo;

impl InviteRepo {
    /// Insert a new invite. A code collision surfaces as a 23505 on
    /// `uq_campaign_invites_code` for the caller to classify.
    pub async fn insert(
        pool: &PgPool,
        campaign_id: DbId,
        code: &str,
        created_by: DbId,
        role_default: CampaignRole,
        expires_at: Timestamp,
    ) -> Result<CampaignInvite, sqlx::Error> {
        let query = format!(
            "INSERT INTO campaign_invites (campaign_id, code, created_by, role_default, expires_at)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignInvite>(&query)
            .bind(campaign_id)
            .bind(code)
            .bind(created_by)
            .bind(role_default)
            .bind(expires_at)
            .fetch_one(pool)
            .await
    }

    /// Find an invite by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<CampaignInvite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaign_invites WHERE id = $1");
        sqlx::query_as::<_, CampaignInvite>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an invite by its code.
    pub async fn find_by_code(
        pool: &PgPool,
        code: &str,
    ) -> Result<Option<CampaignInvite>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM campaign_invites WHERE code = $1");
        sqlx::query_as::<_, CampaignInvite>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// List all invites for a campaign, newest first.
    pub async fn list_by_campaign(
        pool: &PgPool,
        campaign_id: DbId,
    ) -> Result<Vec<CampaignInvite>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM campaign_invites
             WHERE campaign_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, CampaignInvite>(&query)
            .bind(campaign_id)
            .fetch_all(pool)
            .await
    }

    /// Atomically claim an invite for redemption inside the caller's
    /// transaction.
    ///
    /// The guarded UPDATE only matches an invite that is still `active` and
    /// unredeemed, so of two concurrent redeemers of the same code exactly
    /// one gets the row back; the other sees `None` and classifies the
    /// terminal state from a re-read.
    pub async fn claim(
        tx: &mut Transaction<'_, Postgres>,
        code: &str,
        redeemed_by: DbId,
    ) -> Result<Option<CampaignInvite>, sqlx::Error> {
        let query = format!(
            "UPDATE campaign_invites
             SET redeemed_by = $2, redeemed_at = NOW()
             WHERE code = $1 AND status = 'active' AND redeemed_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignInvite>(&query)
            .bind(code)
            .bind(redeemed_by)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Flip an active, unredeemed invite to `revoked`. Returns `None` when
    /// the invite was already terminal (revoked or redeemed).
    pub async fn revoke(pool: &PgPool, id: DbId) -> Result<Option<CampaignInvite>, sqlx::Error> {
        let query = format!(
            "UPDATE campaign_invites SET status = 'revoked'
             WHERE id = $1 AND status = 'active' AND redeemed_at IS NULL
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CampaignInvite>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }
}
