//! Campaign membership model.

use loretable_core::membership::{CampaignRole, MembershipStatus};
use loretable_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A membership row from the `campaign_members` table.
///
/// At most one row exists per (campaign, user) pair, enforced by
/// `uq_campaign_members_campaign_user`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Membership {
    pub id: DbId,
    pub campaign_id: DbId,
    pub user_id: DbId,
    pub role: CampaignRole,
    pub status: MembershipStatus,
    /// Who invited this member, when admission came through an invite.
    pub invited_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Membership annotated with the member's username, for listings.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MemberWithUser {
    pub user_id: DbId,
    pub username: String,
    pub role: CampaignRole,
    pub status: MembershipStatus,
    pub invited_by: Option<DbId>,
    pub created_at: Timestamp,
}
