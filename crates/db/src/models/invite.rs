//! Campaign invite model.

use loretable_core::invite::{InviteState, InviteStatus};
use loretable_core::membership::CampaignRole;
use loretable_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An invite row from the `campaign_invites` table.
///
/// The stored status is only `active`/`revoked`; redemption is terminal and
/// signaled by `redeemed_at` (see [`CampaignInvite::state`]).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampaignInvite {
    pub id: DbId,
    pub campaign_id: DbId,
    pub code: String,
    pub created_by: DbId,
    pub role_default: CampaignRole,
    pub status: InviteStatus,
    pub expires_at: Timestamp,
    pub redeemed_by: Option<DbId>,
    pub redeemed_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl CampaignInvite {
    /// Effective state of this invite.
    pub fn state(&self) -> InviteState {
        InviteState::derive(self.status, self.redeemed_at)
    }
}
