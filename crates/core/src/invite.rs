//! Invite lifecycle vocabulary and pure redemption rules.
//!
//! Stored status is only `active` or `revoked`; a redeemed invite is
//! signaled by a non-null `redeemed_at` and is terminal. [`InviteState`]
//! folds both into the effective three-state machine:
//!
//! ```text
//! active --(redeem, not expired)--> redeemed (terminal)
//! active --(revoke)-------------->  revoked  (terminal)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::membership::CampaignRole;
use crate::types::Timestamp;

/// Default invite lifetime when the issuer does not specify one.
pub const DEFAULT_INVITE_TTL_DAYS: i64 = 7;

/// Length of generated invite codes (alphanumeric).
pub const INVITE_CODE_LEN: usize = 16;

/// Stored invite status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "invite_status", rename_all = "snake_case")]
pub enum InviteStatus {
    Active,
    Revoked,
}

/// Effective invite state, derived from stored status plus `redeemed_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InviteState {
    Active,
    Revoked,
    Redeemed,
}

impl InviteState {
    /// Fold the stored columns into the effective state. A set
    /// `redeemed_at` wins over the stored status.
    pub fn derive(status: InviteStatus, redeemed_at: Option<Timestamp>) -> Self {
        if redeemed_at.is_some() {
            return Self::Redeemed;
        }
        match status {
            InviteStatus::Active => Self::Active,
            InviteStatus::Revoked => Self::Revoked,
        }
    }
}

/// Decide whether an invite may be redeemed at `now`.
///
/// Check order is part of the contract: terminal state first (redeemed,
/// then revoked), expiry second. The already-a-member check needs storage
/// and lives in the invite engine.
pub fn check_redeemable(
    status: InviteStatus,
    redeemed_at: Option<Timestamp>,
    expires_at: Timestamp,
    now: Timestamp,
) -> Result<(), CoreError> {
    match InviteState::derive(status, redeemed_at) {
        InviteState::Redeemed => return Err(CoreError::InviteRedeemed),
        InviteState::Revoked => return Err(CoreError::InviteRevoked),
        InviteState::Active => {}
    }
    if expires_at <= now {
        return Err(CoreError::InviteExpired);
    }
    Ok(())
}

/// An invite can grant `viewer` or `editor`, never ownership.
pub fn validate_granted_role(role: CampaignRole) -> Result<(), CoreError> {
    if role == CampaignRole::Owner {
        return Err(CoreError::Validation(
            "an invite cannot grant the owner role".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn derive_prefers_redeemed_over_stored_status() {
        let now = Utc::now();
        assert_eq!(
            InviteState::derive(InviteStatus::Active, Some(now)),
            InviteState::Redeemed
        );
        assert_eq!(
            InviteState::derive(InviteStatus::Revoked, Some(now)),
            InviteState::Redeemed
        );
        assert_eq!(
            InviteState::derive(InviteStatus::Active, None),
            InviteState::Active
        );
        assert_eq!(
            InviteState::derive(InviteStatus::Revoked, None),
            InviteState::Revoked
        );
    }

    #[test]
    fn redeemed_is_checked_before_expiry() {
        let now = Utc::now();
        // Redeemed AND expired: the redeemed failure wins.
        let err = check_redeemable(
            InviteStatus::Active,
            Some(now - Duration::days(10)),
            now - Duration::days(3),
            now,
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::InviteRedeemed));
    }

    #[test]
    fn expired_active_invite_fails_with_expired() {
        let now = Utc::now();
        let err =
            check_redeemable(InviteStatus::Active, None, now - Duration::seconds(1), now)
                .unwrap_err();
        assert!(matches!(err, CoreError::InviteExpired));
    }

    #[test]
    fn revoked_invite_fails_with_revoked() {
        let now = Utc::now();
        let err = check_redeemable(InviteStatus::Revoked, None, now + Duration::days(1), now)
            .unwrap_err();
        assert!(matches!(err, CoreError::InviteRevoked));
    }

    #[test]
    fn active_unexpired_invite_is_redeemable() {
        let now = Utc::now();
        assert!(check_redeemable(InviteStatus::Active, None, now + Duration::days(7), now).is_ok());
    }

    #[test]
    fn invites_never_grant_ownership() {
        assert!(validate_granted_role(CampaignRole::Viewer).is_ok());
        assert!(validate_granted_role(CampaignRole::Editor).is_ok());
        assert!(validate_granted_role(CampaignRole::Owner).is_err());
    }
}
