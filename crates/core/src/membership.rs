//! Campaign membership vocabulary: roles and membership status.
//!
//! The role ordering `viewer < editor < owner` is the single permission
//! lattice for the whole system; every "can user U do A on campaign C"
//! question reduces to a `role >= minimum` comparison on an `accepted`
//! membership.

use serde::{Deserialize, Serialize};

/// A member's role within one campaign.
///
/// Variant order defines the permission ordering (derived `Ord`):
/// `Viewer < Editor < Owner`.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, sqlx::Type,
)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "campaign_role", rename_all = "snake_case")]
pub enum CampaignRole {
    Viewer,
    Editor,
    Owner,
}

impl CampaignRole {
    /// Wire-format name, matching the serde/database representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Viewer => "viewer",
            Self::Editor => "editor",
            Self::Owner => "owner",
        }
    }
}

impl std::fmt::Display for CampaignRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle status of a membership row.
///
/// Transitions: `pending -> accepted` (invite redemption), direct `accepted`
/// (owner creation), `accepted -> revoked` (explicit revoke). A revoked
/// member may be re-admitted through a fresh invite (`revoked -> accepted`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "membership_status", rename_all = "snake_case")]
pub enum MembershipStatus {
    Pending,
    Accepted,
    Revoked,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_ordering_is_viewer_editor_owner() {
        assert!(CampaignRole::Viewer < CampaignRole::Editor);
        assert!(CampaignRole::Editor < CampaignRole::Owner);
        assert!(CampaignRole::Owner >= CampaignRole::Editor);
        assert!(CampaignRole::Viewer >= CampaignRole::Viewer);
    }

    #[test]
    fn role_round_trips_through_serde() {
        for role in [CampaignRole::Viewer, CampaignRole::Editor, CampaignRole::Owner] {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{role}\""));
            let back: CampaignRole = serde_json::from_str(&json).unwrap();
            assert_eq!(back, role);
        }
    }

    #[test]
    fn unknown_role_is_rejected_at_the_serde_boundary() {
        let result: Result<CampaignRole, _> = serde_json::from_str("\"superuser\"");
        assert!(result.is_err());
    }
}
