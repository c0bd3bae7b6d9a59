//! Campaign vocabulary: status and visibility enums.
//!
//! Stored as PostgreSQL enum types (`campaign_status`, `campaign_visibility`)
//! so the database rejects unknown values; the serde names are the wire
//! contract and must not change.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Lifecycle status of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "campaign_status", rename_all = "snake_case")]
pub enum CampaignStatus {
    NotStarted,
    InProgress,
    Paused,
    Completed,
    Archived,
}

impl CampaignStatus {
    /// Parse a wire-format status string, rejecting anything outside the
    /// enumerated set with [`CoreError::InvalidStatus`].
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "not_started" => Ok(Self::NotStarted),
            "in_progress" => Ok(Self::InProgress),
            "paused" => Ok(Self::Paused),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            other => Err(CoreError::InvalidStatus(other.to_string())),
        }
    }
}

/// Who may discover and join a campaign.
///
/// `private` campaigns are reachable by members only; `invite` campaigns
/// additionally accept invite-code redemption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "snake_case")]
#[sqlx(type_name = "campaign_visibility", rename_all = "snake_case")]
pub enum CampaignVisibility {
    Private,
    Invite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_every_enumerated_status() {
        assert_eq!(
            CampaignStatus::parse("not_started").unwrap(),
            CampaignStatus::NotStarted
        );
        assert_eq!(
            CampaignStatus::parse("in_progress").unwrap(),
            CampaignStatus::InProgress
        );
        assert_eq!(CampaignStatus::parse("paused").unwrap(), CampaignStatus::Paused);
        assert_eq!(
            CampaignStatus::parse("completed").unwrap(),
            CampaignStatus::Completed
        );
        assert_eq!(
            CampaignStatus::parse("archived").unwrap(),
            CampaignStatus::Archived
        );
    }

    #[test]
    fn parse_rejects_unknown_status() {
        let err = CampaignStatus::parse("invalid_value").unwrap_err();
        assert!(matches!(err, CoreError::InvalidStatus(v) if v == "invalid_value"));
    }

    #[test]
    fn status_serializes_snake_case() {
        let json = serde_json::to_string(&CampaignStatus::NotStarted).unwrap();
        assert_eq!(json, "\"not_started\"");
    }
}
