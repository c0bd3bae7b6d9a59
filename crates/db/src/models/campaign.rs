//! Campaign entity model and DTOs.

use loretable_core::campaign::{CampaignStatus, CampaignVisibility};
use loretable_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A campaign row from the `campaigns` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Campaign {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub description: String,
    pub visibility: CampaignVisibility,
    pub status: CampaignStatus,
    /// Weak reference to the currently active scene, if any.
    pub active_scene_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new campaign.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCampaign {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Defaults to `private` if omitted.
    pub visibility: Option<CampaignVisibility>,
}

/// DTO for updating campaign attributes. All fields are optional; status has
/// its own operation with its own permission rules.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCampaign {
    pub name: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<CampaignVisibility>,
}
