//! Campaign-character link model.

use loretable_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A link row from the `campaign_characters` table. Unique per
/// (campaign, character), enforced by
/// `uq_campaign_characters_campaign_character`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CampaignCharacter {
    pub id: DbId,
    pub campaign_id: DbId,
    pub character_id: DbId,
    pub added_by: DbId,
    pub created_at: Timestamp,
}

/// An attached character annotated with its owner's username, for the
/// campaign detail view.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AttachedCharacter {
    pub character_id: DbId,
    pub name: String,
    pub class: String,
    pub race: String,
    pub level: i16,
    pub owner_id: DbId,
    pub owner_username: String,
}
