//! Campaign aggregate service.
//!
//! Assembles the role-filtered campaign detail view: campaign, members,
//! attached characters, scenes with their maps and tokens, handouts.
//! GM-layer token filtering happens here, not in the presentation layer --
//! leaking GM-only token data is a confidentiality violation, not a UI
//! preference.

use std::collections::HashMap;

use loretable_core::error::CoreError;
use loretable_core::membership::CampaignRole;
use loretable_core::token::layer_visible_to;
use loretable_core::types::DbId;
use loretable_db::models::campaign::Campaign;
use loretable_db::models::campaign_character::AttachedCharacter;
use loretable_db::models::handout::Handout;
use loretable_db::models::map::Map;
use loretable_db::models::membership::MemberWithUser;
use loretable_db::models::scene::Scene;
use loretable_db::models::token::MapToken;
use loretable_db::repositories::{
    CampaignCharacterRepo, CampaignRepo, HandoutRepo, MapRepo, MembershipRepo, SceneRepo,
    TokenRepo,
};
use loretable_db::DbPool;
use serde::Serialize;

use crate::engine::membership::require_member;
use crate::error::{AppError, AppResult};

/// A map with its visible tokens.
#[derive(Debug, Serialize)]
pub struct MapDetail {
    pub map: Map,
    pub tokens: Vec<MapToken>,
}

/// A scene with its map (at most one in v1).
#[derive(Debug, Serialize)]
pub struct SceneDetail {
    pub scene: Scene,
    pub map: Option<MapDetail>,
}

/// The composed, role-filtered campaign view returned to a client.
#[derive(Debug, Serialize)]
pub struct CampaignDetail {
    pub campaign: Campaign,
    /// The caller's own role, so the client can gate its UI.
    pub role: CampaignRole,
    pub members: Vec<MemberWithUser>,
    pub characters: Vec<AttachedCharacter>,
    pub scenes: Vec<SceneDetail>,
    pub handouts: Vec<Handout>,
}

/// All campaigns where the user holds an `accepted` membership, most
/// recently updated first.
pub async fn campaigns_for_user(pool: &DbPool, user_id: DbId) -> AppResult<Vec<Campaign>> {
    Ok(CampaignRepo::list_for_user(pool, user_id).await?)
}

/// Assemble the campaign detail view for a member of any role.
///
/// Scenes come back in their explicit order (id as tie-break); maps and
/// tokens in insertion order. Tokens on the `gm` layer are stripped for
/// `viewer` callers.
pub async fn campaign_detail(
    pool: &DbPool,
    campaign_id: DbId,
    requesting_user_id: DbId,
) -> AppResult<CampaignDetail> {
    let campaign = CampaignRepo::find_by_id(pool, campaign_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;

    let membership =
        require_member(pool, campaign_id, requesting_user_id, CampaignRole::Viewer).await?;
    let role = membership.role;

    let members = MembershipRepo::list_with_users(pool, campaign_id).await?;
    let characters = CampaignCharacterRepo::list_attached(pool, campaign_id).await?;
    let handouts = HandoutRepo::list_by_campaign(pool, campaign_id).await?;
    let scenes = SceneRepo::list_by_campaign(pool, campaign_id).await?;

    let scene_ids: Vec<DbId> = scenes.iter().map(|s| s.id).collect();
    let maps = MapRepo::list_by_scenes(pool, &scene_ids).await?;
    let map_ids: Vec<DbId> = maps.iter().map(|m| m.id).collect();
    let tokens = TokenRepo::list_by_maps(pool, &map_ids).await?;

    // Group visible tokens under their maps, then maps under their scenes.
    let mut tokens_by_map: HashMap<DbId, Vec<MapToken>> = HashMap::new();
    for token in tokens {
        if layer_visible_to(token.layer, role) {
            tokens_by_map.entry(token.map_id).or_default().push(token);
        }
    }

    let mut map_by_scene: HashMap<DbId, MapDetail> = maps
        .into_iter()
        .map(|map| {
            let tokens = tokens_by_map.remove(&map.id).unwrap_or_default();
            (map.scene_id, MapDetail { map, tokens })
        })
        .collect();

    let scenes = scenes
        .into_iter()
        .map(|scene| {
            let map = map_by_scene.remove(&scene.id);
            SceneDetail { scene, map }
        })
        .collect();

    Ok(CampaignDetail {
        campaign,
        role,
        members,
        characters,
        scenes,
        handouts,
    })
}

/// Point the campaign's active-scene reference at one of its scenes
/// (editor+). The scene must belong to the campaign.
pub async fn set_active_scene(
    pool: &DbPool,
    campaign_id: DbId,
    requesting_user_id: DbId,
    scene_id: DbId,
) -> AppResult<Campaign> {
    require_member(pool, campaign_id, requesting_user_id, CampaignRole::Editor).await?;

    let scene = SceneRepo::find_by_id(pool, scene_id)
        .await?
        .filter(|s| s.campaign_id == campaign_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scene",
            id: scene_id,
        }))?;

    let campaign = CampaignRepo::set_active_scene(pool, campaign_id, scene.id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;
    tracing::info!(campaign_id, scene_id, "Active scene set");
    Ok(campaign)
}
