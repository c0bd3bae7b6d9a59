//! Handlers for scenes and their maps.
//!
//! Scenes are nested under campaigns for creation/listing; scene-scoped
//! operations resolve the owning campaign first and gate on its membership.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use loretable_core::error::CoreError;
use loretable_core::membership::CampaignRole;
use loretable_core::types::DbId;
use loretable_db::models::map::{Map, UpsertMap};
use loretable_db::models::scene::{CreateScene, Scene, UpdateScene};
use loretable_db::repositories::{MapRepo, SceneRepo};

use crate::engine::membership;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Fetch a scene and require `min_role` on its campaign.
async fn find_gated(
    state: &AppState,
    user_id: DbId,
    scene_id: DbId,
    min_role: CampaignRole,
) -> AppResult<Scene> {
    let scene = SceneRepo::find_by_id(&state.pool, scene_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scene",
            id: scene_id,
        }))?;
    membership::require_member(&state.pool, scene.campaign_id, user_id, min_role).await?;
    Ok(scene)
}

/// POST /api/v1/campaigns/{id}/scenes
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(campaign_id): Path<DbId>,
    Json(input): Json<CreateScene>,
) -> AppResult<(StatusCode, Json<Scene>)> {
    membership::require_member(
        &state.pool,
        campaign_id,
        auth_user.user_id,
        CampaignRole::Editor,
    )
    .await?;
    let scene = SceneRepo::create(&state.pool, campaign_id, &input).await?;
    Ok((StatusCode::CREATED, Json(scene)))
}

/// GET /api/v1/campaigns/{id}/scenes
pub async fn list_by_campaign(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(campaign_id): Path<DbId>,
) -> AppResult<Json<Vec<Scene>>> {
    membership::require_member(
        &state.pool,
        campaign_id,
        auth_user.user_id,
        CampaignRole::Viewer,
    )
    .await?;
    let scenes = SceneRepo::list_by_campaign(&state.pool, campaign_id).await?;
    Ok(Json(scenes))
}

/// PUT /api/v1/scenes/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateScene>,
) -> AppResult<Json<Scene>> {
    find_gated(&state, auth_user.user_id, id, CampaignRole::Editor).await?;
    let scene = SceneRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Scene", id }))?;
    Ok(Json(scene))
}

/// DELETE /api/v1/scenes/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_gated(&state, auth_user.user_id, id, CampaignRole::Editor).await?;
    SceneRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/v1/scenes/{id}/map
///
/// Create or replace the scene's single map (v1: at most one per scene).
pub async fn upsert_map(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpsertMap>,
) -> AppResult<Json<Map>> {
    find_gated(&state, auth_user.user_id, id, CampaignRole::Editor).await?;
    let map = MapRepo::upsert_for_scene(&state.pool, id, &input).await?;
    Ok(Json(map))
}
