//! Handlers for the `/campaigns` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use loretable_core::membership::CampaignRole;
use loretable_core::types::DbId;
use loretable_db::models::campaign::{Campaign, CreateCampaign, UpdateCampaign};
use loretable_db::models::campaign_character::CampaignCharacter;
use loretable_db::repositories::CampaignRepo;
use serde::Deserialize;

use crate::engine::{aggregate, membership};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /campaigns/{id}/status`.
///
/// The status arrives as a raw string so values outside the enumerated set
/// fail with `INVALID_STATUS` instead of a generic decode rejection.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Request body for `PUT /campaigns/{id}/active-scene`.
#[derive(Debug, Deserialize)]
pub struct SetActiveSceneRequest {
    pub scene_id: DbId,
}

/// Request body for `POST /campaigns/{id}/characters`.
#[derive(Debug, Deserialize)]
pub struct AttachCharacterRequest {
    pub character_id: DbId,
}

/// POST /api/v1/campaigns
///
/// The authenticated user becomes the owner, with an `accepted` `owner`
/// membership created atomically with the campaign.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateCampaign>,
) -> AppResult<(StatusCode, Json<Campaign>)> {
    let campaign =
        membership::create_campaign_with_owner(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(campaign)))
}

/// GET /api/v1/campaigns
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<Campaign>>> {
    let campaigns = aggregate::campaigns_for_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(campaigns))
}

/// GET /api/v1/campaigns/{id}
///
/// The full aggregate view, role-filtered by the engine.
pub async fn detail(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<aggregate::CampaignDetail>> {
    let detail = aggregate::campaign_detail(&state.pool, id, auth_user.user_id).await?;
    Ok(Json(detail))
}

/// PUT /api/v1/campaigns/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCampaign>,
) -> AppResult<Json<Campaign>> {
    membership::require_member(&state.pool, id, auth_user.user_id, CampaignRole::Editor).await?;
    let campaign = CampaignRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(loretable_core::error::CoreError::NotFound {
            entity: "Campaign",
            id,
        }))?;
    Ok(Json(campaign))
}

/// PUT /api/v1/campaigns/{id}/status
pub async fn update_status(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStatusRequest>,
) -> AppResult<Json<Campaign>> {
    let campaign =
        membership::update_campaign_status(&state.pool, id, auth_user.user_id, &input.status)
            .await?;
    Ok(Json(campaign))
}

/// PUT /api/v1/campaigns/{id}/active-scene
pub async fn set_active_scene(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<SetActiveSceneRequest>,
) -> AppResult<Json<Campaign>> {
    let campaign =
        aggregate::set_active_scene(&state.pool, id, auth_user.user_id, input.scene_id).await?;
    Ok(Json(campaign))
}

/// POST /api/v1/campaigns/{id}/characters
pub async fn attach_character(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AttachCharacterRequest>,
) -> AppResult<(StatusCode, Json<CampaignCharacter>)> {
    let link = membership::add_character_to_campaign(
        &state.pool,
        id,
        auth_user.user_id,
        input.character_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(link)))
}

/// DELETE /api/v1/campaigns/{id}/characters/{character_id}
pub async fn detach_character(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, character_id)): Path<(DbId, DbId)>,
) -> AppResult<StatusCode> {
    membership::remove_character_from_campaign(&state.pool, id, auth_user.user_id, character_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
