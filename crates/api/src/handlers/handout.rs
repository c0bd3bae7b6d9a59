//! Handlers for campaign handouts.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use loretable_core::error::CoreError;
use loretable_core::membership::CampaignRole;
use loretable_core::types::DbId;
use loretable_db::models::handout::{CreateHandout, Handout, UpdateHandout};
use loretable_db::repositories::HandoutRepo;

use crate::engine::membership;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Fetch a handout and verify the caller may edit it: the author or the
/// campaign owner.
async fn find_editable(state: &AppState, user_id: DbId, id: DbId) -> AppResult<Handout> {
    let handout = HandoutRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Handout",
            id,
        }))?;

    let membership = membership::require_member(
        &state.pool,
        handout.campaign_id,
        user_id,
        CampaignRole::Viewer,
    )
    .await?;

    if handout.author_id != user_id && membership.role != CampaignRole::Owner {
        return Err(AppError::Core(CoreError::Forbidden(
            "only the author or the campaign owner may edit a handout".into(),
        )));
    }
    Ok(handout)
}

/// POST /api/v1/campaigns/{id}/handouts
///
/// Any accepted member may author a handout.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(campaign_id): Path<DbId>,
    Json(input): Json<CreateHandout>,
) -> AppResult<(StatusCode, Json<Handout>)> {
    membership::require_member(
        &state.pool,
        campaign_id,
        auth_user.user_id,
        CampaignRole::Viewer,
    )
    .await?;
    let handout =
        HandoutRepo::create(&state.pool, campaign_id, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(handout)))
}

/// GET /api/v1/campaigns/{id}/handouts
pub async fn list_by_campaign(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(campaign_id): Path<DbId>,
) -> AppResult<Json<Vec<Handout>>> {
    membership::require_member(
        &state.pool,
        campaign_id,
        auth_user.user_id,
        CampaignRole::Viewer,
    )
    .await?;
    let handouts = HandoutRepo::list_by_campaign(&state.pool, campaign_id).await?;
    Ok(Json(handouts))
}

/// PUT /api/v1/handouts/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateHandout>,
) -> AppResult<Json<Handout>> {
    find_editable(&state, auth_user.user_id, id).await?;
    let handout = HandoutRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Handout",
            id,
        }))?;
    Ok(Json(handout))
}

/// DELETE /api/v1/handouts/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_editable(&state, auth_user.user_id, id).await?;
    HandoutRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
