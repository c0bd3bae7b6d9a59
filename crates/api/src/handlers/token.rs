//! Handlers for map tokens.
//!
//! Token reads are filtered by the caller's role: `gm`-layer tokens are
//! stripped for viewers here just as in the aggregate view.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use loretable_core::error::CoreError;
use loretable_core::membership::CampaignRole;
use loretable_core::token::layer_visible_to;
use loretable_core::types::DbId;
use loretable_db::models::map::Map;
use loretable_db::models::token::{CreateToken, MapToken, UpdateToken};
use loretable_db::repositories::{MapRepo, SceneRepo, TokenRepo};

use crate::engine::membership;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Fetch a map and require `min_role` on its campaign (via the owning
/// scene). Returns the map and the caller's role.
async fn find_map_gated(
    state: &AppState,
    user_id: DbId,
    map_id: DbId,
    min_role: CampaignRole,
) -> AppResult<(Map, CampaignRole)> {
    let map = MapRepo::find_by_id(&state.pool, map_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Map",
            id: map_id,
        }))?;
    let scene = SceneRepo::find_by_id(&state.pool, map.scene_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Scene",
            id: map.scene_id,
        }))?;
    let membership =
        membership::require_member(&state.pool, scene.campaign_id, user_id, min_role).await?;
    Ok((map, membership.role))
}

/// Fetch a token and require `min_role` on its campaign.
async fn find_token_gated(
    state: &AppState,
    user_id: DbId,
    token_id: DbId,
    min_role: CampaignRole,
) -> AppResult<MapToken> {
    let token = TokenRepo::find_by_id(&state.pool, token_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Token",
            id: token_id,
        }))?;
    find_map_gated(state, user_id, token.map_id, min_role).await?;
    Ok(token)
}

/// POST /api/v1/maps/{id}/tokens
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(map_id): Path<DbId>,
    Json(input): Json<CreateToken>,
) -> AppResult<(StatusCode, Json<MapToken>)> {
    find_map_gated(&state, auth_user.user_id, map_id, CampaignRole::Editor).await?;
    let token = TokenRepo::create(&state.pool, map_id, &input).await?;
    Ok((StatusCode::CREATED, Json(token)))
}

/// GET /api/v1/maps/{id}/tokens
///
/// Members of any role, with `gm`-layer tokens stripped for viewers.
pub async fn list_by_map(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(map_id): Path<DbId>,
) -> AppResult<Json<Vec<MapToken>>> {
    let (_, role) =
        find_map_gated(&state, auth_user.user_id, map_id, CampaignRole::Viewer).await?;
    let tokens = TokenRepo::list_by_map(&state.pool, map_id).await?;
    let visible = tokens
        .into_iter()
        .filter(|t| layer_visible_to(t.layer, role))
        .collect();
    Ok(Json(visible))
}

/// PUT /api/v1/tokens/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateToken>,
) -> AppResult<Json<MapToken>> {
    find_token_gated(&state, auth_user.user_id, id, CampaignRole::Editor).await?;
    let token = TokenRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Token", id }))?;
    Ok(Json(token))
}

/// DELETE /api/v1/tokens/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_token_gated(&state, auth_user.user_id, id, CampaignRole::Editor).await?;
    TokenRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
