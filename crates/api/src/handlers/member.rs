//! Handlers for campaign members: listing, role changes, revocation.

use axum::extract::{Path, State};
use axum::Json;
use loretable_core::membership::CampaignRole;
use loretable_core::types::DbId;
use loretable_db::models::membership::{MemberWithUser, Membership};
use loretable_db::repositories::MembershipRepo;
use serde::Deserialize;

use crate::engine::membership;
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `PUT /campaigns/{id}/members/{user_id}`.
#[derive(Debug, Deserialize)]
pub struct UpdateMemberRoleRequest {
    pub role: CampaignRole,
}

/// GET /api/v1/campaigns/{id}/members
///
/// Any accepted member may list the roster.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<MemberWithUser>>> {
    membership::require_member(&state.pool, id, auth_user.user_id, CampaignRole::Viewer).await?;
    let members = MembershipRepo::list_with_users(&state.pool, id).await?;
    Ok(Json(members))
}

/// PUT /api/v1/campaigns/{id}/members/{user_id}
///
/// Owner-only role change (e.g. promoting a viewer to editor).
pub async fn update_role(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, user_id)): Path<(DbId, DbId)>,
    Json(input): Json<UpdateMemberRoleRequest>,
) -> AppResult<Json<Membership>> {
    let updated =
        membership::update_member_role(&state.pool, id, auth_user.user_id, user_id, input.role)
            .await?;
    Ok(Json(updated))
}

/// DELETE /api/v1/campaigns/{id}/members/{user_id}
///
/// Owner-only revocation. The membership row stays, flipped to `revoked`.
pub async fn revoke(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((id, user_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<Membership>> {
    let revoked = membership::revoke_member(&state.pool, id, auth_user.user_id, user_id).await?;
    Ok(Json(revoked))
}
