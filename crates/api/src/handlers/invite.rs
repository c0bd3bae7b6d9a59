//! Handlers for campaign invites: issue, list, revoke, redeem.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use loretable_core::membership::CampaignRole;
use loretable_core::types::DbId;
use loretable_db::models::invite::CampaignInvite;
use loretable_db::models::membership::Membership;
use loretable_db::repositories::InviteRepo;
use serde::Deserialize;

use crate::engine::{invite, membership};
use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Request body for `POST /campaigns/{id}/invites`.
#[derive(Debug, Deserialize)]
pub struct CreateInviteRequest {
    /// Role granted on redemption; defaults to `viewer`. `owner` is
    /// rejected.
    pub role_default: Option<CampaignRole>,
    /// Lifetime in days; defaults to 7.
    pub ttl_days: Option<i64>,
}

/// Request body for `POST /invites/redeem`.
#[derive(Debug, Deserialize)]
pub struct RedeemInviteRequest {
    pub code: String,
}

/// POST /api/v1/campaigns/{id}/invites
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CreateInviteRequest>,
) -> AppResult<(StatusCode, Json<CampaignInvite>)> {
    let role = input.role_default.unwrap_or(CampaignRole::Viewer);
    let created =
        invite::create_invite(&state.pool, id, auth_user.user_id, role, input.ttl_days).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// GET /api/v1/campaigns/{id}/invites
///
/// Editor+ only: invite codes grant access, so viewers may not read them.
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Vec<CampaignInvite>>> {
    membership::require_member(&state.pool, id, auth_user.user_id, CampaignRole::Editor).await?;
    let invites = InviteRepo::list_by_campaign(&state.pool, id).await?;
    Ok(Json(invites))
}

/// DELETE /api/v1/campaigns/{id}/invites/{invite_id}
pub async fn revoke(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path((_id, invite_id)): Path<(DbId, DbId)>,
) -> AppResult<Json<CampaignInvite>> {
    let revoked = invite::revoke_invite(&state.pool, invite_id, auth_user.user_id).await?;
    Ok(Json(revoked))
}

/// POST /api/v1/invites/redeem
///
/// Redeem a code into an `accepted` membership on the invite's campaign.
pub async fn redeem(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<RedeemInviteRequest>,
) -> AppResult<Json<Membership>> {
    let membership = invite::redeem_invite(&state.pool, &input.code, auth_user.user_id).await?;
    Ok(Json(membership))
}
