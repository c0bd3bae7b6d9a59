//! Invite lifecycle engine.
//!
//! State machine per invite:
//!
//! ```text
//! active --(redeem, not expired)--> redeemed (terminal)
//! active --(revoke)-------------->  revoked  (terminal)
//! ```
//!
//! Redemption performs two writes -- mark the invite redeemed, upsert the
//! membership to `accepted` -- inside one transaction. A crash or a lost
//! race can never leave one without the other.

use chrono::{Duration, Utc};
use loretable_core::error::CoreError;
use loretable_core::invite::{
    check_redeemable, validate_granted_role, DEFAULT_INVITE_TTL_DAYS, INVITE_CODE_LEN,
};
use loretable_core::membership::{CampaignRole, MembershipStatus};
use loretable_core::types::DbId;
use loretable_db::models::invite::CampaignInvite;
use loretable_db::models::membership::Membership;
use loretable_db::repositories::{InviteRepo, MembershipRepo};
use loretable_db::{is_unique_violation, DbPool};
use rand::distr::Alphanumeric;
use rand::Rng;

use crate::engine::membership::require_member;
use crate::error::{AppError, AppResult};

/// How many fresh codes to try before giving up on a pathological
/// collision streak. With 16 alphanumeric characters a single collision is
/// already a curiosity.
const MAX_CODE_ATTEMPTS: u32 = 5;

/// Generate a random alphanumeric invite code.
fn generate_code() -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(INVITE_CODE_LEN)
        .map(char::from)
        .collect()
}

/// Issue a time-limited, single-use invite code for a campaign.
///
/// Requires issuer role >= editor. `role_default` must be `viewer` or
/// `editor` -- an invite can never grant ownership. A code collision is
/// retried with a fresh random value, never surfaced to the caller.
pub async fn create_invite(
    pool: &DbPool,
    campaign_id: DbId,
    issuer_id: DbId,
    role_default: CampaignRole,
    ttl_days: Option<i64>,
) -> AppResult<CampaignInvite> {
    require_member(pool, campaign_id, issuer_id, CampaignRole::Editor).await?;
    validate_granted_role(role_default).map_err(AppError::Core)?;

    let ttl = ttl_days.unwrap_or(DEFAULT_INVITE_TTL_DAYS);
    if ttl <= 0 {
        return Err(AppError::Core(CoreError::Validation(
            "invite ttl must be positive".into(),
        )));
    }
    let expires_at = Utc::now() + Duration::days(ttl);

    for _ in 0..MAX_CODE_ATTEMPTS {
        let code = generate_code();
        match InviteRepo::insert(pool, campaign_id, &code, issuer_id, role_default, expires_at)
            .await
        {
            Ok(invite) => {
                tracing::info!(
                    campaign_id,
                    invite_id = invite.id,
                    role = %role_default,
                    "Invite issued",
                );
                return Ok(invite);
            }
            Err(err) if is_unique_violation(&err, "uq_campaign_invites_code") => {
                tracing::debug!(campaign_id, "Invite code collision, retrying");
                continue;
            }
            Err(err) => return Err(err.into()),
        }
    }

    Err(AppError::InternalError(
        "could not generate a unique invite code".into(),
    ))
}

/// Redeem an invite code into an `accepted` membership.
///
/// Check order, each failure distinct: invite exists (`InviteNotFound`) ->
/// not already redeemed/revoked (`InviteRedeemed`/`InviteRevoked`) -> not
/// expired (`InviteExpired`) -> redeemer not already an accepted member
/// (`AlreadyMember`).
///
/// The invite is claimed with a guarded UPDATE inside the transaction, so
/// concurrent redemptions of the same code have exactly one winner; the
/// loser's claim matches nothing and is classified from the committed
/// state. Any precondition failure rolls the claim back, leaving the invite
/// untouched.
pub async fn redeem_invite(pool: &DbPool, code: &str, user_id: DbId) -> AppResult<Membership> {
    let mut tx = pool.begin().await?;

    let claimed = InviteRepo::claim(&mut tx, code, user_id).await?;
    let Some(invite) = claimed else {
        tx.rollback().await?;
        return Err(classify_failed_claim(pool, code).await?);
    };

    // Expiry check. Failing here rolls the claim back.
    if invite.expires_at <= Utc::now() {
        tx.rollback().await?;
        return Err(AppError::Core(CoreError::InviteExpired));
    }

    // Already-a-member check, inside the transaction.
    let existing = MembershipRepo::find_in_tx(&mut tx, invite.campaign_id, user_id).await?;
    if existing
        .as_ref()
        .is_some_and(|m| m.status == MembershipStatus::Accepted)
    {
        tx.rollback().await?;
        return Err(AppError::Core(CoreError::AlreadyMember));
    }

    // Create or reactivate the membership with the invite's default role.
    // Earlier invited_by attribution is preserved by the upsert.
    let membership = MembershipRepo::upsert_accepted(
        &mut tx,
        invite.campaign_id,
        user_id,
        invite.role_default,
        invite.created_by,
    )
    .await?;

    tx.commit().await?;
    tracing::info!(
        campaign_id = invite.campaign_id,
        invite_id = invite.id,
        user_id,
        role = %invite.role_default,
        "Invite redeemed",
    );
    Ok(membership)
}

/// Explain a claim that matched nothing: the invite is missing or terminal.
/// Classified from the committed row.
async fn classify_failed_claim(pool: &DbPool, code: &str) -> AppResult<AppError> {
    match InviteRepo::find_by_code(pool, code).await? {
        None => Ok(AppError::Core(CoreError::InviteNotFound)),
        Some(existing) => match check_redeemable(
            existing.status,
            existing.redeemed_at,
            existing.expires_at,
            Utc::now(),
        ) {
            Err(reason) => Ok(AppError::Core(reason)),
            // A concurrent winner committed between our claim and this
            // read only by redeeming the invite.
            Ok(()) => Ok(AppError::Core(CoreError::InviteRedeemed)),
        },
    }
}

/// Revoke an invite (editor+).
///
/// Terminal states fail informatively instead of corrupting anything:
/// an already-revoked invite reports `InviteRevoked`, a redeemed one
/// `InviteRedeemed`. Calling revoke twice leaves the same terminal state.
pub async fn revoke_invite(
    pool: &DbPool,
    invite_id: DbId,
    acting_user_id: DbId,
) -> AppResult<CampaignInvite> {
    let invite = InviteRepo::find_by_id(pool, invite_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invite",
            id: invite_id,
        }))?;

    require_member(pool, invite.campaign_id, acting_user_id, CampaignRole::Editor).await?;

    match InviteRepo::revoke(pool, invite_id).await? {
        Some(revoked) => {
            tracing::info!(invite_id, campaign_id = revoked.campaign_id, "Invite revoked");
            Ok(revoked)
        }
        // The guarded update matched nothing: the invite was already
        // terminal. Report which way.
        None => {
            if invite.redeemed_at.is_some() {
                Err(AppError::Core(CoreError::InviteRedeemed))
            } else {
                Err(AppError::Core(CoreError::InviteRevoked))
            }
        }
    }
}
