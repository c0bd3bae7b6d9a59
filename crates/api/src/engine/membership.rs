//! Authorization & membership engine.
//!
//! Single source of truth for "can user U do action A on campaign C".
//! Every mutating campaign operation gates on [`require_member`] before
//! touching data, and every uniqueness invariant is backed by a storage
//! constraint so races resolve to one winner and one typed failure.

use loretable_core::campaign::CampaignStatus;
use loretable_core::error::CoreError;
use loretable_core::membership::{CampaignRole, MembershipStatus};
use loretable_core::types::DbId;
use loretable_db::models::campaign::{Campaign, CreateCampaign};
use loretable_db::models::campaign_character::CampaignCharacter;
use loretable_db::models::membership::Membership;
use loretable_db::repositories::{
    CampaignCharacterRepo, CampaignRepo, CharacterRepo, MembershipRepo,
};
use loretable_db::{is_unique_violation, DbPool};

use crate::error::{AppError, AppResult};

/// Look up a user's membership on a campaign. No side effects; returns
/// `None` when no row exists.
pub async fn get_membership(
    pool: &DbPool,
    campaign_id: DbId,
    user_id: DbId,
) -> AppResult<Option<Membership>> {
    Ok(MembershipRepo::find(pool, campaign_id, user_id).await?)
}

/// Require an `accepted` membership with at least `min_role`.
///
/// Fails with `NotCampaignMember` when no accepted row exists and with
/// `NotPermitted` when the role is below the threshold. Used as the
/// precondition gate before every campaign operation.
pub async fn require_member(
    pool: &DbPool,
    campaign_id: DbId,
    user_id: DbId,
    min_role: CampaignRole,
) -> AppResult<Membership> {
    let membership = MembershipRepo::find(pool, campaign_id, user_id)
        .await?
        .filter(|m| m.status == MembershipStatus::Accepted)
        .ok_or(AppError::Core(CoreError::NotCampaignMember))?;

    if membership.role < min_role {
        return Err(AppError::Core(CoreError::NotPermitted {
            required: min_role,
        }));
    }
    Ok(membership)
}

/// Create a campaign together with its owner's `accepted` `owner`
/// membership. The two inserts share one transaction; a campaign without an
/// owner membership is never observable.
pub async fn create_campaign_with_owner(
    pool: &DbPool,
    owner_id: DbId,
    input: &CreateCampaign,
) -> AppResult<Campaign> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "campaign name must not be empty".into(),
        )));
    }

    let campaign = CampaignRepo::create_with_owner(pool, owner_id, input).await?;
    tracing::info!(campaign_id = campaign.id, owner_id, "Campaign created");
    Ok(campaign)
}

/// Attach a character to a campaign.
///
/// Preconditions, in order, each with its own failure:
/// 1. campaign exists (`NotFound`)
/// 2. requester holds an accepted membership with role >= editor
///    (`NotCampaignMember` / `NotPermitted`)
/// 3. character exists (`NotFound`) and is owned by the requester
///    (`CharacterNotOwned`)
/// 4. no link exists yet (`AlreadyExists`)
///
/// The insert itself is guarded by the uniqueness constraint, so two
/// concurrent identical requests resolve to one link row and one
/// `AlreadyExists` -- never a duplicate.
pub async fn add_character_to_campaign(
    pool: &DbPool,
    campaign_id: DbId,
    requesting_user_id: DbId,
    character_id: DbId,
) -> AppResult<CampaignCharacter> {
    // 1. Campaign must exist.
    CampaignRepo::find_by_id(pool, campaign_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;

    // 2. Requester must be an editor or owner.
    require_member(pool, campaign_id, requesting_user_id, CampaignRole::Editor).await?;

    // 3. Character must exist and belong to the requester.
    let character = CharacterRepo::find_by_id(pool, character_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id: character_id,
        }))?;
    if character.user_id != requesting_user_id {
        return Err(AppError::Core(CoreError::CharacterNotOwned));
    }

    // 4. Link must not already exist. The pre-check gives the common case a
    //    clean answer; the constraint settles the race.
    if CampaignCharacterRepo::exists(pool, campaign_id, character_id).await? {
        return Err(AppError::Core(CoreError::AlreadyExists {
            entity: "Campaign character link",
        }));
    }

    match CampaignCharacterRepo::insert(pool, campaign_id, character_id, requesting_user_id).await
    {
        Ok(link) => {
            tracing::info!(campaign_id, character_id, "Character attached to campaign");
            Ok(link)
        }
        Err(err) if is_unique_violation(&err, "uq_campaign_characters_campaign_character") => {
            Err(AppError::Core(CoreError::AlreadyExists {
                entity: "Campaign character link",
            }))
        }
        Err(err) => Err(err.into()),
    }
}

/// Detach a character from a campaign (editor+).
pub async fn remove_character_from_campaign(
    pool: &DbPool,
    campaign_id: DbId,
    requesting_user_id: DbId,
    character_id: DbId,
) -> AppResult<()> {
    require_member(pool, campaign_id, requesting_user_id, CampaignRole::Editor).await?;

    let removed = CampaignCharacterRepo::delete(pool, campaign_id, character_id).await?;
    if !removed {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Campaign character link",
            id: character_id,
        }));
    }
    tracing::info!(campaign_id, character_id, "Character detached from campaign");
    Ok(())
}

/// Set the campaign status. Requires role >= editor; a value outside the
/// enumerated set fails with `InvalidStatus` before anything is written.
pub async fn update_campaign_status(
    pool: &DbPool,
    campaign_id: DbId,
    requesting_user_id: DbId,
    new_status: &str,
) -> AppResult<Campaign> {
    require_member(pool, campaign_id, requesting_user_id, CampaignRole::Editor).await?;

    let status = CampaignStatus::parse(new_status).map_err(AppError::Core)?;

    let campaign = CampaignRepo::update_status(pool, campaign_id, status)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Campaign",
            id: campaign_id,
        }))?;
    tracing::info!(campaign_id, status = new_status, "Campaign status updated");
    Ok(campaign)
}

/// Change a member's role (owner only).
///
/// An invite can admit someone as `viewer` and the owner can later promote
/// them to `editor`; ownership itself is never reassigned here, so `owner`
/// is not an assignable role and the owner's own row cannot be changed.
pub async fn update_member_role(
    pool: &DbPool,
    campaign_id: DbId,
    acting_user_id: DbId,
    target_user_id: DbId,
    new_role: CampaignRole,
) -> AppResult<Membership> {
    require_member(pool, campaign_id, acting_user_id, CampaignRole::Owner).await?;

    if new_role == CampaignRole::Owner {
        return Err(AppError::Core(CoreError::Validation(
            "ownership cannot be granted by role update".into(),
        )));
    }

    let target = MembershipRepo::find(pool, campaign_id, target_user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotCampaignMember))?;
    if target.role == CampaignRole::Owner {
        return Err(AppError::Core(CoreError::Forbidden(
            "the campaign owner's role cannot be changed".into(),
        )));
    }

    let updated = MembershipRepo::update_role(pool, campaign_id, target_user_id, new_role)
        .await?
        .ok_or(AppError::Core(CoreError::NotCampaignMember))?;
    tracing::info!(
        campaign_id,
        target_user_id,
        role = %new_role,
        "Member role updated",
    );
    Ok(updated)
}

/// Revoke a member's access (owner only). The owner's own membership cannot
/// be revoked, which also rules out self-revocation.
pub async fn revoke_member(
    pool: &DbPool,
    campaign_id: DbId,
    acting_user_id: DbId,
    target_user_id: DbId,
) -> AppResult<Membership> {
    require_member(pool, campaign_id, acting_user_id, CampaignRole::Owner).await?;

    let target = MembershipRepo::find(pool, campaign_id, target_user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotCampaignMember))?;
    if target.role == CampaignRole::Owner {
        return Err(AppError::Core(CoreError::Forbidden(
            "the campaign owner's membership cannot be revoked".into(),
        )));
    }

    let revoked = MembershipRepo::revoke(pool, campaign_id, target_user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotCampaignMember))?;
    tracing::info!(campaign_id, target_user_id, "Member revoked");
    Ok(revoked)
}
