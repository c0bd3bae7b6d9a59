//! Integration tests for the invite lifecycle engine.
//!
//! Issue -> redeem -> membership, with the full failure taxonomy: expiry,
//! terminal states, duplicate membership, the same-code redemption race,
//! and revocation idempotence.

mod common;

use assert_matches::assert_matches;
use common::seed_user;
use loretable_api::engine::{invite, membership};
use loretable_api::error::AppError;
use loretable_core::error::CoreError;
use loretable_core::invite::InviteState;
use loretable_core::membership::{CampaignRole, MembershipStatus};
use loretable_db::models::campaign::CreateCampaign;
use loretable_db::repositories::InviteRepo;
use loretable_core::types::DbId;
use sqlx::PgPool;

fn campaign_input(name: &str) -> CreateCampaign {
    CreateCampaign {
        name: name.to_string(),
        description: String::new(),
        visibility: None,
    }
}

async fn seed_campaign(pool: &PgPool, owner: DbId) -> DbId {
    membership::create_campaign_with_owner(pool, owner, &campaign_input("Hollow"))
        .await
        .unwrap()
        .id
}

#[sqlx::test(migrations = "../db/migrations")]
async fn issue_and_redeem_grants_the_default_role(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let player = seed_user(&pool, "player").await;
    let campaign_id = seed_campaign(&pool, owner).await;

    let issued = invite::create_invite(&pool, campaign_id, owner, CampaignRole::Viewer, Some(7))
        .await
        .unwrap();
    assert_eq!(issued.state(), InviteState::Active);
    assert!(!issued.code.is_empty());

    let m = invite::redeem_invite(&pool, &issued.code, player).await.unwrap();
    assert_eq!(m.role, CampaignRole::Viewer);
    assert_eq!(m.status, MembershipStatus::Accepted);
    assert_eq!(m.invited_by, Some(owner));

    // The invite is terminal now.
    let after = InviteRepo::find_by_id(&pool, issued.id).await.unwrap().unwrap();
    assert_eq!(after.state(), InviteState::Redeemed);
    assert_eq!(after.redeemed_by, Some(player));

    // Redeeming the same code again (by anyone) reports the terminal state.
    let third = seed_user(&pool, "latecomer").await;
    let err = invite::redeem_invite(&pool, &issued.code, third).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::InviteRedeemed));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn invites_are_issued_by_editors_not_viewers(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let viewer = seed_user(&pool, "viewer").await;
    let campaign_id = seed_campaign(&pool, owner).await;

    sqlx::query(
        "INSERT INTO campaign_members (campaign_id, user_id, role, status)
         VALUES ($1, $2, 'viewer', 'accepted')",
    )
    .bind(campaign_id)
    .bind(viewer)
    .execute(&pool)
    .await
    .unwrap();

    let err = invite::create_invite(&pool, campaign_id, viewer, CampaignRole::Viewer, None)
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::NotPermitted { .. }));

    // An invite can never grant ownership.
    let err = invite::create_invite(&pool, campaign_id, owner, CampaignRole::Owner, None)
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::Validation(_)));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn unknown_code_reports_invite_not_found(pool: PgPool) {
    let player = seed_user(&pool, "player").await;
    let err = invite::redeem_invite(&pool, "NO-SUCH-CODE", player).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::InviteNotFound));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn expired_invite_fails_and_mutates_nothing(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let player = seed_user(&pool, "player").await;
    let campaign_id = seed_campaign(&pool, owner).await;

    // Insert an editor invite already past its expiry.
    let expired_at = chrono::Utc::now() - chrono::Duration::hours(1);
    let issued = InviteRepo::insert(
        &pool,
        campaign_id,
        "EXPIREDCODE00001",
        owner,
        CampaignRole::Editor,
        expired_at,
    )
    .await
    .unwrap();

    let err = invite::redeem_invite(&pool, &issued.code, player).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::InviteExpired));

    // No membership was created and the invite was not claimed.
    let m = membership::get_membership(&pool, campaign_id, player).await.unwrap();
    assert!(m.is_none(), "expired redemption must not create a membership");
    let after = InviteRepo::find_by_id(&pool, issued.id).await.unwrap().unwrap();
    assert_eq!(after.state(), InviteState::Active);
    assert_eq!(after.redeemed_at, None);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn an_accepted_member_cannot_redeem_again(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let player = seed_user(&pool, "player").await;
    let campaign_id = seed_campaign(&pool, owner).await;

    let first = invite::create_invite(&pool, campaign_id, owner, CampaignRole::Viewer, None)
        .await
        .unwrap();
    invite::redeem_invite(&pool, &first.code, player).await.unwrap();

    let second = invite::create_invite(&pool, campaign_id, owner, CampaignRole::Editor, None)
        .await
        .unwrap();
    let err = invite::redeem_invite(&pool, &second.code, player).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::AlreadyMember));

    // The losing redemption must not consume the invite.
    let after = InviteRepo::find_by_id(&pool, second.id).await.unwrap().unwrap();
    assert_eq!(after.state(), InviteState::Active);

    // The owner redeeming their own campaign's invite is the same failure.
    let err = invite::redeem_invite(&pool, &second.code, owner).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::AlreadyMember));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn concurrent_redemption_has_exactly_one_winner(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let alice = seed_user(&pool, "alice").await;
    let bob = seed_user(&pool, "bob").await;
    let campaign_id = seed_campaign(&pool, owner).await;

    let issued = invite::create_invite(&pool, campaign_id, owner, CampaignRole::Viewer, None)
        .await
        .unwrap();

    let (a, b) = tokio::join!(
        invite::redeem_invite(&pool, &issued.code, alice),
        invite::redeem_invite(&pool, &issued.code, bob),
    );

    let successes = [&a, &b].iter().filter(|r| r.is_ok()).count();
    assert_eq!(successes, 1, "exactly one redemption must win");
    for result in [a, b] {
        if let Err(err) = result {
            assert_matches!(err, AppError::Core(CoreError::InviteRedeemed));
        }
    }

    // Exactly one new membership besides the owner's.
    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM campaign_members WHERE campaign_id = $1")
            .bind(campaign_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count.0, 2, "owner plus exactly one redeemer");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn revoked_member_is_readmitted_by_a_fresh_invite(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let player = seed_user(&pool, "player").await;
    let campaign_id = seed_campaign(&pool, owner).await;

    let first = invite::create_invite(&pool, campaign_id, owner, CampaignRole::Editor, None)
        .await
        .unwrap();
    invite::redeem_invite(&pool, &first.code, player).await.unwrap();
    membership::revoke_member(&pool, campaign_id, owner, player).await.unwrap();

    // A new invite flips the same row back to accepted with the new role.
    let second = invite::create_invite(&pool, campaign_id, owner, CampaignRole::Viewer, None)
        .await
        .unwrap();
    let m = invite::redeem_invite(&pool, &second.code, player).await.unwrap();
    assert_eq!(m.status, MembershipStatus::Accepted);
    assert_eq!(m.role, CampaignRole::Viewer);
    // Attribution from the first admission is preserved.
    assert_eq!(m.invited_by, Some(owner));

    // Still one row per (campaign, user).
    let count: (i64,) = sqlx::query_as(
        "SELECT COUNT(*) FROM campaign_members WHERE campaign_id = $1 AND user_id = $2",
    )
    .bind(campaign_id)
    .bind(player)
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(count.0, 1);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn revoking_an_invite_is_terminal_and_idempotent(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let player = seed_user(&pool, "player").await;
    let campaign_id = seed_campaign(&pool, owner).await;

    let issued = invite::create_invite(&pool, campaign_id, owner, CampaignRole::Viewer, None)
        .await
        .unwrap();

    let revoked = invite::revoke_invite(&pool, issued.id, owner).await.unwrap();
    assert_eq!(revoked.state(), InviteState::Revoked);

    // Second revoke: informative failure, state unchanged, no corruption.
    let err = invite::revoke_invite(&pool, issued.id, owner).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::InviteRevoked));
    let after = InviteRepo::find_by_id(&pool, issued.id).await.unwrap().unwrap();
    assert_eq!(after.state(), InviteState::Revoked);

    // A revoked code cannot be redeemed.
    let err = invite::redeem_invite(&pool, &issued.code, player).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::InviteRevoked));

    // Revoking a redeemed invite reports the redeemed state instead.
    let live = invite::create_invite(&pool, campaign_id, owner, CampaignRole::Viewer, None)
        .await
        .unwrap();
    invite::redeem_invite(&pool, &live.code, player).await.unwrap();
    let err = invite::revoke_invite(&pool, live.id, owner).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::InviteRedeemed));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn full_scenario_invite_promote_attach(pool: PgPool) {
    let u1 = seed_user(&pool, "gamemaster").await;
    let u2 = seed_user(&pool, "newcomer").await;

    // U1 creates a campaign (status defaults to not_started).
    let campaign = membership::create_campaign_with_owner(&pool, u1, &campaign_input("Embers"))
        .await
        .unwrap();

    // U1 issues a viewer invite with a 7-day ttl; U2 redeems it.
    let issued = invite::create_invite(&pool, campaign.id, u1, CampaignRole::Viewer, Some(7))
        .await
        .unwrap();
    invite::redeem_invite(&pool, &issued.code, u2).await.unwrap();

    let m = membership::get_membership(&pool, campaign.id, u2)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(m.role, CampaignRole::Viewer);
    assert_eq!(m.status, MembershipStatus::Accepted);

    // U1 promotes U2 to editor; U2 can now attach a character they own.
    membership::update_member_role(&pool, campaign.id, u1, u2, CampaignRole::Editor)
        .await
        .unwrap();

    let character = loretable_db::repositories::CharacterRepo::create(
        &pool,
        u2,
        &loretable_db::models::character::CreateCharacter {
            name: "Seren".into(),
            class: "Cleric".into(),
            race: "Elf".into(),
            level: Some(2),
            strength: None,
            dexterity: None,
            constitution: None,
            intelligence: None,
            wisdom: Some(16),
            charisma: None,
            max_hit_points: None,
            current_hit_points: None,
            armor_class: None,
            speed: None,
            proficiencies: None,
            backstory: None,
            appearance: None,
        },
    )
    .await
    .unwrap();

    membership::add_character_to_campaign(&pool, campaign.id, u2, character.id)
        .await
        .unwrap();
}
