//! Integration tests for the campaign aggregate service.
//!
//! Role-filtered token visibility, scene ordering, campaign listing order,
//! and active-scene validation.

mod common;

use assert_matches::assert_matches;
use common::seed_user;
use loretable_api::engine::{aggregate, membership};
use loretable_api::error::AppError;
use loretable_core::error::CoreError;
use loretable_core::types::DbId;
use loretable_db::models::campaign::CreateCampaign;
use loretable_db::models::map::UpsertMap;
use loretable_db::models::scene::CreateScene;
use loretable_db::models::token::CreateToken;
use loretable_db::repositories::{MapRepo, SceneRepo, TokenRepo};
use loretable_core::token::TokenLayer;
use sqlx::PgPool;

fn campaign_input(name: &str) -> CreateCampaign {
    CreateCampaign {
        name: name.to_string(),
        description: String::new(),
        visibility: None,
    }
}

async fn seed_scene(pool: &PgPool, campaign_id: DbId, name: &str, order: i32) -> DbId {
    SceneRepo::create(
        pool,
        campaign_id,
        &CreateScene {
            name: name.to_string(),
            description: String::new(),
            sort_order: Some(order),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_map(pool: &PgPool, scene_id: DbId) -> DbId {
    MapRepo::upsert_for_scene(
        pool,
        scene_id,
        &UpsertMap {
            name: "Battle map".into(),
            image_url: None,
            grid_size: None,
            width: None,
            height: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_token(pool: &PgPool, map_id: DbId, name: &str, layer: TokenLayer) {
    TokenRepo::create(
        pool,
        map_id,
        &CreateToken {
            character_id: None,
            name: name.to_string(),
            x: None,
            y: None,
            layer: Some(layer),
            audience: None,
        },
    )
    .await
    .unwrap();
}

#[sqlx::test(migrations = "../db/migrations")]
async fn viewers_never_see_gm_layer_tokens(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let viewer = seed_user(&pool, "viewer").await;
    let campaign = membership::create_campaign_with_owner(&pool, owner, &campaign_input("Hollow"))
        .await
        .unwrap();
    sqlx::query(
        "INSERT INTO campaign_members (campaign_id, user_id, role, status)
         VALUES ($1, $2, 'viewer', 'accepted')",
    )
    .bind(campaign.id)
    .bind(viewer)
    .execute(&pool)
    .await
    .unwrap();

    let scene = seed_scene(&pool, campaign.id, "Ambush", 1).await;
    let map = seed_map(&pool, scene).await;
    seed_token(&pool, map, "Goblin", TokenLayer::Token).await;
    seed_token(&pool, map, "Hidden trap", TokenLayer::Gm).await;
    seed_token(&pool, map, "Campfire", TokenLayer::Object).await;

    // The owner sees all three tokens, gm layer included.
    let detail = aggregate::campaign_detail(&pool, campaign.id, owner).await.unwrap();
    let tokens = &detail.scenes[0].map.as_ref().unwrap().tokens;
    assert_eq!(tokens.len(), 3);
    assert!(tokens.iter().any(|t| t.layer == TokenLayer::Gm));

    // The viewer gets the same view minus every gm-layer token.
    let detail = aggregate::campaign_detail(&pool, campaign.id, viewer).await.unwrap();
    let tokens = &detail.scenes[0].map.as_ref().unwrap().tokens;
    assert_eq!(tokens.len(), 2);
    assert!(
        tokens.iter().all(|t| t.layer != TokenLayer::Gm),
        "gm tokens must be stripped for viewers"
    );
}

#[sqlx::test(migrations = "../db/migrations")]
async fn scenes_come_back_in_explicit_order_with_id_tiebreak(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let campaign = membership::create_campaign_with_owner(&pool, owner, &campaign_input("Hollow"))
        .await
        .unwrap();

    // Inserted out of order; two scenes share a sort value.
    let act2 = seed_scene(&pool, campaign.id, "Act II", 2).await;
    let act1a = seed_scene(&pool, campaign.id, "Act I part a", 1).await;
    let act1b = seed_scene(&pool, campaign.id, "Act I part b", 1).await;

    let detail = aggregate::campaign_detail(&pool, campaign.id, owner).await.unwrap();
    let ids: Vec<DbId> = detail.scenes.iter().map(|s| s.scene.id).collect();
    assert_eq!(ids, vec![act1a, act1b, act2]);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn detail_requires_an_accepted_membership(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let outsider = seed_user(&pool, "stranger").await;
    let campaign = membership::create_campaign_with_owner(&pool, owner, &campaign_input("Hollow"))
        .await
        .unwrap();

    let err = aggregate::campaign_detail(&pool, campaign.id, outsider).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::NotCampaignMember));

    let err = aggregate::campaign_detail(&pool, 999_999, owner).await.unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::NotFound { entity: "Campaign", .. }));
}

#[sqlx::test(migrations = "../db/migrations")]
async fn campaign_listing_is_most_recently_updated_first(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let first = membership::create_campaign_with_owner(&pool, owner, &campaign_input("First"))
        .await
        .unwrap();
    let second = membership::create_campaign_with_owner(&pool, owner, &campaign_input("Second"))
        .await
        .unwrap();

    // Touch the older campaign so it floats to the top.
    membership::update_campaign_status(&pool, first.id, owner, "in_progress")
        .await
        .unwrap();

    let campaigns = aggregate::campaigns_for_user(&pool, owner).await.unwrap();
    let ids: Vec<DbId> = campaigns.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    // A revoked membership drops the campaign from the listing.
    let other = seed_user(&pool, "other").await;
    let listed = aggregate::campaigns_for_user(&pool, other).await.unwrap();
    assert!(listed.is_empty());
}

#[sqlx::test(migrations = "../db/migrations")]
async fn active_scene_must_belong_to_the_campaign(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let campaign_a = membership::create_campaign_with_owner(&pool, owner, &campaign_input("A"))
        .await
        .unwrap();
    let campaign_b = membership::create_campaign_with_owner(&pool, owner, &campaign_input("B"))
        .await
        .unwrap();
    let scene_b = seed_scene(&pool, campaign_b.id, "Elsewhere", 1).await;

    // A scene from another campaign is rejected.
    let err = aggregate::set_active_scene(&pool, campaign_a.id, owner, scene_b)
        .await
        .unwrap_err();
    assert_matches!(err, AppError::Core(CoreError::NotFound { entity: "Scene", .. }));

    // Its own scene works and shows up on the campaign row.
    let scene_a = seed_scene(&pool, campaign_a.id, "Here", 1).await;
    let updated = aggregate::set_active_scene(&pool, campaign_a.id, owner, scene_a)
        .await
        .unwrap();
    assert_eq!(updated.active_scene_id, Some(scene_a));
}
