//! Storage-layer invariant tests.
//!
//! Every uniqueness invariant must be enforced by a constraint, not by
//! check-then-insert application code, so that racing writers get exactly
//! one committed row and one classifiable 23505.

use loretable_core::membership::CampaignRole;
use loretable_core::types::DbId;
use loretable_db::is_unique_violation;
use loretable_db::models::campaign::CreateCampaign;
use loretable_db::models::character::CreateCharacter;
use loretable_db::models::map::UpsertMap;
use loretable_db::repositories::{
    CampaignCharacterRepo, CampaignRepo, CharacterRepo, InviteRepo, MapRepo, SceneRepo, UserRepo,
};
use sqlx::PgPool;

async fn seed_user(pool: &PgPool, name: &str) -> DbId {
    UserRepo::create(pool, name, "argon2id-placeholder-hash")
        .await
        .expect("user insert should succeed")
        .id
}

fn campaign_input(name: &str) -> CreateCampaign {
    CreateCampaign {
        name: name.to_string(),
        description: String::new(),
        visibility: None,
    }
}

fn character_input(name: &str) -> CreateCharacter {
    CreateCharacter {
        name: name.to_string(),
        class: "Fighter".to_string(),
        race: "Human".to_string(),
        level: None,
        strength: None,
        dexterity: None,
        constitution: None,
        intelligence: None,
        wisdom: None,
        charisma: None,
        max_hit_points: None,
        current_hit_points: None,
        armor_class: None,
        speed: None,
        proficiencies: None,
        backstory: None,
        appearance: None,
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_username_hits_unique_constraint(pool: PgPool) {
    seed_user(&pool, "ragnar").await;
    let err = UserRepo::create(&pool, "ragnar", "another-hash")
        .await
        .expect_err("duplicate username must fail");
    assert!(is_unique_violation(&err, "uq_users_username"));
}

#[sqlx::test(migrations = "./migrations")]
async fn campaign_creation_inserts_owner_membership_atomically(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let campaign = CampaignRepo::create_with_owner(&pool, owner, &campaign_input("Greyreach"))
        .await
        .unwrap();

    let row: (String, String) = sqlx::query_as(
        "SELECT role::text, status::text FROM campaign_members
         WHERE campaign_id = $1 AND user_id = $2",
    )
    .bind(campaign.id)
    .bind(owner)
    .fetch_one(&pool)
    .await
    .expect("owner membership must exist");
    assert_eq!(row.0, "owner");
    assert_eq!(row.1, "accepted");

    // Exactly one membership row for the campaign.
    let count: (i64,) =
        sqlx::query_as("SELECT COUNT(*) FROM campaign_members WHERE campaign_id = $1")
            .bind(campaign.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(count.0, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn one_membership_row_per_campaign_user_pair(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let campaign = CampaignRepo::create_with_owner(&pool, owner, &campaign_input("Greyreach"))
        .await
        .unwrap();

    // The owner already has a row; a second insert for the same pair must
    // hit the constraint.
    let err = sqlx::query(
        "INSERT INTO campaign_members (campaign_id, user_id, role, status)
         VALUES ($1, $2, 'viewer', 'pending')",
    )
    .bind(campaign.id)
    .bind(owner)
    .execute(&pool)
    .await
    .expect_err("duplicate membership must fail");
    assert!(is_unique_violation(&err, "uq_campaign_members_campaign_user"));
}

#[sqlx::test(migrations = "./migrations")]
async fn invite_codes_are_globally_unique(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let a = CampaignRepo::create_with_owner(&pool, owner, &campaign_input("A"))
        .await
        .unwrap();
    let b = CampaignRepo::create_with_owner(&pool, owner, &campaign_input("B"))
        .await
        .unwrap();

    let expires = chrono::Utc::now() + chrono::Duration::days(7);
    InviteRepo::insert(&pool, a.id, "CODE123", owner, CampaignRole::Viewer, expires)
        .await
        .unwrap();

    // Same code on a different campaign still collides: uniqueness is
    // across all invites ever issued.
    let err = InviteRepo::insert(&pool, b.id, "CODE123", owner, CampaignRole::Viewer, expires)
        .await
        .expect_err("duplicate code must fail");
    assert!(is_unique_violation(&err, "uq_campaign_invites_code"));
}

#[sqlx::test(migrations = "./migrations")]
async fn invite_role_default_cannot_be_owner(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let campaign = CampaignRepo::create_with_owner(&pool, owner, &campaign_input("A"))
        .await
        .unwrap();

    let expires = chrono::Utc::now() + chrono::Duration::days(7);
    let result = sqlx::query(
        "INSERT INTO campaign_invites (campaign_id, code, created_by, role_default, expires_at)
         VALUES ($1, 'OWNERCODE', $2, 'owner', $3)",
    )
    .bind(campaign.id)
    .bind(owner)
    .bind(expires)
    .execute(&pool)
    .await;
    assert!(result.is_err(), "owner role_default must be rejected");
}

#[sqlx::test(migrations = "./migrations")]
async fn campaign_character_link_is_unique(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let campaign = CampaignRepo::create_with_owner(&pool, owner, &campaign_input("A"))
        .await
        .unwrap();
    let character = CharacterRepo::create(&pool, owner, &character_input("Mordai"))
        .await
        .unwrap();

    CampaignCharacterRepo::insert(&pool, campaign.id, character.id, owner)
        .await
        .unwrap();
    let err = CampaignCharacterRepo::insert(&pool, campaign.id, character.id, owner)
        .await
        .expect_err("duplicate link must fail");
    assert!(is_unique_violation(
        &err,
        "uq_campaign_characters_campaign_character"
    ));
}

#[sqlx::test(migrations = "./migrations")]
async fn a_scene_holds_at_most_one_map(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let campaign = CampaignRepo::create_with_owner(&pool, owner, &campaign_input("A"))
        .await
        .unwrap();
    let scene = SceneRepo::create(
        &pool,
        campaign.id,
        &loretable_db::models::scene::CreateScene {
            name: "Ambush".into(),
            description: String::new(),
            sort_order: None,
        },
    )
    .await
    .unwrap();

    let first = MapRepo::upsert_for_scene(
        &pool,
        scene.id,
        &UpsertMap {
            name: "Forest road".into(),
            image_url: None,
            grid_size: None,
            width: None,
            height: None,
        },
    )
    .await
    .unwrap();

    // Upserting again replaces rather than adding a second map.
    let second = MapRepo::upsert_for_scene(
        &pool,
        scene.id,
        &UpsertMap {
            name: "Forest road at night".into(),
            image_url: None,
            grid_size: None,
            width: None,
            height: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(second.name, "Forest road at night");

    // A direct second insert hits the constraint.
    let err = sqlx::query("INSERT INTO maps (scene_id, name) VALUES ($1, 'dup')")
        .bind(scene.id)
        .execute(&pool)
        .await
        .expect_err("second map row must fail");
    assert!(is_unique_violation(&err, "uq_maps_scene"));
}

#[sqlx::test(migrations = "./migrations")]
async fn deleting_a_scene_clears_the_active_scene_reference(pool: PgPool) {
    let owner = seed_user(&pool, "gm").await;
    let campaign = CampaignRepo::create_with_owner(&pool, owner, &campaign_input("A"))
        .await
        .unwrap();
    let scene = SceneRepo::create(
        &pool,
        campaign.id,
        &loretable_db::models::scene::CreateScene {
            name: "Opening".into(),
            description: String::new(),
            sort_order: None,
        },
    )
    .await
    .unwrap();

    CampaignRepo::set_active_scene(&pool, campaign.id, scene.id)
        .await
        .unwrap();
    SceneRepo::delete(&pool, scene.id).await.unwrap();

    let refreshed = CampaignRepo::find_by_id(&pool, campaign.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(
        refreshed.active_scene_id, None,
        "weak reference must be cleared, not block deletion"
    );
}
