pub mod health;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                       register (public)
/// /auth/login                          login (public)
/// /auth/refresh                        refresh (public)
/// /auth/logout                         logout (requires auth)
///
/// /users/me                            current user
///
/// /characters                          list, create
/// /characters/{id}                     get, update, delete
/// /characters/{id}/portrait            generated SVG portrait
///
/// /campaigns                           list, create
/// /campaigns/{id}                      aggregate detail, update
/// /campaigns/{id}/status               set status (PUT)
/// /campaigns/{id}/active-scene         set active scene (PUT)
/// /campaigns/{id}/members              list members
/// /campaigns/{id}/members/{user_id}    update role (PUT), revoke (DELETE)
/// /campaigns/{id}/characters           attach character (POST)
/// /campaigns/{id}/characters/{char_id} detach character (DELETE)
/// /campaigns/{id}/invites              list, issue
/// /campaigns/{id}/invites/{invite_id}  revoke (DELETE)
/// /campaigns/{id}/scenes               list, create
/// /campaigns/{id}/handouts             list, create
///
/// /invites/redeem                      redeem a code (POST)
///
/// /scenes/{id}                         update, delete
/// /scenes/{id}/map                     create/replace map (PUT)
/// /maps/{id}/tokens                    list, create
/// /tokens/{id}                         update, delete
/// /handouts/{id}                       update, delete
///
/// /notes                               list, create
/// /notes/search                        full-text search
/// /notes/{id}                          get, update, delete
/// ```
pub fn api_routes() -> Router<AppState> {
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login))
        .route("/refresh", post(handlers::auth::refresh))
        .route("/logout", post(handlers::auth::logout));

    let character_routes = Router::new()
        .route(
            "/",
            get(handlers::character::list).post(handlers::character::create),
        )
        .route(
            "/{id}",
            get(handlers::character::get_by_id)
                .put(handlers::character::update)
                .delete(handlers::character::delete),
        )
        .route("/{id}/portrait", get(handlers::character::portrait));

    let campaign_routes = Router::new()
        .route(
            "/",
            get(handlers::campaign::list).post(handlers::campaign::create),
        )
        .route(
            "/{id}",
            get(handlers::campaign::detail).put(handlers::campaign::update),
        )
        .route("/{id}/status", put(handlers::campaign::update_status))
        .route(
            "/{id}/active-scene",
            put(handlers::campaign::set_active_scene),
        )
        .route("/{id}/members", get(handlers::member::list))
        .route(
            "/{id}/members/{user_id}",
            put(handlers::member::update_role).delete(handlers::member::revoke),
        )
        .route(
            "/{id}/characters",
            post(handlers::campaign::attach_character),
        )
        .route(
            "/{id}/characters/{character_id}",
            axum::routing::delete(handlers::campaign::detach_character),
        )
        .route(
            "/{id}/invites",
            get(handlers::invite::list).post(handlers::invite::create),
        )
        .route(
            "/{id}/invites/{invite_id}",
            axum::routing::delete(handlers::invite::revoke),
        )
        .route(
            "/{id}/scenes",
            get(handlers::scene::list_by_campaign).post(handlers::scene::create),
        )
        .route(
            "/{id}/handouts",
            get(handlers::handout::list_by_campaign).post(handlers::handout::create),
        );

    let scene_routes = Router::new()
        .route(
            "/{id}",
            put(handlers::scene::update).delete(handlers::scene::delete),
        )
        .route("/{id}/map", put(handlers::scene::upsert_map));

    let note_routes = Router::new()
        .route("/", get(handlers::note::list).post(handlers::note::create))
        .route("/search", get(handlers::note::search))
        .route(
            "/{id}",
            get(handlers::note::get_by_id)
                .put(handlers::note::update)
                .delete(handlers::note::delete),
        );

    Router::new()
        .nest("/auth", auth_routes)
        .route("/users/me", get(handlers::user::me))
        .nest("/characters", character_routes)
        .nest("/campaigns", campaign_routes)
        .route("/invites/redeem", post(handlers::invite::redeem))
        .nest("/scenes", scene_routes)
        .route(
            "/maps/{id}/tokens",
            get(handlers::token::list_by_map).post(handlers::token::create),
        )
        .route(
            "/tokens/{id}",
            put(handlers::token::update).delete(handlers::token::delete),
        )
        .route(
            "/handouts/{id}",
            put(handlers::handout::update).delete(handlers::handout::delete),
        )
        .nest("/notes", note_routes)
}
