//! Handlers for the `/characters` resource.
//!
//! Characters are owned exclusively by their creator; every operation here
//! is scoped to the authenticated user. Derived stats are recomputed on
//! every read via [`CharacterSheet`].

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use loretable_core::error::CoreError;
use loretable_core::portrait;
use loretable_core::types::DbId;
use loretable_db::models::character::{
    Character, CharacterSheet, CreateCharacter, UpdateCharacter,
};
use loretable_db::repositories::CharacterRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Fetch a character and verify the caller owns it.
///
/// Non-owners get `NotFound` rather than `Forbidden`: character sheets are
/// private, so their existence is not disclosed.
async fn find_owned(state: &AppState, user_id: DbId, id: DbId) -> AppResult<Character> {
    CharacterRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|c| c.user_id == user_id)
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))
}

/// POST /api/v1/characters
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateCharacter>,
) -> AppResult<(StatusCode, Json<CharacterSheet>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "character name must not be empty".into(),
        )));
    }
    let character = CharacterRepo::create(&state.pool, auth_user.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(character.into())))
}

/// GET /api/v1/characters
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<CharacterSheet>>> {
    let characters = CharacterRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    Ok(Json(characters.into_iter().map(Into::into).collect()))
}

/// GET /api/v1/characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<CharacterSheet>> {
    let character = find_owned(&state, auth_user.user_id, id).await?;
    Ok(Json(character.into()))
}

/// PUT /api/v1/characters/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateCharacter>,
) -> AppResult<Json<CharacterSheet>> {
    find_owned(&state, auth_user.user_id, id).await?;
    let character = CharacterRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    Ok(Json(character.into()))
}

/// DELETE /api/v1/characters/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_owned(&state, auth_user.user_id, id).await?;
    CharacterRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/characters/{id}/portrait
///
/// Deterministic SVG portrait. Any authenticated user may fetch it -- the
/// image is derived from the character's public identity and is referenced
/// from campaign views.
pub async fn portrait(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Response> {
    let character = CharacterRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;

    let svg = portrait::render(character.id, &character.name);
    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "image/svg+xml")],
        svg,
    )
        .into_response())
}
