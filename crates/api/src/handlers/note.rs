//! Handlers for per-user notes, including full-text search.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use loretable_core::error::CoreError;
use loretable_core::note::NoteScope;
use loretable_core::types::DbId;
use loretable_db::models::note::{CreateNote, Note, NoteResponse, UpdateNote};
use loretable_db::repositories::NoteRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Query parameters for `GET /notes/search`.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
}

/// Convert a stored row to the external representation with typed scope.
fn to_response(note: Note) -> AppResult<NoteResponse> {
    let scope = note.scope().map_err(AppError::Core)?;
    Ok(NoteResponse {
        id: note.id,
        title: note.title,
        body: note.body,
        scope,
        created_at: note.created_at,
        updated_at: note.updated_at,
    })
}

/// Fetch a note owned by the caller. Other users' notes are reported as
/// absent, not forbidden -- notes are private.
async fn find_owned(state: &AppState, user_id: DbId, id: DbId) -> AppResult<Note> {
    NoteRepo::find_by_id(&state.pool, id)
        .await?
        .filter(|n| n.user_id == user_id)
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Note", id }))
}

/// POST /api/v1/notes
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<CreateNote>,
) -> AppResult<(StatusCode, Json<NoteResponse>)> {
    let scope = input.scope.unwrap_or(NoteScope::Standalone);
    let (entity_type, entity_id) = scope.to_columns();
    let note = NoteRepo::create(
        &state.pool,
        auth_user.user_id,
        &input.title,
        &input.body,
        entity_type,
        entity_id,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(to_response(note)?)))
}

/// GET /api/v1/notes
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<Vec<NoteResponse>>> {
    let notes = NoteRepo::list_by_user(&state.pool, auth_user.user_id).await?;
    let responses = notes.into_iter().map(to_response).collect::<Result<_, _>>()?;
    Ok(Json(responses))
}

/// GET /api/v1/notes/search?q=
pub async fn search(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<NoteResponse>>> {
    if params.q.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "search query must not be empty".into(),
        )));
    }
    let notes = NoteRepo::search(&state.pool, auth_user.user_id, &params.q).await?;
    let responses = notes.into_iter().map(to_response).collect::<Result<_, _>>()?;
    Ok(Json(responses))
}

/// GET /api/v1/notes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<NoteResponse>> {
    let note = find_owned(&state, auth_user.user_id, id).await?;
    Ok(Json(to_response(note)?))
}

/// PUT /api/v1/notes/{id}
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNote>,
) -> AppResult<Json<NoteResponse>> {
    let existing = find_owned(&state, auth_user.user_id, id).await?;

    // An omitted scope keeps the stored pair; a provided one replaces it.
    let (entity_type, entity_id): (Option<&str>, Option<DbId>) = match input.scope {
        Some(scope) => scope.to_columns(),
        None => (existing.entity_type.as_deref(), existing.entity_id),
    };

    let note = NoteRepo::update(
        &state.pool,
        id,
        input.title.as_deref(),
        input.body.as_deref(),
        entity_type,
        entity_id,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "Note", id }))?;
    Ok(Json(to_response(note)?))
}

/// DELETE /api/v1/notes/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    find_owned(&state, auth_user.user_id, id).await?;
    NoteRepo::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
