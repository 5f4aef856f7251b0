//! Note endpoints
//!
//! Every handler issues exactly one statement through the note store.
//! Get, update and delete on an unknown id answer 404.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::{NoteId, ValidJson, ValidQuery};
use crate::http::server::AppState;
use crate::models::{DeleteConfirmation, Note, NoteInput, Window, WindowParams};

/// POST /notes/ - create a note
async fn create_note(
    State(state): State<Arc<AppState>>,
    ValidJson(input): ValidJson<NoteInput>,
) -> Result<(StatusCode, Json<Note>), ApiError> {
    let note = state.notes.create(input).await?;
    tracing::debug!(id = note.id, "note created");
    Ok((StatusCode::CREATED, Json(note)))
}

/// PUT /notes/{note_id}/ - replace text and completed
async fn update_note(
    State(state): State<Arc<AppState>>,
    NoteId(id): NoteId,
    ValidJson(input): ValidJson<NoteInput>,
) -> Result<Json<Note>, ApiError> {
    let note = state.notes.update(id, input).await?;
    Ok(Json(note))
}

/// GET /notes/?skip=&take= - list notes in id order
async fn list_notes(
    State(state): State<Arc<AppState>>,
    ValidQuery(params): ValidQuery<WindowParams>,
) -> Result<Json<Vec<Note>>, ApiError> {
    let notes = state.notes.list(Window::from(params)).await?;
    Ok(Json(notes))
}

/// GET /notes/{note_id}/ - fetch one note
async fn get_note(
    State(state): State<Arc<AppState>>,
    NoteId(id): NoteId,
) -> Result<Json<Note>, ApiError> {
    let note = state.notes.get(id).await?;
    Ok(Json(note))
}

/// DELETE /notes/{note_id}/ - remove a note
async fn delete_note(
    State(state): State<Arc<AppState>>,
    NoteId(id): NoteId,
) -> Result<Json<DeleteConfirmation>, ApiError> {
    state.notes.delete(id).await?;
    tracing::debug!(id, "note deleted");
    Ok(Json(DeleteConfirmation::for_note(id)))
}

/// Note routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notes/", get(list_notes).post(create_note))
        .route(
            "/notes/{note_id}/",
            get(get_note).put(update_note).delete(delete_note),
        )
}
