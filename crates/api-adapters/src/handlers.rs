//! Request handlers for the notes API.
//!
//! Guard checks run before anything touches the note store: rate limiting
//! on the public posting endpoint, the admin guard on everything under
//! `/api/admin`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use domains::Note;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::extract::{AdminSecret, ClientAddr};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateNoteRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

#[derive(Serialize)]
pub struct NoteListBody {
    pub success: bool,
    pub notes: Vec<Note>,
}

#[derive(Serialize)]
pub struct NoteCreatedBody {
    pub success: bool,
    pub note: Note,
}

#[derive(Serialize)]
pub struct OkBody {
    pub success: bool,
}

/// `GET /api/notes` — the latest notes, newest first.
pub async fn list_notes(State(state): State<AppState>) -> Result<Json<NoteListBody>, ApiError> {
    let notes = state.notes.latest().await?;
    Ok(Json(NoteListBody {
        success: true,
        notes,
    }))
}

/// `POST /api/notes` — validates, rate-limits, and stores a note.
pub async fn create_note(
    State(state): State<AppState>,
    ClientAddr(client): ClientAddr,
    Json(body): Json<CreateNoteRequest>,
) -> Result<(StatusCode, Json<NoteCreatedBody>), ApiError> {
    state.limiter.check_note_post(&client).await?;

    let note = state
        .notes
        .publish(body.content.as_deref().unwrap_or(""), body.author.as_deref())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(NoteCreatedBody {
            success: true,
            note,
        }),
    ))
}

/// `GET /api/admin/notes` — the entire store, unbounded.
pub async fn admin_list_notes(
    State(state): State<AppState>,
    ClientAddr(client): ClientAddr,
    AdminSecret(secret): AdminSecret,
) -> Result<Json<NoteListBody>, ApiError> {
    state.admin.authorize(&client, secret.as_deref()).await?;

    let notes = state.notes.everything().await?;
    Ok(Json(NoteListBody {
        success: true,
        notes,
    }))
}

/// `DELETE /api/admin/notes/{id}` — removes one note; unknown ids succeed.
pub async fn admin_delete_note(
    State(state): State<AppState>,
    ClientAddr(client): ClientAddr,
    AdminSecret(secret): AdminSecret,
    Path(id): Path<i64>,
) -> Result<Json<OkBody>, ApiError> {
    state.admin.authorize(&client, secret.as_deref()).await?;

    state.notes.remove(id).await?;
    Ok(Json(OkBody { success: true }))
}

/// `DELETE /api/admin/clear` — empties the store.
pub async fn admin_clear_notes(
    State(state): State<AppState>,
    ClientAddr(client): ClientAddr,
    AdminSecret(secret): AdminSecret,
) -> Result<Json<OkBody>, ApiError> {
    state.admin.authorize(&client, secret.as_deref()).await?;

    state.notes.clear().await?;
    Ok(Json(OkBody { success: true }))
}
