//! Notes API endpoints
//!
//! Notes live on a board, the cross-board "All Notes" and "Archive" views are found at the end

use axum::Extension;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::activity::NoteWithItems;
use crate::activity::with_checklist_items;
use crate::database::AuditEntry;
use crate::database::CreateChecklistItemValues;
use crate::database::CreateNoteValues;
use crate::database::Database;
use crate::database::UpdateNoteValues;
use crate::notes::DEFAULT_COLOR;
use crate::notes::Note;
use crate::users::Role;

use super::AuditTrail;
use super::CurrentUser;
use super::Error;
use super::Form;
use super::PathParameters;
use super::Success;
use super::checklist_items::ChecklistItemResponse;
use super::parse_color;
use super::parse_content;
use super::utils::fetch_board;
use super::utils::fetch_note;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub id: Uuid,
    pub board_id: Uuid,
    pub created_by: Uuid,
    pub color: String,
    pub archived: bool,
    pub archived_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
    pub checklist_items: Vec<ChecklistItemResponse>,
}

impl NoteResponse {
    fn from_note(note: Note, checklist_items: Vec<ChecklistItemResponse>) -> Self {
        Self {
            id: note.id,
            board_id: note.board_id,
            created_by: note.created_by,
            color: note.color,
            archived: note.archived_at.is_some(),
            archived_at: note.archived_at,
            created_at: note.created_at,
            updated_at: note.updated_at,
            checklist_items,
        }
    }

    pub fn from_note_with_items(note: NoteWithItems) -> Self {
        Self::from_note(
            note.note,
            ChecklistItemResponse::from_checklist_item_multiple(note.checklist_items),
        )
    }

    pub fn from_note_with_items_multiple(notes: Vec<NoteWithItems>) -> Vec<Self> {
        notes
            .into_iter()
            .map(Self::from_note_with_items)
            .collect()
    }
}

/// Attach the checklist items to the notes and turn them into responses
pub async fn load_note_responses(
    database: &Database,
    notes: Vec<Note>,
) -> Result<Vec<NoteResponse>, Error> {
    let checklist_items = database
        .find_all_checklist_items_by_notes(&notes)
        .await
        .map_err(Error::internal_server_error)?;

    Ok(NoteResponse::from_note_with_items_multiple(
        with_checklist_items(notes, checklist_items),
    ))
}

/// List the visible notes of a board, newest first
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/boards/<uuid>/notes
/// ```
pub async fn list(
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters(board_id): PathParameters<Uuid>,
) -> Result<Success<Vec<NoteResponse>>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let board = fetch_board(&database, &current_user, &board_id).await?;

    let notes = database
        .find_all_notes_by_board(&board)
        .await
        .map_err(Error::internal_server_error)?;

    load_note_responses(&database, notes).await.map(Success::ok)
}

/// Get a single note, archived notes included
pub async fn single(
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters((board_id, note_id)): PathParameters<(Uuid, Uuid)>,
) -> Result<Success<NoteResponse>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let board = fetch_board(&database, &current_user, &board_id).await?;
    let note = fetch_note(&database, &board, &note_id).await?;

    let checklist_items = database
        .find_all_checklist_items_by_note(&note)
        .await
        .map_err(Error::internal_server_error)?;

    Ok(Success::ok(NoteResponse::from_note(
        note,
        ChecklistItemResponse::from_checklist_item_multiple(checklist_items),
    )))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteChecklistItemForm {
    content: String,
    checked: Option<bool>,
    order: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNoteForm {
    color: Option<String>,
    checklist_items: Option<Vec<CreateNoteChecklistItemForm>>,
}

/// Stick a new note on a board, optionally with checklist items
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "color": "#dbeafe", "checklistItems": [{ "content": "Book a room" }] }' \
///     http://localhost:6000/api/boards/<uuid>/notes
/// ```
pub async fn create(
    audit_trail: AuditTrail,
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters(board_id): PathParameters<Uuid>,
    Form(form): Form<CreateNoteForm>,
) -> Result<Success<NoteResponse>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let board = fetch_board(&database, &current_user, &board_id).await?;

    let color = form
        .color
        .as_deref()
        .map_or_else(|| Ok(DEFAULT_COLOR.to_string()), parse_color)?;

    let contents = form
        .checklist_items
        .as_deref()
        .unwrap_or_default()
        .iter()
        .map(|item| parse_content(&item.content))
        .collect::<Result<Vec<String>, Error>>()?;

    let checklist_items = form
        .checklist_items
        .as_deref()
        .unwrap_or_default()
        .iter()
        .zip(&contents)
        .map(|(item, content)| CreateChecklistItemValues {
            content,
            checked: item.checked.unwrap_or(false),
            sort_order: item.order.unwrap_or(0),
        })
        .collect::<Vec<_>>();

    let values = CreateNoteValues {
        user: &current_user,
        color: &color,
        checklist_items: &checklist_items,
    };

    let (note, checklist_items) = database
        .create_note(&board, &values)
        .await
        .map_err(Error::internal_server_error)?;

    audit_trail
        .register(AuditEntry::CreateNote(&board, &note))
        .await;

    Ok(Success::created(NoteResponse::from_note(
        note,
        ChecklistItemResponse::from_checklist_item_multiple(checklist_items),
    )))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteForm {
    color: Option<String>,
    archived: Option<bool>,
}

/// Update a note, `archived` moves it to (or out of) the archive
///
/// Request:
/// ```sh
/// curl -v -XPATCH -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "archived": true }' \
///     http://localhost:6000/api/boards/<uuid>/notes/<uuid>
/// ```
pub async fn update(
    audit_trail: AuditTrail,
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters((board_id, note_id)): PathParameters<(Uuid, Uuid)>,
    Form(form): Form<UpdateNoteForm>,
) -> Result<Success<NoteResponse>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let board = fetch_board(&database, &current_user, &board_id).await?;
    let note = fetch_note(&database, &board, &note_id).await?;

    let color = form.color.as_deref().map(parse_color).transpose()?;

    let values = UpdateNoteValues {
        color: color.as_deref(),
        archived: form.archived,
    };

    let updated_note = database
        .update_note(&note, &values)
        .await
        .map_err(Error::internal_server_error)?;

    let entry = match (note.is_archived(), updated_note.is_archived()) {
        (false, true) => AuditEntry::ArchiveNote(&board, &updated_note),
        (true, false) => AuditEntry::UnarchiveNote(&board, &updated_note),
        _ => AuditEntry::UpdateNote(&board, &updated_note),
    };
    audit_trail.register(entry).await;

    let checklist_items = database
        .find_all_checklist_items_by_note(&updated_note)
        .await
        .map_err(Error::internal_server_error)?;

    Ok(Success::ok(NoteResponse::from_note(
        updated_note,
        ChecklistItemResponse::from_checklist_item_multiple(checklist_items),
    )))
}

/// Soft-delete a note, archived or not
pub async fn delete(
    audit_trail: AuditTrail,
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters((board_id, note_id)): PathParameters<(Uuid, Uuid)>,
) -> Result<Success<&'static str>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let board = fetch_board(&database, &current_user, &board_id).await?;
    let note = fetch_note(&database, &board, &note_id).await?;

    database
        .delete_note(&note)
        .await
        .map_err(Error::internal_server_error)?;

    audit_trail
        .register(AuditEntry::DeleteNote(&board, &note))
        .await;

    Ok(Success::<&'static str>::no_content())
}

/// All visible notes of the organization, across boards
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' http://localhost:6000/api/notes
/// ```
pub async fn all(
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
) -> Result<Success<Vec<NoteResponse>>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let notes = database
        .find_all_visible_notes(&current_user.organization_id)
        .await
        .map_err(Error::internal_server_error)?;

    load_note_responses(&database, notes).await.map(Success::ok)
}

/// All archived notes of the organization, across boards
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' http://localhost:6000/api/notes/archive
/// ```
pub async fn archive(
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
) -> Result<Success<Vec<NoteResponse>>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let notes = database
        .find_all_archived_notes(&current_user.organization_id)
        .await
        .map_err(Error::internal_server_error)?;

    load_note_responses(&database, notes).await.map(Success::ok)
}
