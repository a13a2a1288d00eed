//! Utility functions for the API

use uuid::Uuid;

use crate::api::Error;
use crate::boards::Board;
use crate::checklist_items::ChecklistItem;
use crate::database::Database;
use crate::notes::Note;
use crate::users::User;

/// Fetch a board of the organization of the user from database
pub async fn fetch_board(database: &Database, user: &User, board_id: &Uuid) -> Result<Board, Error> {
    database
        .find_single_board_by_id(&user.organization_id, board_id)
        .await
        .map_err(Error::internal_server_error)?
        .map_or_else(|| Err(Error::not_found("Board not found")), Ok)
}

/// Fetch a note of a board from database
pub async fn fetch_note(database: &Database, board: &Board, note_id: &Uuid) -> Result<Note, Error> {
    database
        .find_single_note_by_id(&board.id, note_id)
        .await
        .map_err(Error::internal_server_error)?
        .map_or_else(|| Err(Error::not_found("Note not found")), Ok)
}

/// Fetch a checklist item of a note from database
pub async fn fetch_checklist_item(
    database: &Database,
    note: &Note,
    checklist_item_id: &Uuid,
) -> Result<ChecklistItem, Error> {
    database
        .find_single_checklist_item_by_id(&note.id, checklist_item_id)
        .await
        .map_err(Error::internal_server_error)?
        .map_or_else(|| Err(Error::not_found("Checklist item not found")), Ok)
}
