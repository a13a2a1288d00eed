//! Read-only view of public boards, no authentication needed

use axum::Extension;
use serde::Serialize;
use uuid::Uuid;

use crate::database::Database;

use super::Error;
use super::PathParameters;
use super::Success;
use super::boards::BoardResponse;
use super::notes::NoteResponse;
use super::notes::load_note_responses;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicBoardResponse {
    pub board: BoardResponse,
    pub notes: Vec<NoteResponse>,
}

/// Get a public board with its visible notes
///
/// Private boards are answered the same as missing ones
///
/// Request:
/// ```sh
/// curl -v http://localhost:6000/api/public/boards/<uuid>
/// ```
pub async fn board(
    Extension(database): Extension<Database>,
    PathParameters(board_id): PathParameters<Uuid>,
) -> Result<Success<PublicBoardResponse>, Error> {
    let board = database
        .find_single_public_board_by_id(&board_id)
        .await
        .map_err(Error::internal_server_error)?
        .ok_or_else(|| Error::not_found("Board not found"))?;

    let notes = database
        .find_all_notes_by_board(&board)
        .await
        .map_err(Error::internal_server_error)?;

    let notes = load_note_responses(&database, notes).await?;

    Ok(Success::ok(PublicBoardResponse {
        board: BoardResponse::from_board(board),
        notes,
    }))
}
