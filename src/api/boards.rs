//! Boards API endpoints
//!
//! Everything related to the board management, boards are scoped to the organization of the
//! current user

use axum::Extension;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::boards::Board;
use crate::database::AuditEntry;
use crate::database::CreateBoardValues;
use crate::database::Database;
use crate::database::UpdateBoardValues;
use crate::labels::visibility_label;
use crate::users::Role;

use super::AuditTrail;
use super::CurrentUser;
use super::Error;
use super::Form;
use super::PathParameters;
use super::Success;
use super::parse_description;
use super::parse_name;
use super::utils::fetch_board;

/// Board response going to the user
///
/// Basically filtering which fields are shown to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    /// Board ID
    pub id: Uuid,

    /// Name of the board
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Can be viewed without logging in
    pub is_public: bool,

    /// `Public` or `Private`
    pub visibility_label: &'static str,

    /// The ID of the user that created it
    pub created_by: Uuid,

    /// Creation date
    pub created_at: NaiveDateTime,

    /// Last updated at
    pub updated_at: NaiveDateTime,
}

impl BoardResponse {
    /// Create a response from a [`Board`](Board)
    pub fn from_board(board: Board) -> Self {
        Self {
            id: board.id,
            name: board.name,
            description: board.description,
            is_public: board.is_public,
            visibility_label: visibility_label(board.is_public),
            created_by: board.created_by,
            created_at: board.created_at,
            updated_at: board.updated_at,
        }
    }
}

/// List all boards, newest first
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/boards
/// ```
///
/// Response:
/// ```json
/// { "data": [ { "id": "<uuid>", "name": "Roadmap", "isPublic": false ... } ] }
/// ```
pub async fn list(
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
) -> Result<Success<Vec<BoardResponse>>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let boards = database
        .find_all_boards(&current_user.organization_id)
        .await
        .map_err(Error::internal_server_error)?;

    Ok(Success::ok(
        boards.into_iter().map(BoardResponse::from_board).collect(),
    ))
}

/// Get a single board
pub async fn single(
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters(board_id): PathParameters<Uuid>,
) -> Result<Success<BoardResponse>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    fetch_board(&database, &current_user, &board_id)
        .await
        .map(|board| Success::ok(BoardResponse::from_board(board)))
}

/// Create board form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBoardForm {
    /// Name of the board, surrounding whitespace is removed
    name: String,

    /// Optional description
    description: Option<String>,

    /// Can be viewed without logging in, defaults to `false`
    is_public: Option<bool>,
}

/// Create a board based on the [`CreateBoardForm`](CreateBoardForm) form
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "name": "Roadmap", "isPublic": true }' \
///     http://localhost:6000/api/boards
/// ```
pub async fn create(
    audit_trail: AuditTrail,
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    Form(form): Form<CreateBoardForm>,
) -> Result<Success<BoardResponse>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let name = parse_name(&form.name)?;
    let description = form.description.as_deref().and_then(parse_description);

    let values = CreateBoardValues {
        user: &current_user,
        name: &name,
        description: description.as_deref(),
        is_public: form.is_public.unwrap_or(false),
    };

    let board = database
        .create_board(&values)
        .await
        .map_err(Error::internal_server_error)?;

    audit_trail.register(AuditEntry::CreateBoard(&board)).await;

    Ok(Success::created(BoardResponse::from_board(board)))
}

/// Update board form
///
/// All fields are optional and are not touched when not provided
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBoardForm {
    /// New name
    name: Option<String>,

    /// New description, an empty one removes it
    description: Option<String>,

    /// New visibility
    is_public: Option<bool>,
}

/// Update a board based on the [`UpdateBoardForm`](UpdateBoardForm) form
///
/// Request:
/// ```sh
/// curl -v -XPATCH -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "isPublic": false }' \
///     http://localhost:6000/api/boards/<uuid>
/// ```
pub async fn update(
    audit_trail: AuditTrail,
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters(board_id): PathParameters<Uuid>,
    Form(form): Form<UpdateBoardForm>,
) -> Result<Success<BoardResponse>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let board = fetch_board(&database, &current_user, &board_id).await?;

    let name = form.name.as_deref().map(parse_name).transpose()?;
    let description = form.description.as_deref().map(parse_description);

    let values = UpdateBoardValues {
        name: name.as_deref(),
        description: description.as_ref().map(Option::as_deref),
        is_public: form.is_public,
    };

    let updated_board = database
        .update_board(&board, &values)
        .await
        .map_err(Error::internal_server_error)?;

    audit_trail
        .register(AuditEntry::UpdateBoard(&updated_board))
        .await;

    Ok(Success::ok(BoardResponse::from_board(updated_board)))
}

/// Delete a board
///
/// The notes of the board are no longer reachable, they disappear from the All Notes and
/// Archive views as well
pub async fn delete(
    audit_trail: AuditTrail,
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters(board_id): PathParameters<Uuid>,
) -> Result<Success<&'static str>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let board = fetch_board(&database, &current_user, &board_id).await?;

    database
        .delete_board(&board)
        .await
        .map_err(Error::internal_server_error)?;

    audit_trail.register(AuditEntry::DeleteBoard(&board)).await;

    Ok(Success::<&'static str>::no_content())
}
