//! Checklist items API endpoints

use axum::Extension;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde::Serialize;
use uuid::Uuid;

use crate::checklist_items::ChecklistItem;
use crate::database::AuditEntry;
use crate::database::CreateChecklistItemValues;
use crate::database::Database;
use crate::database::UpdateChecklistItemValues;
use crate::users::Role;

use super::AuditTrail;
use super::CurrentUser;
use super::Error;
use super::Form;
use super::PathParameters;
use super::Success;
use super::parse_content;
use super::utils::fetch_board;
use super::utils::fetch_checklist_item;
use super::utils::fetch_note;

/// Checklist item response going to the user
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistItemResponse {
    /// Checklist item ID
    pub id: Uuid,

    /// Text of the item
    pub content: String,

    /// Is the item done?
    pub checked: bool,

    /// Position within the note
    pub order: i32,

    /// Creation date
    pub created_at: NaiveDateTime,

    /// Last updated at
    pub updated_at: NaiveDateTime,
}

impl ChecklistItemResponse {
    /// Create a response from a [`ChecklistItem`](ChecklistItem)
    pub fn from_checklist_item(checklist_item: ChecklistItem) -> Self {
        Self {
            id: checklist_item.id,
            content: checklist_item.content,
            checked: checklist_item.checked,
            order: checklist_item.sort_order,
            created_at: checklist_item.created_at,
            updated_at: checklist_item.updated_at,
        }
    }

    /// Create a response from multiple [`ChecklistItem`](ChecklistItem)s
    pub fn from_checklist_item_multiple(checklist_items: Vec<ChecklistItem>) -> Vec<Self> {
        checklist_items
            .into_iter()
            .map(Self::from_checklist_item)
            .collect()
    }
}

/// List the checklist items of a note, in order
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' \
///     http://localhost:6000/api/boards/<uuid>/notes/<uuid>/checklist-items
/// ```
pub async fn list(
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters((board_id, note_id)): PathParameters<(Uuid, Uuid)>,
) -> Result<Success<Vec<ChecklistItemResponse>>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let board = fetch_board(&database, &current_user, &board_id).await?;
    let note = fetch_note(&database, &board, &note_id).await?;

    let checklist_items = database
        .find_all_checklist_items_by_note(&note)
        .await
        .map_err(Error::internal_server_error)?;

    Ok(Success::ok(
        ChecklistItemResponse::from_checklist_item_multiple(checklist_items),
    ))
}

/// Get a single checklist item
pub async fn single(
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters((board_id, note_id, checklist_item_id)): PathParameters<(Uuid, Uuid, Uuid)>,
) -> Result<Success<ChecklistItemResponse>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let board = fetch_board(&database, &current_user, &board_id).await?;
    let note = fetch_note(&database, &board, &note_id).await?;

    fetch_checklist_item(&database, &note, &checklist_item_id)
        .await
        .map(|checklist_item| {
            Success::ok(ChecklistItemResponse::from_checklist_item(checklist_item))
        })
}

/// Create checklist item form
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateChecklistItemForm {
    /// Text of the item
    pub content: String,

    /// Is the item done? Defaults to `false`
    pub checked: Option<bool>,

    /// Position within the note, defaults to `0`
    pub order: Option<i32>,
}

/// Create a checklist item on a note
///
/// Request:
/// ```sh
/// curl -v -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "content": "Call the printer", "order": 1 }' \
///     http://localhost:6000/api/boards/<uuid>/notes/<uuid>/checklist-items
/// ```
pub async fn create(
    audit_trail: AuditTrail,
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters((board_id, note_id)): PathParameters<(Uuid, Uuid)>,
    Form(form): Form<CreateChecklistItemForm>,
) -> Result<Success<ChecklistItemResponse>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let board = fetch_board(&database, &current_user, &board_id).await?;
    let note = fetch_note(&database, &board, &note_id).await?;

    let content = parse_content(&form.content)?;

    let values = CreateChecklistItemValues {
        content: &content,
        checked: form.checked.unwrap_or(false),
        sort_order: form.order.unwrap_or(0),
    };

    let checklist_item = database
        .create_checklist_item(&note, &values)
        .await
        .map_err(Error::internal_server_error)?;

    audit_trail
        .register(AuditEntry::CreateChecklistItem(
            &board,
            &note,
            &checklist_item,
        ))
        .await;

    Ok(Success::created(
        ChecklistItemResponse::from_checklist_item(checklist_item),
    ))
}

/// Update checklist item form
///
/// All fields are optional and are not touched when not provided
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateChecklistItemForm {
    /// New text
    content: Option<String>,

    /// New checked state
    checked: Option<bool>,

    /// New position
    order: Option<i32>,
}

/// Update a checklist item, for example to check it off
///
/// Request:
/// ```sh
/// curl -v -XPATCH -H 'Content-Type: application/json' \
///     -H 'Authorization: Bearer tokentokentoken' \
///     -d '{ "checked": true }' \
///     http://localhost:6000/api/boards/<uuid>/notes/<uuid>/checklist-items/<uuid>
/// ```
pub async fn update(
    audit_trail: AuditTrail,
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters((board_id, note_id, checklist_item_id)): PathParameters<(Uuid, Uuid, Uuid)>,
    Form(form): Form<UpdateChecklistItemForm>,
) -> Result<Success<ChecklistItemResponse>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let board = fetch_board(&database, &current_user, &board_id).await?;
    let note = fetch_note(&database, &board, &note_id).await?;
    let checklist_item = fetch_checklist_item(&database, &note, &checklist_item_id).await?;

    let content = form.content.as_deref().map(parse_content).transpose()?;

    let values = UpdateChecklistItemValues {
        content: content.as_deref(),
        checked: form.checked,
        sort_order: form.order,
    };

    let updated_checklist_item = database
        .update_checklist_item(&checklist_item, &values)
        .await
        .map_err(Error::internal_server_error)?;

    audit_trail
        .register(AuditEntry::UpdateChecklistItem(
            &board,
            &note,
            &updated_checklist_item,
        ))
        .await;

    Ok(Success::ok(ChecklistItemResponse::from_checklist_item(
        updated_checklist_item,
    )))
}

/// Delete a checklist item
pub async fn delete(
    audit_trail: AuditTrail,
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
    PathParameters((board_id, note_id, checklist_item_id)): PathParameters<(Uuid, Uuid, Uuid)>,
) -> Result<Success<&'static str>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let board = fetch_board(&database, &current_user, &board_id).await?;
    let note = fetch_note(&database, &board, &note_id).await?;
    let checklist_item = fetch_checklist_item(&database, &note, &checklist_item_id).await?;

    database
        .delete_checklist_item(&checklist_item)
        .await
        .map_err(Error::internal_server_error)?;

    audit_trail
        .register(AuditEntry::DeleteChecklistItem(
            &board,
            &note,
            &checklist_item,
        ))
        .await;

    Ok(Success::<&'static str>::no_content())
}
