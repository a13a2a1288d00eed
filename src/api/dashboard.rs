//! Dashboard: one card per board, preceded by the "All Notes" and "Archive" cards
//!
//! Each card carries its notes count and how long ago something happened on it

use axum::Extension;
use chrono::NaiveDateTime;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use crate::activity::ActivitySummary;
use crate::activity::NoteWithItems;
use crate::activity::View;
use crate::activity::summarize;
use crate::activity::with_checklist_items;
use crate::boards::Board;
use crate::database::Database;
use crate::labels::notes_count_label;
use crate::labels::time_ago;
use crate::labels::visibility_label;
use crate::users::Role;

use super::CurrentUser;
use super::Error;
use super::Success;

const ALL_NOTES_NAME: &str = "All Notes";
const ALL_NOTES_HREF: &str = "/boards/all-notes";
const ARCHIVE_NAME: &str = "Archive";
const ARCHIVE_HREF: &str = "/boards/archive";

/// What a card stands for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardKind {
    AllNotes,
    Archive,
    Board,
}

/// A card on the dashboard
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub kind: CardKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub href: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility_label: Option<&'static str>,
    pub notes_count: usize,
    pub notes_count_label: String,
    pub last_activity_at: Option<NaiveDateTime>,
    pub activity_label: String,
}

impl Card {
    fn view(
        kind: CardKind,
        name: &str,
        href: &str,
        summary: ActivitySummary,
        now: NaiveDateTime,
    ) -> Self {
        Self {
            kind,
            id: None,
            href: href.to_string(),
            name: name.to_string(),
            description: None,
            is_public: None,
            visibility_label: None,
            notes_count: summary.notes_count,
            notes_count_label: notes_count_label(summary.notes_count),
            last_activity_at: summary.last_activity_at,
            activity_label: time_ago(now, summary.last_activity_at),
        }
    }

    fn board(board: Board, summary: ActivitySummary, now: NaiveDateTime) -> Self {
        Self {
            kind: CardKind::Board,
            id: Some(board.id),
            href: format!("/boards/{}", board.id),
            name: board.name,
            description: board.description,
            is_public: Some(board.is_public),
            visibility_label: Some(visibility_label(board.is_public)),
            notes_count: summary.notes_count,
            notes_count_label: notes_count_label(summary.notes_count),
            last_activity_at: summary.last_activity_at,
            activity_label: time_ago(now, summary.last_activity_at),
        }
    }
}

/// Build all cards, relative to `now`
///
/// `notes` are all non-deleted notes of `boards`, archived ones included
fn build_cards(boards: Vec<Board>, notes: &[NoteWithItems], now: NaiveDateTime) -> Vec<Card> {
    let mut cards = Vec::with_capacity(boards.len() + 2);

    cards.push(Card::view(
        CardKind::AllNotes,
        ALL_NOTES_NAME,
        ALL_NOTES_HREF,
        summarize(View::AllNotes, None, notes),
        now,
    ));
    cards.push(Card::view(
        CardKind::Archive,
        ARCHIVE_NAME,
        ARCHIVE_HREF,
        summarize(View::Archive, None, notes),
        now,
    ));

    for board in boards {
        let summary = summarize(
            View::Board,
            Some(board.updated_at),
            notes.iter().filter(|note| note.note.board_id == board.id),
        );

        cards.push(Card::board(board, summary, now));
    }

    cards
}

/// Get the dashboard cards of the organization of the current user
///
/// Request:
/// ```sh
/// curl -v -H 'Authorization: Bearer tokentokentoken' http://localhost:6000/api/dashboard
/// ```
pub async fn cards(
    Extension(database): Extension<Database>,
    current_user: CurrentUser,
) -> Result<Success<Vec<Card>>, Error> {
    current_user.role.is_allowed(Role::Manager)?;

    let boards = database
        .find_all_boards(&current_user.organization_id)
        .await
        .map_err(Error::internal_server_error)?;

    let notes = database
        .find_all_notes_by_boards(&boards)
        .await
        .map_err(Error::internal_server_error)?;

    let checklist_items = database
        .find_all_checklist_items_by_notes(&notes)
        .await
        .map_err(Error::internal_server_error)?;

    let notes = with_checklist_items(notes, checklist_items);

    Ok(Success::ok(build_cards(
        boards,
        &notes,
        Utc::now().naive_utc(),
    )))
}
