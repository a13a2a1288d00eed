//! Notes count and last activity of a board card
//!
//! Each card on the dashboard summarizes a set of notes: a single board, all notes of the
//! organization or the archive. Which notes are counted and which notes move the "last activity"
//! timestamp depends on the [`View`].

use std::collections::HashMap;

use chrono::NaiveDateTime;
use uuid::Uuid;

use crate::checklist_items::ChecklistItem;
use crate::notes::Note;

/// The set of notes a card summarizes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    /// A single board
    Board,

    /// All visible notes of all boards
    AllNotes,

    /// All archived notes of all boards
    Archive,
}

impl View {
    /// Does the note add to the notes count of this view?
    pub fn counts(self, note: &Note) -> bool {
        match self {
            Self::Board | Self::AllNotes => note.is_visible(),
            Self::Archive => note.is_archived() && !note.is_deleted(),
        }
    }

    /// Does the note add to the last activity of this view?
    ///
    /// Archiving a note is activity on its board, so archived notes still count there
    pub fn tracks_activity(self, note: &Note) -> bool {
        match self {
            Self::Board => !note.is_deleted(),
            Self::AllNotes | Self::Archive => self.counts(note),
        }
    }
}

/// A note together with its checklist items
#[derive(Clone, Debug)]
pub struct NoteWithItems {
    /// The note
    pub note: Note,

    /// Checklist items of the note, in order
    pub checklist_items: Vec<ChecklistItem>,
}

impl NoteWithItems {
    /// Most recent update of the note or any of its (non-deleted) checklist items
    fn last_updated_at(&self) -> NaiveDateTime {
        self.checklist_items
            .iter()
            .filter(|item| !item.is_deleted())
            .map(|item| item.updated_at)
            .fold(self.note.updated_at, NaiveDateTime::max)
    }
}

/// Attach checklist items to their notes
///
/// Keeps the order of both the notes and the checklist items, items without a matching note
/// are dropped
pub fn with_checklist_items(notes: Vec<Note>, items: Vec<ChecklistItem>) -> Vec<NoteWithItems> {
    let mut items_by_note: HashMap<Uuid, Vec<ChecklistItem>> = HashMap::new();

    for item in items {
        items_by_note.entry(item.note_id).or_default().push(item);
    }

    notes
        .into_iter()
        .map(|note| {
            let checklist_items = items_by_note.remove(&note.id).unwrap_or_default();

            NoteWithItems {
                note,
                checklist_items,
            }
        })
        .collect()
}

/// Result of summarizing a set of notes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActivitySummary {
    /// Number of notes counted by the view
    pub notes_count: usize,

    /// Most recent activity, if any
    pub last_activity_at: Option<NaiveDateTime>,
}

/// Summarize notes for a view
///
/// `since` is the activity of the container itself (the board's own update time), it is only
/// the last activity when none of the notes contribute any.
pub fn summarize<'a, I>(view: View, since: Option<NaiveDateTime>, notes: I) -> ActivitySummary
where
    I: IntoIterator<Item = &'a NoteWithItems>,
{
    let mut notes_count = 0;
    let mut last_activity_at: Option<NaiveDateTime> = None;

    for note in notes {
        if view.counts(&note.note) {
            notes_count += 1;
        }

        if view.tracks_activity(&note.note) {
            let updated_at = note.last_updated_at();

            last_activity_at = Some(last_activity_at.map_or(updated_at, |at| at.max(updated_at)));
        }
    }

    ActivitySummary {
        notes_count,
        last_activity_at: last_activity_at.or(since),
    }
}
