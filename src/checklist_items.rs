//! Checklist items

use chrono::naive::NaiveDateTime;
use uuid::Uuid;

/// A sub-task line item of a note
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct ChecklistItem {
    /// Checklist item ID
    pub id: Uuid,

    /// Note the item belongs to
    pub note_id: Uuid,

    /// Text of the item
    pub content: String,

    /// Is the item done?
    pub checked: bool,

    /// Position within the note, lower comes first
    pub sort_order: i32,

    /// Creation date
    pub created_at: NaiveDateTime,

    /// Last updated at
    pub updated_at: NaiveDateTime,

    /// Soft-deleted at
    pub deleted_at: Option<NaiveDateTime>,
}

impl ChecklistItem {
    /// Is the checklist item soft-deleted?
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}
