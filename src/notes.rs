//! Sticky notes

use chrono::naive::NaiveDateTime;
use uuid::Uuid;

/// Color new notes get when none is given
pub const DEFAULT_COLOR: &str = "#fef3c7";

/// A sticky note on a board
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Note {
    /// Note ID
    pub id: Uuid,

    /// Board the note is stuck on
    pub board_id: Uuid,

    /// The ID of the user that created it
    pub created_by: Uuid,

    /// Hex color of the note
    pub color: String,

    /// Creation date
    pub created_at: NaiveDateTime,

    /// Last updated at
    pub updated_at: NaiveDateTime,

    /// Archived at
    pub archived_at: Option<NaiveDateTime>,

    /// Soft-deleted at
    pub deleted_at: Option<NaiveDateTime>,
}

impl Note {
    /// Is the note soft-deleted?
    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// Is the note archived?
    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    /// Visible on its board: neither archived nor deleted
    pub fn is_visible(&self) -> bool {
        !self.is_deleted() && !self.is_archived()
    }
}

/// Is the color a `#rgb` or `#rrggbb` hex color?
pub fn is_valid_color(color: &str) -> bool {
    let Some(hex) = color.strip_prefix('#') else {
        return false;
    };

    (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|ch| ch.is_ascii_hexdigit())
}
