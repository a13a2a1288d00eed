//! Boards

use chrono::naive::NaiveDateTime;
use uuid::Uuid;

/// A named collection of notes
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Board {
    /// Board ID
    pub id: Uuid,

    /// Organization owning the board
    #[expect(dead_code)] // used by sqlx
    pub organization_id: Uuid,

    /// The ID of the user that created it
    pub created_by: Uuid,

    /// Name shown on the board card
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Can be viewed without logging in
    pub is_public: bool,

    /// Creation date
    pub created_at: NaiveDateTime,

    /// Last updated at
    pub updated_at: NaiveDateTime,

    /// Soft-deleted at
    #[expect(dead_code)] // used by sqlx
    pub deleted_at: Option<NaiveDateTime>,
}
