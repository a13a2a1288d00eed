//! Form types

use uuid::Uuid;

use crate::boards::Board;
use crate::checklist_items::ChecklistItem;
use crate::notes::Note;
use crate::users::Role;
use crate::users::User;

/// Values to create a User
pub struct CreateUserValues<'a> {
    /// The organization the user joins
    pub organization_id: &'a Uuid,

    /// The initial session ID for the user
    pub session_id: &'a Uuid,

    /// The role of the user
    pub role: Role,

    /// The username
    pub username: &'a str,

    /// The hashed password
    pub hashed_password: &'a str,
}

/// Values to change a password of a user
pub struct ChangePasswordValues<'a> {
    /// New session ID to invalidate current tokens
    pub session_id: &'a Uuid,

    /// The new hashed password
    pub hashed_password: &'a str,
}

/// Values to create a Board
pub struct CreateBoardValues<'a> {
    /// The user creating the board, the board joins their organization
    pub user: &'a User,

    /// Name of the board
    pub name: &'a str,

    /// Optional description
    pub description: Option<&'a str>,

    /// Can be viewed without logging in
    pub is_public: bool,
}

/// Values to update a Board
///
/// Fields that are `None` are not touched
pub struct UpdateBoardValues<'a> {
    /// New name
    pub name: Option<&'a str>,

    /// New description, `Some(None)` removes it
    pub description: Option<Option<&'a str>>,

    /// New visibility
    pub is_public: Option<bool>,
}

/// Values to create a Note
pub struct CreateNoteValues<'a> {
    /// User creating the note
    pub user: &'a User,

    /// Hex color of the note
    pub color: &'a str,

    /// Checklist items to create together with the note
    pub checklist_items: &'a [CreateChecklistItemValues<'a>],
}

/// Values to update a Note
pub struct UpdateNoteValues<'a> {
    /// New color
    pub color: Option<&'a str>,

    /// Archive (`true`) or restore (`false`) the note
    pub archived: Option<bool>,
}

/// Values to create a ChecklistItem
pub struct CreateChecklistItemValues<'a> {
    /// Text of the item
    pub content: &'a str,

    /// Is the item done?
    pub checked: bool,

    /// Position within the note
    pub sort_order: i32,
}

/// Values to update a ChecklistItem
pub struct UpdateChecklistItemValues<'a> {
    /// New text
    pub content: Option<&'a str>,

    /// New checked state
    pub checked: Option<bool>,

    /// New position
    pub sort_order: Option<i32>,
}

/// Possible audit trail entry types
pub enum AuditEntry<'a> {
    /// User is created
    CreateUser(&'a User),

    /// User has a changed password
    ChangePassword(&'a User),

    /// User is deleted
    DeleteUser(&'a User),

    /// Board is created
    CreateBoard(&'a Board),

    /// Board is updated
    UpdateBoard(&'a Board),

    /// Board is deleted
    DeleteBoard(&'a Board),

    /// Note is created
    CreateNote(&'a Board, &'a Note),

    /// Note is updated
    UpdateNote(&'a Board, &'a Note),

    /// Note is archived
    ArchiveNote(&'a Board, &'a Note),

    /// Note is restored from the archive
    UnarchiveNote(&'a Board, &'a Note),

    /// Note is deleted
    DeleteNote(&'a Board, &'a Note),

    /// Checklist item is created
    CreateChecklistItem(&'a Board, &'a Note, &'a ChecklistItem),

    /// Checklist item is updated
    UpdateChecklistItem(&'a Board, &'a Note, &'a ChecklistItem),

    /// Checklist item is deleted
    DeleteChecklistItem(&'a Board, &'a Note, &'a ChecklistItem),
}
