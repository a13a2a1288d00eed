//! All things related to the storage of boards, notes and checklist items

use core::fmt;
use std::net::IpAddr;
use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::ipnetwork::IpNetwork;
use uuid::Uuid;

pub use Config as DatabaseConfig;
pub use form_types::*;

use crate::boards::Board;
use crate::checklist_items::ChecklistItem;
use crate::notes::Note;
use crate::organizations::Organization;
use crate::users::User;
use types::AuditEntryType;
use types::MIGRATOR;
use types::SqlxUser;
use types::UserRoleType;

mod form_types;
mod types;

/// Storage errors
#[derive(Debug)]
pub enum Error {
    /// A connection error with the storage
    Connection(String),
}

impl std::error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::Connection(error) => write!(f, "Connection error: {error}"),
        }
    }
}

/// Result type for all storage interactions
pub type Result<T> = core::result::Result<T, Error>;

/// Database configuration
pub enum Config {
    /// Detect configuration from environment
    DetectConfig,

    /// Use existing connection
    ExistingConnection(PgPool),
}

/// Postgres storage
#[derive(Clone)]
pub struct Database {
    /// Pool of connections
    connection_pool: PgPool,
}

impl Database {
    /// Create a new Postgres storage
    pub async fn from_config(config: Config) -> anyhow::Result<Self> {
        match config {
            Config::DetectConfig => Self::new().await,
            Config::ExistingConnection(pool) => Self::new_with_pool(pool).await,
        }
    }

    /// Create Postgres storage
    ///
    /// Use the `DATABASE_URL` environment variable
    ///
    /// Migrations will be run
    async fn new() -> anyhow::Result<Self> {
        let database_connection_string = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("`DATABASE_URL` is not set"))?;

        let connection_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_connection_string)
            .await?;

        Self::new_with_pool(connection_pool).await
    }

    /// Create Postgres storage with existing pool
    ///
    /// Migrations will be run
    async fn new_with_pool(connection_pool: PgPool) -> anyhow::Result<Self> {
        MIGRATOR
            .run(&connection_pool)
            .await
            .map_err(|err| anyhow::anyhow!("Migrations could not run: {err}"))?;

        Ok(Self { connection_pool })
    }
}

/// Organizations
impl Database {
    /// Find any single organization
    ///
    /// Respects the soft-delete
    pub async fn find_any_single_organization(&self) -> Result<Option<Organization>> {
        sqlx::query_as::<_, Organization>(
            r"
            SELECT *
            FROM organizations
            WHERE deleted_at IS NULL
            ORDER BY created_at
            LIMIT 1
            ",
        )
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    /// Create an organization
    pub async fn create_organization(&self, name: &str) -> Result<Organization> {
        sqlx::query_as::<_, Organization>(
            r"
            INSERT INTO organizations (id, name)
            VALUES ($1, $2)
            RETURNING *
            ",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(connection_error)
    }
}

/// Users
impl Database {
    /// Find any single user
    ///
    /// Respects the soft-delete
    pub async fn find_any_single_user(&self) -> Result<Option<User>> {
        sqlx::query_as::<_, SqlxUser>(
            r"
            SELECT *
            FROM users
            WHERE deleted_at IS NULL
            LIMIT 1
            ",
        )
        .fetch_optional(&self.connection_pool)
        .await
        .map(User::from_sqlx_user_optional)
        .map_err(connection_error)
    }

    /// Finds all users of an organization
    ///
    /// Respects the soft-delete
    pub async fn find_all_users(&self, organization_id: &Uuid) -> Result<Vec<User>> {
        sqlx::query_as::<_, SqlxUser>(
            r"
            SELECT *
            FROM users
            WHERE deleted_at IS NULL AND organization_id = $1
            ORDER BY created_at
            ",
        )
        .bind(organization_id)
        .fetch_all(&self.connection_pool)
        .await
        .map(User::from_sqlx_user_multiple)
        .map_err(connection_error)
    }

    /// Finds a single user by its username
    ///
    /// DOES NOT respect the soft-delete, handle with care
    pub async fn find_single_user_by_username_unchecked(
        &self,
        username: &str,
    ) -> Result<Option<User>> {
        sqlx::query_as::<_, SqlxUser>(
            r"
            SELECT *
            FROM users
            WHERE username = $1
            ORDER BY deleted_at DESC NULLS FIRST
            LIMIT 1
            ",
        )
        .bind(username)
        .fetch_optional(&self.connection_pool)
        .await
        .map(User::from_sqlx_user_optional)
        .map_err(connection_error)
    }

    /// Finds a single user by its username
    ///
    /// Respects the soft-delete
    pub async fn find_single_user_by_username(&self, username: &str) -> Result<Option<User>> {
        sqlx::query_as::<_, SqlxUser>(
            r"
            SELECT *
            FROM users
            WHERE deleted_at IS NULL AND username = $1
            LIMIT 1
            ",
        )
        .bind(username)
        .fetch_optional(&self.connection_pool)
        .await
        .map(User::from_sqlx_user_optional)
        .map_err(connection_error)
    }

    /// Finds a single user by its ID
    ///
    /// Respects the soft-delete
    pub async fn find_single_user_by_id(&self, id: &Uuid) -> Result<Option<User>> {
        sqlx::query_as::<_, SqlxUser>(
            r"
            SELECT *
            FROM users
            WHERE deleted_at IS NULL AND id = $1
            LIMIT 1
            ",
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await
        .map(User::from_sqlx_user_optional)
        .map_err(connection_error)
    }

    /// Create a single user
    pub async fn create_user(&self, values: &CreateUserValues<'_>) -> Result<User> {
        sqlx::query_as::<_, SqlxUser>(
            r"
            INSERT INTO users (id, organization_id, session_id, username, hashed_password, role)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(Uuid::new_v4())
        .bind(values.organization_id)
        .bind(values.session_id)
        .bind(values.username)
        .bind(values.hashed_password)
        .bind(UserRoleType::from_role(values.role))
        .fetch_one(&self.connection_pool)
        .await
        .map(User::from_sqlx_user)
        .map_err(connection_error)
    }

    /// Change the password of a user
    pub async fn change_password(
        &self,
        user: &User,
        values: &ChangePasswordValues<'_>,
    ) -> Result<User> {
        sqlx::query_as::<_, SqlxUser>(
            r"
            UPDATE users
            SET session_id = $1,
                hashed_password = $2,
                updated_at = timezone('utc', CURRENT_TIMESTAMP)
            WHERE id = $3
            RETURNING *
            ",
        )
        .bind(values.session_id)
        .bind(values.hashed_password)
        .bind(user.id)
        .fetch_one(&self.connection_pool)
        .await
        .map(User::from_sqlx_user)
        .map_err(connection_error)
    }

    /// Soft-delete a user
    pub async fn delete_user(&self, user: &User) -> Result<()> {
        soft_delete(&self.connection_pool, "users", &user.id).await
    }
}

/// Boards
impl Database {
    /// Find all boards of an organization, newest first
    ///
    /// Respects the soft-delete
    pub async fn find_all_boards(&self, organization_id: &Uuid) -> Result<Vec<Board>> {
        sqlx::query_as::<_, Board>(
            r"
            SELECT *
            FROM boards
            WHERE deleted_at IS NULL AND organization_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(organization_id)
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    /// Find a single board of an organization by ID
    ///
    /// Respects the soft-delete
    pub async fn find_single_board_by_id(
        &self,
        organization_id: &Uuid,
        board_id: &Uuid,
    ) -> Result<Option<Board>> {
        sqlx::query_as::<_, Board>(
            r"
            SELECT *
            FROM boards
            WHERE deleted_at IS NULL AND organization_id = $1 AND id = $2
            LIMIT 1
            ",
        )
        .bind(organization_id)
        .bind(board_id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    /// Find a single public board by ID, regardless of organization
    ///
    /// Respects the soft-delete
    pub async fn find_single_public_board_by_id(&self, board_id: &Uuid) -> Result<Option<Board>> {
        sqlx::query_as::<_, Board>(
            r"
            SELECT *
            FROM boards
            WHERE deleted_at IS NULL AND is_public AND id = $1
            LIMIT 1
            ",
        )
        .bind(board_id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    /// Create a board
    pub async fn create_board(&self, values: &CreateBoardValues<'_>) -> Result<Board> {
        sqlx::query_as::<_, Board>(
            r"
            INSERT INTO boards (id, organization_id, created_by, name, description, is_public)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(Uuid::new_v4())
        .bind(values.user.organization_id)
        .bind(values.user.id)
        .bind(values.name)
        .bind(values.description)
        .bind(values.is_public)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    /// Update a single board
    pub async fn update_board(&self, board: &Board, values: &UpdateBoardValues<'_>) -> Result<Board> {
        sqlx::query_as::<_, Board>(
            r"
            UPDATE boards
            SET name = $1,
                description = $2,
                is_public = $3,
                updated_at = timezone('utc', CURRENT_TIMESTAMP)
            WHERE id = $4
            RETURNING *
            ",
        )
        .bind(values.name.unwrap_or(&board.name))
        .bind(values.description.unwrap_or(board.description.as_deref()))
        .bind(values.is_public.unwrap_or(board.is_public))
        .bind(board.id)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    /// Soft-delete a board
    pub async fn delete_board(&self, board: &Board) -> Result<()> {
        soft_delete(&self.connection_pool, "boards", &board.id).await
    }
}

/// Notes
impl Database {
    /// Find all visible notes of a board, newest first
    ///
    /// Respects the soft-delete and the archive
    pub async fn find_all_notes_by_board(&self, board: &Board) -> Result<Vec<Note>> {
        sqlx::query_as::<_, Note>(
            r"
            SELECT *
            FROM notes
            WHERE deleted_at IS NULL AND archived_at IS NULL AND board_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(board.id)
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    /// Find all notes of all boards, including the archived ones
    ///
    /// Respects the soft-delete
    pub async fn find_all_notes_by_boards(&self, boards: &[Board]) -> Result<Vec<Note>> {
        if boards.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, Note>(
            r"
            SELECT *
            FROM notes
            WHERE deleted_at IS NULL AND board_id = ANY($1)
            ORDER BY created_at DESC
            ",
        )
        .bind(boards.iter().map(|board| board.id).collect::<Vec<Uuid>>())
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    /// Find all visible notes of all boards of an organization, most recently updated first
    ///
    /// Respects the soft-delete (of both the notes and the boards) and the archive
    pub async fn find_all_visible_notes(&self, organization_id: &Uuid) -> Result<Vec<Note>> {
        sqlx::query_as::<_, Note>(
            r"
            SELECT notes.*
            FROM notes
            INNER JOIN boards ON boards.id = notes.board_id
            WHERE boards.deleted_at IS NULL
                AND boards.organization_id = $1
                AND notes.deleted_at IS NULL
                AND notes.archived_at IS NULL
            ORDER BY notes.updated_at DESC
            ",
        )
        .bind(organization_id)
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    /// Find all archived notes of all boards of an organization, most recently archived first
    ///
    /// Respects the soft-delete (of both the notes and the boards)
    pub async fn find_all_archived_notes(&self, organization_id: &Uuid) -> Result<Vec<Note>> {
        sqlx::query_as::<_, Note>(
            r"
            SELECT notes.*
            FROM notes
            INNER JOIN boards ON boards.id = notes.board_id
            WHERE boards.deleted_at IS NULL
                AND boards.organization_id = $1
                AND notes.deleted_at IS NULL
                AND notes.archived_at IS NOT NULL
            ORDER BY notes.archived_at DESC
            ",
        )
        .bind(organization_id)
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    /// Find single note of a board, archived or not
    ///
    /// Respects the soft-delete
    pub async fn find_single_note_by_id(
        &self,
        board_id: &Uuid,
        note_id: &Uuid,
    ) -> Result<Option<Note>> {
        sqlx::query_as::<_, Note>(
            r"
            SELECT *
            FROM notes
            WHERE deleted_at IS NULL AND board_id = $1 AND id = $2
            LIMIT 1
            ",
        )
        .bind(board_id)
        .bind(note_id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    /// Create a note together with its initial checklist items
    pub async fn create_note(
        &self,
        board: &Board,
        values: &CreateNoteValues<'_>,
    ) -> Result<(Note, Vec<ChecklistItem>)> {
        let mut transaction = self.connection_pool.begin().await.map_err(connection_error)?;

        let note = sqlx::query_as::<_, Note>(
            r"
            INSERT INTO notes (id, board_id, created_by, color)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            ",
        )
        .bind(Uuid::new_v4())
        .bind(board.id)
        .bind(values.user.id)
        .bind(values.color)
        .fetch_one(&mut *transaction)
        .await
        .map_err(connection_error)?;

        let mut checklist_items = Vec::with_capacity(values.checklist_items.len());

        for item_values in values.checklist_items {
            let checklist_item = insert_checklist_item(&mut transaction, &note, item_values).await?;

            checklist_items.push(checklist_item);
        }

        transaction.commit().await.map_err(connection_error)?;

        Ok((note, checklist_items))
    }

    /// Update a note
    ///
    /// Archiving an already archived note keeps the original archive date
    pub async fn update_note(&self, note: &Note, values: &UpdateNoteValues<'_>) -> Result<Note> {
        sqlx::query_as::<_, Note>(
            r"
            UPDATE notes
            SET color = $1,
                archived_at = CASE
                    WHEN $2::BOOLEAN IS NULL THEN archived_at
                    WHEN $2::BOOLEAN THEN COALESCE(archived_at, timezone('utc', CURRENT_TIMESTAMP))
                    ELSE NULL
                END,
                updated_at = timezone('utc', CURRENT_TIMESTAMP)
            WHERE id = $3
            RETURNING *
            ",
        )
        .bind(values.color.unwrap_or(&note.color))
        .bind(values.archived)
        .bind(note.id)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    /// Soft-delete a note
    pub async fn delete_note(&self, note: &Note) -> Result<()> {
        soft_delete(&self.connection_pool, "notes", &note.id).await
    }
}

/// Checklist items
impl Database {
    /// Find all checklist items of a note, in order
    ///
    /// Respects the soft-delete
    pub async fn find_all_checklist_items_by_note(&self, note: &Note) -> Result<Vec<ChecklistItem>> {
        self.find_all_checklist_items_by_notes(std::slice::from_ref(note))
            .await
    }

    /// Find all checklist items of all notes, in order
    ///
    /// Respects the soft-delete
    pub async fn find_all_checklist_items_by_notes(
        &self,
        notes: &[Note],
    ) -> Result<Vec<ChecklistItem>> {
        if notes.is_empty() {
            return Ok(Vec::new());
        }

        sqlx::query_as::<_, ChecklistItem>(
            r"
            SELECT *
            FROM checklist_items
            WHERE deleted_at IS NULL AND note_id = ANY($1)
            ORDER BY sort_order, created_at
            ",
        )
        .bind(notes.iter().map(|note| note.id).collect::<Vec<Uuid>>())
        .fetch_all(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    /// Find single checklist item of a note
    ///
    /// Respects the soft-delete
    pub async fn find_single_checklist_item_by_id(
        &self,
        note_id: &Uuid,
        checklist_item_id: &Uuid,
    ) -> Result<Option<ChecklistItem>> {
        sqlx::query_as::<_, ChecklistItem>(
            r"
            SELECT *
            FROM checklist_items
            WHERE deleted_at IS NULL AND note_id = $1 AND id = $2
            LIMIT 1
            ",
        )
        .bind(note_id)
        .bind(checklist_item_id)
        .fetch_optional(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    /// Create a checklist item
    pub async fn create_checklist_item(
        &self,
        note: &Note,
        values: &CreateChecklistItemValues<'_>,
    ) -> Result<ChecklistItem> {
        let mut connection = self.connection_pool.acquire().await.map_err(connection_error)?;

        insert_checklist_item(&mut connection, note, values).await
    }

    /// Update a checklist item
    pub async fn update_checklist_item(
        &self,
        checklist_item: &ChecklistItem,
        values: &UpdateChecklistItemValues<'_>,
    ) -> Result<ChecklistItem> {
        sqlx::query_as::<_, ChecklistItem>(
            r"
            UPDATE checklist_items
            SET content = $1,
                checked = $2,
                sort_order = $3,
                updated_at = timezone('utc', CURRENT_TIMESTAMP)
            WHERE id = $4
            RETURNING *
            ",
        )
        .bind(values.content.unwrap_or(&checklist_item.content))
        .bind(values.checked.unwrap_or(checklist_item.checked))
        .bind(values.sort_order.unwrap_or(checklist_item.sort_order))
        .bind(checklist_item.id)
        .fetch_one(&self.connection_pool)
        .await
        .map_err(connection_error)
    }

    /// Soft-delete a checklist item
    pub async fn delete_checklist_item(&self, checklist_item: &ChecklistItem) -> Result<()> {
        soft_delete(&self.connection_pool, "checklist_items", &checklist_item.id).await
    }
}

/// Audit trail
impl Database {
    /// Register a creative/destructive action on the audit trail
    pub async fn register_audit_trail(
        &self,
        created_by: &User,
        entry: &AuditEntry<'_>,
        ip_address: Option<&IpAddr>,
    ) -> Result<()> {
        let (user_id, board_id, note_id, checklist_item_id) = match entry {
            AuditEntry::CreateUser(user)
            | AuditEntry::ChangePassword(user)
            | AuditEntry::DeleteUser(user) => (Some(user.id), None, None, None),

            AuditEntry::CreateBoard(board)
            | AuditEntry::UpdateBoard(board)
            | AuditEntry::DeleteBoard(board) => (None, Some(board.id), None, None),

            AuditEntry::CreateNote(board, note)
            | AuditEntry::UpdateNote(board, note)
            | AuditEntry::ArchiveNote(board, note)
            | AuditEntry::UnarchiveNote(board, note)
            | AuditEntry::DeleteNote(board, note) => (None, Some(board.id), Some(note.id), None),

            AuditEntry::CreateChecklistItem(board, note, item)
            | AuditEntry::UpdateChecklistItem(board, note, item)
            | AuditEntry::DeleteChecklistItem(board, note, item) => {
                (None, Some(board.id), Some(note.id), Some(item.id))
            }
        };

        sqlx::query(
            r"
            INSERT INTO audit_trail (id, type, created_by, user_id, board_id, note_id, checklist_item_id, ip_address)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ",
        )
        .bind(Uuid::new_v4())
        .bind(AuditEntryType::from_audit_entry(entry))
        .bind(created_by.id)
        .bind(user_id)
        .bind(board_id)
        .bind(note_id)
        .bind(checklist_item_id)
        .bind(ip_address.copied().map(IpNetwork::from))
        .execute(&self.connection_pool)
        .await
        .map_err(connection_error)?;

        Ok(())
    }
}

/// Insert a checklist item on any connection, so it can be part of a transaction
async fn insert_checklist_item(
    connection: &mut sqlx::PgConnection,
    note: &Note,
    values: &CreateChecklistItemValues<'_>,
) -> Result<ChecklistItem> {
    sqlx::query_as::<_, ChecklistItem>(
        r"
        INSERT INTO checklist_items (id, note_id, content, checked, sort_order)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        ",
    )
    .bind(Uuid::new_v4())
    .bind(note.id)
    .bind(values.content)
    .bind(values.checked)
    .bind(values.sort_order)
    .fetch_one(connection)
    .await
    .map_err(connection_error)
}

/// Soft-delete a single row of a table
///
/// The table name is never user input
async fn soft_delete(connection_pool: &PgPool, table: &'static str, id: &Uuid) -> Result<()> {
    let query =
        format!("UPDATE {table} SET deleted_at = timezone('utc', CURRENT_TIMESTAMP) WHERE id = $1");

    sqlx::query(&query)
        .bind(id)
        .execute(connection_pool)
        .await
        .map_err(connection_error)?;

    Ok(())
}

/// Convert `SQLx` to storage connection error
fn connection_error<E>(err: E) -> Error
where
    E: std::error::Error,
{
    Error::Connection(err.to_string())
}
