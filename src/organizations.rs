//! Organizations
//!
//! Every user and board belongs to exactly one organization

use anyhow::Result;
use chrono::naive::NaiveDateTime;
use uuid::Uuid;

use crate::database::Database;
use crate::utils::env_var_or_else;

/// Organization owning users and boards
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct Organization {
    /// Organization ID
    pub id: Uuid,

    /// Display name
    pub name: String,

    /// Creation date
    #[expect(dead_code)] // used by sqlx
    pub created_at: NaiveDateTime,

    /// Last updated at
    #[expect(dead_code)] // used by sqlx
    pub updated_at: NaiveDateTime,

    /// Soft-deleted at
    #[expect(dead_code)] // used by sqlx
    pub deleted_at: Option<NaiveDateTime>,
}

/// Make sure there is an organization for the initial user to join
pub async fn ensure_initial_organization(database: &Database) -> Result<Organization> {
    if let Some(organization) = database.find_any_single_organization().await? {
        return Ok(organization);
    }

    let name = env_var_or_else("INITIAL_ORGANIZATION", || {
        tracing::info!("`INITIAL_ORGANIZATION` not set, using `Default`");
        String::from("Default")
    });

    let organization = database.create_organization(&name).await?;

    tracing::info!(r#"Created organization "{}""#, organization.name);

    Ok(organization)
}
