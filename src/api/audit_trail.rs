//! Audit trail service

use std::net::IpAddr;

use axum::Extension;
use axum::RequestPartsExt;
use axum::extract::FromRequestParts;
use axum::extract::OptionalFromRequestParts;
use axum::http::request::Parts;

use crate::client_ip::ClientIp;
use crate::database::AuditEntry;
use crate::database::Database;

use super::CurrentUser;
use super::Error;

/// Audit trail service
///
/// Requires a logged in user, every entry is registered in their name
pub struct AuditTrail {
    /// Database in where the trail is saved
    database: Database,

    /// The current user for the audit trail
    current_user: CurrentUser,

    /// The IP address associated with the audit trail
    ip_address: Option<IpAddr>,
}

impl AuditTrail {
    /// Register an entry on the audit trail
    ///
    /// Failing to register is logged, the action itself already happened
    pub async fn register(&self, entry: AuditEntry<'_>) {
        let result = self
            .database
            .register_audit_trail(&self.current_user, &entry, self.ip_address.as_ref())
            .await;

        if let Err(err) = result {
            tracing::error!("Could not register audit trail entry: {err}");
        }
    }
}

impl<S> FromRequestParts<S> for AuditTrail
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Extension(database) = parts
            .extract::<Extension<Database>>()
            .await
            .map_err(|_| Error::internal_server_error("Could not get a database pool"))?;

        let current_user = CurrentUser::from_request_parts(parts, state).await?;

        let ip_address = <ClientIp as OptionalFromRequestParts<S>>::from_request_parts(parts, state)
            .await
            .ok()
            .flatten()
            .map(|client_ip| client_ip.ip_address);

        Ok(Self {
            database,
            current_user,
            ip_address,
        })
    }
}
