//! Optional client IP address extractor
//!
//! The audit trail records the IP address when it can be found, a request without one is still
//! a valid request.

use std::convert::Infallible;
use std::net::IpAddr;

use axum::extract::FromRequestParts as _;
use axum::extract::OptionalFromRequestParts;
use axum::http::request::Parts;

/// Client IP address extractor
#[derive(Debug, Clone, Copy)]
pub struct ClientIp {
    /// The IP address of the client
    pub ip_address: IpAddr,
}

impl<S> OptionalFromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        let client_ip = axum_client_ip::ClientIp::from_request_parts(parts, state).await;

        Ok(client_ip.ok().map(|client_ip| Self {
            ip_address: client_ip.0,
        }))
    }
}
