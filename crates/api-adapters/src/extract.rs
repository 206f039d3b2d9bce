//! Request extractors.

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use std::convert::Infallible;
use std::net::SocketAddr;

/// Header carrying the admin shared secret.
pub const ADMIN_PASSWORD_HEADER: &str = "x-admin-password";

/// The client network address that keys rate-limit and lockout counters.
///
/// Prefers the first `X-Forwarded-For` hop so limits follow the real client
/// when the server sits behind a reverse proxy, then falls back to the
/// socket peer address.
pub struct ClientAddr(pub String);

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let forwarded = parts
            .headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty());

        if let Some(addr) = forwarded {
            return Ok(ClientAddr(addr.to_string()));
        }

        let peer = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string())
            .unwrap_or_else(|| "unknown".to_string());
        Ok(ClientAddr(peer))
    }
}

/// The admin secret presented with the request, if any.
pub struct AdminSecret(pub Option<String>);

impl<S> FromRequestParts<S> for AdminSecret
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let secret = parts
            .headers
            .get(ADMIN_PASSWORD_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        Ok(AdminSecret(secret))
    }
}
