//! Client identification utilities
//!
//! Address and User-Agent of the caller, used to deduplicate anonymous
//! interactions.
//!
//! `X-Forwarded-For` is only read when the peer is a [`TrustedProxies`]
//! member; install the list as a request extension
//! (`Router::layer(Extension(proxies))`). Without it the peer address wins.

use std::convert::Infallible;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::{HeaderMap, header, request::Parts};

/// Longest User-Agent kept; the column is `VARCHAR(500)`
pub const USER_AGENT_MAX_LENGTH: usize = 500;

/// Caller address and User-Agent.
///
/// Extraction never fails: both fields are `None` when they cannot be
/// determined (for example when the router is driven without connect info).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientInfo {
    pub ip: Option<IpAddr>,
    pub user_agent: Option<String>,
}

/// Reverse proxies allowed to report the client address
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrustedProxies(Arc<Vec<IpAddr>>);

impl TrustedProxies {
    pub fn new(proxies: impl IntoIterator<Item = IpAddr>) -> Self {
        Self(Arc::new(proxies.into_iter().collect()))
    }

    pub fn contains(&self, ip: IpAddr) -> bool {
        self.0.contains(&ip)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ClientInfo {
    pub fn from_headers(
        headers: &HeaderMap,
        direct_ip: Option<IpAddr>,
        trusted: &TrustedProxies,
    ) -> Self {
        Self {
            ip: extract_client_ip(headers, direct_ip, trusted),
            user_agent: extract_user_agent(headers),
        }
    }

    pub fn ip_string(&self) -> Option<String> {
        self.ip.map(|ip| ip.to_string())
    }
}

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let direct_ip = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|info| info.0.ip());
        let untrusted = TrustedProxies::default();
        let trusted = parts.extensions.get::<TrustedProxies>().unwrap_or(&untrusted);

        Ok(Self::from_headers(&parts.headers, direct_ip, trusted))
    }
}

/// Client IP address of the request
///
/// The first X-Forwarded-For entry counts only when the direct peer is a
/// trusted proxy; otherwise the direct connection IP is used.
pub fn extract_client_ip(
    headers: &HeaderMap,
    direct_ip: Option<IpAddr>,
    trusted: &TrustedProxies,
) -> Option<IpAddr> {
    match direct_ip {
        Some(peer) if trusted.contains(peer) => forwarded_for(headers).or(direct_ip),
        _ => direct_ip,
    }
}

fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
}

/// User-Agent header, truncated to [`USER_AGENT_MAX_LENGTH`] characters
pub fn extract_user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(|ua| ua.chars().take(USER_AGENT_MAX_LENGTH).collect())
}
