//! Process configuration read from the environment.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use anyhow::Context;
use auth::AuthConfig;
use axum::http::HeaderValue;
use platform::client::TrustedProxies;

const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";
const DEFAULT_TOKEN_TTL_MINUTES: u64 = 30;
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub frontend_origins: Vec<HeaderValue>,
    /// Peers whose `X-Forwarded-For` is believed
    pub trusted_proxies: TrustedProxies,
    pub auth: AuthConfig,
    pub bind_addr: SocketAddr,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url =
            env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

        let max_connections = parse_or("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;

        let frontend_origins = env::var("FRONTEND_ORIGINS")
            .unwrap_or_else(|_| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .filter_map(|origin| origin.trim().parse().ok())
            .collect();

        let trusted_proxies = match env::var("TRUSTED_PROXIES") {
            Ok(raw) => TrustedProxies::new(
                raw.split(',')
                    .map(str::trim)
                    .filter(|proxy| !proxy.is_empty())
                    .map(|proxy| {
                        proxy
                            .parse()
                            .with_context(|| format!("TRUSTED_PROXIES has an invalid address: {proxy}"))
                    })
                    .collect::<anyhow::Result<Vec<_>>>()?,
            ),
            Err(_) => TrustedProxies::default(),
        };

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        Ok(Self {
            database_url,
            max_connections,
            frontend_origins,
            trusted_proxies,
            auth: auth_config()?,
            bind_addr,
        })
    }
}

fn auth_config() -> anyhow::Result<AuthConfig> {
    let mut config = match env::var("JWT_SECRET") {
        Ok(secret) if !secret.is_empty() => AuthConfig {
            jwt_secret: secret.into_bytes(),
            ..AuthConfig::default()
        },
        _ if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set, signing tokens with a random secret");
            AuthConfig::development()
        }
        _ => anyhow::bail!("JWT_SECRET must be set in production"),
    };

    let minutes = parse_or("ACCESS_TOKEN_TTL_MINUTES", DEFAULT_TOKEN_TTL_MINUTES)?;
    config.access_token_ttl = Duration::from_secs(minutes * 60);

    config.password_pepper = env::var("PASSWORD_PEPPER")
        .ok()
        .filter(|pepper| !pepper.is_empty())
        .map(String::into_bytes);

    Ok(config)
}

fn parse_or<T>(key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}
