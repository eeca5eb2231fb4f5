//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

use platform::token::TokenSigner;

pub const DEFAULT_ACCESS_TOKEN_TTL: Duration = Duration::from_secs(30 * 60);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HS256 signing secret for bearer tokens
    pub jwt_secret: Vec<u8>,
    /// Lifetime of an issued access token
    pub access_token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: Vec::new(),
            access_token_ttl: DEFAULT_ACCESS_TOKEN_TTL,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret.
    ///
    /// Tokens do not survive a restart; meant for development.
    pub fn with_random_secret() -> Self {
        use rand::RngCore;
        let mut secret = [0u8; 32];
        rand::rng().fill_bytes(&mut secret);
        Self {
            jwt_secret: secret.to_vec(),
            ..Default::default()
        }
    }

    pub fn development() -> Self {
        Self::with_random_secret()
    }

    pub fn token_signer(&self) -> TokenSigner {
        TokenSigner::new(&self.jwt_secret, self.access_token_ttl)
    }

    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("jwt_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("password_pepper", &self.password_pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_secrets_differ() {
        let a = AuthConfig::with_random_secret();
        let b = AuthConfig::with_random_secret();
        assert_eq!(a.jwt_secret.len(), 32);
        assert_ne!(a.jwt_secret, b.jwt_secret);
        assert_eq!(a.access_token_ttl, DEFAULT_ACCESS_TOKEN_TTL);
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = AuthConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AuthConfig::development()
        };
        let debug = format!("{:?}", config);
        assert!(!debug.contains("pepper\""));
        assert!(debug.contains("REDACTED"));
    }
}
