//! Bearer tokens
//!
//! HS256-signed JWTs carrying `{sub, iat, exp}`. The subject is an opaque
//! string chosen by the caller (the auth crate uses the numeric user id).

use std::fmt;
use std::time::Duration;

use axum::http::{HeaderMap, header};
use chrono::Utc;
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,

    #[error("Token is invalid")]
    Invalid,

    #[error("Token signing failed: {0}")]
    Signing(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// A freshly signed token and its lifetime in seconds
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_in: i64,
}

/// Signs and validates bearer tokens with one shared secret.
#[derive(Clone)]
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `subject` valid for the configured ttl
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        self.issue_with_ttl(subject, self.ttl)
    }

    pub fn issue_with_ttl(&self, subject: &str, ttl: Duration) -> Result<IssuedToken, TokenError> {
        let now = Utc::now().timestamp();
        let expires_in = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: subject.to_string(),
            iat: now,
            exp: now.saturating_add(expires_in),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, expires_in })
    }

    /// Check signature and expiry, returning the claims
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            })
    }
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

/// Read the token from `Authorization: Bearer <token>`.
///
/// `Ok(None)` when the header is absent; an Authorization header in any
/// other shape is `TokenError::Invalid`.
pub fn extract_bearer(headers: &HeaderMap) -> Result<Option<&str>, TokenError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Ok(None);
    };

    let value = value.to_str().map_err(|_| TokenError::Invalid)?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .map(str::trim)
        .ok_or(TokenError::Invalid)?;

    if token.is_empty() {
        return Err(TokenError::Invalid);
    }
    Ok(Some(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn signer() -> TokenSigner {
        TokenSigner::new(b"test-secret-test-secret-test-sec", Duration::from_secs(60))
    }

    #[test]
    fn test_issue_and_decode() {
        let signer = signer();
        let issued = signer.issue("42").unwrap();
        assert_eq!(issued.expires_in, 60);

        let claims = signer.decode(&issued.token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn test_wrong_secret_is_invalid() {
        let issued = signer().issue("42").unwrap();
        let other = TokenSigner::new(b"another-secret", Duration::from_secs(60));
        assert_eq!(other.decode(&issued.token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_expired_token() {
        let signer = signer();
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "42".to_string(),
            iat: now - 120,
            exp: now - 60,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &signer.encoding).unwrap();
        assert_eq!(signer.decode(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_garbage_is_invalid() {
        assert_eq!(signer().decode("not.a.jwt"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_extract_bearer() {
        let mut headers = HeaderMap::new();
        assert_eq!(extract_bearer(&headers), Ok(None));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer abc.def"));
        assert_eq!(extract_bearer(&headers), Ok(Some("abc.def")));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwdw=="));
        assert_eq!(extract_bearer(&headers), Err(TokenError::Invalid));

        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(extract_bearer(&headers), Err(TokenError::Invalid));
    }

    #[test]
    fn test_debug_hides_secret() {
        assert!(format!("{:?}", signer()).contains("REDACTED"));
    }
}
