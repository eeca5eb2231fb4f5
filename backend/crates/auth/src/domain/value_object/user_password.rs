//! User Password Value Object
//!
//! Domain wrappers over `platform::password`: policy failures become
//! user-facing `AppError`s, hashing failures become internal errors.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{ClearTextPassword, HashedPassword, PasswordPolicyError};
use std::fmt;

use crate::error::{AuthError, AuthResult};

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Cleartext password from a request body. Zeroized on drop.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// A newly chosen password; the policy applies
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::TooShort { .. } | PasswordPolicyError::TooLong { .. } => {
                AppError::bad_request(e.to_string())
                    .with_action("Please choose a password of suitable length")
            }
            PasswordPolicyError::EmptyOrWhitespace => {
                AppError::bad_request(e.to_string()).with_action("Please enter a password")
            }
            PasswordPolicyError::InvalidCharacter => AppError::bad_request(e.to_string())
                .with_action("Please remove any control characters"),
            PasswordPolicyError::CommonPattern => AppError::bad_request(e.to_string())
                .with_action("Please choose a less predictable password"),
        })?;

        Ok(Self(clear_text))
    }

    /// A password presented for checking against a stored hash
    pub fn for_verification(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Argon2id hash stored in `users.hashed_password`
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AuthResult<Self> {
        Ok(Self(raw.0.hash(pepper)?))
    }

    pub fn from_phc_string(phc_string: impl Into<String>) -> AuthResult<Self> {
        HashedPassword::from_phc_string(phc_string)
            .map(Self)
            .map_err(|_| AuthError::Internal("Invalid password hash in database".to_string()))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::error::kind::ErrorKind;

    #[test]
    fn test_policy_errors_are_bad_requests() {
        for raw in ["", "short", "password123"] {
            let err = RawPassword::new(raw.to_string()).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::BadRequest);
            assert!(err.action().is_some());
        }
    }

    #[test]
    fn test_hash_and_verify() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, None).unwrap();

        assert!(hashed.verify(&RawPassword::for_verification("TestPassword123!".into()), None));
        assert!(!hashed.verify(&RawPassword::for_verification("WrongPassword123!".into()), None));
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let raw = RawPassword::new("TestPassword123!".to_string()).unwrap();
        let hashed = UserPassword::from_raw(&raw, Some(b"pepper")).unwrap();

        let restored = UserPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(restored.verify(&raw, Some(b"pepper")));
        assert!(UserPassword::from_phc_string("garbage").is_err());
    }

    #[test]
    fn test_debug_redaction() {
        let raw = RawPassword::new("SecretPassword123!".to_string()).unwrap();
        assert!(!format!("{:?}", raw).contains("Secret"));
        let hashed = UserPassword::from_raw(&raw, None).unwrap();
        assert!(format!("{:?}", hashed).contains("HASH"));
    }
}
