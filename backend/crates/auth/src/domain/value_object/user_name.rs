//! User Name Value Object
//!
//! The public handle shown as a post or comment author and used to log in.
//!
//! - ASCII only: letters, digits, `_`, `.`, `-`
//! - Case is preserved for display; uniqueness uses the lowercase canonical
//!   form
//! - Input is NFKC-normalized and trimmed before validation

use serde::{Deserialize, Serialize};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

pub const USER_NAME_MIN_LENGTH: usize = 3;
pub const USER_NAME_MAX_LENGTH: usize = 50;

const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.', '-'];

/// Handles that would read as system accounts or collide with routes
const RESERVED_WORDS: &[&str] = &[
    "admin",
    "administrator",
    "root",
    "system",
    "moderator",
    "staff",
    "support",
    "api",
    "auth",
    "login",
    "logout",
    "register",
    "user",
    "users",
    "account",
    "profile",
    "settings",
    "dashboard",
    "analytics",
    "posts",
    "comments",
    "subscribers",
    "me",
    "null",
    "undefined",
    "anonymous",
];

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserNameError {
    Empty,
    TooShort { length: usize, min: usize },
    TooLong { length: usize, max: usize },
    InvalidCharacter { char: char, position: usize },
    /// First or last character is a separator (`.` or `-`)
    InvalidBoundary { char: char },
    ConsecutiveSeparators,
    NoAlphanumeric,
    Reserved { word: String },
}

impl fmt::Display for UserNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Username cannot be empty"),
            Self::TooShort { length, min } => {
                write!(f, "Username is too short ({length} chars, minimum {min})")
            }
            Self::TooLong { length, max } => {
                write!(f, "Username is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => write!(
                f,
                "Invalid character '{char}' at position {position}. Only letters, digits, _, . and - are allowed"
            ),
            Self::InvalidBoundary { char } => {
                write!(f, "Username cannot start or end with '{char}'")
            }
            Self::ConsecutiveSeparators => {
                write!(f, "Username cannot contain consecutive '.' or '-'")
            }
            Self::NoAlphanumeric => write!(f, "Username must contain a letter or digit"),
            Self::Reserved { word } => write!(f, "'{word}' is a reserved username"),
        }
    }
}

impl std::error::Error for UserNameError {}

// ============================================================================
// UserName Value Object
// ============================================================================

/// Validated user name.
///
/// `original` keeps the caller's casing for display, `canonical` is the
/// lowercase form stored in `users.username_canonical` (unique).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserName {
    original: String,
    canonical: String,
}

impl UserName {
    /// Normalize and validate a newly chosen user name
    pub fn new(input: impl AsRef<str>) -> Result<Self, UserNameError> {
        let original = normalize(input.as_ref());
        let canonical = original.to_lowercase();
        validate(&canonical)?;
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Normalize without validating, for looking an existing user up.
    ///
    /// Accounts created before a rule change must still be able to log in.
    pub fn for_lookup(input: impl AsRef<str>) -> Self {
        let original = normalize(input.as_ref());
        let canonical = original.to_lowercase();
        Self {
            original,
            canonical,
        }
    }

    /// Trusted value read back from the database
    pub fn from_db(original: &str) -> Self {
        Self {
            original: original.to_string(),
            canonical: original.to_lowercase(),
        }
    }

    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn is_reserved(name: &str) -> bool {
        let canonical = normalize(name).to_lowercase();
        RESERVED_WORDS.contains(&canonical.as_str())
    }
}

fn normalize(input: &str) -> String {
    input.nfkc().collect::<String>().trim().to_string()
}

fn validate(canonical: &str) -> Result<(), UserNameError> {
    if canonical.is_empty() {
        return Err(UserNameError::Empty);
    }

    let length = canonical.chars().count();
    if length < USER_NAME_MIN_LENGTH {
        return Err(UserNameError::TooShort {
            length,
            min: USER_NAME_MIN_LENGTH,
        });
    }
    if length > USER_NAME_MAX_LENGTH {
        return Err(UserNameError::TooLong {
            length,
            max: USER_NAME_MAX_LENGTH,
        });
    }

    if let Some((position, char)) = canonical
        .chars()
        .enumerate()
        .find(|(_, c)| !is_valid_char(*c))
    {
        return Err(UserNameError::InvalidCharacter { char, position });
    }

    for boundary in [canonical.chars().next(), canonical.chars().next_back()]
        .into_iter()
        .flatten()
    {
        if is_separator(boundary) {
            return Err(UserNameError::InvalidBoundary { char: boundary });
        }
    }

    let chars: Vec<char> = canonical.chars().collect();
    if chars
        .windows(2)
        .any(|w| is_separator(w[0]) && is_separator(w[1]))
    {
        return Err(UserNameError::ConsecutiveSeparators);
    }

    if !canonical.chars().any(|c| c.is_ascii_alphanumeric()) {
        return Err(UserNameError::NoAlphanumeric);
    }

    if RESERVED_WORDS.contains(&canonical) {
        return Err(UserNameError::Reserved {
            word: canonical.to_string(),
        });
    }

    Ok(())
}

#[inline]
fn is_valid_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || ALLOWED_SPECIAL_CHARS.contains(&c)
}

#[inline]
fn is_separator(c: char) -> bool {
    c == '.' || c == '-'
}

impl fmt::Debug for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserName")
            .field("original", &self.original)
            .field("canonical", &self.canonical)
            .finish()
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl TryFrom<String> for UserName {
    type Error = UserNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserName> for String {
    fn from(name: UserName) -> Self {
        name.original
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    mod normalization {
        use super::*;

        #[test]
        fn test_trim_and_keep_case() {
            let name = UserName::new("  Alice_W  ").unwrap();
            assert_eq!(name.original(), "Alice_W");
            assert_eq!(name.canonical(), "alice_w");
        }

        #[test]
        fn test_nfkc_normalization() {
            // full-width 'Ａ' becomes ASCII
            let name = UserName::new("Ａlice").unwrap();
            assert_eq!(name.canonical(), "alice");
        }

        #[test]
        fn test_lookup_skips_validation() {
            let name = UserName::for_lookup(" Admin ");
            assert_eq!(name.canonical(), "admin");
            assert!(UserName::new("Admin").is_err());
        }
    }

    mod length_validation {
        use super::*;

        #[test]
        fn test_empty_fails() {
            assert_eq!(UserName::new("   "), Err(UserNameError::Empty));
        }

        #[test]
        fn test_too_short() {
            assert_eq!(
                UserName::new("ab"),
                Err(UserNameError::TooShort { length: 2, min: 3 })
            );
        }

        #[test]
        fn test_bounds() {
            assert!(UserName::new("abc").is_ok());
            assert!(UserName::new("a".repeat(USER_NAME_MAX_LENGTH)).is_ok());
            assert!(matches!(
                UserName::new("a".repeat(USER_NAME_MAX_LENGTH + 1)),
                Err(UserNameError::TooLong { .. })
            ));
        }
    }

    mod character_validation {
        use super::*;

        #[test]
        fn test_valid_names() {
            for raw in ["alice123", "alice_bob", "alice.bob", "alice-bob", "_alice_", "9lives"] {
                assert!(UserName::new(raw).is_ok(), "{raw} rejected");
            }
        }

        #[test]
        fn test_invalid_characters() {
            assert!(matches!(
                UserName::new("alice@bob"),
                Err(UserNameError::InvalidCharacter { char: '@', .. })
            ));
            assert!(matches!(
                UserName::new("alice bob"),
                Err(UserNameError::InvalidCharacter { char: ' ', .. })
            ));
            assert!(matches!(
                UserName::new("日本語名"),
                Err(UserNameError::InvalidCharacter { .. })
            ));
        }

        #[test]
        fn test_separator_rules() {
            assert_eq!(
                UserName::new(".alice"),
                Err(UserNameError::InvalidBoundary { char: '.' })
            );
            assert_eq!(
                UserName::new("alice-"),
                Err(UserNameError::InvalidBoundary { char: '-' })
            );
            assert_eq!(
                UserName::new("alice.-bob"),
                Err(UserNameError::ConsecutiveSeparators)
            );
            assert_eq!(UserName::new("___"), Err(UserNameError::NoAlphanumeric));
        }
    }

    mod reserved_words {
        use super::*;

        #[test]
        fn test_reserved_case_insensitive() {
            assert!(matches!(
                UserName::new("ADMIN"),
                Err(UserNameError::Reserved { word }) if word == "admin"
            ));
            assert!(UserName::is_reserved("Dashboard"));
            assert!(!UserName::is_reserved("alice"));
        }
    }

    mod serialization {
        use super::*;

        #[test]
        fn test_serializes_original() {
            let name = UserName::new("Alice").unwrap();
            assert_eq!(serde_json::to_string(&name).unwrap(), "\"Alice\"");
        }

        #[test]
        fn test_deserialize_validates() {
            assert!(serde_json::from_str::<UserName>("\"ab\"").is_err());
            let name: UserName = serde_json::from_str("\"Bob_1\"").unwrap();
            assert_eq!(name.canonical(), "bob_1");
        }
    }
}
