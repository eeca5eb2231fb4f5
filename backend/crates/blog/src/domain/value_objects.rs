//! Domain Value Objects

use chrono::{DateTime, Duration, Utc};
use kernel::id::UserId;
use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::{BlogError, BlogResult};

// ============================================================================
// Slug
// ============================================================================

/// URL-safe post identifier derived from the title.
///
/// Lower-cased, every run of non-alphanumeric characters collapsed into a
/// single `-`, no leading or trailing `-`. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn from_title(title: &str) -> BlogResult<Self> {
        let mut slug = String::with_capacity(title.len());
        let mut pending_separator = false;

        for c in title.chars().flat_map(char::to_lowercase) {
            if c.is_ascii_alphanumeric() {
                if pending_separator && !slug.is_empty() {
                    slug.push('-');
                }
                pending_separator = false;
                slug.push(c);
            } else {
                pending_separator = true;
            }
        }

        if slug.is_empty() {
            return Err(BlogError::Validation(
                "Title must contain at least one letter or digit".to_string(),
            ));
        }
        Ok(Self(slug))
    }

    /// Trust a slug that was validated before it was stored
    pub fn from_db(slug: String) -> Self {
        Self(slug)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Slug {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

// ============================================================================
// Time range
// ============================================================================

/// Analytics window selected by the `time_range` token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TimeRange {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl TimeRange {
    /// Unknown tokens fall back to 30 days
    pub fn parse(token: &str) -> Self {
        match token {
            "7d" => TimeRange::Week,
            "30d" => TimeRange::Month,
            "90d" => TimeRange::Quarter,
            "1y" => TimeRange::Year,
            _ => TimeRange::Month,
        }
    }

    pub fn days(self) -> i64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::Quarter => 90,
            TimeRange::Year => 365,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeRange::Week => "7d",
            TimeRange::Month => "30d",
            TimeRange::Quarter => "90d",
            TimeRange::Year => "1y",
        }
    }

    /// Everything since `now - days`
    pub fn current(self, now: DateTime<Utc>) -> Window {
        Window {
            start: now - Duration::days(self.days()),
            end: None,
        }
    }

    /// The equal-length window right before `current`
    pub fn previous(self, now: DateTime<Utc>) -> Window {
        let start = self.current(now).start;
        Window {
            start: start - Duration::days(self.days()),
            end: Some(start),
        }
    }
}

/// Time interval `[start, end)`; no `end` means open-ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
}

impl Window {
    pub fn since(start: DateTime<Utc>) -> Self {
        Self { start, end: None }
    }

    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        self.start <= at && self.end.is_none_or(|end| at < end)
    }
}

// ============================================================================
// Viewer
// ============================================================================

pub const UNKNOWN_ADDRESS: &str = "unknown";

/// Deduplication key for post views.
///
/// Authenticated viewers are keyed by user; anonymous ones by address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ViewerKey {
    User(UserId),
    Address(String),
}

impl ViewerKey {
    pub fn new(user_id: Option<UserId>, address: Option<String>) -> Self {
        match user_id {
            Some(user_id) => ViewerKey::User(user_id),
            None => ViewerKey::Address(address.unwrap_or_else(|| UNKNOWN_ADDRESS.to_string())),
        }
    }

    pub fn user_id(&self) -> Option<UserId> {
        match self {
            ViewerKey::User(user_id) => Some(*user_id),
            ViewerKey::Address(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_collapses_separators() {
        let slug = Slug::from_title("  Hello,   World! Rust & Axum  ").unwrap();
        assert_eq!(slug.as_str(), "hello-world-rust-axum");
    }

    #[test]
    fn test_slug_keeps_digits() {
        let slug = Slug::from_title("Top 10 Tips (2024)").unwrap();
        assert_eq!(slug.as_str(), "top-10-tips-2024");
    }

    #[test]
    fn test_slug_drops_non_ascii_letters() {
        let slug = Slug::from_title("Café au lait").unwrap();
        assert_eq!(slug.as_str(), "caf-au-lait");
    }

    #[test]
    fn test_same_slug_for_equivalent_titles() {
        assert_eq!(
            Slug::from_title("Hello World").unwrap(),
            Slug::from_title("hello---world!!").unwrap()
        );
    }

    #[test]
    fn test_slug_rejects_titles_without_alphanumerics() {
        for title in ["", "   ", "!!!", "---"] {
            assert!(matches!(
                Slug::from_title(title),
                Err(BlogError::Validation(_))
            ));
        }
    }

    #[test]
    fn test_time_range_tokens() {
        assert_eq!(TimeRange::parse("7d").days(), 7);
        assert_eq!(TimeRange::parse("30d").days(), 30);
        assert_eq!(TimeRange::parse("90d").days(), 90);
        assert_eq!(TimeRange::parse("1y").days(), 365);
        assert_eq!(TimeRange::parse("bogus"), TimeRange::Month);
        assert_eq!(TimeRange::default().as_str(), "30d");
    }

    #[test]
    fn test_windows_are_adjacent() {
        let now = Utc::now();
        let current = TimeRange::Week.current(now);
        let previous = TimeRange::Week.previous(now);
        assert_eq!(previous.end, Some(current.start));
        assert_eq!(now - current.start, Duration::days(7));
        assert_eq!(current.start - previous.start, Duration::days(7));
        assert!(previous.contains(previous.start));
        assert!(!previous.contains(current.start));
        assert!(current.contains(current.start));
        assert!(current.contains(now));
    }

    #[test]
    fn test_viewer_key() {
        assert_eq!(
            ViewerKey::new(Some(UserId::new(3)), Some("1.2.3.4".into())),
            ViewerKey::User(UserId::new(3))
        );
        assert_eq!(
            ViewerKey::new(None, Some("1.2.3.4".into())),
            ViewerKey::Address("1.2.3.4".into())
        );
        assert_eq!(
            ViewerKey::new(None, None),
            ViewerKey::Address("unknown".into())
        );
    }
}
