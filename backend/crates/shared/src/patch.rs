//! Partial-update helpers.
//!
//! A patch field of type `Option<Option<T>>` tells three cases apart:
//! absent (`None`), explicit `null` (`Some(None)`) and a value
//! (`Some(Some(v))`). Use it as
//! `#[serde(default, deserialize_with = "kernel::patch::double_option")]`.

use serde::{Deserialize, Deserializer};

pub fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Overwrite `target` when the patch carries a value
#[inline]
pub fn apply<T>(target: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *target = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Patch {
        #[serde(default, deserialize_with = "double_option")]
        bio: Option<Option<String>>,
    }

    #[test]
    fn test_absent_null_and_value_are_distinct() {
        let absent: Patch = serde_json::from_str("{}").unwrap();
        assert_eq!(absent.bio, None);

        let null: Patch = serde_json::from_str(r#"{"bio":null}"#).unwrap();
        assert_eq!(null.bio, Some(None));

        let value: Patch = serde_json::from_str(r#"{"bio":"hi"}"#).unwrap();
        assert_eq!(value.bio, Some(Some("hi".to_string())));
    }

    #[test]
    fn test_apply() {
        let mut title = "old".to_string();
        apply(&mut title, None);
        assert_eq!(title, "old");
        apply(&mut title, Some("new".to_string()));
        assert_eq!(title, "new");
    }
}
