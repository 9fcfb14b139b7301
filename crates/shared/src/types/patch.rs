//! Presence-tagged patch fields for update payloads.
//!
//! Update endpoints must distinguish "field omitted from the patch" from
//! "field set to null". A plain `Option<T>` cannot express both, so patch
//! structs use `Patch<T>`: a missing JSON key deserializes to `Keep`, a
//! present key (including `null` when `T` is itself an `Option`) to `Set`.

use serde::{Deserialize, Deserializer, Serialize};

/// A single field of an update payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Patch<T> {
    /// Field was omitted from the patch; keep the stored value.
    #[default]
    Keep,
    /// Field was supplied; overwrite the stored value.
    Set(T),
}

impl<T> Patch<T> {
    /// Returns `true` if the field was supplied in the patch.
    #[must_use]
    pub const fn is_set(&self) -> bool {
        matches!(self, Self::Set(_))
    }

    /// Returns the supplied value, if any.
    #[must_use]
    pub const fn as_set(&self) -> Option<&T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Keep => None,
        }
    }

    /// Consumes the patch, returning the supplied value if any.
    #[must_use]
    pub fn into_set(self) -> Option<T> {
        match self {
            Self::Set(value) => Some(value),
            Self::Keep => None,
        }
    }

    /// Resolves the patch against the currently stored value.
    #[must_use]
    pub fn resolve(self, current: T) -> T {
        match self {
            Self::Set(value) => value,
            Self::Keep => current,
        }
    }
}

impl<T: Clone> Patch<T> {
    /// Like [`Patch::resolve`] but borrows the current value.
    #[must_use]
    pub fn resolve_with(&self, current: &T) -> T {
        match self {
            Self::Set(value) => value.clone(),
            Self::Keep => current.clone(),
        }
    }
}

impl<T> From<T> for Patch<T> {
    fn from(value: T) -> Self {
        Self::Set(value)
    }
}

// A present key always deserializes to `Set`; `Keep` only arises through
// `#[serde(default)]` when the key is absent.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Self::Set)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            Self::Set(value) => value.serialize(serializer),
            Self::Keep => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Payload {
        #[serde(default)]
        name: Patch<String>,
        #[serde(default)]
        remarks: Patch<Option<String>>,
    }

    #[test]
    fn test_missing_key_is_keep() {
        let p: Payload = serde_json::from_str("{}").unwrap();
        assert_eq!(p.name, Patch::Keep);
        assert_eq!(p.remarks, Patch::Keep);
    }

    #[test]
    fn test_present_key_is_set() {
        let p: Payload = serde_json::from_str(r#"{"name":"Midterm"}"#).unwrap();
        assert_eq!(p.name, Patch::Set("Midterm".to_string()));
    }

    #[test]
    fn test_null_clears_nullable_field() {
        let p: Payload = serde_json::from_str(r#"{"remarks":null}"#).unwrap();
        assert_eq!(p.remarks, Patch::Set(None));
    }

    #[test]
    fn test_resolve_prefers_set_value() {
        assert_eq!(Patch::Set(5).resolve(1), 5);
        assert_eq!(Patch::<i32>::Keep.resolve(1), 1);
    }
}
