use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};

/// A value a preferences store can hold.
///
/// Serialized externally tagged, e.g. `{"int": 3}` or `{"string_set": ["a", "b"]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefValue {
    /// A boolean.
    Bool(bool),
    /// A 32-bit float.
    Float(f32),
    /// A 32-bit integer.
    Int(i32),
    /// A 64-bit integer.
    Long(i64),
    /// A string.
    String(String),
    /// A set of strings.
    StringSet(BTreeSet<String>),
}

impl fmt::Display for PrefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Long(value) => write!(f, "{value}"),
            Self::String(value) => f.write_str(value),
            Self::StringSet(values) => {
                let joined: Vec<&str> = values.iter().map(String::as_str).collect();
                write!(f, "[{}]", joined.join(", "))
            }
        }
    }
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f32> for PrefValue {
    fn from(value: f32) -> Self {
        Self::Float(value)
    }
}

impl From<i32> for PrefValue {
    fn from(value: i32) -> Self {
        Self::Int(value)
    }
}

impl From<i64> for PrefValue {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<String> for PrefValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for PrefValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<BTreeSet<String>> for PrefValue {
    fn from(values: BTreeSet<String>) -> Self {
        Self::StringSet(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn externally_tagged_json() {
        let set = PrefValue::from(BTreeSet::from(["b".to_owned(), "a".to_owned()]));
        assert_eq!(
            serde_json::to_string(&set).unwrap(),
            r#"{"string_set":["a","b"]}"#
        );
        assert_eq!(
            serde_json::from_str::<PrefValue>(r#"{"long":5}"#).unwrap(),
            PrefValue::Long(5)
        );
        assert!(serde_json::from_str::<PrefValue>(r#"{"color":"red"}"#).is_err());
    }

    #[test]
    fn displays_like_the_stored_value() {
        assert_eq!(PrefValue::from(true).to_string(), "true");
        assert_eq!(PrefValue::from("dark").to_string(), "dark");
        let set = PrefValue::from(BTreeSet::from(["x".to_owned(), "y".to_owned()]));
        assert_eq!(set.to_string(), "[x, y]");
    }
}
