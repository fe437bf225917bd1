//! Resolution contexts.
//!
//! A field can react differently depending on where it is rendered: the same
//! `city` field may narrow its options on an edit form but stay untouched in a
//! list filter. The context selects which of a field's callbacks runs.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The surface a field is being resolved for.
///
/// Serialized as a plain lowercase string. Any string other than `form` or
/// `filter` becomes [`FieldContext::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum FieldContext {
    /// Create/edit forms.
    #[default]
    Form,
    /// Index-page filters.
    Filter,
    /// Any application-defined surface.
    Custom(String),
}

impl FieldContext {
    /// The string tag for this context.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Form => "form",
            Self::Filter => "filter",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for FieldContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for FieldContext {
    fn from(value: &str) -> Self {
        match value {
            "form" => Self::Form,
            "filter" => Self::Filter,
            other => Self::Custom(other.to_string()),
        }
    }
}

impl From<String> for FieldContext {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl FromStr for FieldContext {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Serialize for FieldContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for FieldContext {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}
