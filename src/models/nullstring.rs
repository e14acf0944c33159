//! Nullable string wire type.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A string value that may be the JSON null keyword in the input feed.
///
/// Null decodes to the canonical empty string; a present-but-empty string
/// and null are not distinguishable after decoding. Non-empty values
/// round-trip losslessly, the empty value serializes back to null.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NullString(String);

impl NullString {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for NullString {
    fn from(value: &str) -> Self {
        NullString(value.to_string())
    }
}

impl From<String> for NullString {
    fn from(value: String) -> Self {
        NullString(value)
    }
}

impl fmt::Display for NullString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for NullString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(NullString(value.unwrap_or_default()))
    }
}

impl Serialize for NullString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if self.0.is_empty() {
            serializer.serialize_none()
        } else {
            serializer.serialize_str(&self.0)
        }
    }
}
