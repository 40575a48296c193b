//! Local key-value fallback slot.
//!
//! A single serialized-session slot used when the auth provider is not
//! configured (demo mode) and as the fallback target for best-effort profile
//! writes. Values are opaque strings; the session codec lives in
//! [`crate::session`].

use serde::{Deserialize, Serialize};

pub const MAX_SLOT_KEY_LEN: usize = 64;

/// Validated storage key: short, printable ASCII, no whitespace.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SlotKey(String);

impl SlotKey {
    pub fn new(key: impl Into<String>) -> Result<Self, StorageError> {
        let key = key.into();
        if key.is_empty() || key.len() > MAX_SLOT_KEY_LEN {
            return Err(StorageError::InvalidKey(format!(
                "key length {} outside 1..={MAX_SLOT_KEY_LEN}",
                key.len()
            )));
        }
        if !key.chars().all(|c| c.is_ascii_graphic()) {
            return Err(StorageError::InvalidKey(format!("non-printable key: {key:?}")));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for SlotKey {
    type Error = StorageError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<SlotKey> for String {
    fn from(key: SlotKey) -> Self {
        key.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StorageOperation {
    Read { key: SlotKey },
    Write { key: SlotKey, value: String },
    Delete { key: SlotKey },
}

impl StorageOperation {
    pub fn read(key: &str) -> Result<Self, StorageError> {
        Ok(Self::Read { key: SlotKey::new(key)? })
    }

    pub fn write(key: &str, value: impl Into<String>) -> Result<Self, StorageError> {
        Ok(Self::Write {
            key: SlotKey::new(key)?,
            value: value.into(),
        })
    }

    pub fn delete(key: &str) -> Result<Self, StorageError> {
        Ok(Self::Delete { key: SlotKey::new(key)? })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageOutput {
    Value { value: Option<String> },
    Done,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StorageError {
    #[error("invalid key: {0}")]
    InvalidKey(String),

    #[error("storage unavailable")]
    Unavailable,

    #[error("storage quota exceeded")]
    QuotaExceeded,
}
