//! Document-store capability.
//!
//! Typed requests against the backend document database (profiles, posts).
//! Documents cross the boundary as raw JSON values; the modules that own an
//! entity do the decoding and tolerate malformed documents rather than
//! failing a whole query.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Collections the core reads and writes. An enum rather than free-form
/// strings so a typo cannot silently target a new collection.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Posts,
    Users,
}

impl Collection {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Posts => "posts",
            Self::Users => "users",
        }
    }
}

pub const MAX_QUERY_LIMIT: u32 = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum StoreOperation {
    Get {
        collection: Collection,
        id: String,
    },
    Put {
        collection: Collection,
        id: String,
        doc: Value,
    },
    Add {
        collection: Collection,
        doc: Value,
    },
    Query {
        collection: Collection,
        order_by: String,
        descending: bool,
        limit: u32,
    },
}

impl StoreOperation {
    pub fn get(collection: Collection, id: &str) -> Result<Self, StoreError> {
        validate_doc_id(id)?;
        Ok(Self::Get {
            collection,
            id: id.to_string(),
        })
    }

    pub fn put(collection: Collection, id: &str, doc: Value) -> Result<Self, StoreError> {
        validate_doc_id(id)?;
        Ok(Self::Put {
            collection,
            id: id.to_string(),
            doc,
        })
    }

    pub fn add(collection: Collection, doc: Value) -> Self {
        Self::Add { collection, doc }
    }

    pub fn query(
        collection: Collection,
        order_by: &str,
        descending: bool,
        limit: u32,
    ) -> Result<Self, StoreError> {
        if order_by.is_empty() {
            return Err(StoreError::InvalidRequest("empty order_by field".into()));
        }
        if limit == 0 || limit > MAX_QUERY_LIMIT {
            return Err(StoreError::InvalidRequest(format!(
                "query limit {limit} outside 1..={MAX_QUERY_LIMIT}"
            )));
        }
        Ok(Self::Query {
            collection,
            order_by: order_by.to_string(),
            descending,
            limit,
        })
    }
}

fn validate_doc_id(id: &str) -> Result<(), StoreError> {
    if id.is_empty() {
        return Err(StoreError::InvalidRequest("empty document id".into()));
    }
    if id.contains('/') || id.contains(char::is_whitespace) {
        return Err(StoreError::InvalidRequest(format!("malformed document id: {id:?}")));
    }
    Ok(())
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreOutput {
    /// Result of a `Get`; `None` when the document does not exist.
    Document { doc: Option<Value> },
    /// Result of a `Query`, in the requested order.
    Documents { docs: Vec<Value> },
    /// Result of a `Put`/`Add`. `id` is the store-assigned id for adds.
    Written { id: Option<String> },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Backend(_))
    }
}
