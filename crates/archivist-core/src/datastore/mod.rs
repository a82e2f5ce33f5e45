//! Document datastore abstraction.
//!
//! The shell only needs three things from its datastore: append a document to
//! a collection, list a collection, and a cheap connectivity check. The
//! [`Datastore`] trait captures exactly that so the browser app, the CLI and
//! the tests can swap backends freely.
//!
//! # Implementations
//!
//! - [`InMemoryDatastore`] - process-local store for tests and dry runs
//! - [`FirestoreDatastore`] - Cloud Firestore over its REST API

mod firestore;
mod memory;

pub use firestore::FirestoreDatastore;
pub use memory::InMemoryDatastore;

pub use crate::error::DatastoreError;

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Field values supported by the shell's documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    String(String),
    /// RFC 3339 timestamp
    Timestamp(String),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Integer(i) => write!(f, "{}", i),
            Value::Double(d) => write!(f, "{}", d),
            Value::String(s) => write!(f, "{:?}", s),
            Value::Timestamp(t) => write!(f, "{}", t),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

/// Named fields of a document, kept in key order.
pub type Fields = BTreeMap<String, Value>;

/// Identifier of a document within its collection.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct DocumentId(pub String);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub id: DocumentId,
    pub fields: Fields,
}

impl Document {
    /// Renders the fields as `{key: value, ...}` for console output.
    pub fn fields_summary(&self) -> String {
        let inner: Vec<String> = self
            .fields
            .iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect();
        format!("{{{}}}", inner.join(", "))
    }
}

/// Collection-oriented document store.
///
/// `?Send` so the same implementation can run on the browser's single thread.
#[async_trait::async_trait(?Send)]
pub trait Datastore {
    /// Appends a document with a store-generated id.
    async fn add_document(
        &self,
        collection: &str,
        fields: Fields,
    ) -> Result<DocumentId, DatastoreError>;

    /// Lists every document of a collection. An unknown collection is empty.
    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, DatastoreError>;

    /// Cheapest request that proves the store is reachable and authorized.
    async fn probe(&self) -> Result<(), DatastoreError>;

    /// Human-readable backend name for logs and reports.
    fn describe(&self) -> String;

    /// Whether the store has what it needs to attempt requests at all.
    /// Unconfigured stores fail every call without touching the network.
    fn is_configured(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_summary() {
        let mut fields = Fields::new();
        fields.insert("message".into(), "hello".into());
        fields.insert("count".into(), 3i64.into());
        let doc = Document {
            id: DocumentId("abc".into()),
            fields,
        };
        assert_eq!(doc.fields_summary(), r#"{count: 3, message: "hello"}"#);
    }

    #[test]
    fn test_value_serializes_untagged() {
        let json = serde_json::to_string(&Value::from("x")).unwrap();
        assert_eq!(json, r#""x""#);
        assert_eq!(serde_json::to_string(&Value::Null).unwrap(), "null");
    }
}
