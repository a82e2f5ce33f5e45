//! Datastore smoke check.
//!
//! Writes one marker document to a collection, then reads the collection back.
//! The outcome is captured in a [`SmokeReport`] rather than an error so the
//! caller can always print a full report, including remediation hints when
//! something went wrong.

use crate::datastore::{Datastore, DatastoreError, Document, DocumentId, Fields, Value};
use chrono::{SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::{error, info};

/// Collection used by the smoke check unless told otherwise.
pub const DEFAULT_COLLECTION: &str = "test";

/// Message stored in the marker document.
pub const MARKER_MESSAGE: &str = "Datastore is working!";

/// Things to check when the round trip fails.
pub const REMEDIATION_HINTS: [&str; 3] = [
    "Check that ARCHIVIST_DATASTORE_PROJECT_ID and ARCHIVIST_DATASTORE_API_KEY hold the correct credentials",
    "Verify that Firestore is enabled for the project in the Firebase console",
    "Deploy the security rules: firebase deploy --only firestore:rules",
];

/// Suggested follow-ups after a successful round trip.
pub const NEXT_STEPS: [&str; 3] = [
    "Run the app: dx serve --platform web",
    "Open the browser and submit an entry",
    "Check the Firebase console for the live data",
];

/// Step of the round trip that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Write,
    Read,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Write => f.write_str("write"),
            Stage::Read => f.write_str("read"),
        }
    }
}

/// Why a round trip failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmokeFailure {
    pub stage: Stage,
    #[serde(serialize_with = "serialize_display")]
    pub error: DatastoreError,
}

/// Outcome of [`run_round_trip`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmokeReport {
    /// Backend description, e.g. the Firestore project
    pub backend: String,
    pub collection: String,
    /// Id of the marker document, once written
    pub written: Option<DocumentId>,
    /// Documents read back from the collection
    pub documents: Vec<Document>,
    pub failure: Option<SmokeFailure>,
}

impl SmokeReport {
    pub fn passed(&self) -> bool {
        self.failure.is_none()
    }

    /// Whether the marker document showed up in the read-back.
    pub fn marker_read_back(&self) -> bool {
        self.written
            .as_ref()
            .is_some_and(|id| self.documents.iter().any(|doc| &doc.id == id))
    }
}

/// Fields of the marker document written by the smoke check.
pub fn marker_fields() -> Fields {
    let mut fields = Fields::new();
    fields.insert("message".to_string(), Value::from(MARKER_MESSAGE));
    fields.insert(
        "timestamp".to_string(),
        Value::Timestamp(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
    );
    fields
}

/// Writes a marker document to `collection`, then lists the collection.
///
/// Stops at the first failing step; no retries.
pub async fn run_round_trip(store: &dyn Datastore, collection: &str) -> SmokeReport {
    let mut report = SmokeReport {
        backend: store.describe(),
        collection: collection.to_string(),
        written: None,
        documents: Vec::new(),
        failure: None,
    };

    info!(backend = %report.backend, collection, "writing marker document");
    match store.add_document(collection, marker_fields()).await {
        Ok(id) => report.written = Some(id),
        Err(err) => {
            error!("Smoke check write failed: {}", err);
            report.failure = Some(SmokeFailure {
                stage: Stage::Write,
                error: err,
            });
            return report;
        }
    }

    info!(collection, "reading collection back");
    match store.list_documents(collection).await {
        Ok(documents) => report.documents = documents,
        Err(err) => {
            error!("Smoke check read failed: {}", err);
            report.failure = Some(SmokeFailure {
                stage: Stage::Read,
                error: err,
            });
        }
    }

    report
}

fn serialize_display<T: fmt::Display, S: Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastore::InMemoryDatastore;

    #[tokio::test]
    async fn test_round_trip_passes() {
        let store = InMemoryDatastore::new();
        let report = run_round_trip(&store, DEFAULT_COLLECTION).await;

        assert!(report.passed());
        assert!(report.marker_read_back());
        assert_eq!(report.documents.len(), 1);
        assert_eq!(
            report.documents[0].fields.get("message"),
            Some(&Value::from(MARKER_MESSAGE))
        );
    }

    #[tokio::test]
    async fn test_round_trip_reads_existing_documents() {
        let store = InMemoryDatastore::new();
        store
            .add_document(DEFAULT_COLLECTION, marker_fields())
            .await
            .unwrap();

        let report = run_round_trip(&store, DEFAULT_COLLECTION).await;
        assert!(report.passed());
        assert_eq!(report.documents.len(), 2);
    }

    #[tokio::test]
    async fn test_write_failure_stops_early() {
        let store = InMemoryDatastore::new();
        store.set_online(false);

        let report = run_round_trip(&store, "test").await;
        assert!(!report.passed());
        assert!(report.written.is_none());
        assert_eq!(
            report.failure,
            Some(SmokeFailure {
                stage: Stage::Write,
                error: DatastoreError::Offline,
            })
        );
    }

    #[test]
    fn test_marker_timestamp_is_rfc3339() {
        let fields = marker_fields();
        match fields.get("timestamp") {
            Some(Value::Timestamp(ts)) => {
                assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok(), "{ts}");
            }
            other => panic!("unexpected timestamp field: {:?}", other),
        }
    }

    #[test]
    fn test_failure_serializes_error_text() {
        let failure = SmokeFailure {
            stage: Stage::Read,
            error: DatastoreError::Offline,
        };
        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["stage"], "read");
        assert_eq!(json["error"], "Datastore is offline");
    }
}
