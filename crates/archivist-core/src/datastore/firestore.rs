//! Cloud Firestore backend over the REST API.
//!
//! Uses the v1 REST surface directly instead of a client SDK:
//!
//! - create: `POST {base}/projects/{project}/databases/{db}/documents/{collection}`
//! - list:   `GET  {base}/projects/{project}/databases/{db}/documents/{collection}`
//!
//! The API key, when present, is passed as the `key` query parameter, which is
//! how browser clients authenticate against security rules.
//!
//! reqwest works on both native and WASM targets (browser `fetch()` under the
//! hood), so the same client serves the app and the CLI.

use super::{Datastore, DatastoreError, Document, DocumentId, Fields, Value};
use crate::config::DatastoreConfig;
use crate::smoke::DEFAULT_COLLECTION;
use once_cell::sync::Lazy;
use serde::Deserialize;
use serde_json::{json, Map};
use std::collections::BTreeMap;
use tracing::debug;

/// Page size used when listing collections.
const LIST_PAGE_SIZE: u32 = 300;

/// Shared HTTP client; reqwest pools connections internally.
static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    let builder = reqwest::Client::builder();
    #[cfg(not(target_arch = "wasm32"))]
    let builder = builder
        .user_agent(concat!("archivist/", env!("CARGO_PKG_VERSION")))
        .timeout(std::time::Duration::from_secs(15));
    builder.build().unwrap_or_else(|_| reqwest::Client::new())
});

/// Firestore document store.
#[derive(Debug, Clone)]
pub struct FirestoreDatastore {
    config: DatastoreConfig,
    probe_collection: String,
}

impl FirestoreDatastore {
    pub fn new(config: DatastoreConfig) -> Self {
        Self {
            config,
            probe_collection: DEFAULT_COLLECTION.to_string(),
        }
    }

    /// Collection listed by [`Datastore::probe`]. Must be readable under the
    /// deployed security rules.
    pub fn with_probe_collection(mut self, collection: impl Into<String>) -> Self {
        self.probe_collection = collection.into();
        self
    }

    fn collection_url(&self, collection: &str) -> Result<String, DatastoreError> {
        if !self.config.is_configured() {
            return Err(DatastoreError::NotConfigured);
        }
        Ok(format!(
            "{}/projects/{}/databases/{}/documents/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.project_id.trim(),
            self.config.database,
            collection.trim_matches('/'),
        ))
    }

    fn key_param(&self) -> Vec<(&'static str, String)> {
        if self.config.api_key.is_empty() {
            Vec::new()
        } else {
            vec![("key", self.config.api_key.clone())]
        }
    }

    async fn list_page(
        &self,
        url: &str,
        page_size: u32,
        page_token: Option<&str>,
    ) -> Result<ListResponse, DatastoreError> {
        let mut query = self.key_param();
        query.push(("pageSize", page_size.to_string()));
        if let Some(token) = page_token {
            query.push(("pageToken", token.to_string()));
        }

        let response = HTTP_CLIENT
            .get(url)
            .query(&query)
            .send()
            .await
            .map_err(|e| DatastoreError::Request(e.to_string()))?;
        let body = read_success_body(response).await?;
        serde_json::from_str(&body).map_err(|e| DatastoreError::Decode(e.to_string()))
    }
}

#[async_trait::async_trait(?Send)]
impl Datastore for FirestoreDatastore {
    async fn add_document(
        &self,
        collection: &str,
        fields: Fields,
    ) -> Result<DocumentId, DatastoreError> {
        let url = self.collection_url(collection)?;
        debug!(collection, "creating document");

        let response = HTTP_CLIENT
            .post(&url)
            .query(&self.key_param())
            .json(&encode_document(&fields))
            .send()
            .await
            .map_err(|e| DatastoreError::Request(e.to_string()))?;
        let body = read_success_body(response).await?;
        let created: WireDocument =
            serde_json::from_str(&body).map_err(|e| DatastoreError::Decode(e.to_string()))?;
        Ok(created.into_document().id)
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, DatastoreError> {
        let url = self.collection_url(collection)?;
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let page = self
                .list_page(&url, LIST_PAGE_SIZE, page_token.as_deref())
                .await?;
            documents.extend(page.documents.into_iter().map(WireDocument::into_document));
            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        debug!(collection, count = documents.len(), "listed documents");
        Ok(documents)
    }

    async fn probe(&self) -> Result<(), DatastoreError> {
        let url = self.collection_url(&self.probe_collection)?;
        self.list_page(&url, 1, None).await.map(|_| ())
    }

    fn describe(&self) -> String {
        format!(
            "Firestore project '{}' (database {})",
            self.config.project_id, self.config.database
        )
    }

    fn is_configured(&self) -> bool {
        self.config.is_configured()
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct WireDocument {
    name: String,
    #[serde(default)]
    fields: BTreeMap<String, serde_json::Value>,
}

impl WireDocument {
    fn into_document(self) -> Document {
        let id = self
            .name
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Document {
            id: DocumentId(id),
            fields: self
                .fields
                .iter()
                .map(|(key, raw)| (key.clone(), decode_value(raw)))
                .collect(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<WireDocument>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Returns the body of a 2xx response, or a [`DatastoreError::Status`]
/// carrying the server's message.
async fn read_success_body(response: reqwest::Response) -> Result<String, DatastoreError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| DatastoreError::Request(e.to_string()))?;

    if status.is_success() {
        Ok(body)
    } else {
        Err(status_error(status.as_u16(), &body))
    }
}

fn status_error(code: u16, body: &str) -> DatastoreError {
    let message = serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string());
    DatastoreError::Status { code, message }
}

fn encode_document(fields: &Fields) -> serde_json::Value {
    let encoded: Map<String, serde_json::Value> = fields
        .iter()
        .map(|(key, value)| (key.clone(), encode_value(value)))
        .collect();
    json!({ "fields": encoded })
}

fn encode_value(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        // int64 travels as a decimal string
        Value::Integer(i) => json!({ "integerValue": i.to_string() }),
        Value::Double(d) => json!({ "doubleValue": d }),
        Value::String(s) => json!({ "stringValue": s }),
        Value::Timestamp(t) => json!({ "timestampValue": t }),
    }
}

/// Decodes one typed value. Kinds the shell does not model (maps, arrays,
/// references, ...) are kept as their JSON text.
fn decode_value(raw: &serde_json::Value) -> Value {
    let Some((kind, inner)) = raw.as_object().and_then(|obj| obj.iter().next()) else {
        return Value::String(raw.to_string());
    };

    match kind.as_str() {
        "nullValue" => Value::Null,
        "booleanValue" => inner.as_bool().map_or(Value::Null, Value::Bool),
        "integerValue" => inner
            .as_str()
            .and_then(|s| s.parse().ok())
            .or_else(|| inner.as_i64())
            .map_or(Value::Null, Value::Integer),
        "doubleValue" => inner.as_f64().map_or(Value::Null, Value::Double),
        "stringValue" => Value::String(inner.as_str().unwrap_or_default().to_string()),
        "timestampValue" => Value::Timestamp(inner.as_str().unwrap_or_default().to_string()),
        _ => Value::String(inner.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configured() -> DatastoreConfig {
        DatastoreConfig {
            project_id: "archivist-dev".to_string(),
            api_key: "key-123".to_string(),
            ..DatastoreConfig::default()
        }
    }

    #[test]
    fn test_collection_url() {
        let store = FirestoreDatastore::new(configured());
        assert_eq!(
            store.collection_url("test").unwrap(),
            "https://firestore.googleapis.com/v1/projects/archivist-dev/databases/(default)/documents/test"
        );
    }

    #[test]
    fn test_trailing_slash_in_base_url() {
        let store = FirestoreDatastore::new(DatastoreConfig {
            base_url: "http://localhost:8080/v1/".to_string(),
            ..configured()
        });
        assert!(store
            .collection_url("/test/")
            .unwrap()
            .starts_with("http://localhost:8080/v1/projects/"));
        assert!(store.collection_url("/test/").unwrap().ends_with("/documents/test"));
    }

    #[test]
    fn test_unconfigured_store_refuses_urls() {
        let store = FirestoreDatastore::new(DatastoreConfig::default());
        assert_eq!(
            store.collection_url("test"),
            Err(DatastoreError::NotConfigured)
        );
    }

    #[tokio::test]
    async fn test_unconfigured_probe_fails_without_network() {
        let store = FirestoreDatastore::new(DatastoreConfig::default());
        assert!(!store.is_configured());
        assert_eq!(store.probe().await, Err(DatastoreError::NotConfigured));
        assert!(FirestoreDatastore::new(configured()).is_configured());
    }

    #[test]
    fn test_key_param_omitted_when_empty() {
        let store = FirestoreDatastore::new(DatastoreConfig {
            api_key: String::new(),
            ..configured()
        });
        assert!(store.key_param().is_empty());
        assert_eq!(FirestoreDatastore::new(configured()).key_param().len(), 1);
    }

    #[test]
    fn test_encode_document() {
        let mut fields = Fields::new();
        fields.insert("message".into(), "Datastore is working!".into());
        fields.insert("attempt".into(), 2i64.into());
        fields.insert(
            "timestamp".into(),
            Value::Timestamp("2026-10-18T09:00:00Z".into()),
        );

        let encoded = encode_document(&fields);
        assert_eq!(
            encoded,
            json!({
                "fields": {
                    "attempt": { "integerValue": "2" },
                    "message": { "stringValue": "Datastore is working!" },
                    "timestamp": { "timestampValue": "2026-10-18T09:00:00Z" }
                }
            })
        );
    }

    #[test]
    fn test_decode_list_response() {
        let body = r#"{
            "documents": [
                {
                    "name": "projects/p/databases/(default)/documents/test/AbC123",
                    "fields": {
                        "message": { "stringValue": "hi" },
                        "n": { "integerValue": "42" },
                        "ok": { "booleanValue": true },
                        "ratio": { "doubleValue": 0.5 },
                        "nothing": { "nullValue": null },
                        "tags": { "arrayValue": { "values": [] } }
                    },
                    "createTime": "2026-10-18T09:00:00.000000Z"
                }
            ],
            "nextPageToken": "tok"
        }"#;
        let page: ListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(page.next_page_token.as_deref(), Some("tok"));

        let doc = page.documents.into_iter().next().unwrap().into_document();
        assert_eq!(doc.id, DocumentId("AbC123".into()));
        assert_eq!(doc.fields["message"], Value::String("hi".into()));
        assert_eq!(doc.fields["n"], Value::Integer(42));
        assert_eq!(doc.fields["ok"], Value::Bool(true));
        assert_eq!(doc.fields["ratio"], Value::Double(0.5));
        assert_eq!(doc.fields["nothing"], Value::Null);
        assert_eq!(doc.fields["tags"], Value::String(r#"{"values":[]}"#.into()));
    }

    #[test]
    fn test_empty_collection_response() {
        let page: ListResponse = serde_json::from_str("{}").unwrap();
        assert!(page.documents.is_empty());
        assert!(page.next_page_token.is_none());
    }

    #[test]
    fn test_status_error_uses_server_message() {
        let body = r#"{"error": {"code": 403, "message": "Missing or insufficient permissions.", "status": "PERMISSION_DENIED"}}"#;
        assert_eq!(
            status_error(403, body),
            DatastoreError::Status {
                code: 403,
                message: "Missing or insufficient permissions.".into()
            }
        );
        assert_eq!(
            status_error(502, " Bad Gateway \n"),
            DatastoreError::Status {
                code: 502,
                message: "Bad Gateway".into()
            }
        );
    }
}
