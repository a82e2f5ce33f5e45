//! In-memory datastore for tests and dry runs.

use super::{Datastore, DatastoreError, Document, DocumentId, Fields};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

/// Process-local datastore. Documents keep insertion order per collection.
///
/// Can be taken offline with [`set_online`](InMemoryDatastore::set_online) to
/// exercise failure paths.
#[derive(Default)]
pub struct InMemoryDatastore {
    collections: RefCell<HashMap<String, Vec<Document>>>,
    next_id: Cell<u64>,
    offline: Cell<bool>,
}

impl InMemoryDatastore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_online(&self, online: bool) {
        self.offline.set(!online);
    }

    /// Number of documents in a collection.
    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .borrow()
            .get(collection)
            .map_or(0, Vec::len)
    }

    fn ensure_online(&self) -> Result<(), DatastoreError> {
        if self.offline.get() {
            Err(DatastoreError::Offline)
        } else {
            Ok(())
        }
    }
}

#[async_trait::async_trait(?Send)]
impl Datastore for InMemoryDatastore {
    async fn add_document(
        &self,
        collection: &str,
        fields: Fields,
    ) -> Result<DocumentId, DatastoreError> {
        self.ensure_online()?;
        let n = self.next_id.get() + 1;
        self.next_id.set(n);
        let id = DocumentId(format!("mem-{:06}", n));

        self.collections
            .borrow_mut()
            .entry(collection.to_string())
            .or_default()
            .push(Document {
                id: id.clone(),
                fields,
            });
        Ok(id)
    }

    async fn list_documents(&self, collection: &str) -> Result<Vec<Document>, DatastoreError> {
        self.ensure_online()?;
        Ok(self
            .collections
            .borrow()
            .get(collection)
            .cloned()
            .unwrap_or_default())
    }

    async fn probe(&self) -> Result<(), DatastoreError> {
        self.ensure_online()
    }

    fn describe(&self) -> String {
        "in-memory datastore".to_string()
    }
}
