//! Repository layer over the document store

pub mod catalog;
pub mod customers;
pub mod games;
pub mod memory;
pub mod postgres;
pub mod rentals;
pub mod store;
pub mod users;

use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::{Collection, Document, DocumentStore, Filter, Guard, SortOrder, StoreError, WriteOp};

use crate::models::ObjectId;

/// Main repository struct holding the store handle
#[derive(Clone)]
pub struct Repository {
    pub store: Arc<dyn DocumentStore>,
}

impl Repository {
    /// Create a new repository over the given store
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Repository backed by a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    async fn get<T: DeserializeOwned>(&self, collection: Collection, id: ObjectId) -> Result<Option<T>, StoreError> {
        self.store
            .find_by_id(collection, id)
            .await?
            .map(from_document)
            .transpose()
    }

    async fn list<T: DeserializeOwned>(&self, collection: Collection, filter: Filter) -> Result<Vec<T>, StoreError> {
        self.store
            .find(collection, filter)
            .await?
            .into_iter()
            .map(from_document)
            .collect()
    }

    async fn first<T: DeserializeOwned>(&self, collection: Collection, filter: Filter) -> Result<Option<T>, StoreError> {
        Ok(self.list(collection, filter.limit(1)).await?.into_iter().next())
    }

    async fn create<T: Serialize>(&self, collection: Collection, value: &T) -> Result<(), StoreError> {
        self.store.insert(collection, to_document(value)?).await
    }

    async fn update<T: DeserializeOwned>(
        &self,
        collection: Collection,
        id: ObjectId,
        set: Document,
    ) -> Result<Option<T>, StoreError> {
        self.store
            .update_by_id(collection, id, set)
            .await?
            .map(from_document)
            .transpose()
    }

    async fn remove<T: DeserializeOwned>(&self, collection: Collection, id: ObjectId) -> Result<Option<T>, StoreError> {
        self.store
            .delete_by_id(collection, id)
            .await?
            .map(from_document)
            .transpose()
    }
}

/// Serialize a model into a document
pub fn to_document<T: Serialize>(value: &T) -> Result<Document, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(document) => Ok(document),
        other => Err(StoreError::Backend(format!("expected a JSON object, got {}", other))),
    }
}

/// Deserialize a document into a model
pub fn from_document<T: DeserializeOwned>(document: Document) -> Result<T, StoreError> {
    Ok(serde_json::from_value(Value::Object(document))?)
}
