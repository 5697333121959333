//! Document store abstraction
//!
//! Collections hold JSON documents keyed by their `_id`. Writes can be
//! grouped into an atomic unit that commits entirely or not at all.

use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::models::ObjectId;

/// A stored document: a JSON object carrying an `_id` field
pub type Document = Map<String, Value>;

/// Known collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Consoles,
    Genres,
    Games,
    Customers,
    Users,
    Rentals,
}

impl Collection {
    pub const ALL: [Collection; 6] = [
        Collection::Consoles,
        Collection::Genres,
        Collection::Games,
        Collection::Customers,
        Collection::Users,
        Collection::Rentals,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::Consoles => "consoles",
            Collection::Genres => "genres",
            Collection::Games => "games",
            Collection::Customers => "customers",
            Collection::Users => "users",
            Collection::Rentals => "rentals",
        }
    }

    pub fn singular(&self) -> &'static str {
        match self {
            Collection::Consoles => "console",
            Collection::Genres => "genre",
            Collection::Games => "game",
            Collection::Customers => "customer",
            Collection::Users => "user",
            Collection::Rentals => "rental",
        }
    }

    /// Top-level fields whose values must be unique within the collection
    pub fn unique_fields(&self) -> &'static [&'static str] {
        match self {
            Collection::Consoles | Collection::Genres => &["name"],
            Collection::Users => &["email"],
            _ => &[],
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Path into a document, e.g. `["customer", "_id"]`
pub type FieldPath = Vec<String>;

/// Build a field path from a dotted name
pub fn path(dotted: &str) -> FieldPath {
    dotted.split('.').map(str::to_string).collect()
}

/// A single predicate over a document
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// The value at the path equals the given value
    Eq(FieldPath, Value),
    /// The path is absent or holds `null`
    IsNull(FieldPath),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// Conjunction of conditions plus optional ordering and limit
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub conditions: Vec<Condition>,
    pub sort: Option<(FieldPath, SortOrder)>,
    pub limit: Option<usize>,
}

impl Filter {
    /// Match every document
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::Eq(path(field), value.into()));
        self
    }

    pub fn is_null(mut self, field: &str) -> Self {
        self.conditions.push(Condition::IsNull(path(field)));
        self
    }

    pub fn sort(mut self, field: &str, order: SortOrder) -> Self {
        self.sort = Some((path(field), order));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Precondition checked against the current document inside a write
#[derive(Debug, Clone, PartialEq)]
pub enum Guard {
    /// Top-level field is absent or `null`
    IsNull(String),
    /// Numeric top-level field is at least the given value after the write
    AtLeast(String, i64),
    /// Numeric top-level field is at most the given value after the write
    AtMost(String, i64),
}

/// One write inside an atomic unit
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    Insert {
        collection: Collection,
        document: Document,
    },
    /// Replace the given top-level fields
    Update {
        collection: Collection,
        id: ObjectId,
        set: Document,
        guard: Option<Guard>,
    },
    /// Add `by` to a numeric top-level field
    Increment {
        collection: Collection,
        id: ObjectId,
        field: String,
        by: i64,
        guard: Option<Guard>,
    },
    Delete {
        collection: Collection,
        id: ObjectId,
    },
}

impl WriteOp {
    pub fn collection(&self) -> Collection {
        match self {
            WriteOp::Insert { collection, .. }
            | WriteOp::Update { collection, .. }
            | WriteOp::Increment { collection, .. }
            | WriteOp::Delete { collection, .. } => *collection,
        }
    }
}

/// Store-level failures
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("duplicate value for unique field {field} in {collection}")]
    Duplicate { collection: Collection, field: String },

    /// A write's guard did not hold; the unit was rolled back
    #[error("guard failed for {collection}/{id}")]
    GuardFailed { collection: Collection, id: ObjectId },

    /// An update, increment or delete inside a unit addressed no document
    #[error("document {id} not found in {collection}")]
    Missing { collection: Collection, id: ObjectId },

    #[error("store backend error: {0}")]
    Backend(String),
}

/// Persistence collaborator used by every service
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find_by_id(&self, collection: Collection, id: ObjectId) -> Result<Option<Document>, StoreError>;

    async fn find(&self, collection: Collection, filter: Filter) -> Result<Vec<Document>, StoreError>;

    async fn insert(&self, collection: Collection, document: Document) -> Result<(), StoreError>;

    /// Replace top-level fields; returns the updated document, `None` if absent
    async fn update_by_id(
        &self,
        collection: Collection,
        id: ObjectId,
        set: Document,
    ) -> Result<Option<Document>, StoreError>;

    /// Delete a document; returns it, `None` if absent
    async fn delete_by_id(&self, collection: Collection, id: ObjectId) -> Result<Option<Document>, StoreError>;

    /// Apply every write or none of them
    async fn atomic_unit(&self, ops: Vec<WriteOp>) -> Result<(), StoreError>;

    /// Check that the backend is reachable
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Read a value at a path inside a document
pub fn lookup<'a>(document: &'a Document, field: &[String]) -> Option<&'a Value> {
    let (first, rest) = field.split_first()?;
    rest.iter().try_fold(document.get(first)?, |value, key| value.get(key))
}
