//! In-process document store
//!
//! Every collection lives behind one mutex. Atomic units are applied to a
//! staged copy of the state and swapped in only when every write succeeds.

use std::{cmp::Ordering, collections::HashMap, sync::Arc};

use async_trait::async_trait;
use indexmap::IndexMap;
use serde_json::Value;
use tokio::sync::Mutex;

use super::store::{
    lookup, Collection, Condition, Document, DocumentStore, Filter, Guard, SortOrder, StoreError, WriteOp,
};
use crate::models::ObjectId;

type Table = IndexMap<String, Document>;
type State = HashMap<Collection, Table>;

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn document_id(document: &Document) -> Result<String, StoreError> {
    document
        .get("_id")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| StoreError::Backend("document has no _id".to_string()))
}

fn matches(document: &Document, condition: &Condition) -> bool {
    match condition {
        Condition::Eq(field, expected) => lookup(document, field) == Some(expected),
        Condition::IsNull(field) => matches!(lookup(document, field), None | Some(Value::Null)),
    }
}

/// Order JSON values: null < bool < number < string; other kinds compare equal
fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    fn rank(value: Option<&Value>) -> u8 {
        match value {
            None | Some(Value::Null) => 0,
            Some(Value::Bool(_)) => 1,
            Some(Value::Number(_)) => 2,
            Some(Value::String(_)) => 3,
            Some(_) => 4,
        }
    }

    match (a, b) {
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or_default();
            let y = y.as_f64().unwrap_or_default();
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        _ => rank(a).cmp(&rank(b)),
    }
}

fn guard_holds(document: &Document, guard: &Guard) -> bool {
    match guard {
        Guard::IsNull(field) => matches!(document.get(field), None | Some(Value::Null)),
        Guard::AtLeast(field, min) => document
            .get(field)
            .and_then(Value::as_i64)
            .map(|value| value >= *min)
            .unwrap_or(false),
        Guard::AtMost(field, max) => document
            .get(field)
            .and_then(Value::as_i64)
            .map(|value| value <= *max)
            .unwrap_or(false),
    }
}

fn check_unique(table: &Table, collection: Collection, document: &Document, own_id: &str) -> Result<(), StoreError> {
    for field in collection.unique_fields() {
        let Some(value) = document.get(*field) else {
            continue;
        };
        let taken = table
            .iter()
            .any(|(id, other)| id != own_id && other.get(*field) == Some(value));
        if taken {
            return Err(StoreError::Duplicate {
                collection,
                field: field.to_string(),
            });
        }
    }
    Ok(())
}

fn find_in(table: Option<&Table>, filter: &Filter) -> Vec<Document> {
    let mut found: Vec<Document> = table
        .map(|table| {
            table
                .values()
                .filter(|document| filter.conditions.iter().all(|c| matches(document, c)))
                .cloned()
                .collect()
        })
        .unwrap_or_default();

    if let Some((field, order)) = &filter.sort {
        found.sort_by(|a, b| {
            let ordering = compare_values(lookup(a, field), lookup(b, field));
            match order {
                SortOrder::Ascending => ordering,
                SortOrder::Descending => ordering.reverse(),
            }
        });
    }

    if let Some(limit) = filter.limit {
        found.truncate(limit);
    }
    found
}

/// Apply one write to the state; returns the affected document
fn apply(state: &mut State, op: WriteOp) -> Result<Option<Document>, StoreError> {
    let collection = op.collection();
    let table = state.entry(collection).or_default();

    match op {
        WriteOp::Insert { document, .. } => {
            let id = document_id(&document)?;
            if table.contains_key(&id) {
                return Err(StoreError::Duplicate {
                    collection,
                    field: "_id".to_string(),
                });
            }
            check_unique(table, collection, &document, &id)?;
            table.insert(id, document.clone());
            Ok(Some(document))
        }
        WriteOp::Update { id, set, guard, .. } => {
            let key = id.to_hex();
            let mut updated = table
                .get(&key)
                .cloned()
                .ok_or(StoreError::Missing { collection, id })?;
            if let Some(guard) = &guard {
                if !guard_holds(&updated, guard) {
                    return Err(StoreError::GuardFailed { collection, id });
                }
            }
            for (field, value) in set {
                if field != "_id" {
                    updated.insert(field, value);
                }
            }
            check_unique(table, collection, &updated, &key)?;
            table.insert(key, updated.clone());
            Ok(Some(updated))
        }
        WriteOp::Increment { id, field, by, guard, .. } => {
            let key = id.to_hex();
            let document = table.get_mut(&key).ok_or(StoreError::Missing { collection, id })?;
            let current = document.get(&field).and_then(Value::as_i64).unwrap_or(0);
            let mut candidate = document.clone();
            candidate.insert(field.clone(), Value::from(current + by));
            if let Some(guard) = &guard {
                if !guard_holds(&candidate, guard) {
                    return Err(StoreError::GuardFailed { collection, id });
                }
            }
            *document = candidate.clone();
            Ok(Some(candidate))
        }
        WriteOp::Delete { id, .. } => table
            .shift_remove(&id.to_hex())
            .map(Some)
            .ok_or(StoreError::Missing { collection, id }),
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_by_id(&self, collection: Collection, id: ObjectId) -> Result<Option<Document>, StoreError> {
        let state = self.state.lock().await;
        Ok(state.get(&collection).and_then(|table| table.get(&id.to_hex())).cloned())
    }

    async fn find(&self, collection: Collection, filter: Filter) -> Result<Vec<Document>, StoreError> {
        let state = self.state.lock().await;
        Ok(find_in(state.get(&collection), &filter))
    }

    async fn insert(&self, collection: Collection, document: Document) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        apply(&mut state, WriteOp::Insert { collection, document })?;
        Ok(())
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: ObjectId,
        set: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut state = self.state.lock().await;
        match apply(&mut state, WriteOp::Update { collection, id, set, guard: None }) {
            Err(StoreError::Missing { .. }) => Ok(None),
            other => other,
        }
    }

    async fn delete_by_id(&self, collection: Collection, id: ObjectId) -> Result<Option<Document>, StoreError> {
        let mut state = self.state.lock().await;
        match apply(&mut state, WriteOp::Delete { collection, id }) {
            Err(StoreError::Missing { .. }) => Ok(None),
            other => other,
        }
    }

    async fn atomic_unit(&self, ops: Vec<WriteOp>) -> Result<(), StoreError> {
        let mut state = self.state.lock().await;
        let mut staged = state.clone();
        for op in ops {
            apply(&mut staged, op)?;
        }
        *state = staged;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
