//! PostgreSQL document store
//!
//! Each collection is a table of `(id TEXT PRIMARY KEY, doc JSONB)`.
//! Atomic units run inside one transaction; guards are part of the
//! `UPDATE ... WHERE` predicate so concurrent writers serialize on the row.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::{
    error::ErrorKind, postgres::PgPoolOptions, types::Json, PgConnection, Pool, Postgres, QueryBuilder,
};

use super::store::{Collection, Condition, Document, DocumentStore, Filter, Guard, SortOrder, StoreError, WriteOp};
use crate::{config::DatabaseConfig, models::ObjectId};

#[derive(Clone)]
pub struct PgStore {
    pool: Pool<Postgres>,
}

impl PgStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Connect using the configured pool settings
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .connect(&config.url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Create collection tables and indexes
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }
}

/// Translate unique violations into `Duplicate`
fn map_write_error(collection: Collection, error: sqlx::Error) -> StoreError {
    if let sqlx::Error::Database(db_error) = &error {
        if db_error.kind() == ErrorKind::UniqueViolation {
            let field = db_error
                .constraint()
                .and_then(|name| {
                    collection
                        .unique_fields()
                        .iter()
                        .find(|field| name.contains(*field))
                        .map(|field| field.to_string())
                })
                .unwrap_or_else(|| "_id".to_string());
            return StoreError::Duplicate { collection, field };
        }
    }
    StoreError::Database(error)
}

fn push_guard(builder: &mut QueryBuilder<'_, Postgres>, guard: &Guard, increment: Option<(&str, i64)>) {
    match guard {
        Guard::IsNull(field) => {
            builder.push(" AND COALESCE(doc -> ");
            builder.push_bind(field.clone());
            builder.push(", 'null'::jsonb) = 'null'::jsonb");
        }
        Guard::AtLeast(field, bound) | Guard::AtMost(field, bound) => {
            builder.push(" AND COALESCE((doc ->> ");
            builder.push_bind(field.clone());
            builder.push(")::bigint, 0)");
            if let Some((incremented, by)) = increment {
                if incremented == field {
                    builder.push(" + ");
                    builder.push_bind(by);
                }
            }
            builder.push(match guard {
                Guard::AtMost(..) => " <= ",
                _ => " >= ",
            });
            builder.push_bind(*bound);
        }
    }
}

async fn exists(conn: &mut PgConnection, collection: Collection, id: ObjectId) -> Result<bool, StoreError> {
    let query = format!("SELECT EXISTS(SELECT 1 FROM {} WHERE id = $1)", collection.as_str());
    let found: bool = sqlx::query_scalar(&query)
        .bind(id.to_hex())
        .fetch_one(&mut *conn)
        .await?;
    Ok(found)
}

/// Apply one write on the given connection; returns the affected document
async fn apply(conn: &mut PgConnection, op: &WriteOp) -> Result<Option<Document>, StoreError> {
    let collection = op.collection();
    let table = collection.as_str();

    let (id, guarded, row) = match op {
        WriteOp::Insert { document, .. } => {
            let id = document
                .get("_id")
                .and_then(Value::as_str)
                .ok_or_else(|| StoreError::Backend("document has no _id".to_string()))?;
            let query = format!("INSERT INTO {} (id, doc) VALUES ($1, $2) RETURNING doc", table);
            let row = sqlx::query_scalar::<_, Json<Document>>(&query)
                .bind(id)
                .bind(Json(document))
                .fetch_one(&mut *conn)
                .await
                .map_err(|e| map_write_error(collection, e))?;
            return Ok(Some(row.0));
        }
        WriteOp::Update { id, set, guard, .. } => {
            let mut set = set.clone();
            set.remove("_id");

            let mut builder = QueryBuilder::<Postgres>::new(format!("UPDATE {} SET doc = doc || ", table));
            builder.push_bind(Json(set));
            builder.push(" WHERE id = ");
            builder.push_bind(id.to_hex());
            if let Some(guard) = guard {
                push_guard(&mut builder, guard, None);
            }
            builder.push(" RETURNING doc");

            let row = builder
                .build_query_scalar::<Json<Document>>()
                .fetch_optional(&mut *conn)
                .await
                .map_err(|e| map_write_error(collection, e))?;
            (*id, guard.is_some(), row)
        }
        WriteOp::Increment { id, field, by, guard, .. } => {
            let mut builder = QueryBuilder::<Postgres>::new(format!("UPDATE {} SET doc = jsonb_set(doc, ARRAY[", table));
            builder.push_bind(field.clone());
            builder.push("], to_jsonb(COALESCE((doc ->> ");
            builder.push_bind(field.clone());
            builder.push(")::bigint, 0) + ");
            builder.push_bind(*by);
            builder.push(")) WHERE id = ");
            builder.push_bind(id.to_hex());
            if let Some(guard) = guard {
                push_guard(&mut builder, guard, Some((field.as_str(), *by)));
            }
            builder.push(" RETURNING doc");

            let row = builder
                .build_query_scalar::<Json<Document>>()
                .fetch_optional(&mut *conn)
                .await?;
            (*id, guard.is_some(), row)
        }
        WriteOp::Delete { id, .. } => {
            let query = format!("DELETE FROM {} WHERE id = $1 RETURNING doc", table);
            let row = sqlx::query_scalar::<_, Json<Document>>(&query)
                .bind(id.to_hex())
                .fetch_optional(&mut *conn)
                .await?;
            (*id, false, row)
        }
    };

    let Some(Json(document)) = row else {
        if guarded && exists(conn, collection, id).await? {
            return Err(StoreError::GuardFailed { collection, id });
        }
        return Err(StoreError::Missing { collection, id });
    };
    Ok(Some(document))
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn find_by_id(&self, collection: Collection, id: ObjectId) -> Result<Option<Document>, StoreError> {
        let query = format!("SELECT doc FROM {} WHERE id = $1", collection.as_str());
        let row = sqlx::query_scalar::<_, Json<Document>>(&query)
            .bind(id.to_hex())
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|Json(document)| document))
    }

    async fn find(&self, collection: Collection, filter: Filter) -> Result<Vec<Document>, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(format!("SELECT doc FROM {} WHERE TRUE", collection.as_str()));

        for condition in filter.conditions {
            match condition {
                Condition::Eq(field, value) => {
                    builder.push(" AND doc #> ");
                    builder.push_bind(field);
                    builder.push(" = ");
                    builder.push_bind(Json(value));
                }
                Condition::IsNull(field) => {
                    builder.push(" AND COALESCE(doc #> ");
                    builder.push_bind(field);
                    builder.push(", 'null'::jsonb) = 'null'::jsonb");
                }
            }
        }

        builder.push(" ORDER BY ");
        if let Some((field, order)) = filter.sort {
            builder.push("doc #> ");
            builder.push_bind(field);
            builder.push(match order {
                SortOrder::Ascending => " ASC, ",
                SortOrder::Descending => " DESC, ",
            });
        }
        builder.push("id ASC");

        if let Some(limit) = filter.limit {
            builder.push(" LIMIT ");
            builder.push_bind(limit as i64);
        }

        let rows = builder
            .build_query_scalar::<Json<Document>>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(|Json(document)| document).collect())
    }

    async fn insert(&self, collection: Collection, document: Document) -> Result<(), StoreError> {
        let mut conn = self.pool.acquire().await?;
        apply(&mut conn, &WriteOp::Insert { collection, document }).await?;
        Ok(())
    }

    async fn update_by_id(
        &self,
        collection: Collection,
        id: ObjectId,
        set: Document,
    ) -> Result<Option<Document>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        match apply(&mut conn, &WriteOp::Update { collection, id, set, guard: None }).await {
            Err(StoreError::Missing { .. }) => Ok(None),
            other => other,
        }
    }

    async fn delete_by_id(&self, collection: Collection, id: ObjectId) -> Result<Option<Document>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        match apply(&mut conn, &WriteOp::Delete { collection, id }).await {
            Err(StoreError::Missing { .. }) => Ok(None),
            other => other,
        }
    }

    async fn atomic_unit(&self, ops: Vec<WriteOp>) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        for op in &ops {
            if let Err(e) = apply(&mut *tx, op).await {
                tx.rollback().await?;
                return Err(e);
            }
        }
        tx.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
