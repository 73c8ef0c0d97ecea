//! PostgreSQL implementation of DocumentStore.
//!
//! All collections share one JSONB table (see `migrations/`). Predicates on
//! dotted field paths compile to `body #> path` expressions, so every query
//! the port can express is evaluated natively.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use std::path::Path;
use std::time::Duration;

use crate::ports::{
    Document, DocumentQuery, DocumentStore, FilterOp, Predicate, QueryCapabilities, StoreError,
};

/// PostgreSQL implementation of [`DocumentStore`].
#[derive(Clone)]
pub struct PostgresDocumentStore {
    pool: PgPool,
}

impl PostgresDocumentStore {
    /// Creates a store over an existing pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a new pool.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await
            .map_err(|e| store_error("connect", e))?;
        Ok(Self::new(pool))
    }

    /// Applies the SQL migrations found in `dir`.
    pub async fn run_migrations(&self, dir: &Path) -> Result<(), StoreError> {
        let migrator = sqlx::migrate::Migrator::new(dir)
            .await
            .map_err(|e| StoreError::Unavailable(format!("loading migrations: {}", e)))?;
        migrator
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Unavailable(format!("running migrations: {}", e)))
    }
}

fn store_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            StoreError::Malformed(format!("{}: {}", operation, err))
        }
        other => StoreError::Unavailable(format!("{}: {}", operation, other)),
    }
}

fn path_of(field: &str) -> Vec<String> {
    field.split('.').map(str::to_string).collect()
}

fn row_to_document(row: PgRow) -> Result<Document, StoreError> {
    let body: Value = row
        .try_get("body")
        .map_err(|e| store_error("decode body", e))?;
    match body {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Malformed(format!(
            "stored body is not an object: {}",
            other
        ))),
    }
}

/// Appends `AND <predicate>` for each predicate.
fn push_predicates(builder: &mut QueryBuilder<'_, Postgres>, predicates: &[Predicate]) {
    for predicate in predicates {
        let path = path_of(&predicate.field);
        match predicate.op {
            FilterOp::Eq => {
                builder.push(" AND body #> ");
                builder.push_bind(path);
                builder.push(" = ");
                builder.push_bind(predicate.value.clone());
            }
            FilterOp::Gte | FilterOp::Lte => {
                let op = if predicate.op == FilterOp::Gte { " >= " } else { " <= " };
                builder.push(" AND jsonb_typeof(body #> ");
                builder.push_bind(path.clone());
                builder.push(") = jsonb_typeof(");
                builder.push_bind(predicate.value.clone());
                builder.push(") AND body #> ");
                builder.push_bind(path);
                builder.push(op);
                builder.push_bind(predicate.value.clone());
            }
            FilterOp::ArrayContains => {
                builder.push(" AND jsonb_typeof(body #> ");
                builder.push_bind(path.clone());
                builder.push(") = 'array' AND body #> ");
                builder.push_bind(path);
                builder.push(" @> jsonb_build_array(");
                builder.push_bind(predicate.value.clone());
                builder.push(")");
            }
        }
    }
}

#[async_trait]
impl DocumentStore for PostgresDocumentStore {
    fn capabilities(&self) -> QueryCapabilities {
        QueryCapabilities::full()
    }

    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let row = sqlx::query("SELECT body FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| store_error("get", e))?;

        row.map(row_to_document).transpose()
    }

    async fn query(
        &self,
        collection: &str,
        query: &DocumentQuery,
    ) -> Result<Vec<Document>, StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new(
            "SELECT body FROM documents WHERE collection = ",
        );
        builder.push_bind(collection.to_string());
        push_predicates(&mut builder, &query.predicates);

        builder.push(" ORDER BY ");
        if let Some(sort) = &query.sort {
            builder.push("body #> ");
            builder.push_bind(path_of(&sort.field));
            builder.push(if sort.descending {
                " DESC NULLS LAST, "
            } else {
                " ASC NULLS LAST, "
            });
        }
        builder.push("seq");

        if let Some(limit) = query.limit {
            builder.push(" LIMIT ");
            builder.push_bind(i64::try_from(limit).unwrap_or(i64::MAX));
        }

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| store_error("query", e))?;

        rows.into_iter().map(row_to_document).collect()
    }

    async fn put(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO UPDATE SET body = EXCLUDED.body
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Value::Object(doc))
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("put", e))?;

        Ok(())
    }

    async fn create(&self, collection: &str, id: &str, doc: Document) -> Result<(), StoreError> {
        let result = sqlx::query(
            r#"
            INSERT INTO documents (collection, id, body) VALUES ($1, $2, $3)
            ON CONFLICT (collection, id) DO NOTHING
            "#,
        )
        .bind(collection)
        .bind(id)
        .bind(Value::Object(doc))
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("create", e))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::already_exists(collection, id));
        }
        Ok(())
    }

    async fn update(
        &self,
        collection: &str,
        id: &str,
        patch: Document,
    ) -> Result<(), StoreError> {
        self.update_if(collection, id, &[], patch).await
    }

    async fn update_if(
        &self,
        collection: &str,
        id: &str,
        preconditions: &[Predicate],
        patch: Document,
    ) -> Result<(), StoreError> {
        let mut builder = QueryBuilder::<Postgres>::new("UPDATE documents SET body = body || ");
        builder.push_bind(Value::Object(patch));
        builder.push(" WHERE collection = ");
        builder.push_bind(collection.to_string());
        builder.push(" AND id = ");
        builder.push_bind(id.to_string());
        push_predicates(&mut builder, preconditions);

        let result = builder
            .build()
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("update", e))?;

        if result.rows_affected() == 0 {
            return match self.get(collection, id).await? {
                Some(_) => Err(StoreError::precondition_failed(collection, id)),
                None => Err(StoreError::not_found(collection, id)),
            };
        }
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("delete", e))?;
        Ok(())
    }
}
