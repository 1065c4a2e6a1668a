// src/db/pg_store.rs

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::common::db_utils::like_pattern;
use crate::db::document_store::{Collection, DocumentStore, StoreError, StoredDocument};

// Linha da tabela `documents`
#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Value,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DocumentRow> for StoredDocument {
    fn from(row: DocumentRow) -> Self {
        Self {
            id: row.id,
            body: row.body,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Store sobre Postgres: todas as coleções em uma tabela JSONB.
#[derive(Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // Converte erro de violação de chave única em conflito da coleção
    fn map_write_error(collection: Collection, e: sqlx::Error) -> StoreError {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                let field = collection.unique_fields().first().copied().unwrap_or("id");
                return StoreError::Conflict { collection, field };
            }
        }
        StoreError::Database(e)
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn find_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, StoreError> {
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT id, body, created_at, updated_at
            FROM documents
            WHERE collection = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(collection.as_str())
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StoredDocument::from).collect())
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<StoredDocument>, StoreError> {
        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body, created_at, updated_at FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection.as_str())
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(StoredDocument::from))
    }

    async fn insert(&self, collection: Collection, body: Value) -> Result<StoredDocument, StoreError> {
        sqlx::query_as::<_, DocumentRow>(
            r#"
            INSERT INTO documents (id, collection, body)
            VALUES ($1, $2, $3)
            RETURNING id, body, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(collection.as_str())
        .bind(&body)
        .fetch_one(&self.pool)
        .await
        .map(StoredDocument::from)
        .map_err(|e| Self::map_write_error(collection, e))
    }

    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        body: Value,
    ) -> Result<Option<StoredDocument>, StoreError> {
        sqlx::query_as::<_, DocumentRow>(
            r#"
            UPDATE documents
            SET body = $3, updated_at = now()
            WHERE collection = $1 AND id = $2
            RETURNING id, body, created_at, updated_at
            "#,
        )
        .bind(collection.as_str())
        .bind(id)
        .bind(&body)
        .fetch_optional(&self.pool)
        .await
        .map(|row| row.map(StoredDocument::from))
        .map_err(|e| Self::map_write_error(collection, e))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.as_str())
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn search(
        &self,
        collection: Collection,
        fields: &[&str],
        needle: &str,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        let fields: Vec<String> = fields.iter().map(|f| f.to_string()).collect();

        // Os nomes dos campos também vão como parâmetro (body ->> f)
        let rows = sqlx::query_as::<_, DocumentRow>(
            r#"
            SELECT d.id, d.body, d.created_at, d.updated_at
            FROM documents d
            WHERE d.collection = $1
              AND EXISTS (
                  SELECT 1 FROM unnest($2::text[]) AS f(name)
                  WHERE d.body ->> f.name ILIKE $3
              )
            LIMIT $4
            "#,
        )
        .bind(collection.as_str())
        .bind(&fields)
        .bind(like_pattern(needle))
        .bind(i64::try_from(limit).unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(StoredDocument::from).collect())
    }
}
