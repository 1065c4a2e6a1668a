// src/db/memory_store.rs

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::common::db_utils::contains_ignore_case;
use crate::db::document_store::{Collection, DocumentStore, StoreError, StoredDocument};

/// Store em memória: testes e desenvolvimento local sem `DATABASE_URL`.
///
/// Os documentos de cada coleção ficam em ordem de inserção, que é a "ordem
/// natural" usada pela busca.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<StoredDocument>>>,
    operations: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Quantas operações já chegaram ao store.
    pub fn operation_count(&self) -> usize {
        self.operations.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.operations.fetch_add(1, Ordering::SeqCst);
    }
}

// Verifica os campos únicos da coleção contra os outros documentos.
fn check_unique(
    collection: Collection,
    docs: &[StoredDocument],
    body: &Value,
    skip: Option<Uuid>,
) -> Result<(), StoreError> {
    for &field in collection.unique_fields() {
        let Some(value) = body.get(field).filter(|v| !v.is_null()) else {
            continue;
        };
        let taken = docs
            .iter()
            .filter(|doc| Some(doc.id) != skip)
            .any(|doc| doc.body.get(field) == Some(value));
        if taken {
            return Err(StoreError::Conflict { collection, field });
        }
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, StoreError> {
        self.touch();
        let guard = self.collections.read().await;
        let mut docs: Vec<StoredDocument> = guard
            .get(&collection)
            .map(|docs| docs.iter().rev().cloned().collect())
            .unwrap_or_default();
        // Ordenação estável: empates de timestamp mantêm o mais novo primeiro.
        docs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(docs)
    }

    async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<StoredDocument>, StoreError> {
        self.touch();
        let guard = self.collections.read().await;
        Ok(guard
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id))
            .cloned())
    }

    async fn insert(&self, collection: Collection, body: Value) -> Result<StoredDocument, StoreError> {
        self.touch();
        let mut guard = self.collections.write().await;
        let docs = guard.entry(collection).or_default();
        check_unique(collection, docs, &body, None)?;

        let now = Utc::now();
        let doc = StoredDocument {
            id: Uuid::new_v4(),
            body,
            created_at: now,
            updated_at: now,
        };
        docs.push(doc.clone());
        Ok(doc)
    }

    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        body: Value,
    ) -> Result<Option<StoredDocument>, StoreError> {
        self.touch();
        let mut guard = self.collections.write().await;
        let docs = guard.entry(collection).or_default();
        check_unique(collection, docs, &body, Some(id))?;

        let Some(doc) = docs.iter_mut().find(|doc| doc.id == id) else {
            return Ok(None);
        };
        doc.body = body;
        doc.updated_at = Utc::now();
        Ok(Some(doc.clone()))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError> {
        self.touch();
        let mut guard = self.collections.write().await;
        let Some(docs) = guard.get_mut(&collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        Ok(docs.len() < before)
    }

    async fn search(
        &self,
        collection: Collection,
        fields: &[&str],
        needle: &str,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, StoreError> {
        self.touch();
        let guard = self.collections.read().await;
        let Some(docs) = guard.get(&collection) else {
            return Ok(Vec::new());
        };

        Ok(docs
            .iter()
            .filter(|doc| {
                fields.iter().any(|field| {
                    doc.body
                        .get(*field)
                        .and_then(Value::as_str)
                        .is_some_and(|text| contains_ignore_case(text, needle))
                })
            })
            .take(limit)
            .cloned()
            .collect())
    }
}
