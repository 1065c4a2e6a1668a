// src/db/document_store.rs

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

// As coleções conhecidas pelo store. O nome é o mesmo usado na coluna `collection`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Contacts,
    Leads,
    Activities,
    Users,
    Quotes,
    Invoices,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Collection::Contacts => "contacts",
            Collection::Leads => "leads",
            Collection::Activities => "activities",
            Collection::Users => "users",
            Collection::Quotes => "quotes",
            Collection::Invoices => "invoices",
        }
    }

    pub fn singular(self) -> &'static str {
        match self {
            Collection::Contacts => "contact",
            Collection::Leads => "lead",
            Collection::Activities => "activity",
            Collection::Users => "user",
            Collection::Quotes => "quote",
            Collection::Invoices => "invoice",
        }
    }

    /// Campos com índice único dentro da coleção.
    /// Devem espelhar os índices parciais da migração.
    pub fn unique_fields(self) -> &'static [&'static str] {
        match self {
            Collection::Contacts | Collection::Users => &["email"],
            _ => &[],
        }
    }
}

/// Documento como o store o guarda: corpo JSON + metadados do sistema.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    pub id: Uuid,
    pub body: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredDocument {
    /// Forma pública do documento: `{ id, ...body, createdAt, updatedAt }`.
    pub fn into_json(self) -> Value {
        let mut object = match self.body {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        object.insert("id".into(), Value::String(self.id.to_string()));
        // Mesmo formato que o serde do chrono produz para DateTime<Utc>.
        let stamp = |at: DateTime<Utc>| Value::String(at.to_rfc3339_opts(SecondsFormat::AutoSi, true));
        object.insert("createdAt".into(), stamp(self.created_at));
        object.insert("updatedAt".into(), stamp(self.updated_at));
        Value::Object(object)
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("unique constraint violated on {}.{field}", .collection.as_str())]
    Conflict {
        collection: Collection,
        field: &'static str,
    },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("corrupt document: {0}")]
    Corrupt(String),
}

/// Capacidade de persistência usada pelos serviços.
///
/// Cada operação é atômica no nível de um documento; nada além disso é
/// garantido. Atualizações concorrentes no mesmo documento: vence a última.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Todos os documentos da coleção, mais recentes primeiro.
    async fn find_all(&self, collection: Collection) -> Result<Vec<StoredDocument>, StoreError>;

    async fn find_by_id(
        &self,
        collection: Collection,
        id: Uuid,
    ) -> Result<Option<StoredDocument>, StoreError>;

    async fn insert(&self, collection: Collection, body: Value) -> Result<StoredDocument, StoreError>;

    /// Substitui o corpo e atualiza `updated_at`. `None` se o documento não existe.
    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        body: Value,
    ) -> Result<Option<StoredDocument>, StoreError>;

    /// `true` se algo foi removido.
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError>;

    /// Busca por substring (sem diferenciar maiúsculas) em qualquer um dos
    /// campos de texto informados, na ordem natural do store, até `limit`.
    async fn search(
        &self,
        collection: Collection,
        fields: &[&str],
        needle: &str,
        limit: usize,
    ) -> Result<Vec<StoredDocument>, StoreError>;
}
