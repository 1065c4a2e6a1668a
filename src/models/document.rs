// src/models/document.rs

use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Serialize};
use uuid::Uuid;

use crate::db::{StoreError, StoredDocument};

/// Entidade tipada + metadados do sistema. Serializa "achatado":
/// `{ id, ...campos, createdAt, updatedAt }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document<T> {
    pub id: Uuid,
    #[serde(flatten)]
    pub body: T,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<T: DeserializeOwned> TryFrom<StoredDocument> for Document<T> {
    type Error = StoreError;

    fn try_from(doc: StoredDocument) -> Result<Self, Self::Error> {
        let body = serde_json::from_value(doc.body)
            .map_err(|e| StoreError::Corrupt(format!("document {}: {}", doc.id, e)))?;
        Ok(Self {
            id: doc.id,
            body,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }
}

pub fn decode_all<T: DeserializeOwned>(docs: Vec<StoredDocument>) -> Result<Vec<Document<T>>, StoreError> {
    docs.into_iter().map(Document::try_from).collect()
}
