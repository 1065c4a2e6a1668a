// src/services/resource_service.rs

use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value;
use uuid::Uuid;

use crate::{
    common::{
        error::AppError,
        validation::{check, decode_payload},
    },
    db::DocumentStore,
    models::{document::decode_all, Document, Resource},
};

/// CRUD genérico: o mesmo fluxo para qualquer entidade que implemente `Resource`.
pub struct ResourceService<T> {
    store: Arc<dyn DocumentStore>,
    _entity: PhantomData<fn() -> T>,
}

// Derive exigiria T: Clone
impl<T> Clone for ResourceService<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T: Resource> ResourceService<T> {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            _entity: PhantomData,
        }
    }

    pub async fn list(&self) -> Result<Vec<Document<T>>, AppError> {
        let docs = self.store.find_all(T::COLLECTION).await?;
        Ok(decode_all(docs)?)
    }

    pub async fn get(&self, id: Uuid) -> Result<Document<T>, AppError> {
        let doc = self
            .store
            .find_by_id(T::COLLECTION, id)
            .await?
            .ok_or(AppError::NotFound)?;
        Ok(Document::try_from(doc)?)
    }

    /// Valida o payload completo (obrigatórios + regras) e persiste.
    pub async fn create(&self, payload: Value) -> Result<Document<T>, AppError> {
        let patch = decode_payload::<T::Patch>(payload)?;
        let entity = T::from_patch(patch).map_err(AppError::Validation)?;
        self.insert(entity).await
    }

    /// Persiste uma entidade já construída (usado também pelo seed).
    pub async fn insert(&self, entity: T) -> Result<Document<T>, AppError> {
        check(&entity)?;
        let body = serde_json::to_value(&entity).map_err(anyhow::Error::from)?;
        let doc = self.store.insert(T::COLLECTION, body).await?;

        tracing::info!(collection = T::COLLECTION.as_str(), id = %doc.id, "documento criado");
        Ok(Document::try_from(doc)?)
    }

    /// Mescla o payload parcial no documento atual e revalida o resultado.
    pub async fn update(&self, id: Uuid, payload: Value) -> Result<Document<T>, AppError> {
        let patch = decode_payload::<T::Patch>(payload)?;

        let mut current = self.get(id).await?.body;
        current.apply(patch).map_err(AppError::Validation)?;
        check(&current)?;

        let body = serde_json::to_value(&current).map_err(anyhow::Error::from)?;
        let doc = self
            .store
            .replace(T::COLLECTION, id, body)
            .await?
            // Removido entre a leitura e a escrita
            .ok_or(AppError::NotFound)?;

        tracing::info!(collection = T::COLLECTION.as_str(), id = %id, "documento atualizado");
        Ok(Document::try_from(doc)?)
    }

    /// Remove sem cascata: referências órfãs são aceitas.
    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !self.store.delete(T::COLLECTION, id).await? {
            return Err(AppError::NotFound);
        }
        tracing::info!(collection = T::COLLECTION.as_str(), id = %id, "documento removido");
        Ok(())
    }
}
