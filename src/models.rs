// src/models.rs

use serde::{de::DeserializeOwned, Serialize};
use validator::Validate;

use crate::common::validation::FieldError;
use crate::db::Collection;

pub mod activity;
pub mod contact;
pub mod document;
pub mod finance;
pub mod lead;
pub mod search;
pub mod stats;
pub mod user;

pub use document::Document;

/// O "esquema" de uma entidade para o controlador genérico.
///
/// O próprio struct carrega as regras de campo (`Validate`); o `Patch` é a
/// versão parcial do payload, com todos os campos opcionais.
pub trait Resource: Serialize + DeserializeOwned + Validate + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;

    type Patch: DeserializeOwned + Send + 'static;

    /// Payload completo -> entidade: confere obrigatórios e aplica os padrões.
    fn from_patch(patch: Self::Patch) -> Result<Self, Vec<FieldError>>;

    /// Mescla apenas os campos presentes no patch. `null` limpa opcionais
    /// e é recusado em obrigatórios.
    fn apply(&mut self, patch: Self::Patch) -> Result<(), Vec<FieldError>>;
}
