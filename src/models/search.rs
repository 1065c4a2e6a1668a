// src/models/search.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::{IntoParams, ToSchema};

use crate::models::{contact::Contact, lead::Lead, Document};

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct SearchQuery {
    /// Texto livre; menos de 2 caracteres devolve resultado vazio.
    pub q: Option<String>,
}

// Resultado unificado da busca global
#[derive(Debug, Default, Serialize, ToSchema)]
pub struct SearchResults {
    #[schema(value_type = Vec<Object>)]
    pub contacts: Vec<Document<Contact>>,

    #[schema(value_type = Vec<Object>)]
    pub leads: Vec<Document<Lead>>,

    // Atividades com `relatedTo` já resolvido para o documento alvo
    #[schema(value_type = Vec<Object>)]
    pub activities: Vec<Value>,
}
