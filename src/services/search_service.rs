// src/services/search_service.rs

use std::sync::Arc;

use futures::future::try_join_all;
use serde_json::Value;

use crate::{
    common::error::AppError,
    db::{Collection, DocumentStore, StoreError, StoredDocument},
    models::{activity::Activity, document::decode_all, search::SearchResults, Document},
};

pub const MIN_QUERY_CHARS: usize = 2;
pub const RESULTS_PER_KIND: usize = 5;

const CONTACT_FIELDS: &[&str] = &["firstName", "lastName", "email", "companyName"];
const LEAD_FIELDS: &[&str] = &["title", "companyName"];
const ACTIVITY_FIELDS: &[&str] = &["description", "outcome"];

#[derive(Clone)]
pub struct SearchService {
    store: Arc<dyn DocumentStore>,
}

impl SearchService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Busca global em contatos, negócios e atividades.
    ///
    /// As três consultas rodam juntas e a resposta só sai quando todas
    /// terminam; qualquer falha derruba a operação inteira.
    pub async fn search(&self, query: &str) -> Result<SearchResults, AppError> {
        if query.chars().count() < MIN_QUERY_CHARS {
            return Ok(SearchResults::default());
        }

        let (contacts, leads, activities) = tokio::join!(
            self.store
                .search(Collection::Contacts, CONTACT_FIELDS, query, RESULTS_PER_KIND),
            self.store
                .search(Collection::Leads, LEAD_FIELDS, query, RESULTS_PER_KIND),
            self.search_activities(query),
        );

        let results = SearchResults {
            contacts: decode_all(contacts?)?,
            leads: decode_all(leads?)?,
            activities: activities?,
        };

        tracing::debug!(
            query,
            contacts = results.contacts.len(),
            leads = results.leads.len(),
            activities = results.activities.len(),
            "busca concluída"
        );
        Ok(results)
    }

    async fn search_activities(&self, query: &str) -> Result<Vec<Value>, StoreError> {
        let found = self
            .store
            .search(Collection::Activities, ACTIVITY_FIELDS, query, RESULTS_PER_KIND)
            .await?;
        let activities: Vec<Document<Activity>> = decode_all(found)?;

        try_join_all(activities.into_iter().map(|activity| self.populate(activity))).await
    }

    // Troca o id de `relatedTo` pelo documento alvo (null se não existe mais).
    async fn populate(&self, activity: Document<Activity>) -> Result<Value, StoreError> {
        let target = activity.body.related;
        let related = self
            .store
            .find_by_id(target.collection(), target.id())
            .await?
            .map(StoredDocument::into_json)
            .unwrap_or(Value::Null);

        let mut value = serde_json::to_value(&activity)
            .map_err(|e| StoreError::Corrupt(format!("activity {}: {}", activity.id, e)))?;
        if let Value::Object(map) = &mut value {
            map.insert("relatedTo".into(), related);
        }
        Ok(value)
    }
}
