// src/models/lead.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{deserialize_date_field, validate_not_negative, Field, FieldError, Merge, Required};
use crate::db::Collection;
use crate::models::Resource;

// --- ENUMS ---

// Estado de qualificação. Independe do estágio no funil.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    Lost,
}

// Coluna do quadro do funil (pipeline)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum LeadStage {
    #[default]
    Prospecting,
    Negotiation,
    #[serde(rename = "Closed Won")]
    ClosedWon,
}

// --- NEGÓCIO (DEAL) ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    #[validate(length(min = 1, message = "Title is required"))]
    #[schema(example = "Enterprise License Deal")]
    pub title: String,

    #[validate(length(min = 1, message = "Company name is required"))]
    #[schema(example = "TechCorp")]
    pub company_name: String,

    #[serde(default)]
    pub status: LeadStatus,

    #[validate(range(min = 0.0, max = 100.0, message = "Lead score must be between 0 and 100"))]
    #[serde(default)]
    pub lead_score: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    pub assigned_to: Uuid,

    #[serde(default)]
    pub stage: LeadStage,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    #[schema(value_type = f64, example = 25000)]
    pub estimated_value: Decimal,

    #[validate(range(min = 0.0, max = 100.0, message = "Probability must be between 0 and 100"))]
    #[serde(default)]
    pub probability: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_close_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LeadPatch {
    pub title: Field<String>,
    pub company_name: Field<String>,
    pub status: Field<LeadStatus>,
    pub lead_score: Field<f64>,
    pub source: Field<String>,
    pub assigned_to: Field<Uuid>,
    pub stage: Field<LeadStage>,
    pub estimated_value: Field<Decimal>,
    pub probability: Field<f64>,
    #[serde(deserialize_with = "deserialize_date_field")]
    pub expected_close_date: Field<DateTime<Utc>>,
}

impl Lead {
    /// Negócio encerrado: ganho no funil ou perdido na qualificação.
    pub fn is_finished(&self) -> bool {
        self.stage == LeadStage::ClosedWon || self.status == LeadStatus::Lost
    }
}

impl Resource for Lead {
    const COLLECTION: Collection = Collection::Leads;

    type Patch = LeadPatch;

    fn from_patch(p: LeadPatch) -> Result<Self, Vec<FieldError>> {
        let mut required = Required::new();
        let title = required.take(p.title, "title", "Title is required");
        let company_name = required.take(p.company_name, "companyName", "Company name is required");
        let assigned_to = required.take(p.assigned_to, "assignedTo", "Assigned user ID is required");

        let (Some(title), Some(company_name), Some(assigned_to)) = (title, company_name, assigned_to) else {
            return Err(required.into_errors());
        };

        Ok(Lead {
            title,
            company_name,
            status: p.status.unwrap_or_default(),
            lead_score: p.lead_score.unwrap_or_default(),
            source: p.source.into_option(),
            assigned_to,
            stage: p.stage.unwrap_or_default(),
            estimated_value: p.estimated_value.unwrap_or_default(),
            probability: p.probability.unwrap_or_default(),
            expected_close_date: p.expected_close_date.into_option(),
        })
    }

    fn apply(&mut self, p: LeadPatch) -> Result<(), Vec<FieldError>> {
        let mut merge = Merge::new();
        merge.required(&mut self.title, p.title, "title", "Title is required");
        merge.required(&mut self.company_name, p.company_name, "companyName", "Company name is required");
        merge.or_default(&mut self.status, p.status);
        merge.or_default(&mut self.lead_score, p.lead_score);
        merge.optional(&mut self.source, p.source);
        merge.required(&mut self.assigned_to, p.assigned_to, "assignedTo", "Assigned user ID is required");
        merge.or_default(&mut self.stage, p.stage);
        merge.or_default(&mut self.estimated_value, p.estimated_value);
        merge.or_default(&mut self.probability, p.probability);
        merge.optional(&mut self.expected_close_date, p.expected_close_date);
        merge.finish()
    }
}
