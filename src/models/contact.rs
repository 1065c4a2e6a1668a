// src/models/contact.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{Field, FieldError, Merge, Required};
use crate::db::Collection;
use crate::models::Resource;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ContactType {
    Private,
    Business,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum ContactStatus {
    #[default]
    Active,
    Inactive,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Address {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

// --- CONTATO ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    #[validate(length(min = 1, message = "First name is required"))]
    #[schema(example = "Alice")]
    pub first_name: String,

    #[validate(length(min = 1, message = "Last name is required"))]
    #[schema(example = "Johnson")]
    pub last_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[validate(email(message = "Invalid email address"))]
    #[schema(example = "alice@techcorp.com")]
    pub email: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,

    #[serde(rename = "type")]
    pub kind: ContactType,

    #[serde(default)]
    pub status: ContactStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    pub owner: Uuid,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Payload parcial (create e update).
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactPatch {
    pub first_name: Field<String>,
    pub last_name: Field<String>,
    pub company_name: Field<String>,
    pub email: Field<String>,
    pub phone: Field<String>,
    pub address: Field<Address>,
    #[serde(rename = "type")]
    pub kind: Field<ContactType>,
    pub status: Field<ContactStatus>,
    pub source: Field<String>,
    pub owner: Field<Uuid>,
    pub tags: Field<Vec<String>>,
}

impl Resource for Contact {
    const COLLECTION: Collection = Collection::Contacts;

    type Patch = ContactPatch;

    fn from_patch(p: ContactPatch) -> Result<Self, Vec<FieldError>> {
        let mut required = Required::new();
        let first_name = required.take(p.first_name, "firstName", "First name is required");
        let last_name = required.take(p.last_name, "lastName", "Last name is required");
        let email = required.take(p.email, "email", "Email is required");
        let kind = required.take(p.kind, "type", "Contact type is required");
        let owner = required.take(p.owner, "owner", "Owner ID is required");

        let (Some(first_name), Some(last_name), Some(email), Some(kind), Some(owner)) =
            (first_name, last_name, email, kind, owner)
        else {
            return Err(required.into_errors());
        };

        Ok(Contact {
            first_name,
            last_name,
            company_name: p.company_name.into_option(),
            email,
            phone: p.phone.into_option(),
            address: p.address.into_option(),
            kind,
            status: p.status.unwrap_or_default(),
            source: p.source.into_option(),
            owner,
            tags: p.tags.unwrap_or_default(),
        })
    }

    fn apply(&mut self, p: ContactPatch) -> Result<(), Vec<FieldError>> {
        let mut merge = Merge::new();
        merge.required(&mut self.first_name, p.first_name, "firstName", "First name is required");
        merge.required(&mut self.last_name, p.last_name, "lastName", "Last name is required");
        merge.optional(&mut self.company_name, p.company_name);
        merge.required(&mut self.email, p.email, "email", "Email is required");
        merge.optional(&mut self.phone, p.phone);
        merge.optional(&mut self.address, p.address);
        merge.required(&mut self.kind, p.kind, "type", "Contact type is required");
        merge.or_default(&mut self.status, p.status);
        merge.optional(&mut self.source, p.source);
        merge.required(&mut self.owner, p.owner, "owner", "Owner ID is required");
        merge.or_default(&mut self.tags, p.tags);
        merge.finish()
    }
}
