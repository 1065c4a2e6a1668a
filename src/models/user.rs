// src/models/user.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::common::validation::{Field, FieldError, Merge, Required};
use crate::db::Collection;
use crate::models::Resource;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum UserRole {
    Admin,
    #[default]
    Sales,
    Manager,
}

// Usuário referenciado por owner/assignedTo/createdBy. Nunca é apagado em cascata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[serde(default)]
    pub role: UserRole,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserPatch {
    pub name: Field<String>,
    pub email: Field<String>,
    pub role: Field<UserRole>,
}

impl Resource for User {
    const COLLECTION: Collection = Collection::Users;

    type Patch = UserPatch;

    fn from_patch(p: UserPatch) -> Result<Self, Vec<FieldError>> {
        let mut required = Required::new();
        let name = required.take(p.name, "name", "Name is required");
        let email = required.take(p.email, "email", "Email is required");

        let (Some(name), Some(email)) = (name, email) else {
            return Err(required.into_errors());
        };
        Ok(User {
            name,
            email,
            role: p.role.unwrap_or_default(),
        })
    }

    fn apply(&mut self, p: UserPatch) -> Result<(), Vec<FieldError>> {
        let mut merge = Merge::new();
        merge.required(&mut self.name, p.name, "name", "Name is required");
        merge.required(&mut self.email, p.email, "email", "Email is required");
        merge.or_default(&mut self.role, p.role);
        merge.finish()
    }
}
