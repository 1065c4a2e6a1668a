// src/models/activity.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::openapi::{schema::Schema, RefOr};
use utoipa::{PartialSchema, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{deserialize_date_field, Field, FieldError, Merge, Required};
use crate::db::Collection;
use crate::models::Resource;

// --- ENUMS ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum ActivityType {
    Call,
    Meeting,
    Email,
    Note,
}

// O discriminador que vem no JSON (`relatedToType`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum RelatedKind {
    Contact,
    Lead,
}

/// Referência polimórfica: a coleção alvo faz parte do valor.
///
/// No JSON continua como dois campos planos (`relatedTo` + `relatedToType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RelatedRef", into = "RelatedRef")]
pub enum RelatedTo {
    Contact(Uuid),
    Lead(Uuid),
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
struct RelatedRef {
    related_to: Uuid,
    #[schema(inline)]
    related_to_type: RelatedKind,
}

// No schema a referência aparece com o mesmo formato do JSON.
impl PartialSchema for RelatedTo {
    fn schema() -> RefOr<Schema> {
        RelatedRef::schema()
    }
}

impl ToSchema for RelatedTo {}

impl From<RelatedRef> for RelatedTo {
    fn from(raw: RelatedRef) -> Self {
        RelatedTo::new(raw.related_to_type, raw.related_to)
    }
}

impl From<RelatedTo> for RelatedRef {
    fn from(target: RelatedTo) -> Self {
        RelatedRef {
            related_to: target.id(),
            related_to_type: target.kind(),
        }
    }
}

impl RelatedTo {
    pub fn new(kind: RelatedKind, id: Uuid) -> Self {
        match kind {
            RelatedKind::Contact => RelatedTo::Contact(id),
            RelatedKind::Lead => RelatedTo::Lead(id),
        }
    }

    pub fn id(self) -> Uuid {
        match self {
            RelatedTo::Contact(id) | RelatedTo::Lead(id) => id,
        }
    }

    pub fn kind(self) -> RelatedKind {
        match self {
            RelatedTo::Contact(_) => RelatedKind::Contact,
            RelatedTo::Lead(_) => RelatedKind::Lead,
        }
    }

    /// Coleção onde o alvo deve ser procurado.
    pub fn collection(self) -> Collection {
        match self {
            RelatedTo::Contact(_) => Collection::Contacts,
            RelatedTo::Lead(_) => Collection::Leads,
        }
    }
}

// --- ATIVIDADE ---

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    #[serde(rename = "type")]
    pub kind: ActivityType,

    pub date: DateTime<Utc>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    #[schema(inline)]
    pub related: RelatedTo,

    pub created_by: Uuid,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ActivityPatch {
    #[serde(rename = "type")]
    pub kind: Field<ActivityType>,
    #[serde(deserialize_with = "deserialize_date_field")]
    pub date: Field<DateTime<Utc>>,
    pub outcome: Field<String>,
    pub description: Field<String>,
    pub related_to: Field<Uuid>,
    pub related_to_type: Field<RelatedKind>,
    pub created_by: Field<Uuid>,
}

impl Resource for Activity {
    const COLLECTION: Collection = Collection::Activities;

    type Patch = ActivityPatch;

    fn from_patch(p: ActivityPatch) -> Result<Self, Vec<FieldError>> {
        let mut required = Required::new();
        let kind = required.take(p.kind, "type", "Activity type is required");
        let related_to = required.take(p.related_to, "relatedTo", "Related entity ID is required");
        let related_kind = required.take(p.related_to_type, "relatedToType", "Related entity type is required");
        let created_by = required.take(p.created_by, "createdBy", "Creator ID is required");

        let (Some(kind), Some(related_to), Some(related_kind), Some(created_by)) =
            (kind, related_to, related_kind, created_by)
        else {
            return Err(required.into_errors());
        };

        Ok(Activity {
            kind,
            date: p.date.into_option().unwrap_or_else(Utc::now),
            outcome: p.outcome.into_option(),
            description: p.description.into_option(),
            related: RelatedTo::new(related_kind, related_to),
            created_by,
        })
    }

    fn apply(&mut self, p: ActivityPatch) -> Result<(), Vec<FieldError>> {
        let mut merge = Merge::new();
        merge.required(&mut self.kind, p.kind, "type", "Activity type is required");
        merge.required(&mut self.date, p.date, "date", "Date is required");
        merge.optional(&mut self.outcome, p.outcome);
        merge.optional(&mut self.description, p.description);
        merge.required(&mut self.created_by, p.created_by, "createdBy", "Creator ID is required");

        // Qualquer metade da referência pode mudar sozinha.
        let mut kind = self.related.kind();
        let mut id = self.related.id();
        merge.required(&mut id, p.related_to, "relatedTo", "Related entity ID is required");
        merge.required(&mut kind, p.related_to_type, "relatedToType", "Related entity type is required");
        self.related = RelatedTo::new(kind, id);

        merge.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::validation::decode_payload;
    use serde_json::json;

    #[test]
    fn reference_keeps_the_flat_wire_shape() {
        let lead_id = Uuid::new_v4();
        let patch: ActivityPatch = decode_payload(json!({
            "type": "Call",
            "relatedTo": lead_id,
            "relatedToType": "Lead",
            "createdBy": Uuid::nil(),
            "description": "Initial discovery call",
        }))
        .unwrap();
        let activity = Activity::from_patch(patch).unwrap();
        assert_eq!(activity.related, RelatedTo::Lead(lead_id));
        assert_eq!(activity.related.collection(), Collection::Leads);

        let value = serde_json::to_value(&activity).unwrap();
        assert_eq!(value["relatedTo"], json!(lead_id));
        assert_eq!(value["relatedToType"], "Lead");

        let back: Activity = serde_json::from_value(value).unwrap();
        assert_eq!(back, activity);
    }

    #[test]
    fn date_defaults_to_now() {
        let before = Utc::now();
        let activity = Activity::from_patch(ActivityPatch {
            kind: Field::Value(ActivityType::Note),
            related_to: Field::Value(Uuid::nil()),
            related_to_type: Field::Value(RelatedKind::Contact),
            created_by: Field::Value(Uuid::nil()),
            ..Default::default()
        })
        .unwrap();
        assert!(activity.date >= before);
    }

    #[test]
    fn switching_only_the_discriminator_keeps_the_id() {
        let id = Uuid::new_v4();
        let mut activity = Activity::from_patch(ActivityPatch {
            kind: Field::Value(ActivityType::Email),
            related_to: Field::Value(id),
            related_to_type: Field::Value(RelatedKind::Contact),
            created_by: Field::Value(Uuid::nil()),
            ..Default::default()
        })
        .unwrap();

        activity
            .apply(ActivityPatch {
                related_to_type: Field::Value(RelatedKind::Lead),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(activity.related, RelatedTo::Lead(id));
    }

    #[test]
    fn missing_reference_is_reported() {
        let errors = Activity::from_patch(ActivityPatch {
            kind: Field::Value(ActivityType::Meeting),
            created_by: Field::Value(Uuid::nil()),
            ..Default::default()
        })
        .unwrap_err();
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["relatedTo", "relatedToType"]);
    }

    #[test]
    fn null_outcome_is_cleared_but_null_reference_is_rejected() {
        let mut activity = Activity::from_patch(ActivityPatch {
            kind: Field::Value(ActivityType::Call),
            outcome: Field::Value("Voicemail".into()),
            related_to: Field::Value(Uuid::nil()),
            related_to_type: Field::Value(RelatedKind::Lead),
            created_by: Field::Value(Uuid::nil()),
            ..Default::default()
        })
        .unwrap();

        activity
            .apply(ActivityPatch {
                outcome: Field::Null,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(activity.outcome, None);

        let errors = activity
            .apply(ActivityPatch {
                related_to: Field::Null,
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(errors[0].path, "relatedTo");
        assert_eq!(activity.related, RelatedTo::Lead(Uuid::nil()));
    }
}
