// src/models/finance.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::validation::{validate_not_negative, Field, FieldError, Merge, Required};
use crate::db::Collection;
use crate::models::Resource;

// =============================================================================
//  ORÇAMENTOS (QUOTES)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum QuoteStatus {
    #[default]
    Draft,
    Sent,
    Accepted,
    Rejected,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct LineItem {
    #[validate(length(min = 1, message = "Product name is required"))]
    pub name: String,

    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: u32,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = f64, example = 100)]
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    #[validate(length(min = 1, message = "At least one product is required"), nested)]
    pub products: Vec<LineItem>,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    #[schema(value_type = f64)]
    pub discount: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    #[serde(default)]
    #[schema(value_type = f64)]
    pub vat: Decimal,

    #[serde(default)]
    pub status: QuoteStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signature_url: Option<String>,

    pub contact: Uuid,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuotePatch {
    pub products: Field<Vec<LineItem>>,
    pub discount: Field<Decimal>,
    pub vat: Field<Decimal>,
    pub status: Field<QuoteStatus>,
    pub signature_url: Field<String>,
    pub contact: Field<Uuid>,
}

impl Resource for Quote {
    const COLLECTION: Collection = Collection::Quotes;

    type Patch = QuotePatch;

    fn from_patch(p: QuotePatch) -> Result<Self, Vec<FieldError>> {
        let mut required = Required::new();
        let products = required.take(p.products, "products", "At least one product is required");
        let contact = required.take(p.contact, "contact", "Contact ID is required");

        let (Some(products), Some(contact)) = (products, contact) else {
            return Err(required.into_errors());
        };
        Ok(Quote {
            products,
            discount: p.discount.unwrap_or_default(),
            vat: p.vat.unwrap_or_default(),
            status: p.status.unwrap_or_default(),
            signature_url: p.signature_url.into_option(),
            contact,
        })
    }

    fn apply(&mut self, p: QuotePatch) -> Result<(), Vec<FieldError>> {
        let mut merge = Merge::new();
        merge.required(&mut self.products, p.products, "products", "At least one product is required");
        merge.or_default(&mut self.discount, p.discount);
        merge.or_default(&mut self.vat, p.vat);
        merge.or_default(&mut self.status, p.status);
        merge.optional(&mut self.signature_url, p.signature_url);
        merge.required(&mut self.contact, p.contact, "contact", "Contact ID is required");
        merge.finish()
    }
}

// =============================================================================
//  FATURAS (INVOICES)
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
pub enum InvoiceStatus {
    Paid,
    #[default]
    Pending,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default)]
    pub status: InvoiceStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_link: Option<String>,

    #[validate(custom(function = "validate_not_negative"))]
    #[schema(value_type = f64, example = 1500)]
    pub total_amount: Decimal,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<Uuid>,

    pub contact: Uuid,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InvoicePatch {
    pub status: Field<InvoiceStatus>,
    pub payment_link: Field<String>,
    pub total_amount: Field<Decimal>,
    pub quote: Field<Uuid>,
    pub contact: Field<Uuid>,
}

impl Resource for Invoice {
    const COLLECTION: Collection = Collection::Invoices;

    type Patch = InvoicePatch;

    fn from_patch(p: InvoicePatch) -> Result<Self, Vec<FieldError>> {
        let mut required = Required::new();
        let total_amount = required.take(p.total_amount, "totalAmount", "Total amount is required");
        let contact = required.take(p.contact, "contact", "Contact ID is required");

        let (Some(total_amount), Some(contact)) = (total_amount, contact) else {
            return Err(required.into_errors());
        };
        Ok(Invoice {
            status: p.status.unwrap_or_default(),
            payment_link: p.payment_link.into_option(),
            total_amount,
            quote: p.quote.into_option(),
            contact,
        })
    }

    fn apply(&mut self, p: InvoicePatch) -> Result<(), Vec<FieldError>> {
        let mut merge = Merge::new();
        merge.or_default(&mut self.status, p.status);
        merge.optional(&mut self.payment_link, p.payment_link);
        merge.required(&mut self.total_amount, p.total_amount, "totalAmount", "Total amount is required");
        merge.optional(&mut self.quote, p.quote);
        merge.required(&mut self.contact, p.contact, "contact", "Contact ID is required");
        merge.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::error::AppError;
    use crate::common::validation::{decode_payload, flatten_errors};
    use serde_json::json;

    #[test]
    fn wrong_quantity_type_points_inside_the_list() {
        let err = decode_payload::<QuotePatch>(json!({
            "products": [
                { "name": "Licença", "quantity": 2, "price": 100 },
                { "name": "Suporte", "quantity": "x", "price": 50 },
            ],
            "contact": Uuid::nil(),
        }))
        .unwrap_err();

        let AppError::Validation(errors) = err else {
            panic!("esperava erro de validação");
        };
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["products.1.quantity"]);
    }

    #[test]
    fn line_item_errors_carry_their_index() {
        let quote = Quote {
            products: vec![
                LineItem { name: "Licença".into(), quantity: 2, price: Decimal::from(100) },
                LineItem { name: String::new(), quantity: 0, price: Decimal::from(10) },
            ],
            discount: Decimal::ZERO,
            vat: Decimal::ZERO,
            status: QuoteStatus::Draft,
            signature_url: None,
            contact: Uuid::nil(),
        };

        let errors = flatten_errors(&quote.validate().unwrap_err());
        let paths: Vec<&str> = errors.iter().map(|e| e.path.as_str()).collect();
        assert_eq!(paths, vec!["products.1.name", "products.1.quantity"]);
    }

    #[test]
    fn empty_quote_is_rejected() {
        let quote = Quote::from_patch(QuotePatch {
            products: Field::Value(Vec::new()),
            contact: Field::Value(Uuid::nil()),
            ..Default::default()
        })
        .unwrap();
        let errors = flatten_errors(&quote.validate().unwrap_err());
        assert_eq!(errors[0].path, "products");
    }

    #[test]
    fn invoice_defaults_to_pending() {
        let invoice = Invoice::from_patch(InvoicePatch {
            total_amount: Field::Value(Decimal::from(1500)),
            contact: Field::Value(Uuid::nil()),
            ..Default::default()
        })
        .unwrap();
        assert_eq!(invoice.status, InvoiceStatus::Pending);
        assert!(invoice.validate().is_ok());
    }

    #[test]
    fn invoice_quote_link_can_be_removed() {
        let mut invoice = Invoice::from_patch(InvoicePatch {
            total_amount: Field::Value(Decimal::from(900)),
            quote: Field::Value(Uuid::new_v4()),
            contact: Field::Value(Uuid::nil()),
            ..Default::default()
        })
        .unwrap();

        invoice
            .apply(InvoicePatch {
                quote: Field::Null,
                status: Field::Value(InvoiceStatus::Paid),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(invoice.quote, None);
        assert_eq!(invoice.status, InvoiceStatus::Paid);

        let errors = invoice
            .apply(InvoicePatch {
                total_amount: Field::Null,
                ..Default::default()
            })
            .unwrap_err();
        assert_eq!(errors[0].path, "totalAmount");
    }
}
