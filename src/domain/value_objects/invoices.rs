use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::{
    entities::invoices::{EditInvoiceEntity, InsertInvoiceEntity, InvoiceEntity},
    value_objects::enums::invoice_statuses::InvoiceStatus,
};

/// Invoice form fields exactly as submitted: every field optional and
/// string-typed until validation runs.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceFormData {
    pub customer_id: Option<String>,
    pub amount: Option<String>,
    pub status: Option<String>,
}

/// Typed invoice fields that passed validation. `amount` is still the
/// user-facing decimal; conversion to minor units happens on the way out.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedInvoice {
    pub customer_id: Uuid,
    pub amount: f64,
    pub status: InvoiceStatus,
}

impl ValidatedInvoice {
    /// Exact for inputs with at most two decimal places.
    pub fn amount_in_cents(&self) -> i32 {
        (self.amount * 100.0).round() as i32
    }

    pub fn to_insert_entity(&self, date: NaiveDate) -> InsertInvoiceEntity {
        InsertInvoiceEntity {
            customer_id: self.customer_id,
            amount: self.amount_in_cents(),
            status: self.status.to_string(),
            date,
        }
    }

    pub fn to_edit_entity(&self) -> EditInvoiceEntity {
        EditInvoiceEntity {
            customer_id: self.customer_id,
            amount: self.amount_in_cents(),
            status: self.status.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct InvoiceModel {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i32,
    pub status: InvoiceStatus,
    pub date: NaiveDate,
}

impl TryFrom<InvoiceEntity> for InvoiceModel {
    type Error = anyhow::Error;

    /// Only this layer writes the status column, so a value outside the enum
    /// is an integrity fault rather than something to relabel.
    fn try_from(entity: InvoiceEntity) -> Result<Self, Self::Error> {
        let status = InvoiceStatus::from_str(&entity.status).ok_or_else(|| {
            anyhow::anyhow!(
                "invoice {} has unrecognized status {:?}",
                entity.id,
                entity.status
            )
        })?;

        Ok(Self {
            id: entity.id,
            customer_id: entity.customer_id,
            amount: entity.amount,
            status,
            date: entity.date,
        })
    }
}
