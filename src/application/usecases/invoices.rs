use std::sync::Arc;

use anyhow::Result;
use chrono::Utc;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    application::{
        interfaces::page_cache::PageCache,
        validation::{self, FieldErrors},
    },
    domain::{
        repositories::invoices::InvoiceRepository,
        value_objects::invoices::{InvoiceFormData, InvoiceModel},
    },
};

/// The invoice list route; mutations invalidate it and create/update redirect
/// back to it.
pub const INVOICES_PATH: &str = "/dashboard/invoices";

#[derive(Debug, Error)]
pub enum InvoiceMutationError {
    /// User-correctable, field-scoped. Never reaches the store.
    #[error("Missing Fields. Failed to Create Invoice.")]
    InvalidFields(FieldErrors),
    #[error("Database Error: Failed to Create Invoice.")]
    CreateFailed,
    #[error("Database Error: Failed to Edit Invoice.")]
    EditFailed,
    #[error("Database Error: Failed to Delete Invoice.")]
    DeleteFailed,
    /// Strict-mode validation fault on the update path; propagates upward.
    #[error(transparent)]
    Integrity(#[from] anyhow::Error),
}

impl InvoiceMutationError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            InvoiceMutationError::InvalidFields(_) => StatusCode::UNPROCESSABLE_ENTITY,
            InvoiceMutationError::CreateFailed
            | InvoiceMutationError::EditFailed
            | InvoiceMutationError::DeleteFailed
            | InvoiceMutationError::Integrity(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type InvoiceResult<T> = std::result::Result<T, InvoiceMutationError>;

/// Invoice mutations: validate, persist, then invalidate the cached list
/// view. Each operation is a strictly sequential pipeline; the cache is only
/// touched once the store has committed.
pub struct InvoiceUseCase<R, C>
where
    R: InvoiceRepository + Send + Sync + 'static,
    C: PageCache + 'static,
{
    invoice_repo: Arc<R>,
    page_cache: Arc<C>,
}

impl<R, C> InvoiceUseCase<R, C>
where
    R: InvoiceRepository + Send + Sync + 'static,
    C: PageCache + 'static,
{
    pub fn new(invoice_repo: Arc<R>, page_cache: Arc<C>) -> Self {
        Self {
            invoice_repo,
            page_cache,
        }
    }

    pub async fn create_invoice(&self, form: InvoiceFormData) -> InvoiceResult<Uuid> {
        let validated = validation::validate_invoice(&form).map_err(|errors| {
            warn!(
                field_count = errors.len(),
                "invoices: create rejected by validation"
            );
            InvoiceMutationError::InvalidFields(errors)
        })?;

        // The date is not a form field; it is stamped at call time.
        let date = Utc::now().date_naive();
        let amount_cents = validated.amount_in_cents();

        let invoice_id = self
            .invoice_repo
            .insert_invoice(validated.to_insert_entity(date))
            .await
            .map_err(|err| {
                error!(db_error = ?err, "invoices: insert failed");
                InvoiceMutationError::CreateFailed
            })?;

        info!(%invoice_id, amount_cents, "invoices: invoice created");
        self.page_cache.invalidate(INVOICES_PATH);
        Ok(invoice_id)
    }

    pub async fn update_invoice(&self, id: &str, form: InvoiceFormData) -> InvoiceResult<()> {
        let (invoice_id, validated) = validation::parse_invoice(id, &form)?;

        self.invoice_repo
            .update_invoice(invoice_id, validated.to_edit_entity())
            .await
            .map_err(|err| {
                error!(%invoice_id, db_error = ?err, "invoices: update failed");
                InvoiceMutationError::EditFailed
            })?;

        info!(%invoice_id, "invoices: invoice updated");
        self.page_cache.invalidate(INVOICES_PATH);
        Ok(())
    }

    /// Deleting an id that no longer exists is a no-op success; only a store
    /// failure surfaces as an error.
    pub async fn delete_invoice(&self, invoice_id: Uuid) -> InvoiceResult<()> {
        self.invoice_repo
            .delete_invoice(invoice_id)
            .await
            .map_err(|err| {
                error!(%invoice_id, db_error = ?err, "invoices: delete failed");
                InvoiceMutationError::DeleteFailed
            })?;

        info!(%invoice_id, "invoices: invoice deleted");
        self.page_cache.invalidate(INVOICES_PATH);
        Ok(())
    }

    pub async fn list_invoices(&self) -> Result<Vec<InvoiceModel>> {
        let invoices = self.invoice_repo.list_invoices().await?;
        invoices.into_iter().map(InvoiceModel::try_from).collect()
    }
}
