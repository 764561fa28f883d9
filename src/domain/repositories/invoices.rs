use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::invoices::{EditInvoiceEntity, InsertInvoiceEntity, InvoiceEntity};

#[async_trait]
#[automock]
pub trait InvoiceRepository {
    async fn insert_invoice(&self, invoice: InsertInvoiceEntity) -> Result<Uuid>;
    async fn update_invoice(&self, invoice_id: Uuid, changes: EditInvoiceEntity) -> Result<()>;
    async fn delete_invoice(&self, invoice_id: Uuid) -> Result<()>;
    async fn list_invoices(&self) -> Result<Vec<InvoiceEntity>>;
}
