use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use diesel::{delete, insert_into, prelude::*, update};
use uuid::Uuid;

use crate::{
    domain::{
        entities::invoices::{EditInvoiceEntity, InsertInvoiceEntity, InvoiceEntity},
        repositories::invoices::InvoiceRepository,
    },
    infrastructure::postgres::{postgres_connection::PgPoolSquad, schema::invoices},
};

pub struct InvoicePostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl InvoicePostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl InvoiceRepository for InvoicePostgres {
    async fn insert_invoice(&self, invoice: InsertInvoiceEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let invoice_id = insert_into(invoices::table)
            .values(&invoice)
            .returning(invoices::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(invoice_id)
    }

    async fn update_invoice(&self, invoice_id: Uuid, changes: EditInvoiceEntity) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(invoices::table.filter(invoices::id.eq(invoice_id)))
            .set(&changes)
            .execute(&mut conn)?;

        Ok(())
    }

    async fn delete_invoice(&self, invoice_id: Uuid) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Zero affected rows is fine: deleting an id that is already gone is
        // a no-op success.
        delete(invoices::table.filter(invoices::id.eq(invoice_id))).execute(&mut conn)?;

        Ok(())
    }

    async fn list_invoices(&self) -> Result<Vec<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = invoices::table
            .select(InvoiceEntity::as_select())
            .order(invoices::date.desc())
            .load::<InvoiceEntity>(&mut conn)?;

        Ok(rows)
    }
}
