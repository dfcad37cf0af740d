use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::{OptionalExtension, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::invoices},
};
use domain::{
    entities::invoices::{InsertInvoiceEntity, InvoiceEntity},
    repositories::invoices::InvoiceRepository,
    value_objects::enums::invoice_statuses::InvoiceStatus,
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
    async fn create_invoice(&self, invoice: InsertInvoiceEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let invoice_id = insert_into(invoices::table)
            .values(&invoice)
            .returning(invoices::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(invoice_id)
    }

    async fn find_by_id(&self, invoice_id: Uuid) -> Result<Option<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let invoice = invoices::table
            .filter(invoices::id.eq(invoice_id))
            .first::<InvoiceEntity>(&mut conn)
            .optional()?;

        Ok(invoice)
    }

    async fn list_by_client(&self, client_id: Uuid, limit: i64) -> Result<Vec<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let rows = invoices::table
            .filter(invoices::client_id.eq(client_id))
            .order(invoices::created_at.desc())
            .limit(limit)
            .load::<InvoiceEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn mark_paid_by_session_ref(
        &self,
        session_ref: &str,
        amount: i32,
    ) -> Result<Option<InvoiceEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let invoice = update(
            invoices::table.filter(invoices::checkout_session_ref.eq(Some(session_ref))),
        )
        .set((
            invoices::status.eq(InvoiceStatus::Paid.as_str()),
            invoices::amount.eq(amount),
            invoices::paid_at.eq(Some(Utc::now())),
        ))
        .returning(InvoiceEntity::as_returning())
        .get_result::<InvoiceEntity>(&mut conn)
        .optional()?;

        Ok(invoice)
    }

    async fn update_status(&self, invoice_id: Uuid, status: &str) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // paid_at tracks the paid status exactly.
        let paid_at = if status == InvoiceStatus::Paid.as_str() {
            Some(Utc::now())
        } else {
            None
        };

        update(invoices::table.filter(invoices::id.eq(invoice_id)))
            .set((
                invoices::status.eq(status),
                invoices::paid_at.eq::<Option<DateTime<Utc>>>(paid_at),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
