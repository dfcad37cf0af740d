use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::invoices::{InsertInvoiceEntity, InvoiceEntity};

#[async_trait]
#[automock]
pub trait InvoiceRepository {
    async fn create_invoice(&self, invoice: InsertInvoiceEntity) -> Result<Uuid>;

    async fn find_by_id(&self, invoice_id: Uuid) -> Result<Option<InvoiceEntity>>;

    async fn list_by_client(&self, client_id: Uuid, limit: i64) -> Result<Vec<InvoiceEntity>>;

    /// Marks the invoice matching the checkout session paid, setting
    /// `paid_at` and the settled amount in the same write. Returns the
    /// updated invoice, or None if no invoice references the session.
    async fn mark_paid_by_session_ref(
        &self,
        session_ref: &str,
        amount: i32,
    ) -> Result<Option<InvoiceEntity>>;

    /// Manual status edits; `paid_at` is cleared for any non-paid status.
    async fn update_status(&self, invoice_id: Uuid, status: &str) -> Result<()>;
}
