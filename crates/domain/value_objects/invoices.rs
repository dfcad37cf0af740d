use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::invoices::InvoiceEntity;
use crate::domain::value_objects::enums::{invoice_statuses::InvoiceStatus, tiers::Tier};

/// The tier stays a raw string here so an unknown key is reported as a
/// billing error instead of a deserialization failure.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateInvoiceRequest {
    pub tier: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetInvoiceStatusRequest {
    pub status: InvoiceStatus,
}

/// What the admin gets back after generating an invoice: the payable
/// checkout link and the invoice recorded against it.
#[derive(Debug, Serialize)]
pub struct CheckoutSessionDto {
    pub invoice_id: Uuid,
    pub url: String,
}

#[derive(Debug, Serialize)]
pub struct InvoiceDto {
    pub id: Uuid,
    pub client_id: Uuid,
    pub description: String,
    pub tier: Tier,
    pub amount: i32,
    pub currency: String,
    pub status: InvoiceStatus,
    pub created_at: DateTime<Utc>,
    pub paid_at: Option<DateTime<Utc>>,
}

impl From<InvoiceEntity> for InvoiceDto {
    fn from(value: InvoiceEntity) -> Self {
        Self {
            id: value.id,
            client_id: value.client_id,
            description: value.description,
            tier: Tier::from_str(&value.tier).unwrap_or(Tier::Pilot),
            amount: value.amount,
            currency: value.currency,
            status: InvoiceStatus::from_str(&value.status).unwrap_or_default(),
            created_at: value.created_at,
            paid_at: value.paid_at,
        }
    }
}
