use serde::Serialize;
use uuid::Uuid;

pub mod clients;
pub mod intake;
pub mod invoices;
pub mod leads;
pub mod payment_webhook;
pub mod shoots;

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: Uuid,
}
