use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::clients::ClientEntity;
use crate::domain::value_objects::enums::{client_statuses::ClientStatus, tiers::Tier};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub tier: Tier,
    pub source: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetClientStatusRequest {
    pub status: ClientStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListClientsFilter {
    pub status: Option<ClientStatus>,
    pub tier: Option<Tier>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ClientDto {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub instagram: Option<String>,
    pub tier: Tier,
    pub status: ClientStatus,
    pub amount_paid: i32,
    pub source: String,
    pub lead_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClientEntity> for ClientDto {
    fn from(value: ClientEntity) -> Self {
        Self {
            id: value.id,
            name: value.name,
            email: value.email,
            phone: value.phone,
            instagram: value.instagram,
            tier: Tier::from_str(&value.tier).unwrap_or(Tier::Pilot),
            status: ClientStatus::from_str(&value.status).unwrap_or_default(),
            amount_paid: value.amount_paid,
            source: value.source,
            lead_id: value.lead_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
