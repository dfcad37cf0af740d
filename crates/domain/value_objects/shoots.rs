use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::shoots::ShootEntity;
use crate::domain::value_objects::enums::{shoot_statuses::ShootStatus, shoot_types::ShootType};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateShootRequest {
    pub client_id: Uuid,
    #[serde(rename = "type")]
    pub type_: ShootType,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: Option<i32>,
    pub location: Option<String>,
    pub photographer_name: Option<String>,
    pub notes: Option<String>,
    pub total_images: Option<i32>,
    pub delivery_due_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdvanceShootRequest {
    pub status: ShootStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RecordDeliveryRequest {
    pub delivered_images: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListShootsFilter {
    pub status: Option<ShootStatus>,
    pub client_id: Option<Uuid>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ShootDto {
    pub id: Uuid,
    pub client_id: Uuid,
    #[serde(rename = "type")]
    pub type_: ShootType,
    pub status: ShootStatus,
    pub scheduled_at: DateTime<Utc>,
    pub duration_minutes: i32,
    pub location: Option<String>,
    pub photographer_name: Option<String>,
    pub notes: Option<String>,
    pub delivered_images: i32,
    pub total_images: i32,
    pub delivery_due_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ShootEntity> for ShootDto {
    fn from(value: ShootEntity) -> Self {
        Self {
            id: value.id,
            client_id: value.client_id,
            type_: ShootType::from_str(&value.type_).unwrap_or(ShootType::Standard),
            status: ShootStatus::from_str(&value.status).unwrap_or(ShootStatus::Scheduled),
            scheduled_at: value.scheduled_at,
            duration_minutes: value.duration_minutes,
            location: value.location,
            photographer_name: value.photographer_name,
            notes: value.notes,
            delivered_images: value.delivered_images,
            total_images: value.total_images,
            delivery_due_at: value.delivery_due_at,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}
