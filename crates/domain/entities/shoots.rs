use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::shoots;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = shoots)]
pub struct ShootEntity {
    pub id: Uuid,
    pub client_id: Uuid,
    pub type_: String,
    pub status: String,
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

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = shoots)]
pub struct InsertShootEntity {
    pub client_id: Uuid,
    pub type_: String,
    pub status: String,
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
