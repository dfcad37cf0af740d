use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::infra::db::postgres::schema::leads;

#[derive(Debug, Clone, Identifiable, Selectable, Queryable)]
#[diesel(table_name = leads)]
pub struct LeadEntity {
    pub id: Uuid,
    pub venue: String,
    pub instagram: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_type: Option<String>,
    pub attendee_count: Option<i32>,
    pub budget: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub qualification_score: i32,
    pub converted_client_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = leads)]
pub struct InsertLeadEntity {
    pub venue: String,
    pub instagram: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_type: Option<String>,
    pub attendee_count: Option<i32>,
    pub budget: Option<String>,
    pub message: Option<String>,
    pub status: String,
    pub qualification_score: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
