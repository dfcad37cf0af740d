use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::leads::LeadEntity;
use crate::domain::value_objects::enums::{lead_statuses::LeadStatus, tiers::Tier};

/// Payload of the public intake form. Venue, instagram, contact name and
/// email are required; the rest is whatever the prospect volunteered.
#[derive(Debug, Clone, Deserialize)]
pub struct IntakeSubmission {
    pub venue: String,
    pub instagram: String,
    pub contact_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub event_type: Option<String>,
    pub attendee_count: Option<i32>,
    pub budget: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetLeadStatusRequest {
    pub status: LeadStatus,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConvertLeadRequest {
    pub tier: Tier,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ListLeadsFilter {
    pub status: Option<LeadStatus>,
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct LeadDto {
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
    pub status: LeadStatus,
    pub qualification_score: i32,
    pub converted_client_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LeadEntity> for LeadDto {
    fn from(value: LeadEntity) -> Self {
        Self {
            id: value.id,
            venue: value.venue,
            instagram: value.instagram,
            contact_name: value.contact_name,
            email: value.email,
            phone: value.phone,
            event_type: value.event_type,
            attendee_count: value.attendee_count,
            budget: value.budget,
            message: value.message,
            status: LeadStatus::from_str(&value.status).unwrap_or_default(),
            qualification_score: value.qualification_score,
            converted_client_id: value.converted_client_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

/// Returned to the converting admin: the new client id next to the lead
/// it came from.
#[derive(Debug, Serialize)]
pub struct ConvertedLeadDto {
    pub lead_id: Uuid,
    pub client_id: Uuid,
}
