use std::sync::Arc;

use chrono::Utc;
use gettupp_core::domain::{
    entities::{clients::InsertClientEntity, leads::InsertLeadEntity},
    repositories::{clients::ClientRepository, leads::LeadRepository},
    value_objects::{
        enums::{client_statuses::ClientStatus, lead_statuses::LeadStatus, tiers::Tier},
        leads::{ConvertedLeadDto, IntakeSubmission, LeadDto, ListLeadsFilter},
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Source tag written on clients that came out of a lead conversion.
pub const LEAD_CONVERSION_SOURCE: &str = "lead_conversion";

#[derive(Debug, Error)]
pub enum LeadError {
    #[error("{0}")]
    Validation(String),
    #[error("lead not found")]
    NotFound,
    #[error("lead is already converted")]
    AlreadyConverted,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl LeadError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            LeadError::Validation(_) => StatusCode::BAD_REQUEST,
            LeadError::NotFound => StatusCode::NOT_FOUND,
            LeadError::AlreadyConverted => StatusCode::CONFLICT,
            LeadError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, LeadError>;

fn required(value: &str, field: &'static str) -> UseCaseResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(LeadError::Validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

pub struct LeadUseCase<L, C>
where
    L: LeadRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
{
    lead_repo: Arc<L>,
    client_repo: Arc<C>,
}

impl<L, C> LeadUseCase<L, C>
where
    L: LeadRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
{
    pub fn new(lead_repo: Arc<L>, client_repo: Arc<C>) -> Self {
        Self {
            lead_repo,
            client_repo,
        }
    }

    /// Public intake form submission. New leads always start at Pending
    /// with a zero qualification score; staff scores them later.
    pub async fn submit(&self, submission: IntakeSubmission) -> UseCaseResult<Uuid> {
        let venue = required(&submission.venue, "venue")?;
        let instagram = required(&submission.instagram, "instagram")?;
        let contact_name = required(&submission.contact_name, "contact_name")?;
        let email = required(&submission.email, "email")?;
        if !email.contains('@') {
            return Err(LeadError::Validation("email is malformed".to_string()));
        }
        if let Some(count) = submission.attendee_count {
            if count < 0 {
                return Err(LeadError::Validation(
                    "attendee_count must not be negative".to_string(),
                ));
            }
        }

        info!(%venue, "leads: intake submission received");

        let now = Utc::now();
        let lead_id = self
            .lead_repo
            .create_lead(InsertLeadEntity {
                venue,
                instagram,
                contact_name,
                email,
                phone: submission.phone,
                event_type: submission.event_type,
                attendee_count: submission.attendee_count,
                budget: submission.budget,
                message: submission.message,
                status: LeadStatus::Pending.to_string(),
                qualification_score: 0,
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|err| {
                error!(db_error = ?err, "leads: failed to create lead");
                LeadError::Internal(err)
            })?;

        info!(%lead_id, "leads: lead created");
        Ok(lead_id)
    }

    pub async fn get(&self, lead_id: Uuid) -> UseCaseResult<LeadDto> {
        let lead = self
            .lead_repo
            .find_by_id(lead_id)
            .await
            .map_err(|err| {
                error!(%lead_id, db_error = ?err, "leads: failed to load lead");
                LeadError::Internal(err)
            })?
            .ok_or(LeadError::NotFound)?;

        Ok(LeadDto::from(lead))
    }

    pub async fn list(&self, filter: ListLeadsFilter) -> UseCaseResult<Vec<LeadDto>> {
        let status = filter.status.map(|status| status.to_string());
        let limit = filter.limit.unwrap_or(DEFAULT_LIST_LIMIT);

        let leads = self
            .lead_repo
            .list_leads(status, limit)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "leads: failed to list leads");
                LeadError::Internal(err)
            })?;

        Ok(leads.into_iter().map(LeadDto::from).collect())
    }

    /// Staff may set any of the five statuses, including backwards, to
    /// undo a mis-click. Nothing cascades to a converted client.
    pub async fn set_status(&self, lead_id: Uuid, status: LeadStatus) -> UseCaseResult<()> {
        let lead = self
            .lead_repo
            .find_by_id(lead_id)
            .await
            .map_err(LeadError::Internal)?
            .ok_or(LeadError::NotFound)?;

        info!(
            %lead_id,
            from = %lead.status,
            to = %status,
            "leads: status change requested"
        );

        self.lead_repo
            .update_status(lead_id, status.as_str())
            .await
            .map_err(|err| {
                error!(%lead_id, db_error = ?err, "leads: failed to update status");
                LeadError::Internal(err)
            })?;

        Ok(())
    }

    /// One-way promotion of a lead into a client. The client insert and
    /// the lead claim commit together, so a lost race creates nothing.
    pub async fn convert(&self, lead_id: Uuid, tier: Tier) -> UseCaseResult<ConvertedLeadDto> {
        let lead = self
            .lead_repo
            .find_by_id(lead_id)
            .await
            .map_err(|err| {
                error!(%lead_id, db_error = ?err, "leads: failed to load lead for conversion");
                LeadError::Internal(err)
            })?
            .ok_or_else(|| {
                warn!(%lead_id, "leads: conversion requested for unknown lead");
                LeadError::NotFound
            })?;

        if lead.converted_client_id.is_some() {
            warn!(%lead_id, "leads: conversion requested for already converted lead");
            return Err(LeadError::AlreadyConverted);
        }

        info!(%lead_id, tier = %tier, "leads: converting lead to client");

        let now = Utc::now();
        let client = InsertClientEntity {
            name: lead.contact_name.clone(),
            email: lead.email.clone(),
            phone: lead.phone.clone(),
            instagram: Some(lead.instagram.clone()),
            tier: tier.to_string(),
            status: ClientStatus::Pending.to_string(),
            amount_paid: 0,
            source: LEAD_CONVERSION_SOURCE.to_string(),
            lead_id: Some(lead.id),
            created_at: now,
            updated_at: now,
        };

        let client_id = self
            .client_repo
            .create_for_lead(client, lead_id)
            .await
            .map_err(|err| {
                error!(%lead_id, db_error = ?err, "leads: conversion write failed");
                LeadError::Internal(err)
            })?
            .ok_or(LeadError::AlreadyConverted)?;

        info!(%lead_id, %client_id, "leads: lead converted");
        Ok(ConvertedLeadDto { lead_id, client_id })
    }
}
