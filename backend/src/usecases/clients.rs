use std::sync::Arc;

use chrono::Utc;
use gettupp_core::domain::{
    entities::clients::InsertClientEntity,
    repositories::clients::ClientRepository,
    value_objects::{
        clients::{ClientDto, CreateClientRequest, ListClientsFilter},
        enums::client_statuses::ClientStatus,
    },
};
use thiserror::Error;
use tracing::{error, info};
use uuid::Uuid;

use crate::usecases::leads::DEFAULT_LIST_LIMIT;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Validation(String),
    #[error("client not found")]
    NotFound,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ClientError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ClientError::Validation(_) => StatusCode::BAD_REQUEST,
            ClientError::NotFound => StatusCode::NOT_FOUND,
            ClientError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, ClientError>;

pub struct ClientUseCase<C>
where
    C: ClientRepository + Send + Sync + 'static,
{
    client_repo: Arc<C>,
}

impl<C> ClientUseCase<C>
where
    C: ClientRepository + Send + Sync + 'static,
{
    pub fn new(client_repo: Arc<C>) -> Self {
        Self { client_repo }
    }

    /// Direct admin creation, for clients that never went through the
    /// lead pipeline.
    pub async fn create(&self, request: CreateClientRequest) -> UseCaseResult<Uuid> {
        let name = request.name.trim();
        if name.is_empty() {
            return Err(ClientError::Validation("name is required".to_string()));
        }
        let email = request.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(ClientError::Validation(
                "a valid email is required".to_string(),
            ));
        }

        let now = Utc::now();
        let client_id = self
            .client_repo
            .create_client(InsertClientEntity {
                name: name.to_string(),
                email: email.to_string(),
                phone: request.phone,
                instagram: request.instagram,
                tier: request.tier.to_string(),
                status: ClientStatus::Pending.to_string(),
                amount_paid: 0,
                source: request.source.unwrap_or_else(|| "direct".to_string()),
                lead_id: None,
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|err| {
                error!(db_error = ?err, "clients: failed to create client");
                ClientError::Internal(err)
            })?;

        info!(%client_id, tier = %request.tier, "clients: client created");
        Ok(client_id)
    }

    pub async fn get(&self, client_id: Uuid) -> UseCaseResult<ClientDto> {
        let client = self
            .client_repo
            .find_by_id(client_id)
            .await
            .map_err(|err| {
                error!(%client_id, db_error = ?err, "clients: failed to load client");
                ClientError::Internal(err)
            })?
            .ok_or(ClientError::NotFound)?;

        Ok(ClientDto::from(client))
    }

    pub async fn list(&self, filter: ListClientsFilter) -> UseCaseResult<Vec<ClientDto>> {
        let status = filter.status.map(|status| status.to_string());
        let tier = filter.tier.map(|tier| tier.to_string());
        let limit = filter.limit.unwrap_or(DEFAULT_LIST_LIMIT);

        let clients = self
            .client_repo
            .list_clients(status, tier, limit)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "clients: failed to list clients");
                ClientError::Internal(err)
            })?;

        Ok(clients.into_iter().map(ClientDto::from).collect())
    }

    /// Admin status edits are unrestricted; payment webhooks drive the
    /// active/past_due flips on their own.
    pub async fn set_status(&self, client_id: Uuid, status: ClientStatus) -> UseCaseResult<()> {
        let client = self
            .client_repo
            .find_by_id(client_id)
            .await
            .map_err(ClientError::Internal)?
            .ok_or(ClientError::NotFound)?;

        info!(
            %client_id,
            from = %client.status,
            to = %status,
            "clients: status change requested"
        );

        self.client_repo
            .update_status(client_id, status.as_str())
            .await
            .map_err(|err| {
                error!(%client_id, db_error = ?err, "clients: failed to update status");
                ClientError::Internal(err)
            })?;

        Ok(())
    }
}
