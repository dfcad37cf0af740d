use std::sync::Arc;

use anyhow::anyhow;
use chrono::{Duration, Utc};
use gettupp_core::domain::{
    entities::shoots::InsertShootEntity,
    repositories::{clients::ClientRepository, shoots::ShootRepository},
    value_objects::{
        enums::shoot_statuses::ShootStatus,
        shoots::{CreateShootRequest, ListShootsFilter, ShootDto},
    },
};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::usecases::leads::DEFAULT_LIST_LIMIT;

/// Deliverables are due five days after the shoot unless the admin
/// picked a date.
const DEFAULT_DELIVERY_WINDOW_DAYS: i64 = 5;

#[derive(Debug, Error)]
pub enum ShootError {
    #[error("{0}")]
    Validation(String),
    #[error("shoot not found")]
    NotFound,
    #[error("client not found")]
    ClientNotFound,
    #[error("cannot move shoot from {from} to {to}")]
    InvalidTransition { from: ShootStatus, to: ShootStatus },
    #[error("{0}")]
    InvariantViolation(String),
    #[error("shoot was modified concurrently")]
    Conflict,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ShootError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            ShootError::Validation(_) => StatusCode::BAD_REQUEST,
            ShootError::NotFound | ShootError::ClientNotFound => StatusCode::NOT_FOUND,
            ShootError::InvalidTransition { .. } | ShootError::InvariantViolation(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            ShootError::Conflict => StatusCode::CONFLICT,
            ShootError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, ShootError>;

pub struct ShootUseCase<S, C>
where
    S: ShootRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
{
    shoot_repo: Arc<S>,
    client_repo: Arc<C>,
}

impl<S, C> ShootUseCase<S, C>
where
    S: ShootRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
{
    pub fn new(shoot_repo: Arc<S>, client_repo: Arc<C>) -> Self {
        Self {
            shoot_repo,
            client_repo,
        }
    }

    /// Schedules a shoot for an existing client. Duration, image count
    /// and delivery deadline fall back to the shoot-type defaults.
    pub async fn schedule(&self, request: CreateShootRequest) -> UseCaseResult<Uuid> {
        self.client_repo
            .find_by_id(request.client_id)
            .await
            .map_err(|err| {
                error!(client_id = %request.client_id, db_error = ?err, "shoots: failed to load client");
                ShootError::Internal(err)
            })?
            .ok_or(ShootError::ClientNotFound)?;

        let total_images = request
            .total_images
            .unwrap_or_else(|| request.type_.default_total_images());
        if total_images < 0 {
            return Err(ShootError::Validation(
                "total_images must not be negative".to_string(),
            ));
        }

        let now = Utc::now();
        let shoot_id = self
            .shoot_repo
            .create_shoot(InsertShootEntity {
                client_id: request.client_id,
                type_: request.type_.to_string(),
                status: ShootStatus::Scheduled.to_string(),
                scheduled_at: request.scheduled_at,
                duration_minutes: request
                    .duration_minutes
                    .unwrap_or_else(|| request.type_.default_duration_minutes()),
                location: request.location,
                photographer_name: request.photographer_name,
                notes: request.notes,
                delivered_images: 0,
                total_images,
                delivery_due_at: request.delivery_due_at.or(Some(
                    request.scheduled_at + Duration::days(DEFAULT_DELIVERY_WINDOW_DAYS),
                )),
                created_at: now,
                updated_at: now,
            })
            .await
            .map_err(|err| {
                error!(client_id = %request.client_id, db_error = ?err, "shoots: failed to create shoot");
                ShootError::Internal(err)
            })?;

        info!(%shoot_id, client_id = %request.client_id, "shoots: shoot scheduled");
        Ok(shoot_id)
    }

    pub async fn get(&self, shoot_id: Uuid) -> UseCaseResult<ShootDto> {
        let shoot = self
            .shoot_repo
            .find_by_id(shoot_id)
            .await
            .map_err(|err| {
                error!(%shoot_id, db_error = ?err, "shoots: failed to load shoot");
                ShootError::Internal(err)
            })?
            .ok_or(ShootError::NotFound)?;

        Ok(ShootDto::from(shoot))
    }

    pub async fn list(&self, filter: ListShootsFilter) -> UseCaseResult<Vec<ShootDto>> {
        let status = filter.status.map(|status| status.to_string());
        let limit = filter.limit.unwrap_or(DEFAULT_LIST_LIMIT);

        let shoots = self
            .shoot_repo
            .list_shoots(status, filter.client_id, limit)
            .await
            .map_err(|err| {
                error!(db_error = ?err, "shoots: failed to list shoots");
                ShootError::Internal(err)
            })?;

        Ok(shoots.into_iter().map(ShootDto::from).collect())
    }

    /// Moves a shoot one step along the pipeline, or cancels it. The
    /// transition table decides; the write is conditional on the status
    /// we read, so two admins clicking at once cannot skip a step.
    pub async fn advance(&self, shoot_id: Uuid, target: ShootStatus) -> UseCaseResult<()> {
        let shoot = self
            .shoot_repo
            .find_by_id(shoot_id)
            .await
            .map_err(|err| {
                error!(%shoot_id, db_error = ?err, "shoots: failed to load shoot");
                ShootError::Internal(err)
            })?
            .ok_or(ShootError::NotFound)?;

        let current = ShootStatus::from_str(&shoot.status)
            .ok_or_else(|| ShootError::Internal(anyhow!("unknown shoot status: {}", shoot.status)))?;

        if shoot.delivered_images > shoot.total_images {
            return Err(ShootError::InvariantViolation(format!(
                "delivered_images {} exceeds total_images {}",
                shoot.delivered_images, shoot.total_images
            )));
        }

        if !current.can_transition_to(target) {
            warn!(
                %shoot_id,
                from = %current,
                to = %target,
                "shoots: rejected status transition"
            );
            return Err(ShootError::InvalidTransition {
                from: current,
                to: target,
            });
        }

        let advanced = self
            .shoot_repo
            .advance_status(shoot_id, current.as_str(), target.as_str())
            .await
            .map_err(|err| {
                error!(%shoot_id, db_error = ?err, "shoots: failed to advance status");
                ShootError::Internal(err)
            })?;

        if !advanced {
            warn!(%shoot_id, "shoots: lost a concurrent status race");
            return Err(ShootError::Conflict);
        }

        info!(%shoot_id, from = %current, to = %target, "shoots: status advanced");
        Ok(())
    }

    /// Records how many images have been delivered so far. The count may
    /// only grow up to the shoot's total.
    pub async fn record_delivery(
        &self,
        shoot_id: Uuid,
        delivered_images: i32,
    ) -> UseCaseResult<()> {
        if delivered_images < 0 {
            return Err(ShootError::Validation(
                "delivered_images must not be negative".to_string(),
            ));
        }

        let shoot = self
            .shoot_repo
            .find_by_id(shoot_id)
            .await
            .map_err(|err| {
                error!(%shoot_id, db_error = ?err, "shoots: failed to load shoot");
                ShootError::Internal(err)
            })?
            .ok_or(ShootError::NotFound)?;

        if delivered_images > shoot.total_images {
            return Err(ShootError::InvariantViolation(format!(
                "delivered_images {} exceeds total_images {}",
                delivered_images, shoot.total_images
            )));
        }

        self.shoot_repo
            .set_delivered_images(shoot_id, delivered_images)
            .await
            .map_err(|err| {
                error!(%shoot_id, db_error = ?err, "shoots: failed to record delivery");
                ShootError::Internal(err)
            })?;

        info!(
            %shoot_id,
            delivered_images,
            total_images = shoot.total_images,
            "shoots: delivery recorded"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gettupp_core::domain::{
        entities::{clients::ClientEntity, shoots::ShootEntity},
        repositories::{clients::MockClientRepository, shoots::MockShootRepository},
        value_objects::enums::shoot_types::ShootType,
    };
    use mockall::predicate::eq;

    fn sample_client(id: Uuid) -> ClientEntity {
        let now = Utc::now();
        ClientEntity {
            id,
            name: "The Loft".to_string(),
            email: "a@b.com".to_string(),
            phone: None,
            instagram: None,
            tier: "t2".to_string(),
            status: "pending".to_string(),
            amount_paid: 0,
            source: "lead_conversion".to_string(),
            lead_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_shoot(id: Uuid, status: ShootStatus) -> ShootEntity {
        let now = Utc::now();
        ShootEntity {
            id,
            client_id: Uuid::new_v4(),
            type_: "standard".to_string(),
            status: status.to_string(),
            scheduled_at: now + Duration::days(7),
            duration_minutes: 120,
            location: Some("Downtown".to_string()),
            photographer_name: None,
            notes: None,
            delivered_images: 0,
            total_images: 25,
            delivery_due_at: Some(now + Duration::days(12)),
            created_at: now,
            updated_at: now,
        }
    }

    fn sample_request(client_id: Uuid) -> CreateShootRequest {
        CreateShootRequest {
            client_id,
            type_: ShootType::Standard,
            scheduled_at: Utc::now() + Duration::days(7),
            duration_minutes: None,
            location: None,
            photographer_name: None,
            notes: None,
            total_images: None,
            delivery_due_at: None,
        }
    }

    #[tokio::test]
    async fn scheduling_applies_type_defaults() {
        let client_id = Uuid::new_v4();
        let shoot_id = Uuid::new_v4();

        let mut client_repo = MockClientRepository::new();
        let client = sample_client(client_id);
        client_repo
            .expect_find_by_id()
            .with(eq(client_id))
            .returning(move |_| {
                let client = client.clone();
                Box::pin(async move { Ok(Some(client)) })
            });

        let mut shoot_repo = MockShootRepository::new();
        shoot_repo
            .expect_create_shoot()
            .withf(|shoot| {
                shoot.status == "scheduled"
                    && shoot.delivered_images == 0
                    && shoot.total_images == 25
                    && shoot.duration_minutes == 120
                    && shoot.delivery_due_at.is_some()
            })
            .returning(move |_| Box::pin(async move { Ok(shoot_id) }));

        let usecase = ShootUseCase::new(Arc::new(shoot_repo), Arc::new(client_repo));
        let created = usecase.schedule(sample_request(client_id)).await.unwrap();
        assert_eq!(created, shoot_id);
    }

    #[tokio::test]
    async fn scheduling_for_unknown_client_fails() {
        let mut client_repo = MockClientRepository::new();
        client_repo
            .expect_find_by_id()
            .returning(|_| Box::pin(async { Ok(None) }));

        let usecase = ShootUseCase::new(Arc::new(MockShootRepository::new()), Arc::new(client_repo));
        let err = usecase
            .schedule(sample_request(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert!(matches!(err, ShootError::ClientNotFound));
    }

    #[tokio::test]
    async fn direct_jump_to_delivered_is_rejected() {
        let shoot_id = Uuid::new_v4();

        let mut shoot_repo = MockShootRepository::new();
        let shoot = sample_shoot(shoot_id, ShootStatus::Scheduled);
        shoot_repo
            .expect_find_by_id()
            .with(eq(shoot_id))
            .returning(move |_| {
                let shoot = shoot.clone();
                Box::pin(async move { Ok(Some(shoot)) })
            });
        // No advance_status expectation: the record must stay untouched.

        let usecase =
            ShootUseCase::new(Arc::new(shoot_repo), Arc::new(MockClientRepository::new()));

        let err = usecase
            .advance(shoot_id, ShootStatus::Delivered)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ShootError::InvalidTransition {
                from: ShootStatus::Scheduled,
                to: ShootStatus::Delivered,
            }
        ));
    }

    #[tokio::test]
    async fn single_step_advance_uses_a_conditional_write() {
        let shoot_id = Uuid::new_v4();

        let mut shoot_repo = MockShootRepository::new();
        let shoot = sample_shoot(shoot_id, ShootStatus::Confirmed);
        shoot_repo
            .expect_find_by_id()
            .with(eq(shoot_id))
            .returning(move |_| {
                let shoot = shoot.clone();
                Box::pin(async move { Ok(Some(shoot)) })
            });
        shoot_repo
            .expect_advance_status()
            .withf(move |id, from, to| {
                *id == shoot_id && *from == *"confirmed" && *to == *"in_progress"
            })
            .returning(|_, _, _| Box::pin(async { Ok(true) }));

        let usecase =
            ShootUseCase::new(Arc::new(shoot_repo), Arc::new(MockClientRepository::new()));

        usecase
            .advance(shoot_id, ShootStatus::InProgress)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn losing_the_advance_race_is_a_conflict() {
        let shoot_id = Uuid::new_v4();

        let mut shoot_repo = MockShootRepository::new();
        let shoot = sample_shoot(shoot_id, ShootStatus::Scheduled);
        shoot_repo
            .expect_find_by_id()
            .with(eq(shoot_id))
            .returning(move |_| {
                let shoot = shoot.clone();
                Box::pin(async move { Ok(Some(shoot)) })
            });
        shoot_repo
            .expect_advance_status()
            .returning(|_, _, _| Box::pin(async { Ok(false) }));

        let usecase =
            ShootUseCase::new(Arc::new(shoot_repo), Arc::new(MockClientRepository::new()));

        let err = usecase
            .advance(shoot_id, ShootStatus::Confirmed)
            .await
            .unwrap_err();
        assert!(matches!(err, ShootError::Conflict));
    }

    #[tokio::test]
    async fn cancelling_a_delivered_shoot_is_rejected() {
        let shoot_id = Uuid::new_v4();

        let mut shoot_repo = MockShootRepository::new();
        let shoot = sample_shoot(shoot_id, ShootStatus::Delivered);
        shoot_repo
            .expect_find_by_id()
            .with(eq(shoot_id))
            .returning(move |_| {
                let shoot = shoot.clone();
                Box::pin(async move { Ok(Some(shoot)) })
            });

        let usecase =
            ShootUseCase::new(Arc::new(shoot_repo), Arc::new(MockClientRepository::new()));

        let err = usecase
            .advance(shoot_id, ShootStatus::Cancelled)
            .await
            .unwrap_err();
        assert!(matches!(err, ShootError::InvalidTransition { .. }));
    }

    #[tokio::test]
    async fn delivery_above_total_violates_the_invariant() {
        let shoot_id = Uuid::new_v4();

        let mut shoot_repo = MockShootRepository::new();
        let shoot = sample_shoot(shoot_id, ShootStatus::Completed);
        shoot_repo
            .expect_find_by_id()
            .with(eq(shoot_id))
            .returning(move |_| {
                let shoot = shoot.clone();
                Box::pin(async move { Ok(Some(shoot)) })
            });

        let usecase =
            ShootUseCase::new(Arc::new(shoot_repo), Arc::new(MockClientRepository::new()));

        let err = usecase.record_delivery(shoot_id, 26).await.unwrap_err();
        assert!(matches!(err, ShootError::InvariantViolation(_)));
    }

    #[tokio::test]
    async fn delivery_within_total_is_recorded() {
        let shoot_id = Uuid::new_v4();

        let mut shoot_repo = MockShootRepository::new();
        let shoot = sample_shoot(shoot_id, ShootStatus::Completed);
        shoot_repo
            .expect_find_by_id()
            .with(eq(shoot_id))
            .returning(move |_| {
                let shoot = shoot.clone();
                Box::pin(async move { Ok(Some(shoot)) })
            });
        shoot_repo
            .expect_set_delivered_images()
            .with(eq(shoot_id), eq(25))
            .returning(|_, _| Box::pin(async { Ok(()) }));

        let usecase =
            ShootUseCase::new(Arc::new(shoot_repo), Arc::new(MockClientRepository::new()));

        usecase.record_delivery(shoot_id, 25).await.unwrap();
    }
}
