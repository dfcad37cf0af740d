use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use gettupp_core::{
    domain::{
        repositories::{clients::ClientRepository, leads::LeadRepository},
        value_objects::leads::IntakeSubmission,
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{clients::ClientPostgres, leads::LeadPostgres},
    },
};
use tracing::{info, warn};

use crate::axum_http::error_responses::into_error_response;
use crate::axum_http::routers::CreatedResponse;
use crate::usecases::leads::LeadUseCase;

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let lead_repository = LeadPostgres::new(Arc::clone(&db_pool));
    let client_repository = ClientPostgres::new(Arc::clone(&db_pool));
    let lead_usecase = LeadUseCase::new(Arc::new(lead_repository), Arc::new(client_repository));

    Router::new()
        .route("/", post(submit_lead::<LeadPostgres, ClientPostgres>))
        .with_state(Arc::new(lead_usecase))
}

/// Public endpoint: no auth, this is the website's intake form.
pub async fn submit_lead<L, C>(
    State(lead_usecase): State<Arc<LeadUseCase<L, C>>>,
    Json(submission): Json<IntakeSubmission>,
) -> Response
where
    L: LeadRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
{
    info!(venue = %submission.venue, "intake: submission received");
    match lead_usecase.submit(submission).await {
        Ok(lead_id) => {
            (StatusCode::CREATED, Json(CreatedResponse { id: lead_id })).into_response()
        }
        Err(err) => {
            warn!(
                status = err.status_code().as_u16(),
                error = %err,
                "intake: submission rejected"
            );
            into_error_response(err.status_code(), err.to_string())
        }
    }
}
