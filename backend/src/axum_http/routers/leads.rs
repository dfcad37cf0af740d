use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post},
};
use gettupp_core::{
    domain::{
        repositories::{clients::ClientRepository, leads::LeadRepository},
        value_objects::leads::{ConvertLeadRequest, ListLeadsFilter, SetLeadStatusRequest},
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{clients::ClientPostgres, leads::LeadPostgres},
    },
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::axum_http::auth::AuthUser;
use crate::axum_http::error_responses::into_error_response;
use crate::usecases::leads::{LeadError, LeadUseCase};

pub fn routes(db_pool: Arc<PgPoolSquad>) -> Router {
    let lead_repository = LeadPostgres::new(Arc::clone(&db_pool));
    let client_repository = ClientPostgres::new(Arc::clone(&db_pool));
    let lead_usecase = LeadUseCase::new(Arc::new(lead_repository), Arc::new(client_repository));

    Router::new()
        .route("/", get(list_leads::<LeadPostgres, ClientPostgres>))
        .route("/:id", get(get_lead::<LeadPostgres, ClientPostgres>))
        .route(
            "/:id/status",
            patch(set_lead_status::<LeadPostgres, ClientPostgres>),
        )
        .route(
            "/:id/convert",
            post(convert_lead::<LeadPostgres, ClientPostgres>),
        )
        .with_state(Arc::new(lead_usecase))
}

pub async fn list_leads<L, C>(
    State(lead_usecase): State<Arc<LeadUseCase<L, C>>>,
    _auth: AuthUser,
    Query(filter): Query<ListLeadsFilter>,
) -> Response
where
    L: LeadRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
{
    match lead_usecase.list(filter).await {
        Ok(leads) => Json(leads).into_response(),
        Err(err) => map_error("list_leads", err),
    }
}

pub async fn get_lead<L, C>(
    State(lead_usecase): State<Arc<LeadUseCase<L, C>>>,
    _auth: AuthUser,
    Path(lead_id): Path<Uuid>,
) -> Response
where
    L: LeadRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
{
    match lead_usecase.get(lead_id).await {
        Ok(lead) => Json(lead).into_response(),
        Err(err) => map_error("get_lead", err),
    }
}

pub async fn set_lead_status<L, C>(
    State(lead_usecase): State<Arc<LeadUseCase<L, C>>>,
    auth: AuthUser,
    Path(lead_id): Path<Uuid>,
    Json(request): Json<SetLeadStatusRequest>,
) -> Response
where
    L: LeadRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
{
    info!(
        %lead_id,
        admin = %auth.user_id,
        status = %request.status,
        "leads router: status change"
    );
    match lead_usecase.set_status(lead_id, request.status).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => map_error("set_lead_status", err),
    }
}

pub async fn convert_lead<L, C>(
    State(lead_usecase): State<Arc<LeadUseCase<L, C>>>,
    auth: AuthUser,
    Path(lead_id): Path<Uuid>,
    Json(request): Json<ConvertLeadRequest>,
) -> Response
where
    L: LeadRepository + Send + Sync + 'static,
    C: ClientRepository + Send + Sync + 'static,
{
    info!(
        %lead_id,
        admin = %auth.user_id,
        tier = %request.tier,
        "leads router: conversion requested"
    );
    match lead_usecase.convert(lead_id, request.tier).await {
        Ok(converted) => (StatusCode::CREATED, Json(converted)).into_response(),
        Err(err) => map_error("convert_lead", err),
    }
}

fn map_error(label: &str, err: LeadError) -> Response {
    warn!(
        status = err.status_code().as_u16(),
        error = %err,
        "leads router: {} failed",
        label
    );
    into_error_response(err.status_code(), err.to_string())
}
