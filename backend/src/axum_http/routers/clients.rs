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
        repositories::{clients::ClientRepository, invoices::InvoiceRepository},
        value_objects::{
            clients::{CreateClientRequest, ListClientsFilter, SetClientStatusRequest},
            invoices::GenerateInvoiceRequest,
        },
    },
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{clients::ClientPostgres, invoices::InvoicePostgres},
    },
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::axum_http::auth::AuthUser;
use crate::axum_http::error_responses::into_error_response;
use crate::axum_http::routers::CreatedResponse;
use crate::usecases::billing::{BillingUseCase, CheckoutGateway, StripeCheckoutGateway};
use crate::usecases::clients::{ClientError, ClientUseCase};

pub fn routes(db_pool: Arc<PgPoolSquad>, gateway: Arc<StripeCheckoutGateway>) -> Router {
    let client_repository = ClientPostgres::new(Arc::clone(&db_pool));
    let client_usecase = ClientUseCase::new(Arc::new(client_repository));

    let billing_usecase = BillingUseCase::new(
        Arc::new(ClientPostgres::new(Arc::clone(&db_pool))),
        Arc::new(InvoicePostgres::new(Arc::clone(&db_pool))),
        gateway,
    );

    Router::new()
        .route("/", get(list_clients::<ClientPostgres>))
        .route("/", post(create_client::<ClientPostgres>))
        .route("/:id", get(get_client::<ClientPostgres>))
        .route("/:id/status", patch(set_client_status::<ClientPostgres>))
        .with_state(Arc::new(client_usecase))
        .merge(
            Router::new()
                .route(
                    "/:id/invoice",
                    post(generate_invoice::<ClientPostgres, InvoicePostgres, StripeCheckoutGateway>),
                )
                .route(
                    "/:id/invoices",
                    get(list_client_invoices::<ClientPostgres, InvoicePostgres, StripeCheckoutGateway>),
                )
                .with_state(Arc::new(billing_usecase)),
        )
}

pub async fn list_clients<C>(
    State(client_usecase): State<Arc<ClientUseCase<C>>>,
    _auth: AuthUser,
    Query(filter): Query<ListClientsFilter>,
) -> Response
where
    C: ClientRepository + Send + Sync + 'static,
{
    match client_usecase.list(filter).await {
        Ok(clients) => Json(clients).into_response(),
        Err(err) => map_error("list_clients", err),
    }
}

pub async fn create_client<C>(
    State(client_usecase): State<Arc<ClientUseCase<C>>>,
    auth: AuthUser,
    Json(request): Json<CreateClientRequest>,
) -> Response
where
    C: ClientRepository + Send + Sync + 'static,
{
    info!(admin = %auth.user_id, tier = %request.tier, "clients router: create requested");
    match client_usecase.create(request).await {
        Ok(client_id) => {
            (StatusCode::CREATED, Json(CreatedResponse { id: client_id })).into_response()
        }
        Err(err) => map_error("create_client", err),
    }
}

pub async fn get_client<C>(
    State(client_usecase): State<Arc<ClientUseCase<C>>>,
    _auth: AuthUser,
    Path(client_id): Path<Uuid>,
) -> Response
where
    C: ClientRepository + Send + Sync + 'static,
{
    match client_usecase.get(client_id).await {
        Ok(client) => Json(client).into_response(),
        Err(err) => map_error("get_client", err),
    }
}

pub async fn set_client_status<C>(
    State(client_usecase): State<Arc<ClientUseCase<C>>>,
    auth: AuthUser,
    Path(client_id): Path<Uuid>,
    Json(request): Json<SetClientStatusRequest>,
) -> Response
where
    C: ClientRepository + Send + Sync + 'static,
{
    info!(
        %client_id,
        admin = %auth.user_id,
        status = %request.status,
        "clients router: status change"
    );
    match client_usecase.set_status(client_id, request.status).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => map_error("set_client_status", err),
    }
}

pub async fn generate_invoice<C, I, G>(
    State(billing_usecase): State<Arc<BillingUseCase<C, I, G>>>,
    auth: AuthUser,
    Path(client_id): Path<Uuid>,
    Json(request): Json<GenerateInvoiceRequest>,
) -> Response
where
    C: ClientRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    G: CheckoutGateway + Send + Sync + 'static,
{
    info!(
        %client_id,
        admin = %auth.user_id,
        tier = %request.tier,
        "clients router: invoice generation requested"
    );
    match billing_usecase.generate_invoice(client_id, &request.tier).await {
        Ok(session) => (StatusCode::CREATED, Json(session)).into_response(),
        Err(err) => {
            warn!(
                status = err.status_code().as_u16(),
                error = %err,
                "clients router: generate_invoice failed"
            );
            into_error_response(err.status_code(), err.to_string())
        }
    }
}

pub async fn list_client_invoices<C, I, G>(
    State(billing_usecase): State<Arc<BillingUseCase<C, I, G>>>,
    _auth: AuthUser,
    Path(client_id): Path<Uuid>,
) -> Response
where
    C: ClientRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    G: CheckoutGateway + Send + Sync + 'static,
{
    match billing_usecase.list_invoices(client_id).await {
        Ok(invoices) => Json(invoices).into_response(),
        Err(err) => {
            warn!(
                status = err.status_code().as_u16(),
                error = %err,
                "clients router: list_client_invoices failed"
            );
            into_error_response(err.status_code(), err.to_string())
        }
    }
}

fn map_error(label: &str, err: ClientError) -> Response {
    warn!(
        status = err.status_code().as_u16(),
        error = %err,
        "clients router: {} failed",
        label
    );
    into_error_response(err.status_code(), err.to_string())
}
