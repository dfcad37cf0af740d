use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch},
};
use gettupp_core::{
    domain::{
        repositories::{clients::ClientRepository, invoices::InvoiceRepository},
        value_objects::invoices::SetInvoiceStatusRequest,
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
use crate::usecases::billing::{BillingError, BillingUseCase, CheckoutGateway, StripeCheckoutGateway};

pub fn routes(db_pool: Arc<PgPoolSquad>, gateway: Arc<StripeCheckoutGateway>) -> Router {
    let billing_usecase = BillingUseCase::new(
        Arc::new(ClientPostgres::new(Arc::clone(&db_pool))),
        Arc::new(InvoicePostgres::new(Arc::clone(&db_pool))),
        gateway,
    );

    Router::new()
        .route(
            "/:id",
            get(get_invoice::<ClientPostgres, InvoicePostgres, StripeCheckoutGateway>),
        )
        .route(
            "/:id/status",
            patch(set_invoice_status::<ClientPostgres, InvoicePostgres, StripeCheckoutGateway>),
        )
        .with_state(Arc::new(billing_usecase))
}

pub async fn get_invoice<C, I, G>(
    State(billing_usecase): State<Arc<BillingUseCase<C, I, G>>>,
    _auth: AuthUser,
    Path(invoice_id): Path<Uuid>,
) -> Response
where
    C: ClientRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    G: CheckoutGateway + Send + Sync + 'static,
{
    match billing_usecase.get_invoice(invoice_id).await {
        Ok(invoice) => Json(invoice).into_response(),
        Err(err) => map_error("get_invoice", err),
    }
}

pub async fn set_invoice_status<C, I, G>(
    State(billing_usecase): State<Arc<BillingUseCase<C, I, G>>>,
    auth: AuthUser,
    Path(invoice_id): Path<Uuid>,
    Json(request): Json<SetInvoiceStatusRequest>,
) -> Response
where
    C: ClientRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    G: CheckoutGateway + Send + Sync + 'static,
{
    info!(
        %invoice_id,
        admin = %auth.user_id,
        status = %request.status,
        "invoices router: status change"
    );
    match billing_usecase
        .set_invoice_status(invoice_id, request.status)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => map_error("set_invoice_status", err),
    }
}

fn map_error(label: &str, err: BillingError) -> Response {
    warn!(
        status = err.status_code().as_u16(),
        error = %err,
        "invoices router: {} failed",
        label
    );
    into_error_response(err.status_code(), err.to_string())
}
