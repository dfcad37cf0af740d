use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
};
use gettupp_core::{
    domain::repositories::{clients::ClientRepository, invoices::InvoiceRepository},
    infra::db::{
        postgres::postgres_connection::PgPoolSquad,
        repositories::{clients::ClientPostgres, invoices::InvoicePostgres},
    },
};
use tracing::{info, warn};

use crate::axum_http::error_responses::into_error_response;
use crate::usecases::billing::{BillingUseCase, CheckoutGateway, StripeCheckoutGateway};

pub fn routes(db_pool: Arc<PgPoolSquad>, gateway: Arc<StripeCheckoutGateway>) -> Router {
    let billing_usecase = BillingUseCase::new(
        Arc::new(ClientPostgres::new(Arc::clone(&db_pool))),
        Arc::new(InvoicePostgres::new(Arc::clone(&db_pool))),
        gateway,
    );

    Router::new()
        .route(
            "/payment",
            post(payment_webhook::<ClientPostgres, InvoicePostgres, StripeCheckoutGateway>),
        )
        .with_state(Arc::new(billing_usecase))
}

/// Provider callbacks authenticate via the signature header, not a
/// bearer token, so this route sits outside the admin auth.
pub async fn payment_webhook<C, I, G>(
    State(billing_usecase): State<Arc<BillingUseCase<C, I, G>>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response
where
    C: ClientRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    G: CheckoutGateway + Send + Sync + 'static,
{
    let Some(signature) = headers
        .get("stripe-signature")
        .and_then(|value| value.to_str().ok())
    else {
        warn!("payment_webhook: missing stripe-signature header");
        return into_error_response(
            StatusCode::BAD_REQUEST,
            "missing stripe-signature header".to_string(),
        );
    };

    info!(payload_bytes = body.len(), "payment_webhook: event received");
    match billing_usecase.handle_webhook(&body, signature).await {
        Ok(()) => (StatusCode::OK, "OK").into_response(),
        Err(err) => {
            warn!(
                status = err.status_code().as_u16(),
                error = %err,
                "payment_webhook: event processing failed"
            );
            into_error_response(err.status_code(), err.to_string())
        }
    }
}
