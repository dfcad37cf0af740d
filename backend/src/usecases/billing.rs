use std::{collections::HashMap, sync::Arc};

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use chrono::Utc;
use gettupp_core::{
    domain::{
        entities::invoices::InsertInvoiceEntity,
        repositories::{clients::ClientRepository, invoices::InvoiceRepository},
        value_objects::{
            enums::{
                billing_modes::BillingMode, client_statuses::ClientStatus,
                invoice_statuses::InvoiceStatus, tiers::Tier,
            },
            invoices::{CheckoutSessionDto, InvoiceDto},
        },
    },
    payments::stripe_client::{CheckoutSessionRef, StripeClient, StripeEvent},
};
use serde::Deserialize;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::config_model;
use crate::usecases::leads::DEFAULT_LIST_LIMIT;

pub const INVOICE_CURRENCY: &str = "usd";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CheckoutGateway: Send + Sync {
    async fn create_checkout_session(
        &self,
        tier: Tier,
        billing: BillingMode,
        customer_email: Option<String>,
        metadata: HashMap<String, String>,
    ) -> AnyResult<CheckoutSessionRef>;

    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> AnyResult<StripeEvent>;
}

/// Stripe-backed gateway: the tier catalog owns the amounts, the
/// configured price ids tell Stripe to charge the same numbers.
pub struct StripeCheckoutGateway {
    client: StripeClient,
    stripe: config_model::Stripe,
}

impl StripeCheckoutGateway {
    pub fn from_config(stripe: config_model::Stripe) -> Self {
        let client = StripeClient::new(
            stripe.secret_key.clone(),
            stripe.webhook_secret.clone(),
            stripe.success_url.clone(),
            stripe.cancel_url.clone(),
        );
        Self { client, stripe }
    }
}

#[async_trait]
impl CheckoutGateway for StripeCheckoutGateway {
    async fn create_checkout_session(
        &self,
        tier: Tier,
        billing: BillingMode,
        customer_email: Option<String>,
        metadata: HashMap<String, String>,
    ) -> AnyResult<CheckoutSessionRef> {
        let mode = match billing {
            BillingMode::OneTime => "payment",
            BillingMode::Monthly => "subscription",
        };

        self.client
            .create_checkout_session(self.stripe.price_id(tier), mode, customer_email, metadata)
            .await
    }

    fn verify_webhook_signature(&self, payload: &[u8], signature: &str) -> AnyResult<StripeEvent> {
        self.client.verify_webhook_signature(payload, signature)
    }
}

#[derive(Debug, Error)]
pub enum BillingError {
    #[error("unknown tier: {0}")]
    InvalidTier(String),
    #[error("client not found")]
    NotFound,
    #[error("invoice not found")]
    InvoiceNotFound,
    #[error("invalid webhook payload: {0}")]
    InvalidWebhook(String),
    #[error("payment provider request failed")]
    Gateway(anyhow::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl BillingError {
    pub fn status_code(&self) -> axum::http::StatusCode {
        use axum::http::StatusCode;
        match self {
            BillingError::InvalidTier(_) | BillingError::InvalidWebhook(_) => {
                StatusCode::BAD_REQUEST
            }
            BillingError::NotFound | BillingError::InvoiceNotFound => StatusCode::NOT_FOUND,
            BillingError::Gateway(_) => StatusCode::BAD_GATEWAY,
            BillingError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

pub type UseCaseResult<T> = std::result::Result<T, BillingError>;

/// Events the provider posts back. Only the metadata is interesting for
/// the failure path.
#[derive(Debug, Deserialize)]
struct WebhookObject {
    id: Option<String>,
    amount_total: Option<i64>,
    metadata: Option<HashMap<String, String>>,
}

pub struct BillingUseCase<C, I, G>
where
    C: ClientRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    G: CheckoutGateway + Send + Sync + 'static,
{
    client_repo: Arc<C>,
    invoice_repo: Arc<I>,
    gateway: Arc<G>,
}

impl<C, I, G> BillingUseCase<C, I, G>
where
    C: ClientRepository + Send + Sync + 'static,
    I: InvoiceRepository + Send + Sync + 'static,
    G: CheckoutGateway + Send + Sync + 'static,
{
    pub fn new(client_repo: Arc<C>, invoice_repo: Arc<I>, gateway: Arc<G>) -> Self {
        Self {
            client_repo,
            invoice_repo,
            gateway,
        }
    }

    /// Creates a payable checkout link for the client and records the
    /// invoice against it. The tier key is checked before anything
    /// leaves the process.
    pub async fn generate_invoice(
        &self,
        client_id: Uuid,
        tier_key: &str,
    ) -> UseCaseResult<CheckoutSessionDto> {
        let tier = Tier::from_str(tier_key).ok_or_else(|| {
            warn!(%client_id, tier = %tier_key, "billing: unknown tier requested");
            BillingError::InvalidTier(tier_key.to_string())
        })?;

        let client = self
            .client_repo
            .find_by_id(client_id)
            .await
            .map_err(|err| {
                error!(%client_id, db_error = ?err, "billing: failed to load client");
                BillingError::Internal(err)
            })?
            .ok_or(BillingError::NotFound)?;

        let plan = tier.plan();
        info!(
            %client_id,
            tier = %tier,
            amount = plan.price,
            billing = %plan.billing,
            "billing: creating checkout session"
        );

        let metadata = HashMap::from([
            ("client_id".to_string(), client_id.to_string()),
            ("tier".to_string(), tier.to_string()),
        ]);

        let session = self
            .gateway
            .create_checkout_session(tier, plan.billing, Some(client.email), metadata)
            .await
            .map_err(|err| {
                error!(%client_id, error = ?err, "billing: checkout session creation failed");
                BillingError::Gateway(err)
            })?;

        let invoice_id = self
            .invoice_repo
            .create_invoice(InsertInvoiceEntity {
                client_id,
                description: format!("GettUpp {} Package", tier.label()),
                tier: tier.to_string(),
                amount: plan.price,
                currency: INVOICE_CURRENCY.to_string(),
                status: InvoiceStatus::Sent.to_string(),
                checkout_session_ref: Some(session.id.clone()),
                created_at: Utc::now(),
                paid_at: None,
            })
            .await
            .map_err(|err| {
                error!(%client_id, db_error = ?err, "billing: failed to record invoice");
                BillingError::Internal(err)
            })?;

        info!(%client_id, %invoice_id, "billing: invoice recorded");
        Ok(CheckoutSessionDto {
            invoice_id,
            url: session.url,
        })
    }

    pub async fn get_invoice(&self, invoice_id: Uuid) -> UseCaseResult<InvoiceDto> {
        let invoice = self
            .invoice_repo
            .find_by_id(invoice_id)
            .await
            .map_err(|err| {
                error!(%invoice_id, db_error = ?err, "billing: failed to load invoice");
                BillingError::Internal(err)
            })?
            .ok_or(BillingError::InvoiceNotFound)?;

        Ok(InvoiceDto::from(invoice))
    }

    pub async fn list_invoices(&self, client_id: Uuid) -> UseCaseResult<Vec<InvoiceDto>> {
        let invoices = self
            .invoice_repo
            .list_by_client(client_id, DEFAULT_LIST_LIMIT)
            .await
            .map_err(|err| {
                error!(%client_id, db_error = ?err, "billing: failed to list invoices");
                BillingError::Internal(err)
            })?;

        Ok(invoices.into_iter().map(InvoiceDto::from).collect())
    }

    /// Manual admin edit of an invoice status. `paid_at` follows the
    /// paid status in the same write.
    pub async fn set_invoice_status(
        &self,
        invoice_id: Uuid,
        status: InvoiceStatus,
    ) -> UseCaseResult<()> {
        self.invoice_repo
            .find_by_id(invoice_id)
            .await
            .map_err(BillingError::Internal)?
            .ok_or(BillingError::InvoiceNotFound)?;

        self.invoice_repo
            .update_status(invoice_id, status.as_str())
            .await
            .map_err(|err| {
                error!(%invoice_id, db_error = ?err, "billing: failed to update invoice status");
                BillingError::Internal(err)
            })?;

        info!(%invoice_id, status = %status, "billing: invoice status updated");
        Ok(())
    }

    /// Entry point for provider callbacks. The signature is verified
    /// before the payload is trusted; unknown events are acknowledged so
    /// the provider stops retrying them.
    pub async fn handle_webhook(&self, payload: &[u8], signature: &str) -> UseCaseResult<()> {
        let event = self
            .gateway
            .verify_webhook_signature(payload, signature)
            .map_err(|err| {
                warn!(error = ?err, "billing: webhook signature rejected");
                BillingError::InvalidWebhook(err.to_string())
            })?;

        info!(event_type = %event.type_, "billing: webhook received");

        match event.type_.as_str() {
            "checkout.session.completed" => self.handle_checkout_completed(&event).await,
            "invoice.payment_failed" => self.handle_payment_failed(&event).await,
            other => {
                info!(event_type = %other, "billing: ignoring webhook event");
                Ok(())
            }
        }
    }

    async fn handle_checkout_completed(&self, event: &StripeEvent) -> UseCaseResult<()> {
        let object: WebhookObject = serde_json::from_value(event.data.object.clone())
            .map_err(|err| BillingError::InvalidWebhook(err.to_string()))?;

        let session_id = object.id.ok_or_else(|| {
            BillingError::InvalidWebhook("checkout session id is missing".to_string())
        })?;
        let amount = (object.amount_total.unwrap_or(0) / 100) as i32;

        let invoice = self
            .invoice_repo
            .mark_paid_by_session_ref(&session_id, amount)
            .await
            .map_err(|err| {
                error!(%session_id, db_error = ?err, "billing: failed to mark invoice paid");
                BillingError::Internal(err)
            })?;

        let client_id = match &invoice {
            Some(invoice) => Some(invoice.client_id),
            None => object
                .metadata
                .as_ref()
                .and_then(|metadata| metadata.get("client_id"))
                .and_then(|value| Uuid::parse_str(value).ok()),
        };

        let Some(client_id) = client_id else {
            warn!(%session_id, "billing: settled session references no invoice or client");
            return Ok(());
        };

        self.client_repo
            .settle_payment(client_id, amount)
            .await
            .map_err(|err| {
                error!(%client_id, db_error = ?err, "billing: failed to settle client payment");
                BillingError::Internal(err)
            })?;

        info!(%client_id, amount, "billing: payment settled, client activated");
        Ok(())
    }

    async fn handle_payment_failed(&self, event: &StripeEvent) -> UseCaseResult<()> {
        let object: WebhookObject = serde_json::from_value(event.data.object.clone())
            .map_err(|err| BillingError::InvalidWebhook(err.to_string()))?;

        let client_id = object
            .metadata
            .as_ref()
            .and_then(|metadata| metadata.get("client_id"))
            .and_then(|value| Uuid::parse_str(value).ok());

        let Some(client_id) = client_id else {
            warn!("billing: payment failure references no client");
            return Ok(());
        };

        self.client_repo
            .update_status(client_id, ClientStatus::PastDue.as_str())
            .await
            .map_err(|err| {
                error!(%client_id, db_error = ?err, "billing: failed to flag past_due client");
                BillingError::Internal(err)
            })?;

        warn!(%client_id, "billing: recurring payment failed, client is past_due");
        Ok(())
    }
}
