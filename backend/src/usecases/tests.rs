use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result as AnyResult;
use async_trait::async_trait;
use chrono::{Duration, Utc};
use gettupp_core::domain::{
    entities::{
        clients::{ClientEntity, InsertClientEntity},
        invoices::{InsertInvoiceEntity, InvoiceEntity},
        leads::{InsertLeadEntity, LeadEntity},
        shoots::{InsertShootEntity, ShootEntity},
    },
    repositories::{
        clients::ClientRepository, invoices::InvoiceRepository, leads::LeadRepository,
        shoots::ShootRepository,
    },
    value_objects::{
        enums::{
            billing_modes::BillingMode, lead_statuses::LeadStatus, shoot_statuses::ShootStatus,
            shoot_types::ShootType, tiers::Tier,
        },
        leads::IntakeSubmission,
        shoots::CreateShootRequest,
    },
};
use gettupp_core::payments::stripe_client::{CheckoutSessionRef, StripeEvent};
use uuid::Uuid;

use crate::usecases::{
    billing::{BillingUseCase, CheckoutGateway},
    leads::{LeadError, LeadUseCase},
    shoots::{ShootError, ShootUseCase},
};

#[derive(Default)]
struct InMemoryLeads {
    rows: Mutex<HashMap<Uuid, LeadEntity>>,
}

#[async_trait]
impl LeadRepository for InMemoryLeads {
    async fn create_lead(&self, lead: InsertLeadEntity) -> AnyResult<Uuid> {
        let id = Uuid::new_v4();
        let entity = LeadEntity {
            id,
            venue: lead.venue,
            instagram: lead.instagram,
            contact_name: lead.contact_name,
            email: lead.email,
            phone: lead.phone,
            event_type: lead.event_type,
            attendee_count: lead.attendee_count,
            budget: lead.budget,
            message: lead.message,
            status: lead.status,
            qualification_score: lead.qualification_score,
            converted_client_id: None,
            created_at: lead.created_at,
            updated_at: lead.updated_at,
        };
        self.rows.lock().unwrap().insert(id, entity);
        Ok(id)
    }

    async fn find_by_id(&self, lead_id: Uuid) -> AnyResult<Option<LeadEntity>> {
        Ok(self.rows.lock().unwrap().get(&lead_id).cloned())
    }

    async fn list_leads(&self, status: Option<String>, limit: i64) -> AnyResult<Vec<LeadEntity>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .filter(|lead| status.as_deref().is_none_or(|s| lead.status == s))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update_status(&self, lead_id: Uuid, status: &str) -> AnyResult<()> {
        if let Some(lead) = self.rows.lock().unwrap().get_mut(&lead_id) {
            lead.status = status.to_string();
            lead.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryClients {
    rows: Mutex<HashMap<Uuid, ClientEntity>>,
    leads: Arc<InMemoryLeads>,
}

impl InMemoryClients {
    fn with_leads(leads: Arc<InMemoryLeads>) -> Self {
        Self {
            rows: Mutex::new(HashMap::new()),
            leads,
        }
    }

    fn insert(&self, client: InsertClientEntity) -> Uuid {
        let id = Uuid::new_v4();
        let entity = ClientEntity {
            id,
            name: client.name,
            email: client.email,
            phone: client.phone,
            instagram: client.instagram,
            tier: client.tier,
            status: client.status,
            amount_paid: client.amount_paid,
            source: client.source,
            lead_id: client.lead_id,
            created_at: client.created_at,
            updated_at: client.updated_at,
        };
        self.rows.lock().unwrap().insert(id, entity);
        id
    }
}

#[async_trait]
impl ClientRepository for InMemoryClients {
    async fn create_client(&self, client: InsertClientEntity) -> AnyResult<Uuid> {
        Ok(self.insert(client))
    }

    async fn create_for_lead(
        &self,
        client: InsertClientEntity,
        lead_id: Uuid,
    ) -> AnyResult<Option<Uuid>> {
        let mut leads = self.leads.rows.lock().unwrap();
        let Some(lead) = leads.get_mut(&lead_id) else {
            return Ok(None);
        };
        if lead.converted_client_id.is_some() {
            return Ok(None);
        }

        let client_id = self.insert(client);
        lead.status = LeadStatus::Booked.to_string();
        lead.converted_client_id = Some(client_id);
        lead.updated_at = Utc::now();
        Ok(Some(client_id))
    }

    async fn find_by_id(&self, client_id: Uuid) -> AnyResult<Option<ClientEntity>> {
        Ok(self.rows.lock().unwrap().get(&client_id).cloned())
    }

    async fn list_clients(
        &self,
        status: Option<String>,
        tier: Option<String>,
        limit: i64,
    ) -> AnyResult<Vec<ClientEntity>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .filter(|client| status.as_deref().is_none_or(|s| client.status == s))
            .filter(|client| tier.as_deref().is_none_or(|t| client.tier == t))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn update_status(&self, client_id: Uuid, status: &str) -> AnyResult<()> {
        if let Some(client) = self.rows.lock().unwrap().get_mut(&client_id) {
            client.status = status.to_string();
            client.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn settle_payment(&self, client_id: Uuid, amount_paid: i32) -> AnyResult<()> {
        if let Some(client) = self.rows.lock().unwrap().get_mut(&client_id) {
            client.status = "active".to_string();
            client.amount_paid = amount_paid;
            client.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryShoots {
    rows: Mutex<HashMap<Uuid, ShootEntity>>,
}

#[async_trait]
impl ShootRepository for InMemoryShoots {
    async fn create_shoot(&self, shoot: InsertShootEntity) -> AnyResult<Uuid> {
        let id = Uuid::new_v4();
        let entity = ShootEntity {
            id,
            client_id: shoot.client_id,
            type_: shoot.type_,
            status: shoot.status,
            scheduled_at: shoot.scheduled_at,
            duration_minutes: shoot.duration_minutes,
            location: shoot.location,
            photographer_name: shoot.photographer_name,
            notes: shoot.notes,
            delivered_images: shoot.delivered_images,
            total_images: shoot.total_images,
            delivery_due_at: shoot.delivery_due_at,
            created_at: shoot.created_at,
            updated_at: shoot.updated_at,
        };
        self.rows.lock().unwrap().insert(id, entity);
        Ok(id)
    }

    async fn find_by_id(&self, shoot_id: Uuid) -> AnyResult<Option<ShootEntity>> {
        Ok(self.rows.lock().unwrap().get(&shoot_id).cloned())
    }

    async fn list_shoots(
        &self,
        status: Option<String>,
        client_id: Option<Uuid>,
        limit: i64,
    ) -> AnyResult<Vec<ShootEntity>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .filter(|shoot| status.as_deref().is_none_or(|s| shoot.status == s))
            .filter(|shoot| client_id.is_none_or(|c| shoot.client_id == c))
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn advance_status(&self, shoot_id: Uuid, from: &str, to: &str) -> AnyResult<bool> {
        let mut rows = self.rows.lock().unwrap();
        let Some(shoot) = rows.get_mut(&shoot_id) else {
            return Ok(false);
        };
        if shoot.status != from {
            return Ok(false);
        }
        shoot.status = to.to_string();
        shoot.updated_at = Utc::now();
        Ok(true)
    }

    async fn set_delivered_images(&self, shoot_id: Uuid, delivered_images: i32) -> AnyResult<()> {
        if let Some(shoot) = self.rows.lock().unwrap().get_mut(&shoot_id) {
            shoot.delivered_images = delivered_images;
            shoot.updated_at = Utc::now();
        }
        Ok(())
    }
}

#[derive(Default)]
struct InMemoryInvoices {
    rows: Mutex<HashMap<Uuid, InvoiceEntity>>,
}

#[async_trait]
impl InvoiceRepository for InMemoryInvoices {
    async fn create_invoice(&self, invoice: InsertInvoiceEntity) -> AnyResult<Uuid> {
        let id = Uuid::new_v4();
        let entity = InvoiceEntity {
            id,
            client_id: invoice.client_id,
            description: invoice.description,
            tier: invoice.tier,
            amount: invoice.amount,
            currency: invoice.currency,
            status: invoice.status,
            checkout_session_ref: invoice.checkout_session_ref,
            created_at: invoice.created_at,
            paid_at: invoice.paid_at,
        };
        self.rows.lock().unwrap().insert(id, entity);
        Ok(id)
    }

    async fn find_by_id(&self, invoice_id: Uuid) -> AnyResult<Option<InvoiceEntity>> {
        Ok(self.rows.lock().unwrap().get(&invoice_id).cloned())
    }

    async fn list_by_client(&self, client_id: Uuid, limit: i64) -> AnyResult<Vec<InvoiceEntity>> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .values()
            .filter(|invoice| invoice.client_id == client_id)
            .take(limit as usize)
            .cloned()
            .collect())
    }

    async fn mark_paid_by_session_ref(
        &self,
        session_ref: &str,
        amount: i32,
    ) -> AnyResult<Option<InvoiceEntity>> {
        let mut rows = self.rows.lock().unwrap();
        let invoice = rows
            .values_mut()
            .find(|invoice| invoice.checkout_session_ref.as_deref() == Some(session_ref));
        Ok(invoice.map(|invoice| {
            invoice.status = "paid".to_string();
            invoice.amount = amount;
            invoice.paid_at = Some(Utc::now());
            invoice.clone()
        }))
    }

    async fn update_status(&self, invoice_id: Uuid, status: &str) -> AnyResult<()> {
        if let Some(invoice) = self.rows.lock().unwrap().get_mut(&invoice_id) {
            invoice.status = status.to_string();
            invoice.paid_at = if status == "paid" {
                Some(Utc::now())
            } else {
                None
            };
        }
        Ok(())
    }
}

/// Gateway stand-in: hands out a fixed session and trusts any signature,
/// so webhook payloads can be injected as plain JSON.
struct FakeGateway;

#[async_trait]
impl CheckoutGateway for FakeGateway {
    async fn create_checkout_session(
        &self,
        _tier: Tier,
        _billing: BillingMode,
        _customer_email: Option<String>,
        _metadata: HashMap<String, String>,
    ) -> AnyResult<CheckoutSessionRef> {
        Ok(CheckoutSessionRef {
            id: "cs_fake".to_string(),
            url: "https://checkout.example/cs_fake".to_string(),
        })
    }

    fn verify_webhook_signature(&self, payload: &[u8], _signature: &str) -> AnyResult<StripeEvent> {
        Ok(serde_json::from_slice(payload)?)
    }
}

fn intake_submission() -> IntakeSubmission {
    IntakeSubmission {
        venue: "The Loft".to_string(),
        instagram: "@theloft".to_string(),
        contact_name: "Jordan Reyes".to_string(),
        email: "a@b.com".to_string(),
        phone: None,
        event_type: None,
        attendee_count: None,
        budget: None,
        message: None,
    }
}

#[tokio::test]
async fn lead_to_delivered_shoot_lifecycle() {
    let leads = Arc::new(InMemoryLeads::default());
    let clients = Arc::new(InMemoryClients::with_leads(Arc::clone(&leads)));
    let shoots = Arc::new(InMemoryShoots::default());

    let lead_usecase = LeadUseCase::new(Arc::clone(&leads), Arc::clone(&clients));
    let shoot_usecase = ShootUseCase::new(Arc::clone(&shoots), Arc::clone(&clients));

    // Intake lands as Pending with a zero score.
    let lead_id = lead_usecase.submit(intake_submission()).await.unwrap();
    let lead = lead_usecase.get(lead_id).await.unwrap();
    assert_eq!(lead.status, LeadStatus::Pending);
    assert_eq!(lead.qualification_score, 0);

    lead_usecase
        .set_status(lead_id, LeadStatus::Qualified)
        .await
        .unwrap();

    // Conversion produces a pending t2 client wired back to the lead.
    let converted = lead_usecase.convert(lead_id, Tier::T2).await.unwrap();
    let client = clients
        .find_by_id(converted.client_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(client.tier, "t2");
    assert_eq!(client.status, "pending");
    assert_eq!(client.source, "lead_conversion");
    assert_eq!(client.lead_id, Some(lead_id));

    let lead = lead_usecase.get(lead_id).await.unwrap();
    assert_eq!(lead.status, LeadStatus::Booked);
    assert_eq!(lead.converted_client_id, Some(converted.client_id));

    // Converting twice loses the claim.
    let err = lead_usecase.convert(lead_id, Tier::T2).await.unwrap_err();
    assert!(matches!(err, LeadError::AlreadyConverted));

    // Schedule and walk the shoot through its pipeline.
    let shoot_id = shoot_usecase
        .schedule(CreateShootRequest {
            client_id: converted.client_id,
            type_: ShootType::Standard,
            scheduled_at: Utc::now() + Duration::days(7),
            duration_minutes: None,
            location: None,
            photographer_name: None,
            notes: None,
            total_images: None,
            delivery_due_at: None,
        })
        .await
        .unwrap();

    let shoot = shoot_usecase.get(shoot_id).await.unwrap();
    assert_eq!(shoot.status, ShootStatus::Scheduled);

    for target in [
        ShootStatus::Confirmed,
        ShootStatus::InProgress,
        ShootStatus::Completed,
        ShootStatus::Delivered,
    ] {
        shoot_usecase.advance(shoot_id, target).await.unwrap();
        let shoot = shoot_usecase.get(shoot_id).await.unwrap();
        assert_eq!(shoot.status, target);
        assert!(shoot.delivered_images <= shoot.total_images);
    }

    // Delivered is terminal.
    let err = shoot_usecase
        .advance(shoot_id, ShootStatus::Cancelled)
        .await
        .unwrap_err();
    assert!(matches!(err, ShootError::InvalidTransition { .. }));
}

#[tokio::test]
async fn invoice_settlement_activates_the_client() {
    let leads = Arc::new(InMemoryLeads::default());
    let clients = Arc::new(InMemoryClients::with_leads(Arc::clone(&leads)));
    let invoices = Arc::new(InMemoryInvoices::default());

    let lead_usecase = LeadUseCase::new(Arc::clone(&leads), Arc::clone(&clients));
    let billing_usecase = BillingUseCase::new(
        Arc::clone(&clients),
        Arc::clone(&invoices),
        Arc::new(FakeGateway),
    );

    let lead_id = lead_usecase.submit(intake_submission()).await.unwrap();
    let converted = lead_usecase.convert(lead_id, Tier::T2).await.unwrap();

    let session = billing_usecase
        .generate_invoice(converted.client_id, "t2")
        .await
        .unwrap();

    let invoice = invoices
        .find_by_id(session.invoice_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(invoice.amount, 695);
    assert_eq!(invoice.status, "sent");
    assert!(invoice.paid_at.is_none());

    // Provider calls back with the settled session.
    let payload = serde_json::json!({
        "id": "evt_settled",
        "type": "checkout.session.completed",
        "data": {
            "object": {
                "id": "cs_fake",
                "amount_total": 69500,
                "metadata": { "client_id": converted.client_id.to_string() },
            },
        },
    });
    billing_usecase
        .handle_webhook(payload.to_string().as_bytes(), "t=1,v1=sig")
        .await
        .unwrap();

    let invoice = invoices
        .find_by_id(session.invoice_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(invoice.status, "paid");
    assert!(invoice.paid_at.is_some());

    let client = clients
        .find_by_id(converted.client_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(client.status, "active");
    assert_eq!(client.amount_paid, 695);
}
