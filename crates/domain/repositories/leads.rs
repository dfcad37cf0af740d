use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::leads::{InsertLeadEntity, LeadEntity};

#[async_trait]
#[automock]
pub trait LeadRepository {
    async fn create_lead(&self, lead: InsertLeadEntity) -> Result<Uuid>;

    async fn find_by_id(&self, lead_id: Uuid) -> Result<Option<LeadEntity>>;

    async fn list_leads(&self, status: Option<String>, limit: i64) -> Result<Vec<LeadEntity>>;

    async fn update_status(&self, lead_id: Uuid, status: &str) -> Result<()>;
}
