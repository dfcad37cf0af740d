use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::clients::{ClientEntity, InsertClientEntity};

#[async_trait]
#[automock]
pub trait ClientRepository {
    async fn create_client(&self, client: InsertClientEntity) -> Result<Uuid>;

    /// Inserts the client and claims the originating lead in one
    /// transaction. Returns None when another conversion already claimed
    /// the lead, leaving nothing written.
    async fn create_for_lead(
        &self,
        client: InsertClientEntity,
        lead_id: Uuid,
    ) -> Result<Option<Uuid>>;

    async fn find_by_id(&self, client_id: Uuid) -> Result<Option<ClientEntity>>;

    async fn list_clients(
        &self,
        status: Option<String>,
        tier: Option<String>,
        limit: i64,
    ) -> Result<Vec<ClientEntity>>;

    async fn update_status(&self, client_id: Uuid, status: &str) -> Result<()>;

    /// Payment settled: activate the client and record what was paid.
    async fn settle_payment(&self, client_id: Uuid, amount_paid: i32) -> Result<()>;
}
