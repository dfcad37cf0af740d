use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use uuid::Uuid;

use crate::domain::entities::shoots::{InsertShootEntity, ShootEntity};

#[async_trait]
#[automock]
pub trait ShootRepository {
    async fn create_shoot(&self, shoot: InsertShootEntity) -> Result<Uuid>;

    async fn find_by_id(&self, shoot_id: Uuid) -> Result<Option<ShootEntity>>;

    async fn list_shoots(
        &self,
        status: Option<String>,
        client_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<ShootEntity>>;

    /// Compare-and-swap status update: the write only lands if the row is
    /// still in `from`. Returns false when a concurrent writer won.
    async fn advance_status(&self, shoot_id: Uuid, from: &str, to: &str) -> Result<bool>;

    async fn set_delivered_images(&self, shoot_id: Uuid, delivered_images: i32) -> Result<()>;
}
