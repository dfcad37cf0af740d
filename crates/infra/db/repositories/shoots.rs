use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{OptionalExtension, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::shoots},
};
use domain::{
    entities::shoots::{InsertShootEntity, ShootEntity},
    repositories::shoots::ShootRepository,
};

pub struct ShootPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ShootPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ShootRepository for ShootPostgres {
    async fn create_shoot(&self, shoot: InsertShootEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let shoot_id = insert_into(shoots::table)
            .values(&shoot)
            .returning(shoots::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(shoot_id)
    }

    async fn find_by_id(&self, shoot_id: Uuid) -> Result<Option<ShootEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let shoot = shoots::table
            .filter(shoots::id.eq(shoot_id))
            .first::<ShootEntity>(&mut conn)
            .optional()?;

        Ok(shoot)
    }

    async fn list_shoots(
        &self,
        status: Option<String>,
        client_id: Option<Uuid>,
        limit: i64,
    ) -> Result<Vec<ShootEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = shoots::table.into_boxed();
        if let Some(status) = status {
            query = query.filter(shoots::status.eq(status));
        }
        if let Some(client_id) = client_id {
            query = query.filter(shoots::client_id.eq(client_id));
        }

        let rows = query
            .order(shoots::scheduled_at.asc())
            .limit(limit)
            .load::<ShootEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn advance_status(&self, shoot_id: Uuid, from: &str, to: &str) -> Result<bool> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // Conditional write: a concurrent advance that already moved the
        // row off `from` makes this a no-op instead of a lost update.
        let affected = update(
            shoots::table
                .filter(shoots::id.eq(shoot_id))
                .filter(shoots::status.eq(from)),
        )
        .set((shoots::status.eq(to), shoots::updated_at.eq(Utc::now())))
        .execute(&mut conn)?;

        Ok(affected > 0)
    }

    async fn set_delivered_images(&self, shoot_id: Uuid, delivered_images: i32) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(shoots::table.filter(shoots::id.eq(shoot_id)))
            .set((
                shoots::delivered_images.eq(delivered_images),
                shoots::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
