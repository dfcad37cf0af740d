use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{OptionalExtension, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{postgres_connection::PgPoolSquad, schema::leads},
};
use domain::{
    entities::leads::{InsertLeadEntity, LeadEntity},
    repositories::leads::LeadRepository,
};

pub struct LeadPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl LeadPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl LeadRepository for LeadPostgres {
    async fn create_lead(&self, lead: InsertLeadEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let lead_id = insert_into(leads::table)
            .values(&lead)
            .returning(leads::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(lead_id)
    }

    async fn find_by_id(&self, lead_id: Uuid) -> Result<Option<LeadEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let lead = leads::table
            .filter(leads::id.eq(lead_id))
            .first::<LeadEntity>(&mut conn)
            .optional()?;

        Ok(lead)
    }

    async fn list_leads(&self, status: Option<String>, limit: i64) -> Result<Vec<LeadEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = leads::table.into_boxed();
        if let Some(status) = status {
            query = query.filter(leads::status.eq(status));
        }

        let rows = query
            .order(leads::created_at.desc())
            .limit(limit)
            .load::<LeadEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn update_status(&self, lead_id: Uuid, status: &str) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(leads::table.filter(leads::id.eq(lead_id)))
            .set((leads::status.eq(status), leads::updated_at.eq(Utc::now())))
            .execute(&mut conn)?;

        Ok(())
    }
}
