use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use diesel::{Connection, OptionalExtension, RunQueryDsl, insert_into, prelude::*, update};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain,
    infra::db::postgres::{
        postgres_connection::PgPoolSquad,
        schema::{clients, leads},
    },
};
use domain::{
    entities::clients::{ClientEntity, InsertClientEntity},
    repositories::clients::ClientRepository,
    value_objects::enums::{client_statuses::ClientStatus, lead_statuses::LeadStatus},
};

pub struct ClientPostgres {
    db_pool: Arc<PgPoolSquad>,
}

impl ClientPostgres {
    pub fn new(db_pool: Arc<PgPoolSquad>) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl ClientRepository for ClientPostgres {
    async fn create_client(&self, client: InsertClientEntity) -> Result<Uuid> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let client_id = insert_into(clients::table)
            .values(&client)
            .returning(clients::id)
            .get_result::<Uuid>(&mut conn)?;

        Ok(client_id)
    }

    async fn create_for_lead(
        &self,
        client: InsertClientEntity,
        lead_id: Uuid,
    ) -> Result<Option<Uuid>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        // The insert and the lead claim commit together. The claim only
        // lands while converted_client_id is still null, so the loser of a
        // double-conversion race rolls back without leaving a client row.
        let result = conn.transaction::<Uuid, diesel::result::Error, _>(|conn| {
            let client_id = insert_into(clients::table)
                .values(&client)
                .returning(clients::id)
                .get_result::<Uuid>(conn)?;

            let claimed = update(
                leads::table
                    .filter(leads::id.eq(lead_id))
                    .filter(leads::converted_client_id.is_null()),
            )
            .set((
                leads::status.eq(LeadStatus::Booked.as_str()),
                leads::converted_client_id.eq(Some(client_id)),
                leads::updated_at.eq(Utc::now()),
            ))
            .execute(conn)?;

            if claimed == 0 {
                return Err(diesel::result::Error::RollbackTransaction);
            }

            Ok(client_id)
        });

        match result {
            Ok(client_id) => Ok(Some(client_id)),
            Err(diesel::result::Error::RollbackTransaction) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    async fn find_by_id(&self, client_id: Uuid) -> Result<Option<ClientEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let client = clients::table
            .filter(clients::id.eq(client_id))
            .first::<ClientEntity>(&mut conn)
            .optional()?;

        Ok(client)
    }

    async fn list_clients(
        &self,
        status: Option<String>,
        tier: Option<String>,
        limit: i64,
    ) -> Result<Vec<ClientEntity>> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        let mut query = clients::table.into_boxed();
        if let Some(status) = status {
            query = query.filter(clients::status.eq(status));
        }
        if let Some(tier) = tier {
            query = query.filter(clients::tier.eq(tier));
        }

        let rows = query
            .order(clients::created_at.desc())
            .limit(limit)
            .load::<ClientEntity>(&mut conn)?;

        Ok(rows)
    }

    async fn update_status(&self, client_id: Uuid, status: &str) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(clients::table.filter(clients::id.eq(client_id)))
            .set((
                clients::status.eq(status),
                clients::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }

    async fn settle_payment(&self, client_id: Uuid, amount_paid: i32) -> Result<()> {
        let mut conn = Arc::clone(&self.db_pool).get()?;

        update(clients::table.filter(clients::id.eq(client_id)))
            .set((
                clients::status.eq(ClientStatus::Active.as_str()),
                clients::amount_paid.eq(amount_paid),
                clients::updated_at.eq(Utc::now()),
            ))
            .execute(&mut conn)?;

        Ok(())
    }
}
