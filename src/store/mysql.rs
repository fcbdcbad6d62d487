use std::collections::BTreeMap;

use diesel::dsl::{exists, select};
use futures::future::BoxFuture;
use rocket_db_pools::diesel::prelude::*;
use rocket_db_pools::diesel::{AsyncMysqlConnection, MysqlPool, RunQueryDsl};
use rocket_db_pools::Database;

use super::{RsvpStore, StoreError, StoreResult};
use crate::models::{
    Host, Location, Party, PartyDetails, ResponseType, Rsvp, RsvpChanges, RsvpFields, RsvpRow,
};
use crate::schema::{hosts, locations, parties, rsvps};

#[derive(Database)]
#[database("rsvp")]
pub struct Db(pub MysqlPool);

#[derive(Clone)]
pub struct MysqlStore {
    pool: MysqlPool,
}

impl MysqlStore {
    pub fn new(pool: MysqlPool) -> Self {
        Self { pool }
    }

    pub fn from_db(db: &Db) -> Self {
        Self::new(db.0.clone())
    }
}

async fn load_rsvp(conn: &mut AsyncMysqlConnection, rsvp_id: &str) -> StoreResult<Option<Rsvp>> {
    let row = rsvps::table
        .find(rsvp_id)
        .select(RsvpRow::as_select())
        .first(conn)
        .await
        .optional()?;

    row.map(to_rsvp).transpose()
}

fn to_rsvp(row: RsvpRow) -> StoreResult<Rsvp> {
    let id = row.id.clone();
    let value = row.response.clone();
    Rsvp::try_from(row).map_err(|_| StoreError::CorruptResponse { id, value })
}

fn pool_error(e: impl std::fmt::Display) -> StoreError {
    StoreError::Pool(e.to_string())
}

impl RsvpStore for MysqlStore {
    fn find_party<'a>(
        &'a self,
        party_id: &'a str,
    ) -> BoxFuture<'a, StoreResult<Option<PartyDetails>>> {
        Box::pin(async move {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let found: Option<(Party, Host, Location)> = parties::table
                .inner_join(hosts::table)
                .inner_join(locations::table)
                .filter(parties::id.eq(party_id))
                .select((Party::as_select(), Host::as_select(), Location::as_select()))
                .first(&mut conn)
                .await
                .optional()?;

            Ok(found.map(|(party, host, location)| PartyDetails {
                party,
                host,
                location,
            }))
        })
    }

    fn rsvp_exists<'a>(&'a self, rsvp_id: &'a str) -> BoxFuture<'a, StoreResult<bool>> {
        Box::pin(async move {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let found = select(exists(rsvps::table.filter(rsvps::id.eq(rsvp_id))))
                .get_result(&mut conn)
                .await?;
            Ok(found)
        })
    }

    fn find_rsvp<'a>(&'a self, rsvp_id: &'a str) -> BoxFuture<'a, StoreResult<Option<Rsvp>>> {
        Box::pin(async move {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            load_rsvp(&mut conn, rsvp_id).await
        })
    }

    fn create<'a>(&'a self, rsvp: &'a Rsvp) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(async move {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            diesel::insert_into(rsvps::table)
                .values(RsvpRow::from(rsvp))
                .execute(&mut conn)
                .await?;
            Ok(())
        })
    }

    fn update<'a>(
        &'a self,
        rsvp_id: &'a str,
        fields: &'a RsvpFields,
    ) -> BoxFuture<'a, StoreResult<Option<Rsvp>>> {
        Box::pin(async move {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            // MySQL reports zero affected rows for a no-op update, so the
            // reload below is what decides whether the id existed.
            diesel::update(rsvps::table.find(rsvp_id))
                .set(RsvpChanges::from(fields))
                .execute(&mut conn)
                .await?;
            load_rsvp(&mut conn, rsvp_id).await
        })
    }

    fn upsert<'a>(&'a self, rsvp: &'a Rsvp) -> BoxFuture<'a, StoreResult<(Rsvp, bool)>> {
        Box::pin(async move {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            // Insert first so a new row costs one statement; only a taken id
            // falls through to the update, which leaves created_at alone.
            let inserted = diesel::insert_into(rsvps::table)
                .values(RsvpRow::from(rsvp))
                .execute(&mut conn)
                .await
                .map_err(StoreError::from);

            match inserted {
                Ok(_) => Ok((rsvp.clone(), true)),
                Err(e) if e.is_unique_violation() => {
                    diesel::update(rsvps::table.find(&rsvp.id))
                        .set(RsvpChanges::from(rsvp))
                        .execute(&mut conn)
                        .await?;
                    let stored = load_rsvp(&mut conn, &rsvp.id)
                        .await?
                        .ok_or(StoreError::Query(diesel::result::Error::NotFound))?;
                    Ok((stored, false))
                }
                Err(e) => Err(e),
            }
        })
    }

    fn list_by_party<'a>(&'a self, party_id: &'a str) -> BoxFuture<'a, StoreResult<Vec<Rsvp>>> {
        Box::pin(async move {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            let rows: Vec<RsvpRow> = rsvps::table
                .filter(rsvps::party_id.eq(party_id))
                .order((rsvps::created_at.desc(), rsvps::id.asc()))
                .select(RsvpRow::as_select())
                .load(&mut conn)
                .await?;

            rows.into_iter().map(to_rsvp).collect()
        })
    }

    fn sum_by_response<'a>(
        &'a self,
        party_id: &'a str,
    ) -> BoxFuture<'a, StoreResult<Vec<(ResponseType, i64)>>> {
        Box::pin(async move {
            let mut conn = self.pool.get().await.map_err(pool_error)?;
            // MySQL's SUM(INT) comes back as DECIMAL, so fold in Rust instead.
            let rows: Vec<(String, String, i32)> = rsvps::table
                .filter(rsvps::party_id.eq(party_id))
                .select((rsvps::id, rsvps::response, rsvps::guests))
                .load(&mut conn)
                .await?;

            let mut sums = BTreeMap::new();
            for (id, value, guests) in rows {
                let response = value
                    .parse::<ResponseType>()
                    .map_err(|_| StoreError::CorruptResponse { id, value })?;
                *sums.entry(response).or_insert(0i64) += i64::from(guests);
            }
            Ok(sums.into_iter().collect())
        })
    }
}
