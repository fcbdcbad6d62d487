//! In-memory store, used by tests and for running without a database.
//!
//! Enforces the same constraints as the SQL schema: RSVP ids are unique and
//! every RSVP must point at a known party.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use futures::future::BoxFuture;

use super::{RsvpStore, StoreError, StoreResult};
use crate::models::{PartyDetails, ResponseType, Rsvp, RsvpFields};

#[derive(Default)]
struct Tables {
    parties: HashMap<String, PartyDetails>,
    rsvps: Vec<Rsvp>,
}

impl Tables {
    fn check_party(&self, party_id: &str) -> StoreResult<()> {
        if self.parties.contains_key(party_id) {
            Ok(())
        } else {
            Err(constraint(
                DatabaseErrorKind::ForeignKeyViolation,
                format!("no party {party_id}"),
            ))
        }
    }
}

fn constraint(kind: DatabaseErrorKind, message: String) -> StoreError {
    StoreError::Query(DieselError::DatabaseError(kind, Box::new(message)))
}

fn fields_of(rsvp: &Rsvp) -> RsvpFields {
    RsvpFields {
        party_id: rsvp.party_id.clone(),
        name: rsvp.name.clone(),
        response: rsvp.response,
        guests: rsvp.guests,
        message: rsvp.message.clone(),
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_party(party: PartyDetails) -> Self {
        let store = Self::new();
        store.insert_party(party);
        store
    }

    pub fn insert_party(&self, party: PartyDetails) {
        if let Ok(mut tables) = self.tables.lock() {
            tables.parties.insert(party.party.id.clone(), party);
        }
    }

    pub fn rsvp_count(&self) -> usize {
        self.tables.lock().map(|t| t.rsvps.len()).unwrap_or(0)
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl RsvpStore for MemoryStore {
    fn find_party<'a>(
        &'a self,
        party_id: &'a str,
    ) -> BoxFuture<'a, StoreResult<Option<PartyDetails>>> {
        Box::pin(async move { Ok(self.lock()?.parties.get(party_id).cloned()) })
    }

    fn rsvp_exists<'a>(&'a self, rsvp_id: &'a str) -> BoxFuture<'a, StoreResult<bool>> {
        Box::pin(async move { Ok(self.lock()?.rsvps.iter().any(|r| r.id == rsvp_id)) })
    }

    fn find_rsvp<'a>(&'a self, rsvp_id: &'a str) -> BoxFuture<'a, StoreResult<Option<Rsvp>>> {
        Box::pin(async move {
            Ok(self.lock()?.rsvps.iter().find(|r| r.id == rsvp_id).cloned())
        })
    }

    fn create<'a>(&'a self, rsvp: &'a Rsvp) -> BoxFuture<'a, StoreResult<()>> {
        Box::pin(async move {
            let mut tables = self.lock()?;
            if tables.rsvps.iter().any(|r| r.id == rsvp.id) {
                return Err(constraint(
                    DatabaseErrorKind::UniqueViolation,
                    format!("duplicate rsvp id {}", rsvp.id),
                ));
            }
            tables.check_party(&rsvp.party_id)?;
            tables.rsvps.push(rsvp.clone());
            Ok(())
        })
    }

    fn update<'a>(
        &'a self,
        rsvp_id: &'a str,
        fields: &'a RsvpFields,
    ) -> BoxFuture<'a, StoreResult<Option<Rsvp>>> {
        Box::pin(async move {
            let mut tables = self.lock()?;
            let Some(index) = tables.rsvps.iter().position(|r| r.id == rsvp_id) else {
                return Ok(None);
            };
            tables.check_party(&fields.party_id)?;
            let existing = &mut tables.rsvps[index];
            existing.apply(fields.clone());
            Ok(Some(existing.clone()))
        })
    }

    fn upsert<'a>(&'a self, rsvp: &'a Rsvp) -> BoxFuture<'a, StoreResult<(Rsvp, bool)>> {
        Box::pin(async move {
            let mut tables = self.lock()?;
            tables.check_party(&rsvp.party_id)?;
            if let Some(existing) = tables.rsvps.iter_mut().find(|r| r.id == rsvp.id) {
                existing.apply(fields_of(rsvp));
                return Ok((existing.clone(), false));
            }
            tables.rsvps.push(rsvp.clone());
            Ok((rsvp.clone(), true))
        })
    }

    fn list_by_party<'a>(&'a self, party_id: &'a str) -> BoxFuture<'a, StoreResult<Vec<Rsvp>>> {
        Box::pin(async move {
            let mut found: Vec<Rsvp> = self
                .lock()?
                .rsvps
                .iter()
                .filter(|r| r.party_id == party_id)
                .cloned()
                .collect();
            found.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
            Ok(found)
        })
    }

    fn sum_by_response<'a>(
        &'a self,
        party_id: &'a str,
    ) -> BoxFuture<'a, StoreResult<Vec<(ResponseType, i64)>>> {
        Box::pin(async move {
            let mut sums = BTreeMap::new();
            for rsvp in self.lock()?.rsvps.iter().filter(|r| r.party_id == party_id) {
                *sums.entry(rsvp.response).or_insert(0i64) += i64::from(rsvp.guests);
            }
            Ok(sums.into_iter().collect())
        })
    }
}
