//! Persistence for parties and RSVPs.
//!
//! [`RsvpStore`] is the seam between the request handlers and the database.
//! Production uses [`MysqlStore`]; tests and local runs can use [`MemoryStore`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use futures::future::BoxFuture;

use crate::models::{PartyDetails, ResponseType, Rsvp, RsvpFields};

mod memory;
mod mysql;

pub use memory::MemoryStore;
pub use mysql::{Db, MysqlStore};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("connection pool: {0}")]
    Pool(String),
    #[error(transparent)]
    Query(#[from] diesel::result::Error),
    #[error("rsvp {id} has unrecognised response {value:?}")]
    CorruptResponse { id: String, value: String },
    #[error("store lock poisoned")]
    Poisoned,
}

impl StoreError {
    fn database_error_kind(&self) -> Option<&DatabaseErrorKind> {
        match self {
            StoreError::Query(DieselError::DatabaseError(kind, _)) => Some(kind),
            _ => None,
        }
    }

    /// The RSVP id is already taken.
    pub fn is_unique_violation(&self) -> bool {
        matches!(self.database_error_kind(), Some(DatabaseErrorKind::UniqueViolation))
    }

    /// The RSVP names a party that doesn't exist.
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(
            self.database_error_kind(),
            Some(DatabaseErrorKind::ForeignKeyViolation)
        )
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

pub trait RsvpStore: Send + Sync {
    fn find_party<'a>(&'a self, party_id: &'a str)
        -> BoxFuture<'a, StoreResult<Option<PartyDetails>>>;

    fn rsvp_exists<'a>(&'a self, rsvp_id: &'a str) -> BoxFuture<'a, StoreResult<bool>>;

    fn find_rsvp<'a>(&'a self, rsvp_id: &'a str) -> BoxFuture<'a, StoreResult<Option<Rsvp>>>;

    /// Fails with a unique violation if the id is taken and a foreign key
    /// violation if the party is unknown.
    fn create<'a>(&'a self, rsvp: &'a Rsvp) -> BoxFuture<'a, StoreResult<()>>;

    /// Overwrites the editable fields of an existing RSVP. `None` if no such id.
    fn update<'a>(
        &'a self,
        rsvp_id: &'a str,
        fields: &'a RsvpFields,
    ) -> BoxFuture<'a, StoreResult<Option<Rsvp>>>;

    /// Inserts `rsvp`, or overwrites the editable fields if the id is taken.
    /// An existing row keeps its `created_at`. The flag is true when a new
    /// row was inserted.
    fn upsert<'a>(&'a self, rsvp: &'a Rsvp) -> BoxFuture<'a, StoreResult<(Rsvp, bool)>>;

    /// Newest first.
    fn list_by_party<'a>(&'a self, party_id: &'a str) -> BoxFuture<'a, StoreResult<Vec<Rsvp>>>;

    /// Guest totals for the response categories that have at least one RSVP.
    fn sum_by_response<'a>(
        &'a self,
        party_id: &'a str,
    ) -> BoxFuture<'a, StoreResult<Vec<(ResponseType, i64)>>>;
}
