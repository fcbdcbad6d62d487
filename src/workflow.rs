//! Validate, persist, respond.
//!
//! A submission without an id creates a new RSVP under a freshly generated
//! id. A submission with an id overwrites that RSVP in place, keeping its id
//! and creation time. A successful call is one store write; a failed
//! validation touches nothing. The party is checked by the store's foreign
//! key rather than a separate lookup.

use chrono::Utc;
use rand::{distributions::Alphanumeric, Rng};
use tracing::{info, warn};

use crate::config::UpdatePolicy;
use crate::error::{AppError, Missing};
use crate::feed::{MessageFeed, NewMessage};
use crate::models::{Rsvp, RsvpFields};
use crate::store::RsvpStore;
use crate::validation::{validate, RsvpSubmission};

pub const RSVP_ID_LEN: usize = 12;

/// Generated ids collide so rarely that running out of attempts means
/// something else is wrong.
const MAX_ID_ATTEMPTS: u32 = 5;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Created,
    Updated,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Submitted {
    pub mode: Mode,
    pub rsvp: Rsvp,
}

impl Submitted {
    pub fn rsvp_id(&self) -> &str {
        &self.rsvp.id
    }
}

fn random_rsvp_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RSVP_ID_LEN)
        .map(char::from)
        .collect::<String>()
        .to_ascii_uppercase()
}

pub struct RsvpWorkflow<'a> {
    store: &'a dyn RsvpStore,
    feed: Option<&'a dyn MessageFeed>,
    policy: UpdatePolicy,
}

impl<'a> RsvpWorkflow<'a> {
    pub fn new(store: &'a dyn RsvpStore, policy: UpdatePolicy) -> Self {
        Self {
            store,
            feed: None,
            policy,
        }
    }

    pub fn with_feed(mut self, feed: &'a dyn MessageFeed) -> Self {
        self.feed = Some(feed);
        self
    }

    pub async fn submit(&self, submission: RsvpSubmission) -> Result<Submitted, AppError> {
        let valid = match validate(&submission) {
            Ok(valid) => valid,
            Err(field_errors) => {
                return Err(AppError::Validation {
                    field_errors,
                    submitted: submission,
                })
            }
        };

        match (valid.id, self.policy) {
            (None, _) => {
                let rsvp = self.create_fresh(valid.fields).await?;
                Ok(self.created(rsvp))
            }
            (Some(id), UpdatePolicy::Strict) => {
                let rsvp = self
                    .store
                    .update(&id, &valid.fields)
                    .await?
                    .ok_or(AppError::NotFound(Missing::Rsvp))?;
                Ok(self.updated(rsvp))
            }
            (Some(id), UpdatePolicy::Upsert) => {
                let candidate = Rsvp::new(id, valid.fields, Utc::now().naive_utc());
                match self.store.upsert(&candidate).await? {
                    (rsvp, true) => Ok(self.created(rsvp)),
                    (rsvp, false) => Ok(self.updated(rsvp)),
                }
            }
        }
    }

    async fn create_fresh(&self, fields: RsvpFields) -> Result<Rsvp, AppError> {
        let created_at = Utc::now().naive_utc();
        let mut attempt = 1;
        loop {
            let rsvp = Rsvp::new(random_rsvp_id(), fields.clone(), created_at);
            match self.store.create(&rsvp).await {
                Ok(()) => return Ok(rsvp),
                Err(e) if e.is_unique_violation() && attempt < MAX_ID_ATTEMPTS => {
                    warn!(rsvp_id = %rsvp.id, attempt, "generated rsvp id already taken");
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn created(&self, rsvp: Rsvp) -> Submitted {
        info!(rsvp_id = %rsvp.id, response = %rsvp.response, guests = rsvp.guests, "rsvp created");
        if let (Some(feed), Some(event)) = (self.feed, NewMessage::from_rsvp(&rsvp)) {
            feed.publish(event);
        }
        Submitted {
            mode: Mode::Created,
            rsvp,
        }
    }

    fn updated(&self, rsvp: Rsvp) -> Submitted {
        info!(rsvp_id = %rsvp.id, response = %rsvp.response, guests = rsvp.guests, "rsvp updated");
        Submitted {
            mode: Mode::Updated,
            rsvp,
        }
    }
}
