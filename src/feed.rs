//! Best-effort "new message" notifications for the message wall.
//!
//! Publishing never fails the caller: with nobody listening the event is
//! simply dropped, and a page reload is always the source of truth.

use rocket::tokio::sync::broadcast;
use serde::Serialize;
use tracing::trace;

use crate::models::Rsvp;

const FEED_CAPACITY: usize = 64;

#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewMessage {
    pub id: String,
    pub name: String,
    pub guests: i32,
    pub message: String,
}

impl NewMessage {
    /// `None` when the RSVP carries no message.
    pub fn from_rsvp(rsvp: &Rsvp) -> Option<Self> {
        rsvp.message.as_ref().map(|message| NewMessage {
            id: rsvp.id.clone(),
            name: rsvp.name.clone(),
            guests: rsvp.guests,
            message: message.clone(),
        })
    }
}

pub trait MessageFeed: Send + Sync {
    fn publish(&self, event: NewMessage);
}

#[derive(Clone)]
pub struct BroadcastFeed {
    sender: broadcast::Sender<NewMessage>,
}

impl BroadcastFeed {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(FEED_CAPACITY);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<NewMessage> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastFeed {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageFeed for BroadcastFeed {
    fn publish(&self, event: NewMessage) {
        if let Err(e) = self.sender.send(event) {
            trace!("no feed subscribers, dropped message {}", e.0.id);
        }
    }
}
