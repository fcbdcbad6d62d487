//! Party invitation RSVPs.
//!
//! Guests read the party details and answer with a response, a guest count
//! and an optional message. The browser keeps a private cookie naming its
//! RSVP so the guest can come back and edit it without an account. Hosts get
//! per-response guest totals and a message wall, recomputed on every read.

use std::sync::Arc;

use rocket::fairing::{self, AdHoc};
use rocket::{Build, Rocket};
use rocket_db_pools::Database;
use tracing::{error, info};

pub mod config;
pub mod error;
pub mod feed;
pub mod format;
pub mod identity;
pub mod models;
pub mod routes;
pub mod schema;
pub mod store;
pub mod tally;
pub mod validation;
pub mod views;
pub mod workflow;

#[cfg(test)]
mod fixtures;

use config::AppConfig;
use feed::BroadcastFeed;
use routes::SharedStore;
use store::{Db, MysqlStore};

/// Routes, catchers, config and the message feed; the store is added by the caller.
fn app(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket
        .mount("/", routes::routes())
        .register("/", routes::catchers())
        .manage(BroadcastFeed::new())
        .attach(AdHoc::config::<AppConfig>())
}

/// The app backed by any store, e.g. [`store::MemoryStore`] in tests.
pub fn with_store(rocket: Rocket<Build>, store: SharedStore) -> Rocket<Build> {
    app(rocket).manage(store)
}

async fn install_mysql_store(rocket: Rocket<Build>) -> fairing::Result {
    if let Some(db) = Db::fetch(&rocket) {
        info!("Using MySQL RSVP store");
        let store: SharedStore = Arc::new(MysqlStore::from_db(db));
        Ok(rocket.manage(store))
    } else {
        error!("rsvp database pool is not configured");
        Err(rocket)
    }
}

/// The app backed by the `rsvp` MySQL pool from the Rocket config.
pub fn with_database(rocket: Rocket<Build>) -> Rocket<Build> {
    app(rocket)
        .attach(Db::init())
        .attach(AdHoc::try_on_ignite("RSVP store", install_mysql_store))
}
