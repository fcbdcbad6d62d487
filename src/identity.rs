//! Remembers which RSVP belongs to this browser.
//!
//! The RSVP id is stored in a private cookie: Rocket encrypts and
//! authenticates it with the configured `secret_key`, so a client can read
//! nothing and forge nothing. The id is the only claim it carries.

use std::convert::Infallible;

use rocket::http::{Cookie, CookieJar, SameSite};
use rocket::request::{FromRequest, Outcome, Request};
use rocket::time::Duration;

pub const RSVP_COOKIE: &str = "party-rsvp";

/// Well past the party.
const MAX_AGE_DAYS: i64 = 30;

/// Request guard holding the RSVP id from a valid identity cookie, if any.
/// Tampered or foreign cookies fail decryption and read as absent.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RsvpToken(Option<String>);

impl RsvpToken {
    pub fn rsvp_id(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn owns(&self, rsvp_id: &str) -> bool {
        self.rsvp_id() == Some(rsvp_id)
    }
}

#[rocket::async_trait]
impl<'r> FromRequest<'r> for RsvpToken {
    type Error = Infallible;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let claim = req
            .cookies()
            .get_private(RSVP_COOKIE)
            .map(|c| c.value().to_string());
        Outcome::Success(RsvpToken(claim))
    }
}

pub fn rsvp_cookie(rsvp_id: &str) -> Cookie<'static> {
    Cookie::build((RSVP_COOKIE, rsvp_id.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::days(MAX_AGE_DAYS))
        .secure(!cfg!(debug_assertions))
        .build()
}

/// Binds this browser to `rsvp_id`, replacing any earlier claim.
pub fn remember(cookies: &CookieJar<'_>, rsvp_id: &str) {
    cookies.add_private(rsvp_cookie(rsvp_id));
}
