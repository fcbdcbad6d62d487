use std::sync::Arc;

use rocket::Either;
use rocket::form::{Errors, Form};
use rocket::http::{CookieJar, Status};
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::{catch, catchers, get, post, routes, uri, Catcher, Request, Route, State};
use tracing::{debug, warn};

use crate::config::AppConfig;
use crate::error::{AppError, ErrorBody, Missing};
use crate::feed::BroadcastFeed;
use crate::identity::{self, RsvpToken};
use crate::store::RsvpStore;
use crate::tally;
use crate::validation::RsvpSubmission;
use crate::views::{ConfirmationView, EditView, HostView, LocationView, PartyView};
use crate::workflow::RsvpWorkflow;

pub type SharedStore = Arc<dyn RsvpStore>;

async fn party_view(store: &dyn RsvpStore, party_id: &str) -> Result<PartyView, AppError> {
    let details = store
        .find_party(party_id)
        .await?
        .ok_or(AppError::NotFound(Missing::Party))?;

    let (rsvps, tally) = futures::try_join!(
        store.list_by_party(party_id),
        tally::aggregate(store, party_id)
    )?;

    Ok(PartyView::new(&details, rsvps, tally))
}

/// Guests who already answered go straight to their confirmation.
#[get("/")]
async fn index(
    token: RsvpToken,
    store: &State<SharedStore>,
    config: &State<AppConfig>,
) -> Result<Either<Redirect, Json<PartyView>>, AppError> {
    if let Some(rsvp_id) = token.rsvp_id() {
        if store.rsvp_exists(rsvp_id).await? {
            return Ok(Either::Left(Redirect::to(uri!(confirmation(rsvp_id)))));
        }
        debug!(rsvp_id, "identity cookie names a missing rsvp");
    }

    let view = party_view(store.inner().as_ref(), &config.party_id).await?;
    Ok(Either::Right(Json(view)))
}

#[get("/party")]
async fn party(
    store: &State<SharedStore>,
    config: &State<AppConfig>,
) -> Result<Json<PartyView>, AppError> {
    Ok(Json(party_view(store.inner().as_ref(), &config.party_id).await?))
}

#[post("/resources/rsvp", data = "<form>")]
async fn submit_rsvp(
    form: Result<Form<RsvpSubmission>, Errors<'_>>,
    token: RsvpToken,
    cookies: &CookieJar<'_>,
    store: &State<SharedStore>,
    feed: &State<BroadcastFeed>,
    config: &State<AppConfig>,
) -> Result<Redirect, AppError> {
    let submission = form
        .map_err(|e| AppError::MalformedRequest(e.to_string()))?
        .into_inner();

    // Editing requires the identity cookie for that exact RSVP.
    if let Some(rsvp_id) = submission.id.as_deref().map(str::trim).filter(|id| !id.is_empty()) {
        if !token.owns(rsvp_id) {
            warn!(rsvp_id, "edit attempted without a matching identity cookie");
            return Err(AppError::MalformedRequest(
                "This RSVP does not belong to this browser.".to_string(),
            ));
        }
    }

    let submitted = RsvpWorkflow::new(store.inner().as_ref(), config.update_policy)
        .with_feed(feed.inner())
        .submit(submission)
        .await?;

    identity::remember(cookies, submitted.rsvp_id());
    Ok(Redirect::to(uri!(confirmation(submitted.rsvp_id()))))
}

#[get("/r/<rsvp_id>")]
async fn confirmation(
    rsvp_id: &str,
    token: RsvpToken,
    store: &State<SharedStore>,
) -> Result<Json<ConfirmationView>, AppError> {
    let rsvp = store
        .find_rsvp(rsvp_id)
        .await?
        .ok_or(AppError::NotFound(Missing::Rsvp))?;
    let details = store
        .find_party(&rsvp.party_id)
        .await?
        .ok_or(AppError::NotFound(Missing::Party))?;

    Ok(Json(ConfirmationView {
        has_cookie: token.owns(&rsvp.id),
        host: HostView::from(&details.host),
        location: LocationView::from(&details.location),
        rsvp,
    }))
}

#[get("/r/<rsvp_id>/edit")]
async fn edit(
    rsvp_id: &str,
    token: RsvpToken,
    store: &State<SharedStore>,
) -> Result<Either<Redirect, Json<EditView>>, AppError> {
    if !token.owns(rsvp_id) {
        return Ok(Either::Left(Redirect::to(uri!(index))));
    }

    let rsvp = store
        .find_rsvp(rsvp_id)
        .await?
        .ok_or(AppError::NotFound(Missing::Rsvp))?;
    Ok(Either::Right(Json(EditView::from(rsvp))))
}

#[catch(404)]
fn not_found(req: &Request<'_>) -> Json<ErrorBody> {
    Json(ErrorBody::new(format!("Nothing at {}.", req.uri())))
}

#[catch(415)]
fn unsupported_media_type(_req: &Request<'_>) -> Json<ErrorBody> {
    Json(ErrorBody::new("Malformed request: expected a form-encoded body."))
}

#[catch(422)]
fn unprocessable(_req: &Request<'_>) -> Json<ErrorBody> {
    Json(ErrorBody::new("The request could not be understood."))
}

#[catch(500)]
fn internal_error(_status: Status, _req: &Request<'_>) -> Json<ErrorBody> {
    Json(ErrorBody::new("Something went wrong. Please try again."))
}

pub fn routes() -> Vec<Route> {
    routes![index, party, submit_rsvp, confirmation, edit]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![not_found, unsupported_media_type, unprocessable, internal_error]
}
