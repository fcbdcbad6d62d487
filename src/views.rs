//! JSON payloads returned by the read endpoints.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::format::{format_phone_number, PHONE_TEMPLATE};
use crate::models::{Host, Location, PartyDetails, ResponseType, Rsvp};
use crate::tally::Tally;

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct HostView {
    pub first_name: String,
    pub phone: String,
}

impl From<&Host> for HostView {
    fn from(host: &Host) -> Self {
        HostView {
            first_name: host.first_name.clone(),
            phone: format_phone_number(&host.phone, PHONE_TEMPLATE),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct LocationView {
    pub name: String,
    pub address1: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub cross_streets: Option<String>,
    pub instructions: Option<String>,
}

impl From<&Location> for LocationView {
    fn from(location: &Location) -> Self {
        LocationView {
            name: location.name.clone(),
            address1: location.address1.clone(),
            city: location.city.clone(),
            state: location.state.clone(),
            zip: location.zip.clone(),
            cross_streets: location.cross_streets.clone(),
            instructions: location.instructions.clone(),
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct WallMessage {
    pub id: String,
    pub name: String,
    pub response: ResponseType,
    pub guests: i32,
    pub message: String,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct PartyView {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub host: HostView,
    pub location: LocationView,
    /// Newest first, only RSVPs that left a message.
    pub messages: Vec<WallMessage>,
    pub rsvps: Tally,
}

impl PartyView {
    /// `rsvps` is expected newest first, as the store lists them.
    pub fn new(details: &PartyDetails, rsvps: Vec<Rsvp>, tally: Tally) -> Self {
        let messages = rsvps
            .into_iter()
            .filter_map(|rsvp| {
                let message = rsvp.message?;
                Some(WallMessage {
                    id: rsvp.id,
                    name: rsvp.name,
                    response: rsvp.response,
                    guests: rsvp.guests,
                    message,
                })
            })
            .collect();

        PartyView {
            id: details.party.id.clone(),
            name: details.party.name.clone(),
            start_date: details.party.start_date,
            end_date: details.party.end_date,
            host: HostView::from(&details.host),
            location: LocationView::from(&details.location),
            messages,
            rsvps: tally,
        }
    }
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationView {
    /// Whether this browser owns the RSVP and may edit it.
    pub has_cookie: bool,
    pub rsvp: Rsvp,
    pub host: HostView,
    pub location: LocationView,
}

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EditableRsvp {
    pub id: String,
    pub name: String,
    pub response: ResponseType,
    pub guests: i32,
    pub message: Option<String>,
}

/// Prefill for the edit form.
#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct EditView {
    pub party_id: String,
    pub rsvp: EditableRsvp,
}

impl From<Rsvp> for EditView {
    fn from(rsvp: Rsvp) -> Self {
        EditView {
            party_id: rsvp.party_id,
            rsvp: EditableRsvp {
                id: rsvp.id,
                name: rsvp.name,
                response: rsvp.response,
                guests: rsvp.guests,
                message: rsvp.message,
            },
        }
    }
}
