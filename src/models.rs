use std::fmt;
use std::str::FromStr;

use super::schema::{hosts, locations, parties, rsvps};
use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// Attendance answer a guest picks on the form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResponseType {
    Yes,
    Maybe,
    No,
}

impl ResponseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseType::Yes => "YES",
            ResponseType::Maybe => "MAYBE",
            ResponseType::No => "NO",
        }
    }
}

impl fmt::Display for ResponseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct UnknownResponse(pub String);

impl FromStr for ResponseType {
    type Err = UnknownResponse;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "YES" => Ok(ResponseType::Yes),
            "MAYBE" => Ok(ResponseType::Maybe),
            "NO" => Ok(ResponseType::No),
            other => Err(UnknownResponse(other.to_string())),
        }
    }
}

/// The editable part of an RSVP, as accepted from a guest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsvpFields {
    pub party_id: String,
    pub name: String,
    pub response: ResponseType,
    pub guests: i32,
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Rsvp {
    pub id: String,
    pub party_id: String,
    pub name: String,
    pub response: ResponseType,
    pub guests: i32,
    pub message: Option<String>,
    pub created_at: NaiveDateTime,
}

impl Rsvp {
    pub fn new(id: String, fields: RsvpFields, created_at: NaiveDateTime) -> Self {
        Rsvp {
            id,
            party_id: fields.party_id,
            name: fields.name,
            response: fields.response,
            guests: fields.guests,
            message: fields.message,
            created_at,
        }
    }

    /// Overwrites everything except the id and creation time.
    pub fn apply(&mut self, fields: RsvpFields) {
        self.party_id = fields.party_id;
        self.name = fields.name;
        self.response = fields.response;
        self.guests = fields.guests;
        self.message = fields.message;
    }
}

#[derive(Insertable, Selectable, Queryable, Clone, Debug)]
#[diesel(table_name = rsvps)]
pub struct RsvpRow {
    pub id: String,
    pub party_id: String,
    pub name: String,
    pub response: String,
    pub guests: i32,
    pub message: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(AsChangeset, Clone, Debug)]
#[diesel(table_name = rsvps, treat_none_as_null = true)]
pub struct RsvpChanges {
    pub party_id: String,
    pub name: String,
    pub response: String,
    pub guests: i32,
    pub message: Option<String>,
}

impl From<&Rsvp> for RsvpRow {
    fn from(rsvp: &Rsvp) -> Self {
        RsvpRow {
            id: rsvp.id.clone(),
            party_id: rsvp.party_id.clone(),
            name: rsvp.name.clone(),
            response: rsvp.response.as_str().to_string(),
            guests: rsvp.guests,
            message: rsvp.message.clone(),
            created_at: rsvp.created_at,
        }
    }
}

impl From<&RsvpFields> for RsvpChanges {
    fn from(fields: &RsvpFields) -> Self {
        RsvpChanges {
            party_id: fields.party_id.clone(),
            name: fields.name.clone(),
            response: fields.response.as_str().to_string(),
            guests: fields.guests,
            message: fields.message.clone(),
        }
    }
}

impl From<&Rsvp> for RsvpChanges {
    fn from(rsvp: &Rsvp) -> Self {
        RsvpChanges {
            party_id: rsvp.party_id.clone(),
            name: rsvp.name.clone(),
            response: rsvp.response.as_str().to_string(),
            guests: rsvp.guests,
            message: rsvp.message.clone(),
        }
    }
}

impl TryFrom<RsvpRow> for Rsvp {
    type Error = UnknownResponse;

    fn try_from(row: RsvpRow) -> Result<Self, Self::Error> {
        Ok(Rsvp {
            response: row.response.parse()?,
            id: row.id,
            party_id: row.party_id,
            name: row.name,
            guests: row.guests,
            message: row.message,
            created_at: row.created_at,
        })
    }
}

#[derive(Insertable, Selectable, Queryable, Serialize, Clone, Debug, PartialEq, Eq)]
#[diesel(table_name = parties)]
#[serde(rename_all = "camelCase")]
pub struct Party {
    pub id: String,
    pub name: String,
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub host_id: String,
    pub location_id: String,
}

#[derive(Insertable, Selectable, Queryable, Serialize, Clone, Debug, PartialEq, Eq)]
#[diesel(table_name = hosts)]
#[serde(rename_all = "camelCase")]
pub struct Host {
    pub id: String,
    pub first_name: String,
    pub phone: String,
}

#[derive(Insertable, Selectable, Queryable, Serialize, Clone, Debug, PartialEq, Eq)]
#[diesel(table_name = locations)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: String,
    pub name: String,
    pub address1: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub cross_streets: Option<String>,
    pub instructions: Option<String>,
}

/// A party joined with its host and location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartyDetails {
    pub party: Party,
    pub host: Host,
    pub location: Location,
}
