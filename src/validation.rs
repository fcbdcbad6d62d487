//! Rules for a raw RSVP form submission.
//!
//! Everything arrives as text. [`validate`] either produces a typed
//! [`ValidRsvp`] or collects every problem it finds into [`FieldErrors`],
//! keyed by the form field name so the page can show them next to the inputs.

use std::collections::BTreeMap;
use std::num::IntErrorKind;

use rocket::FromForm;
use serde::Serialize;

use crate::models::{ResponseType, RsvpFields};

pub const NAME_REQUIRED: &str = "Please enter your name.";
pub const NAME_TOO_LONG: &str = "Name must be at most 100 characters.";
pub const GUESTS_MINIMUM: &str = "There should be at least 1 guest.";
pub const GUESTS_NOT_A_NUMBER: &str = "Guests must be a whole number.";
pub const GUESTS_MAXIMUM: &str = "Guests must be at most 2147483647.";
pub const PARTY_REQUIRED: &str = "Party is required.";
pub const RESPONSE_REQUIRED: &str = "Please choose a response.";
pub const RESPONSE_INVALID: &str = "Response must be one of YES, MAYBE or NO.";

const NAME_MAX_CHARS: usize = 100;
const DEFAULT_GUESTS: &str = "1";

/// The form exactly as posted. Missing fields are `None`.
#[derive(FromForm, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RsvpSubmission {
    #[field(name = "partyId")]
    pub party_id: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub guests: Option<String>,
    pub response: Option<String>,
    pub message: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidRsvp {
    /// Set when the guest is editing an RSVP they already own.
    pub id: Option<String>,
    pub fields: RsvpFields,
}

#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<&'static str, Vec<String>>);

impl FieldErrors {
    pub fn push(&mut self, field: &'static str, message: &str) {
        self.0.entry(field).or_default().push(message.to_string());
    }

    pub fn get(&self, field: &str) -> &[String] {
        self.0.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_guests(raw: Option<&str>, errors: &mut FieldErrors) -> Option<i32> {
    let raw = raw.unwrap_or(DEFAULT_GUESTS).trim();
    // An explicitly blank field counts as zero guests rather than the default.
    let parsed = if raw.is_empty() { Ok(0) } else { raw.parse::<i32>() };

    match parsed {
        Ok(guests) if guests >= 1 => Some(guests),
        Ok(_) => {
            errors.push("guests", GUESTS_MINIMUM);
            None
        }
        Err(e) => {
            let message = match e.kind() {
                IntErrorKind::PosOverflow => GUESTS_MAXIMUM,
                IntErrorKind::NegOverflow => GUESTS_MINIMUM,
                _ => GUESTS_NOT_A_NUMBER,
            };
            errors.push("guests", message);
            None
        }
    }
}

pub fn validate(submission: &RsvpSubmission) -> Result<ValidRsvp, FieldErrors> {
    let mut errors = FieldErrors::default();

    let party_id = non_empty(&submission.party_id);
    if party_id.is_none() {
        errors.push("partyId", PARTY_REQUIRED);
    }

    let name = non_empty(&submission.name);
    match name {
        None => errors.push("name", NAME_REQUIRED),
        Some(n) if n.chars().count() > NAME_MAX_CHARS => errors.push("name", NAME_TOO_LONG),
        Some(_) => {}
    }

    let guests = parse_guests(submission.guests.as_deref(), &mut errors);

    let response = match non_empty(&submission.response) {
        None => {
            errors.push("response", RESPONSE_REQUIRED);
            None
        }
        Some(raw) => match raw.parse::<ResponseType>() {
            Ok(response) => Some(response),
            Err(_) => {
                errors.push("response", RESPONSE_INVALID);
                None
            }
        },
    };

    match (party_id, name, guests, response) {
        (Some(party_id), Some(name), Some(guests), Some(response)) if errors.is_empty() => {
            Ok(ValidRsvp {
                id: non_empty(&submission.id).map(str::to_string),
                fields: RsvpFields {
                    party_id: party_id.to_string(),
                    name: name.to_string(),
                    response,
                    guests,
                    message: submission
                        .message
                        .clone()
                        .filter(|m| !m.trim().is_empty()),
                },
            })
        }
        _ => Err(errors),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submission(name: &str, response: &str, guests: Option<&str>) -> RsvpSubmission {
        RsvpSubmission {
            party_id: Some("p1".to_string()),
            name: Some(name.to_string()),
            response: Some(response.to_string()),
            guests: guests.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn accepts_a_complete_submission() {
        let valid = validate(&submission("Jo", "YES", Some("3"))).unwrap();
        assert_eq!(valid.id, None);
        assert_eq!(valid.fields.party_id, "p1");
        assert_eq!(valid.fields.name, "Jo");
        assert_eq!(valid.fields.response, ResponseType::Yes);
        assert_eq!(valid.fields.guests, 3);
        assert_eq!(valid.fields.message, None);
    }

    #[test]
    fn omitted_guests_defaults_to_one() {
        let valid = validate(&submission("Jo", "MAYBE", None)).unwrap();
        assert_eq!(valid.fields.guests, 1);
    }

    #[test]
    fn rejects_guest_counts_below_one() {
        for raw in ["0", "-3", ""] {
            let errors = validate(&submission("Jo", "YES", Some(raw))).unwrap_err();
            assert_eq!(errors.get("guests"), [GUESTS_MINIMUM.to_string()], "input {raw:?}");
        }
    }

    #[test]
    fn guest_counts_outside_the_column_range_are_field_errors() {
        let errors = validate(&submission("Jo", "YES", Some("2147483648"))).unwrap_err();
        assert_eq!(errors.get("guests"), [GUESTS_MAXIMUM.to_string()]);

        let errors = validate(&submission("Jo", "YES", Some("-2147483649"))).unwrap_err();
        assert_eq!(errors.get("guests"), [GUESTS_MINIMUM.to_string()]);

        let valid = validate(&submission("Jo", "YES", Some("2147483647"))).unwrap();
        assert_eq!(valid.fields.guests, i32::MAX);
    }

    #[test]
    fn rejects_non_numeric_guests() {
        let errors = validate(&submission("Jo", "YES", Some("two"))).unwrap_err();
        assert_eq!(errors.get("guests"), [GUESTS_NOT_A_NUMBER.to_string()]);
    }

    #[test]
    fn empty_and_whitespace_names_are_rejected_identically() {
        let empty = validate(&submission("", "YES", None)).unwrap_err();
        let blank = validate(&submission("   \t", "YES", None)).unwrap_err();
        assert_eq!(empty.get("name"), [NAME_REQUIRED.to_string()]);
        assert_eq!(empty, blank);
    }

    #[test]
    fn name_is_trimmed() {
        let valid = validate(&submission("  Jo  ", "NO", None)).unwrap();
        assert_eq!(valid.fields.name, "Jo");
    }

    #[test]
    fn response_must_be_a_known_category() {
        let errors = validate(&submission("Jo", "PERHAPS", None)).unwrap_err();
        assert_eq!(errors.get("response"), [RESPONSE_INVALID.to_string()]);

        let errors = validate(&submission("Jo", "yes", None)).unwrap_err();
        assert_eq!(errors.get("response"), [RESPONSE_INVALID.to_string()]);

        let mut missing = submission("Jo", "", None);
        missing.response = None;
        let errors = validate(&missing).unwrap_err();
        assert_eq!(errors.get("response"), [RESPONSE_REQUIRED.to_string()]);
    }

    #[test]
    fn collects_errors_for_every_bad_field() {
        let errors = validate(&RsvpSubmission::default()).unwrap_err();
        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(fields, ["name", "partyId", "response"]);
    }

    #[test]
    fn empty_message_is_dropped() {
        let mut form = submission("Jo", "YES", None);
        form.message = Some(String::new());
        assert_eq!(validate(&form).unwrap().fields.message, None);

        form.message = Some("See you there!".to_string());
        assert_eq!(
            validate(&form).unwrap().fields.message.as_deref(),
            Some("See you there!")
        );
    }

    #[test]
    fn empty_id_means_create() {
        let mut form = submission("Jo", "YES", None);
        form.id = Some(String::new());
        assert_eq!(validate(&form).unwrap().id, None);

        form.id = Some("ABCDEF123456".to_string());
        assert_eq!(validate(&form).unwrap().id.as_deref(), Some("ABCDEF123456"));
    }

    #[test]
    fn overlong_names_are_rejected() {
        let long = "x".repeat(101);
        let errors = validate(&submission(&long, "YES", None)).unwrap_err();
        assert_eq!(errors.get("name"), [NAME_TOO_LONG.to_string()]);
    }
}
