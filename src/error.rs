use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;
use crate::validation::{FieldErrors, RsvpSubmission};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Missing {
    Party,
    Rsvp,
}

impl Missing {
    fn message(&self) -> &'static str {
        match self {
            Missing::Party => "Party not found. ☹️",
            Missing::Rsvp => "RSVP not found. ☹️",
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Submission failed validation")]
    Validation {
        field_errors: FieldErrors,
        submitted: RsvpSubmission,
    },

    #[error("{}", .0.message())]
    NotFound(Missing),

    #[error("Malformed request: {0}")]
    MalformedRequest(String),

    #[error("Persistence error: {0}")]
    Persistence(#[source] StoreError),
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        // The rsvps.party_id foreign key is what rejects an unknown party.
        if e.is_foreign_key_violation() {
            AppError::NotFound(Missing::Party)
        } else {
            AppError::Persistence(e)
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ValidationBody<'a> {
    status: &'static str,
    field_errors: &'a FieldErrors,
    submitted: &'a RsvpSubmission,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub status: &'static str,
    pub message: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        ErrorBody {
            status: "error",
            message: message.into(),
        }
    }
}

impl<'r> Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        match self {
            AppError::Validation {
                field_errors,
                submitted,
            } => {
                let body = ValidationBody {
                    status: "error",
                    field_errors: &field_errors,
                    submitted: &submitted,
                };
                (Status::BadRequest, Json(body)).respond_to(req)
            }
            AppError::NotFound(missing) => {
                (Status::NotFound, Json(ErrorBody::new(missing.message()))).respond_to(req)
            }
            AppError::MalformedRequest(reason) => {
                (Status::BadRequest, Json(ErrorBody::new(reason))).respond_to(req)
            }
            AppError::Persistence(e) => {
                error!(uri = %req.uri(), "store failure: {e}");
                (
                    Status::InternalServerError,
                    Json(ErrorBody::new("Something went wrong. Please try again.")),
                )
                    .respond_to(req)
            }
        }
    }
}
