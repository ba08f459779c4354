use argon2::Error as Argon2Error;
use jsonwebtoken::errors::{Error as JwtError, ErrorKind as JwtErrorKind};
use rocket::{http::Status, response::Responder, serde::json::Json, Request};
use serde::Serialize;
use thiserror::Error;

use crate::model::{address::AddressError, workflow::WorkflowError};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Workflow(#[from] WorkflowError),
    #[error("Invalid address: {0}")]
    Address(#[from] AddressError),
    #[error(transparent)]
    Jwt(#[from] JwtError),
    #[error(transparent)]
    Argon2(#[from] Argon2Error),
    #[error("{1}")]
    Status(Status, String),
}

impl Error {
    pub fn not_found(what: String) -> Self {
        Self::Status(Status::NotFound, format!("{what} not found"))
    }

    /// The HTTP status this error is reported with.
    pub fn status(&self) -> Status {
        match self {
            Self::Workflow(err) => match err {
                WorkflowError::Unsupported(_) => Status::NotImplemented,
                WorkflowError::Unauthorized | WorkflowError::NotEligible => Status::Forbidden,
                WorkflowError::InvalidPhase(_)
                | WorkflowError::AlreadyRegistered
                | WorkflowError::NotRegistered
                | WorkflowError::AlreadyVoted
                | WorkflowError::ResultsNotFinal(_) => Status::Conflict,
                WorkflowError::InvalidProposal(_) | WorkflowError::NoResult => Status::NotFound,
                WorkflowError::InvalidDescription | WorkflowError::NotTied(_) => {
                    Status::UnprocessableEntity
                }
            },
            Self::Address(_) => Status::BadRequest,
            Self::Jwt(_) => Status::Unauthorized,
            Self::Argon2(_) => Status::InternalServerError,
            Self::Status(status, _) => *status,
        }
    }

    /// Short machine-readable name for the response body.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Workflow(err) => err.kind(),
            Self::Address(_) => "InvalidAddress",
            Self::Jwt(err) => match err.kind() {
                JwtErrorKind::ExpiredSignature => "ExpiredToken",
                _ => "InvalidToken",
            },
            Self::Argon2(_) => "PasswordHash",
            Self::Status(_, _) => "Request",
        }
    }
}

/// JSON body sent with every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl<'r, 'o: 'r> Responder<'r, 'o> for Error {
    fn respond_to(self, req: &'r Request<'_>) -> rocket::response::Result<'o> {
        let status = self.status();
        if status.class() == rocket::http::StatusClass::ServerError {
            error!("{} {}: {self}", req.method(), req.uri());
        } else {
            debug!("{} {}: {self}", req.method(), req.uri());
        }
        let body = ErrorBody {
            error: self.kind(),
            message: self.to_string(),
        };
        (status, Json(body)).respond_to(req)
    }
}
