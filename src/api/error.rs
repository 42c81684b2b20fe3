use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use thiserror::Error;
use validator::ValidationErrors;

use crate::api::problem::{FieldError, ProblemDetail, ProblemTypes};
use crate::store::StoreError;

const INTERNAL_DETAIL: &str = "An unexpected error occurred. Please try again later.";

/// Outcome of a failed request, before it is rendered as a problem body
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more field constraints were violated
    #[error("Validation failed for one or more fields")]
    Validation(Vec<FieldError>),

    #[error("{0}")]
    DuplicateEmail(StoreError),

    /// The body could not be parsed into a request
    #[error("{0}")]
    MalformedInput(String),

    /// Anything else; the message is logged but never sent to the client
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateEmail(_) => StatusCode::CONFLICT,
            ApiError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Render as a problem body. This is the only place domain outcomes
    /// become HTTP status codes.
    pub fn into_problem(self, types: &ProblemTypes, instance: Option<&str>) -> ProblemDetail {
        let status = self.status();
        let problem = match self {
            ApiError::Validation(errors) => ProblemDetail::new(
                types.uri("validation-error"),
                "Validation Error",
                status,
                "Validation failed for one or more fields",
            )
            .with_errors(errors),
            ApiError::DuplicateEmail(err) => ProblemDetail::new(
                types.uri("email-already-exists"),
                "Email Already Exists",
                status,
                err.to_string(),
            ),
            ApiError::MalformedInput(detail) => ProblemDetail::new(
                types.uri("malformed-request"),
                "Malformed Request",
                status,
                detail,
            ),
            ApiError::Unexpected(_) => ProblemDetail::new(
                types.uri("internal-server-error"),
                "Internal Server Error",
                status,
                INTERNAL_DETAIL,
            ),
        };
        problem.with_instance(instance)
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => ApiError::DuplicateEmail(err),
            StoreError::LockPoisoned => ApiError::Unexpected(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedInput(rejection.body_text())
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    FieldError::new(field.to_string(), message)
                })
            })
            .collect();
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ApiError::Validation(fields)
    }
}
