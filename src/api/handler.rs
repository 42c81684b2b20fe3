use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{OriginalUri, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::{error, info, warn};
use validator::Validate;

use crate::api::AppState;
use crate::api::error::ApiError;
use crate::api::types::{CreateStudentRequest, StudentResponse};
use crate::model::Student;
use crate::store::StudentStore;

/// Validate a parsed body and create the student.
///
/// The store is only reached once the payload parsed and every field
/// passed validation.
pub fn handle_create(
    store: &StudentStore,
    payload: Result<Json<CreateStudentRequest>, JsonRejection>,
) -> Result<Student, ApiError> {
    let Json(req) = payload?;
    req.validate()?;
    let student = store.create(&req.name, &req.email, &req.phone)?;
    Ok(student)
}

/// POST /students
///
/// ### Request Body
/// ```json
/// { "name": "John Doe", "email": "john.doe@email.com", "phone": "(11) 99999-9999" }
/// ```
///
/// ### Responses
/// - 201 Created with the stored student
/// - 400 Bad Request: validation failure or unparsable body
/// - 409 Conflict: email already registered
/// - 500 Internal Server Error
pub async fn create_student(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<CreateStudentRequest>, JsonRejection>,
) -> Response {
    match handle_create(&state.store, payload) {
        Ok(student) => {
            info!("Created student {}", student.id());
            (StatusCode::CREATED, Json(StudentResponse::from(&student))).into_response()
        }
        Err(err) => {
            match &err {
                ApiError::Unexpected(msg) => error!("Failed to create student: {}", msg),
                other => warn!("Rejected create request on {}: {}", uri.path(), other),
            }
            err.into_problem(&state.problems, Some(uri.path()))
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload(name: &str, email: &str, phone: &str) -> Result<Json<CreateStudentRequest>, JsonRejection> {
        Ok(Json(CreateStudentRequest {
            name: name.to_string(),
            email: email.to_string(),
            phone: phone.to_string(),
        }))
    }

    #[test]
    fn test_handle_create_success() {
        let store = StudentStore::new();
        let student = handle_create(&store, payload("John Doe", "john.doe@email.com", "(11) 99999-9999")).unwrap();

        assert_eq!(student.name(), "John Doe");
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_handle_create_invalid_skips_store() {
        let store = StudentStore::new();
        let err = handle_create(&store, payload("", "invalid-email", "")).unwrap_err();

        match err {
            ApiError::Validation(fields) => {
                let names: Vec<_> = fields.iter().map(|f| f.field.as_str()).collect();
                assert_eq!(names, vec!["email", "name", "phone"]);
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_handle_create_duplicate() {
        let store = StudentStore::new();
        handle_create(&store, payload("John Doe", "john.doe@email.com", "1")).unwrap();

        let err = handle_create(&store, payload("Jane Doe", "john.doe@email.com", "2")).unwrap_err();
        assert!(matches!(err, ApiError::DuplicateEmail(_)));
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(store.count().unwrap(), 1);
    }
}
