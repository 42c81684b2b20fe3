//! HTTP API for student registration
//!
//! This module validates `POST /students` bodies, calls the store and
//! renders outcomes as JSON or RFC 7807 problem details.

pub mod error;
pub mod handler;
pub mod problem;
pub mod types;

use std::sync::Arc;

use crate::store::StudentStore;

pub use error::ApiError;
pub use handler::{create_student, handle_create};
pub use problem::{FieldError, ProblemDetail, ProblemTypes};
pub use types::{CreateStudentRequest, StudentResponse};

/// State shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<StudentStore>,
    pub problems: ProblemTypes,
}

impl AppState {
    pub fn new(store: Arc<StudentStore>, problem_base_uri: &str) -> Self {
        Self {
            store,
            problems: ProblemTypes::new(problem_base_uri),
        }
    }
}
