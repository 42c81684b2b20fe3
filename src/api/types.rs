use std::borrow::Cow;

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidateEmail, ValidationError};

use crate::model::Student;
use crate::util::time;

/// Body of `POST /students`.
///
/// Absent and `null` fields both deserialize to an empty string so that
/// they are reported by validation rather than rejected by the parser.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
pub struct CreateStudentRequest {
    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank", message = "Name is required"))]
    pub name: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "email_address"))]
    pub email: String,

    #[serde(default, deserialize_with = "null_as_empty")]
    #[validate(custom(function = "not_blank", message = "Phone is required"))]
    pub phone: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank"));
    }
    Ok(())
}

/// Blank emails only report "required"; the syntax check runs on
/// non-blank values.
fn email_address(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("not_blank").with_message(Cow::Borrowed("Email is required")));
    }
    if !value.validate_email() {
        return Err(ValidationError::new("email").with_message(Cow::Borrowed("Email must be valid")));
    }
    Ok(())
}

/// Body of a `201 Created` reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: String,
}

impl From<&Student> for StudentResponse {
    fn from(student: &Student) -> Self {
        Self {
            id: student.id().to_string(),
            name: student.name().to_string(),
            email: student.email().to_string(),
            phone: student.phone().to_string(),
            created_at: time::to_wire(&student.created_at()),
        }
    }
}
