//! Domain records held by the store

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::util::time;

/// A registered student.
///
/// Values are immutable once built: `id` and `created_at` are assigned by
/// [`Student::create`] and there are no setters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Student {
    id: String,
    name: String,
    email: String,
    phone: String,
    created_at: DateTime<Utc>,
}

impl Student {
    /// Build a student from already-known parts
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            phone: phone.into(),
            created_at,
        }
    }

    /// Build a new student with a random v4 id and the current time
    pub fn create(name: impl Into<String>, email: impl Into<String>, phone: impl Into<String>) -> Self {
        Self::new(Uuid::new_v4().to_string(), name, email, phone, time::now())
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
