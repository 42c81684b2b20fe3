use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;
use tracing::debug;

use crate::model::Student;

/// Errors returned by [`StudentStore`]
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Another student already uses this email
    #[error("Email already exists")]
    DuplicateEmail,

    /// A writer panicked while holding the lock
    #[error("store lock poisoned")]
    LockPoisoned,
}

#[derive(Default)]
struct Tables {
    /// id -> student
    students: HashMap<String, Student>,
    /// email -> id
    emails: HashMap<String, String>,
}

/// In-memory student store with a unique email index.
///
/// Both maps live behind one lock so the duplicate check and the insert in
/// [`StudentStore::create`] form a single critical section.
pub struct StudentStore {
    tables: RwLock<Tables>,
}

impl StudentStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Create a student unless another one already has `email`.
    ///
    /// Emails are compared byte-for-byte. On `DuplicateEmail` nothing is
    /// written.
    pub fn create(&self, name: &str, email: &str, phone: &str) -> Result<Student, StoreError> {
        let mut tables = self.tables.write().map_err(|_| StoreError::LockPoisoned)?;
        if tables.emails.contains_key(email) {
            debug!("Rejecting duplicate email");
            return Err(StoreError::DuplicateEmail);
        }

        let student = Student::create(name, email, phone);
        tables
            .emails
            .insert(student.email().to_string(), student.id().to_string());
        tables
            .students
            .insert(student.id().to_string(), student.clone());
        Ok(student)
    }

    /// Number of stored students
    pub fn count(&self) -> Result<usize, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.students.len())
    }

    /// Whether a student with exactly this email is stored
    pub fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        let tables = self.tables.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(tables.emails.contains_key(email))
    }
}

impl Default for StudentStore {
    fn default() -> Self {
        Self::new()
    }
}
