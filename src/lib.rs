//! In-memory student registry served over HTTP.
//!
//! `POST /students` validates the body, creates the record in a
//! [`store::StudentStore`] that enforces unique emails, and answers with the
//! stored record or an RFC 7807 problem body.

pub mod api;
pub mod config;
pub mod model;
pub mod server;
pub mod store;
pub mod util;

pub use api::AppState;
pub use server::{Server, build_router};
pub use store::StudentStore;
