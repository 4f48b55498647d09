//! Submission Store module
//!
//! Append-only persistence of participant submissions.
//! PostgreSQL in production, in memory for tests and database-less runs.

mod error;
mod memory;
mod postgres;
mod repository;

pub use error::StoreError;
pub use memory::MemorySubmissionStore;
pub use postgres::PgSubmissionStore;
pub use repository::{NewSubmission, StoredSubmission, SubmissionStore};
