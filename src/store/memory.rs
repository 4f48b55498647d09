//! In-memory Submission Store
//!
//! Used by tests and when the service runs without `DATABASE_URL`.
//! Rows are lost on restart.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

use super::{NewSubmission, StoreError, StoredSubmission, SubmissionStore};

#[derive(Debug, Default)]
pub struct MemorySubmissionStore {
    rows: RwLock<Vec<StoredSubmission>>,
    unavailable: AtomicBool,
}

impl MemorySubmissionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every following call fail, to simulate a database outage
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    fn check_available(&self) -> Result<(), StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable);
        }
        Ok(())
    }
}

#[async_trait]
impl SubmissionStore for MemorySubmissionStore {
    async fn insert(&self, submission: NewSubmission) -> Result<StoredSubmission, StoreError> {
        self.check_available()?;

        let mut rows = self.rows.write().await;
        let stored = StoredSubmission {
            id: rows.len() as i64 + 1,
            mode: submission.mode,
            distance: submission.distance,
            extra_passengers: submission.extra_passengers,
            impact: submission.impact,
            reason: submission.reason,
            created_at: Utc::now(),
        };
        rows.push(stored.clone());

        Ok(stored)
    }

    async fn fetch_all(&self) -> Result<Vec<StoredSubmission>, StoreError> {
        self.check_available()?;

        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }
}
