//! Submission Store Repository
//!
//! Storage contract shared by the PostgreSQL and in-memory stores.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::{ImpactEntry, Trip};

use super::StoreError;

/// Row to append, before the store assigns `id` and `created_at`
#[derive(Debug, Clone, PartialEq)]
pub struct NewSubmission {
    pub mode: String,
    pub distance: f64,
    pub extra_passengers: u32,
    pub impact: f64,
    pub reason: Option<String>,
}

impl NewSubmission {
    /// Build the row for a validated trip and its computed impact
    pub fn from_trip(trip: &Trip, impact: f64) -> Self {
        Self {
            mode: trip.mode.clone(),
            distance: trip.distance.km(),
            extra_passengers: trip.extra_passengers,
            impact,
            reason: trip.reason.clone(),
        }
    }
}

/// Stored submission from the `participations` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredSubmission {
    pub id: i64,
    pub mode: String,
    pub distance: f64,
    pub extra_passengers: u32,
    pub impact: f64,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StoredSubmission {
    pub fn impact_entry(&self) -> ImpactEntry {
        ImpactEntry::new(self.impact, self.extra_passengers)
    }
}

/// Append-only submission storage
#[async_trait]
pub trait SubmissionStore: Send + Sync {
    /// Append a submission; the store sets `id` and `created_at`
    async fn insert(&self, submission: NewSubmission) -> Result<StoredSubmission, StoreError>;

    /// Every submission, newest first
    async fn fetch_all(&self) -> Result<Vec<StoredSubmission>, StoreError>;

    /// Only the columns aggregation needs
    async fn fetch_impact_entries(&self) -> Result<Vec<ImpactEntry>, StoreError> {
        Ok(self
            .fetch_all()
            .await?
            .iter()
            .map(StoredSubmission::impact_entry)
            .collect())
    }
}
