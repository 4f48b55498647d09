//! PostgreSQL Submission Store
//!
//! Each insert is a single statement, so a failed write never leaves a partial row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::ImpactEntry;

use super::{NewSubmission, StoreError, StoredSubmission, SubmissionStore};

type SubmissionRow = (i64, String, f64, i32, f64, Option<String>, DateTime<Utc>);

/// Submission store backed by the `participations` table
#[derive(Debug, Clone)]
pub struct PgSubmissionStore {
    pool: PgPool,
}

impl PgSubmissionStore {
    /// Create a new PgSubmissionStore with a database pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn passengers_from_column(value: i32) -> Result<u32, StoreError> {
    u32::try_from(value)
        .map_err(|_| StoreError::InvalidRow(format!("negative nbpassager: {}", value)))
}

fn into_stored(row: SubmissionRow) -> Result<StoredSubmission, StoreError> {
    let (id, mode, distance, nbpassager, impact, raison, created_at) = row;
    Ok(StoredSubmission {
        id,
        mode,
        distance,
        extra_passengers: passengers_from_column(nbpassager)?,
        impact,
        reason: raison,
        created_at,
    })
}

#[async_trait]
impl SubmissionStore for PgSubmissionStore {
    async fn insert(&self, submission: NewSubmission) -> Result<StoredSubmission, StoreError> {
        let nbpassager = i32::try_from(submission.extra_passengers).map_err(|_| {
            StoreError::InvalidRow(format!(
                "nbpassager out of range: {}",
                submission.extra_passengers
            ))
        })?;

        let row: SubmissionRow = sqlx::query_as(
            r#"
            INSERT INTO participations (mode, distance, nbpassager, impact, raison)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, mode, distance, nbpassager, impact, raison, created_at
            "#,
        )
        .bind(&submission.mode)
        .bind(submission.distance)
        .bind(nbpassager)
        .bind(submission.impact)
        .bind(&submission.reason)
        .fetch_one(&self.pool)
        .await
        .map_err(StoreError::Write)?;

        let stored = into_stored(row)?;

        tracing::debug!(
            submission_id = stored.id,
            mode = %stored.mode,
            "Submission persisted"
        );

        Ok(stored)
    }

    async fn fetch_all(&self) -> Result<Vec<StoredSubmission>, StoreError> {
        let rows: Vec<SubmissionRow> = sqlx::query_as(
            r#"
            SELECT id, mode, distance, nbpassager, impact, raison, created_at
            FROM participations
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(StoreError::Read)?;

        rows.into_iter().map(into_stored).collect()
    }

    async fn fetch_impact_entries(&self) -> Result<Vec<ImpactEntry>, StoreError> {
        let rows: Vec<(f64, i32)> =
            sqlx::query_as("SELECT impact, nbpassager FROM participations")
                .fetch_all(&self.pool)
                .await
                .map_err(StoreError::Read)?;

        rows.into_iter()
            .map(|(impact, nbpassager)| {
                Ok(ImpactEntry::new(impact, passengers_from_column(nbpassager)?))
            })
            .collect()
    }
}
