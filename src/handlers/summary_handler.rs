//! Event Summary Handler
//!
//! Re-reads every submission and aggregates on each call; nothing is cached.

use std::sync::Arc;

use crate::domain::{DomainError, ImpactCalculator, OperationContext};
use crate::error::AppError;
use crate::store::SubmissionStore;

use super::EventSummaryResult;

/// Handler for the event-wide impact summary
pub struct EventSummaryHandler {
    calculator: ImpactCalculator,
    store: Arc<dyn SubmissionStore>,
}

impl EventSummaryHandler {
    pub fn new(calculator: ImpactCalculator, store: Arc<dyn SubmissionStore>) -> Self {
        Self { calculator, store }
    }

    pub async fn execute(&self, context: &OperationContext) -> Result<EventSummaryResult, AppError> {
        let entries = self.store.fetch_impact_entries().await?;
        let count = entries.len();

        match self.calculator.aggregate(entries) {
            Ok(summary) => {
                tracing::debug!(
                    correlation_id = %context.correlation_id,
                    submissions = count,
                    total_participants = summary.total_participants,
                    total_impact = summary.total_impact,
                    "Event summary computed"
                );
                Ok(EventSummaryResult::Available(summary))
            }
            Err(DomainError::EmptyDataSet) => Ok(EventSummaryResult::NoData {
                message: DomainError::EmptyDataSet.user_message(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}
