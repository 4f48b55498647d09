//! Trip Submission Handler
//!
//! Validates input, computes the impact, then appends the row to the store.

use std::sync::Arc;

use crate::domain::{ImpactCalculator, OperationContext, Trip};
use crate::error::AppError;
use crate::store::{NewSubmission, SubmissionStore};

use super::{SubmitTripCommand, SubmitTripResult};

pub const CARPOOL_MESSAGE: &str = "Bravo pour le covoiturage !";
pub const SOFT_MOBILITY_MESSAGE: &str = "Bravo pour votre choix de mobilité douce !";
pub const NOT_SAVED_MESSAGE: &str =
    "Votre participation n'a pas pu être enregistrée, merci de réessayer plus tard.";

/// Handler for trip submissions
pub struct SubmitTripHandler {
    calculator: ImpactCalculator,
    store: Arc<dyn SubmissionStore>,
}

impl SubmitTripHandler {
    pub fn new(calculator: ImpactCalculator, store: Arc<dyn SubmissionStore>) -> Self {
        Self { calculator, store }
    }

    /// Execute the submit command.
    ///
    /// Invalid input returns an error before anything is computed or stored.
    /// A store failure is not an error: the result carries the impact with
    /// `saved: false`.
    pub async fn execute(
        &self,
        command: SubmitTripCommand,
        context: &OperationContext,
    ) -> Result<SubmitTripResult, AppError> {
        let catalog = self.calculator.catalog();
        let trip = Trip::from_input(
            catalog,
            &command.mode,
            command.distance,
            command.extra_passengers,
            command.reason.as_deref(),
        )?;

        let impact =
            self.calculator
                .compute_impact(&trip.mode, trip.distance, trip.extra_passengers)?;
        let avoided_impact = self.calculator.avoided_impact(trip.distance, impact)?;

        let mut messages = Vec::new();
        if trip.is_carpool() && catalog.invites_feedback(&trip.mode) {
            messages.push(CARPOOL_MESSAGE.to_string());
        }

        let mut result = SubmitTripResult {
            submission_id: None,
            mode: trip.mode.clone(),
            impact,
            avoided_impact,
            saved: false,
            created_at: None,
            messages,
        };

        match self.store.insert(NewSubmission::from_trip(&trip, impact)).await {
            Ok(stored) => {
                tracing::info!(
                    correlation_id = %context.correlation_id,
                    submission_id = stored.id,
                    mode = %trip.mode,
                    distance_km = trip.distance.km(),
                    extra_passengers = trip.extra_passengers,
                    impact = impact,
                    "Trip submitted"
                );

                result.submission_id = Some(stored.id);
                result.created_at = Some(stored.created_at);
                result.saved = true;
                result.messages.push(format!(
                    "Merci ! Votre impact : {:.2} kg CO₂e/personne",
                    impact
                ));
                if catalog.soft_mobility(&trip.mode) {
                    result.messages.push(SOFT_MOBILITY_MESSAGE.to_string());
                }
            }
            Err(e) => {
                tracing::error!(
                    correlation_id = %context.correlation_id,
                    mode = %trip.mode,
                    impact = impact,
                    "Submission not saved: {}",
                    e
                );

                result.messages.push(format!(
                    "Votre impact : {:.2} kg CO₂e/personne",
                    impact
                ));
                result.messages.push(NOT_SAVED_MESSAGE.to_string());
            }
        }

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, EmissionCatalog};
    use crate::store::MemorySubmissionStore;
    use approx::assert_relative_eq;

    fn handler(store: Arc<MemorySubmissionStore>) -> SubmitTripHandler {
        SubmitTripHandler::new(
            ImpactCalculator::new(Arc::new(EmissionCatalog::ademe())),
            store,
        )
    }

    #[tokio::test]
    async fn test_submit_saves_row() {
        let store = Arc::new(MemorySubmissionStore::new());
        let result = handler(store.clone())
            .execute(
                SubmitTripCommand::new("Voiture thermique", 100.0)
                    .with_extra_passengers(3)
                    .with_reason("Une navette"),
                &OperationContext::new(),
            )
            .await
            .unwrap();

        assert!(result.saved);
        assert_eq!(result.submission_id, Some(1));
        assert_relative_eq!(result.impact, 5.45, epsilon = 1e-9);
        assert!(result.messages.iter().any(|m| m == CARPOOL_MESSAGE));
        assert!(result.messages.iter().any(|m| m.contains("5.45")));

        let rows = store.fetch_all().await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].reason.as_deref(), Some("Une navette"));
        assert_eq!(rows[0].extra_passengers, 3);
    }

    #[tokio::test]
    async fn test_zero_distance_touches_nothing() {
        let store = Arc::new(MemorySubmissionStore::new());
        let err = handler(store.clone())
            .execute(SubmitTripCommand::new("Marche", 0.0), &OperationContext::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Domain(DomainError::InvalidDistance(_))));
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_soft_mobility_message() {
        let store = Arc::new(MemorySubmissionStore::new());
        let result = handler(store)
            .execute(SubmitTripCommand::new("Tramway", 4.0), &OperationContext::new())
            .await
            .unwrap();

        assert!(result.messages.iter().any(|m| m == SOFT_MOBILITY_MESSAGE));
        assert!(!result.messages.iter().any(|m| m == CARPOOL_MESSAGE));
    }

    #[tokio::test]
    async fn test_store_failure_still_returns_impact() {
        let store = Arc::new(MemorySubmissionStore::new());
        store.set_unavailable(true);

        let result = handler(store.clone())
            .execute(
                SubmitTripCommand::new("Voiture thermique", 100.0),
                &OperationContext::new(),
            )
            .await
            .unwrap();

        assert!(!result.saved);
        assert!(result.submission_id.is_none());
        assert_relative_eq!(result.impact, 21.8, epsilon = 1e-9);
        assert!(result.messages.iter().any(|m| m == NOT_SAVED_MESSAGE));

        store.set_unavailable(false);
        assert!(store.is_empty().await);
    }
}
