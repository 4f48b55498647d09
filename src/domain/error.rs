//! Domain Error Types
//!
//! Pure domain errors that don't depend on infrastructure.

use thiserror::Error;

use super::{DistanceError, MAX_DISTANCE_KM};

/// User-facing message shown when the distance is missing or not positive
pub const DISTANCE_REQUIRED_MESSAGE: &str = "Merci de rentrer la distance parcourue en km.";

/// Domain-specific errors
///
/// These errors represent invalid submissions and calculation failures.
/// They are independent of the web/infrastructure layer.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// Distance is zero, negative or not a number
    #[error("Invalid distance: {0}")]
    InvalidDistance(#[from] DistanceError),

    /// Extra passenger count below zero
    #[error("Extra passengers must be zero or more (got {0})")]
    NegativePassengers(i64),

    /// Extra passenger count beyond what can be stored
    #[error("Too many extra passengers: {0}")]
    TooManyPassengers(i64),

    /// Extra passengers given for a mode where the vehicle is not shared
    #[error("Mode '{mode}' does not take extra passengers (got {extra_passengers})")]
    PassengersNotShareable { mode: String, extra_passengers: i64 },

    /// Free-text reason too long
    #[error("Reason is too long (max {max} characters, got {len})")]
    ReasonTooLong { len: usize, max: usize },

    /// Submitted mode is not one of the offered modes
    #[error("Transport mode not offered: {0}")]
    InvalidMode(String),

    /// Mode is not in the emission catalog
    #[error("Unknown transport mode: {0}")]
    UnknownMode(String),

    /// Aggregation over zero submissions
    #[error("No submission recorded yet")]
    EmptyDataSet,

    /// Stored impacts sum past what an f64 can hold
    #[error("Aggregated {0} is not a finite number")]
    NonFiniteTotal(&'static str),
}

impl DomainError {
    /// Check if this is a client input error (user's fault)
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDistance(_)
                | Self::InvalidMode(_)
                | Self::NegativePassengers(_)
                | Self::TooManyPassengers(_)
                | Self::PassengersNotShareable { .. }
                | Self::ReasonTooLong { .. }
        )
    }

    /// Message suitable for display in the participant form
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidDistance(DistanceError::TooLarge { .. }) => format!(
                "Merci de rentrer une distance inférieure à {} km.",
                MAX_DISTANCE_KM
            ),
            Self::InvalidDistance(_) => DISTANCE_REQUIRED_MESSAGE.to_string(),
            Self::NegativePassengers(_) => {
                "Le nombre de passagers ne peut pas être négatif.".to_string()
            }
            Self::TooManyPassengers(_) => "Nombre de passagers trop élevé.".to_string(),
            Self::PassengersNotShareable { .. } => {
                "Ce mode de transport ne se partage pas avec des passagers.".to_string()
            }
            Self::ReasonTooLong { max, .. } => {
                format!("Merci de limiter votre réponse à {} caractères.", max)
            }
            Self::InvalidMode(mode) | Self::UnknownMode(mode) => format!("Mode de transport inconnu : {}", mode),
            Self::EmptyDataSet => "Aucune participation enregistrée.".to_string(),
            Self::NonFiniteTotal(_) => "Le bilan de l'événement n'a pas pu être calculé.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_distance_message() {
        let err = DomainError::from(DistanceError::NotPositive(0.0));
        assert!(err.is_validation_error());
        assert_eq!(err.user_message(), DISTANCE_REQUIRED_MESSAGE);
    }

    #[test]
    fn test_distance_too_large_message() {
        let err = DomainError::from(DistanceError::TooLarge {
            km: 1e308,
            max: MAX_DISTANCE_KM,
        });
        assert!(err.is_validation_error());
        assert_eq!(
            err.user_message(),
            "Merci de rentrer une distance inférieure à 40075 km."
        );
    }

    #[test]
    fn test_unknown_mode_is_not_validation() {
        let err = DomainError::UnknownMode("Avion".to_string());
        assert!(!err.is_validation_error());
        assert!(err.to_string().contains("Avion"));
    }

    #[test]
    fn test_empty_data_set() {
        let err = DomainError::EmptyDataSet;
        assert!(!err.is_validation_error());
        assert_eq!(err.user_message(), "Aucune participation enregistrée.");
    }
}
