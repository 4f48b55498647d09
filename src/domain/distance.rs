//! Distance type
//!
//! Domain primitive for trip distances. A `Distance` can only be built from a
//! finite, strictly positive number of kilometers no longer than one trip
//! around the Earth, so the calculator never sees a zero, negative, NaN or
//! overflowing distance.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Longest accepted trip, in kilometers (equatorial circumference of the Earth)
pub const MAX_DISTANCE_KM: f64 = 40_075.0;

/// Trip distance in kilometers.
///
/// # Invariants
/// - Value is finite
/// - Value is strictly positive (> 0)
/// - Value is at most [`MAX_DISTANCE_KM`]
///
/// # Example
/// ```
/// use event_carbon::domain::Distance;
///
/// let distance = Distance::new(12.5).unwrap();
/// assert_eq!(distance.km(), 12.5);
/// assert!(Distance::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Distance(f64);

/// Errors that can occur when creating a Distance
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DistanceError {
    #[error("Distance must be positive (got {0})")]
    NotPositive(f64),

    #[error("Distance must be a finite number")]
    NotFinite,

    #[error("Distance exceeds {max} km (got {km})")]
    TooLarge { km: f64, max: f64 },
}

impl Distance {
    /// Create a new Distance with validation.
    ///
    /// # Errors
    /// - `DistanceError::NotFinite` for NaN or infinite values
    /// - `DistanceError::NotPositive` if value <= 0
    /// - `DistanceError::TooLarge` if value > `MAX_DISTANCE_KM`
    pub fn new(km: f64) -> Result<Self, DistanceError> {
        if !km.is_finite() {
            return Err(DistanceError::NotFinite);
        }

        if km <= 0.0 {
            return Err(DistanceError::NotPositive(km));
        }

        if km > MAX_DISTANCE_KM {
            return Err(DistanceError::TooLarge {
                km,
                max: MAX_DISTANCE_KM,
            });
        }

        Ok(Self(km))
    }

    /// Kilometers
    pub fn km(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for Distance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} km", self.0)
    }
}

impl TryFrom<f64> for Distance {
    type Error = DistanceError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Distance::new(value)
    }
}

impl From<Distance> for f64 {
    fn from(distance: Distance) -> Self {
        distance.0
    }
}
