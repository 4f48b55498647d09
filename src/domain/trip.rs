//! Trip
//!
//! A participant's trip once its input has been checked against the catalog's
//! collection rules. Only a `Trip` can be priced and stored.

use serde::Serialize;

use super::{Distance, DomainError, EmissionCatalog};

/// Longest accepted free-text reason, in characters
pub const MAX_REASON_CHARS: usize = 2000;

/// Validated trip, ready for impact computation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    pub mode: String,
    pub distance: Distance,
    pub extra_passengers: u32,
    pub reason: Option<String>,
}

impl Trip {
    /// Apply the input collection policy to raw form values.
    ///
    /// - distance must be finite and > 0
    /// - mode must be offered by the catalog
    /// - extra passengers must be >= 0, and only non-zero for modes that share a vehicle
    /// - a reason is only kept for modes that invite feedback; blank reasons are dropped
    pub fn from_input(
        catalog: &EmissionCatalog,
        mode: &str,
        distance: f64,
        extra_passengers: i64,
        reason: Option<&str>,
    ) -> Result<Self, DomainError> {
        let distance = Distance::new(distance)?;

        let entry = catalog
            .entry(mode)
            .map_err(|_| DomainError::InvalidMode(mode.to_string()))?;

        if extra_passengers < 0 {
            return Err(DomainError::NegativePassengers(extra_passengers));
        }
        if extra_passengers > 0 && !entry.shares_vehicle {
            return Err(DomainError::PassengersNotShareable {
                mode: mode.to_string(),
                extra_passengers,
            });
        }
        // Stored as a signed 32-bit column
        let extra_passengers = i32::try_from(extra_passengers)
            .map(i32::unsigned_abs)
            .map_err(|_| DomainError::TooManyPassengers(extra_passengers))?;

        let reason = if entry.invites_feedback {
            normalize_reason(reason)?
        } else {
            None
        };

        Ok(Self {
            mode: entry.mode.to_string(),
            distance,
            extra_passengers,
            reason,
        })
    }

    /// Whether the trip was shared with at least one passenger
    pub fn is_carpool(&self) -> bool {
        self.extra_passengers > 0
    }
}

fn normalize_reason(reason: Option<&str>) -> Result<Option<String>, DomainError> {
    let Some(reason) = reason.map(str::trim).filter(|r| !r.is_empty()) else {
        return Ok(None);
    };

    let len = reason.chars().count();
    if len > MAX_REASON_CHARS {
        return Err(DomainError::ReasonTooLong {
            len,
            max: MAX_REASON_CHARS,
        });
    }

    Ok(Some(reason.to_string()))
}
