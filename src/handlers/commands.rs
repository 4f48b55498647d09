//! Command definitions
//!
//! Commands carry raw participant input; results carry what the API renders.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::EventImpactSummary;

// =========================================================================
// SubmitTripCommand
// =========================================================================

/// Command to record one participant's trip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTripCommand {
    /// Mode label from the catalog
    pub mode: String,
    /// Kilometers, validated by the handler
    pub distance: f64,
    /// Passengers besides the driver
    pub extra_passengers: i64,
    /// What would help the participant adopt soft mobility
    pub reason: Option<String>,
}

impl SubmitTripCommand {
    pub fn new(mode: impl Into<String>, distance: f64) -> Self {
        Self {
            mode: mode.into(),
            distance,
            extra_passengers: 0,
            reason: None,
        }
    }

    pub fn with_extra_passengers(mut self, extra_passengers: i64) -> Self {
        self.extra_passengers = extra_passengers;
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

/// Result of a trip submission.
///
/// The impact is always returned, even when the store failed, so the
/// participant still sees their figure.
#[derive(Debug, Clone, Serialize)]
pub struct SubmitTripResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<i64>,
    pub mode: String,
    /// kg CO₂e per person
    pub impact: f64,
    /// kg CO₂e avoided compared to driving alone in a combustion car
    pub avoided_impact: f64,
    pub saved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    pub messages: Vec<String>,
}

/// Event totals, or an informational "no data yet" state
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EventSummaryResult {
    #[serde(rename = "ok")]
    Available(EventImpactSummary),
    NoData { message: String },
}
