//! Impact Calculator
//!
//! Pure per-trip impact and event-wide aggregation. Nothing here touches the
//! database or the HTTP layer.

use serde::Serialize;
use std::sync::Arc;

use super::catalog::REFERENCE_MODE;
use super::{Distance, DomainError, EmissionCatalog};

/// The part of a submission aggregation needs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactEntry {
    /// kg CO₂e per person
    pub impact: f64,
    /// Passengers besides the principal traveler
    pub extra_passengers: u32,
}

impl ImpactEntry {
    pub fn new(impact: f64, extra_passengers: u32) -> Self {
        Self {
            impact,
            extra_passengers,
        }
    }

    /// Number of people this entry stands for
    pub fn participants(&self) -> u64 {
        1 + u64::from(self.extra_passengers)
    }
}

/// Event-wide totals, recomputed from every submission on each request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EventImpactSummary {
    /// kg CO₂e
    pub total_impact: f64,
    pub total_participants: u64,
    /// kg CO₂e per person
    pub average_impact_per_person: f64,
}

/// Computes impacts against a shared, read-only catalog
#[derive(Debug, Clone)]
pub struct ImpactCalculator {
    catalog: Arc<EmissionCatalog>,
}

impl ImpactCalculator {
    pub fn new(catalog: Arc<EmissionCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &EmissionCatalog {
        &self.catalog
    }

    /// Per-person impact of one trip, in kg CO₂e.
    ///
    /// `impact = distance * factor / (extra_passengers + 1)`
    ///
    /// The passenger discount is applied for any mode: deciding whether a
    /// passenger count is collected at all belongs to input validation.
    pub fn compute_impact(
        &self,
        mode: &str,
        distance: Distance,
        extra_passengers: u32,
    ) -> Result<f64, DomainError> {
        let factor = self.catalog.factor_for(mode)?;
        Ok(distance.km() * factor / (f64::from(extra_passengers) + 1.0))
    }

    /// Emissions avoided compared to travelling alone in a combustion car over
    /// the same distance. Negative when the trip emitted more than that baseline.
    pub fn avoided_impact(&self, distance: Distance, impact: f64) -> Result<f64, DomainError> {
        let baseline = distance.km() * self.catalog.factor_for(REFERENCE_MODE)?;
        Ok(baseline - impact)
    }

    /// Event totals over all submissions. See [`aggregate`].
    pub fn aggregate<I>(&self, entries: I) -> Result<EventImpactSummary, DomainError>
    where
        I: IntoIterator<Item = ImpactEntry>,
    {
        aggregate(entries)
    }
}

/// Sum impacts and participants over all submissions.
///
/// # Errors
/// - `DomainError::EmptyDataSet` when there is nothing to aggregate, since the
///   average per person is undefined.
/// - `DomainError::NonFiniteTotal` when the impacts do not sum to a finite number.
pub fn aggregate<I>(entries: I) -> Result<EventImpactSummary, DomainError>
where
    I: IntoIterator<Item = ImpactEntry>,
{
    let (total_impact, total_participants) = entries
        .into_iter()
        .fold((0.0_f64, 0_u64), |(impact, people), entry| {
            (impact + entry.impact, people + entry.participants())
        });

    if total_participants == 0 {
        return Err(DomainError::EmptyDataSet);
    }

    if !total_impact.is_finite() {
        return Err(DomainError::NonFiniteTotal("total_impact"));
    }

    let average_impact_per_person = total_impact / total_participants as f64;
    if !average_impact_per_person.is_finite() {
        return Err(DomainError::NonFiniteTotal("average_impact_per_person"));
    }

    Ok(EventImpactSummary {
        total_impact,
        total_participants,
        average_impact_per_person,
    })
}
