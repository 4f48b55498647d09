//! Domain module
//!
//! Emission factors, trip validation and impact calculation.

pub mod catalog;
pub mod context;
pub mod distance;
pub mod error;
pub mod impact;
pub mod trip;

pub use catalog::{EmissionCatalog, EmissionFactor};
pub use context::OperationContext;
pub use distance::{Distance, DistanceError, MAX_DISTANCE_KM};
pub use error::DomainError;
pub use impact::{aggregate, EventImpactSummary, ImpactCalculator, ImpactEntry};
pub use trip::Trip;
