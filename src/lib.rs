//! event_carbon Library
//!
//! Re-exports modules for integration testing and the server binary.

pub mod api;
pub mod config;
pub mod db;
pub mod domain;
pub mod export;
pub mod handlers;
pub mod store;

mod error;

pub use config::Config;
pub use domain::{Distance, DomainError, EmissionCatalog, EventImpactSummary, ImpactCalculator};
pub use error::{AppError, AppResult};
