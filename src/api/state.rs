//! Shared application state

use std::sync::Arc;

use crate::domain::{EmissionCatalog, ImpactCalculator};
use crate::handlers::{EventSummaryHandler, SubmitTripHandler};
use crate::store::SubmissionStore;

/// State shared by every request: the read-only catalog and the store handle
#[derive(Clone)]
pub struct AppState {
    pub calculator: ImpactCalculator,
    pub store: Arc<dyn SubmissionStore>,
}

impl AppState {
    pub fn new(catalog: Arc<EmissionCatalog>, store: Arc<dyn SubmissionStore>) -> Self {
        Self {
            calculator: ImpactCalculator::new(catalog),
            store,
        }
    }

    pub fn catalog(&self) -> &EmissionCatalog {
        self.calculator.catalog()
    }

    pub fn submit_handler(&self) -> SubmitTripHandler {
        SubmitTripHandler::new(self.calculator.clone(), self.store.clone())
    }

    pub fn summary_handler(&self) -> EventSummaryHandler {
        EventSummaryHandler::new(self.calculator.clone(), self.store.clone())
    }
}
