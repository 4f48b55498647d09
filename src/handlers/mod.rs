//! Command Handlers module
//!
//! Handlers that orchestrate validation, calculation and storage.

mod commands;
mod submit_handler;
mod summary_handler;

pub use commands::*;
pub use submit_handler::{SubmitTripHandler, CARPOOL_MESSAGE, NOT_SAVED_MESSAGE, SOFT_MOBILITY_MESSAGE};
pub use summary_handler::EventSummaryHandler;
