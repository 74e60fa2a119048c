//! Inventory forecasting engine.
//!
//! Turns customer demand records and a supply-chain lead-time model into a
//! reorder point, an order quantity and a day-by-day inventory projection.

pub mod error;
pub mod forecast;
pub mod io;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod simulation;
pub mod strategy;

pub use error::{ForecastError, Result};
pub use pipeline::{recompute, ForecastInputs, ForecastReport, ForecastResult};
