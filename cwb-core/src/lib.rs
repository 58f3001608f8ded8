//! Core library for the `cwb-weather` card.
//!
//! This crate defines:
//! - Raw models of the CWB observation and forecast datasets
//! - Extractors that normalize them into display records
//! - The display state and the reducer that merges fetch outcomes
//! - An HTTP provider for the CWB open data API, behind a trait
//! - Configuration & credentials handling
//!
//! It is used by `cwb-cli`, but can also be reused by other front ends.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod extract;
pub mod format;
pub mod model;
pub mod provider;
pub mod state;

pub use config::Config;
pub use dashboard::Dashboard;
pub use error::WeatherError;
pub use extract::{extract_forecast, extract_observation};
pub use format::format_time;
pub use model::{ForecastLocation, ForecastRecord, ObservationLocation, ObservationRecord};
pub use provider::{WeatherProvider, cwb::CwbProvider, provider_from_config};
pub use state::{DisplayState, FetchKind, StateUpdate, reduce};
