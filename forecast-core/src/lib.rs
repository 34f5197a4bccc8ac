//! Core library for the forecast display app.
//!
//! This crate defines:
//! - Configuration handling (credentials, location, loading delay)
//! - The forecast client and the payload it produces
//! - The fetch state machine that turns reload requests into UI states
//!
//! It is used by `forecast-cli`, but can also be reused by other frontends.

pub mod client;
pub mod config;
pub mod model;
pub mod state;

pub use client::{ForecastClient, client_from_config, weatherapi::WeatherApiClient};
pub use config::Config;
pub use model::{Condition, CurrentConditions, ForecastDay, ForecastHour, ForecastPayload};
pub use state::{ErrorKind, ForecastStateMachine, UiState};
