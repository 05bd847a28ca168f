//! Core library for the `cep-weather` service.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - Postal code validation and accent folding
//! - Address and weather providers behind async traits
//! - The lookup pipeline turning a postal code into a temperature reading
//!
//! It is used by `cep-weather-server`, but can also be reused by other binaries or services.

pub mod config;
pub mod convert;
pub mod error;
pub mod fold;
pub mod model;
pub mod provider;
pub mod service;
pub mod validate;

pub use config::Config;
pub use error::{LookupError, TemperatureError};
pub use model::{Address, TemperatureReading};
pub use provider::{AddressProvider, WeatherProvider};
pub use service::TemperatureService;
