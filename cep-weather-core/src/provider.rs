use crate::{Address, Config, LookupError};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::fmt::Debug;

pub mod viacep;
pub mod weatherapi;

pub use viacep::ViaCepProvider;
pub use weatherapi::WeatherApiProvider;

/// Resolves a postal code to an address.
#[async_trait]
pub trait AddressProvider: Send + Sync + Debug {
    async fn resolve_address(&self, postal_code: &str) -> Result<Address, LookupError>;
}

/// Resolves a locality name to its current temperature in Celsius.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn resolve_temperature(&self, locality: &str) -> Result<f64, LookupError>;
}

/// HTTP client shared by both providers, bounded by the configured timeout.
pub fn http_client(config: &Config) -> anyhow::Result<Client> {
    Client::builder()
        .timeout(config.request_timeout())
        .user_agent(concat!("cep-weather/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}

pub(crate) fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
