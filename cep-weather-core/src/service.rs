use std::sync::Arc;

use tracing::{debug, info};

use crate::{
    Config, TemperatureError, TemperatureReading,
    provider::{AddressProvider, ViaCepProvider, WeatherApiProvider, WeatherProvider, http_client},
    validate::is_valid_postal_code,
};

/// Postal code → address → locality → temperature.
///
/// Holds no per-request state; clone it freely across request handlers.
#[derive(Debug, Clone)]
pub struct TemperatureService {
    addresses: Arc<dyn AddressProvider>,
    weather: Arc<dyn WeatherProvider>,
}

impl TemperatureService {
    pub fn new(addresses: Arc<dyn AddressProvider>, weather: Arc<dyn WeatherProvider>) -> Self {
        Self { addresses, weather }
    }

    /// Build the ViaCEP + WeatherAPI.com pipeline from config.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let api_key = config.api_key()?;
        let http = http_client(config)?;

        let addresses = ViaCepProvider::new(config.address_base_url.clone(), http.clone());
        let weather =
            WeatherApiProvider::new(api_key.to_owned(), config.weather_base_url.clone(), http);

        Ok(Self::new(Arc::new(addresses), Arc::new(weather)))
    }

    pub async fn temperature_for(
        &self,
        postal_code: &str,
    ) -> Result<TemperatureReading, TemperatureError> {
        if !is_valid_postal_code(postal_code) {
            return Err(TemperatureError::InvalidPostalCode(postal_code.to_string()));
        }

        let address = self
            .addresses
            .resolve_address(postal_code)
            .await
            .map_err(TemperatureError::Address)?;
        debug!(postal_code, locality = address.locality(), state = address.state(), "address resolved");

        let celsius = self
            .weather
            .resolve_temperature(address.locality())
            .await
            .map_err(TemperatureError::Weather)?;

        let reading = TemperatureReading::from_celsius(celsius);
        info!(postal_code, locality = address.locality(), temp_c = reading.celsius, "temperature resolved");

        Ok(reading)
    }
}
