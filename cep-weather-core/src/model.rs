use serde::{Deserialize, Deserializer, Serialize, de::DeserializeOwned};

use crate::convert::{to_fahrenheit, to_kelvin};

/// A resolved postal address.
///
/// Only constructed through [`Address::new`], which guarantees a
/// non-empty locality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Address {
    postal_code: String,
    street: String,
    complement: String,
    neighborhood: String,
    locality: String,
    state: String,
}

/// Fields of an address as reported by the lookup service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AddressParts {
    #[serde(default, rename = "cep")]
    pub postal_code: String,
    #[serde(default, rename = "logradouro")]
    pub street: String,
    #[serde(default, rename = "complemento")]
    pub complement: String,
    #[serde(default, rename = "bairro")]
    pub neighborhood: String,
    #[serde(default, rename = "localidade")]
    pub locality: String,
    #[serde(default, rename = "uf")]
    pub state: String,
}

impl Address {
    /// Returns `None` when the locality is empty or blank.
    pub fn new(parts: AddressParts) -> Option<Self> {
        if parts.locality.trim().is_empty() {
            return None;
        }

        Some(Self {
            postal_code: parts.postal_code,
            street: parts.street,
            complement: parts.complement,
            neighborhood: parts.neighborhood,
            locality: parts.locality,
            state: parts.state,
        })
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn street(&self) -> &str {
        &self.street
    }

    pub fn complement(&self) -> &str {
        &self.complement
    }

    pub fn neighborhood(&self) -> &str {
        &self.neighborhood
    }

    pub fn locality(&self) -> &str {
        &self.locality
    }

    pub fn state(&self) -> &str {
        &self.state
    }
}

/// Current temperature in the three reported units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TemperatureReading {
    #[serde(rename = "temp_C")]
    pub celsius: f64,
    #[serde(rename = "temp_F")]
    pub fahrenheit: f64,
    #[serde(rename = "temp_K")]
    pub kelvin: f64,
}

impl TemperatureReading {
    pub fn from_celsius(celsius: f64) -> Self {
        Self { celsius, fahrenheit: to_fahrenheit(celsius), kelvin: to_kelvin(celsius) }
    }
}

/// A JSON field decoded without runtime type assertions.
///
/// Use with `#[serde(default)]` so an absent key becomes [`Field::Missing`].
#[derive(Debug, Clone, PartialEq)]
pub enum Field<T> {
    Present(T),
    Missing,
    WrongType,
}

impl<T> Default for Field<T> {
    fn default() -> Self {
        Field::Missing
    }
}

impl<'de, T: DeserializeOwned> Deserialize<'de> for Field<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(serde_json::from_value(value).map_or(Field::WrongType, Field::Present))
    }
}
