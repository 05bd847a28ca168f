use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{LookupError, fold::fold_accents, model::Field};

use super::{WeatherProvider, truncate_body};

/// Current temperature from WeatherAPI.com (`GET {base}/current.json`).
#[derive(Debug, Clone)]
pub struct WeatherApiProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiProvider {
    pub fn new(api_key: String, base_url: impl Into<String>, http: Client) -> Self {
        Self { api_key, base_url: base_url.into(), http }
    }

    async fn fetch_current(&self, query: &str) -> Result<(reqwest::StatusCode, String), LookupError> {
        let url = format!("{}/current.json", self.base_url.trim_end_matches('/'));

        let res = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str()), ("q", query), ("aqi", "no")])
            .send()
            .await
            .map_err(|e| LookupError::network("weather request", e))?;

        let status = res.status();
        let body =
            res.text().await.map_err(|e| LookupError::network("weather response body", e))?;

        Ok((status, body))
    }
}

/// Query strings tried in order: the locality as given, then accent-folded.
///
/// Always two entries, so a rejected query is resubmitted exactly once.
pub fn query_candidates(locality: &str) -> [String; 2] {
    [locality.to_string(), fold_accents(locality)]
}

#[async_trait]
impl WeatherProvider for WeatherApiProvider {
    async fn resolve_temperature(&self, locality: &str) -> Result<f64, LookupError> {
        let mut rejection = String::new();

        for (attempt, query) in query_candidates(locality).iter().enumerate() {
            debug!(query = %query, attempt, "requesting current weather");
            let (status, body) = self.fetch_current(query).await?;

            if status.is_success() {
                return parse_current_temp(&body);
            }

            warn!(%status, query = %query, attempt, "weather service rejected query");
            rejection = format!(
                "weather service responded with status {}: {}",
                status,
                truncate_body(&body)
            );
        }

        Err(LookupError::Upstream(rejection))
    }
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    #[serde(default)]
    temp_c: Field<f64>,
}

#[derive(Debug, Deserialize)]
struct WaResponse {
    #[serde(default)]
    current: Field<WaCurrent>,
}

fn parse_current_temp(body: &str) -> Result<f64, LookupError> {
    let parsed: WaResponse = serde_json::from_str(body)
        .map_err(|e| LookupError::Upstream(format!("Failed to parse weather JSON: {e}")))?;

    let current = match parsed.current {
        Field::Present(current) => current,
        Field::Missing => return Err(LookupError::Upstream("`current` is missing".into())),
        Field::WrongType => {
            return Err(LookupError::Upstream("`current` is not an object".into()));
        }
    };

    match current.temp_c {
        Field::Present(temp_c) => Ok(temp_c),
        Field::Missing => Err(LookupError::Upstream("`current.temp_c` is missing".into())),
        Field::WrongType => {
            Err(LookupError::Upstream("`current.temp_c` is not a number".into()))
        }
    }
}
