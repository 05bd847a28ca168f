use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{
    Address, LookupError,
    model::AddressParts,
};

use super::{AddressProvider, truncate_body};

/// Address lookup against ViaCEP (`GET {base}/{cep}/json/`).
#[derive(Debug, Clone)]
pub struct ViaCepProvider {
    base_url: String,
    http: Client,
}

impl ViaCepProvider {
    pub fn new(base_url: impl Into<String>, http: Client) -> Self {
        Self { base_url: base_url.into(), http }
    }

    fn url(&self, postal_code: &str) -> String {
        format!("{}/{}/json/", self.base_url.trim_end_matches('/'), postal_code)
    }
}

#[async_trait]
impl AddressProvider for ViaCepProvider {
    async fn resolve_address(&self, postal_code: &str) -> Result<Address, LookupError> {
        let url = self.url(postal_code);
        debug!(%url, "requesting address");

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::network("address request", e))?;

        // ViaCEP answers 200 with `{"erro": true}` for unknown codes, so the
        // status says nothing; the locality field decides.
        let status = res.status();
        let body =
            res.text().await.map_err(|e| LookupError::network("address response body", e))?;

        let parts: AddressParts = match serde_json::from_str(&body) {
            Ok(parts) => parts,
            Err(err) => {
                debug!(%status, %err, body = %truncate_body(&body), "undecodable address body");
                return Err(LookupError::NotFound(postal_code.to_string()));
            }
        };

        Address::new(parts).ok_or_else(|| LookupError::NotFound(postal_code.to_string()))
    }
}
