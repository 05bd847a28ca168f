use thiserror::Error;

/// Failure of a single resolver call.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The address service knows no locality for this postal code.
    #[error("postal code {0} not found")]
    NotFound(String),

    /// The collaborator could not be reached (DNS, connect, timeout, truncated body).
    #[error("network error: {0}")]
    Network(String),

    /// The collaborator answered, but not with anything usable.
    #[error("unexpected upstream response: {0}")]
    Upstream(String),
}

impl LookupError {
    /// The request URL is stripped: it carries the weather API key.
    pub(crate) fn network(context: &str, err: reqwest::Error) -> Self {
        let err = err.without_url();
        if err.is_timeout() {
            LookupError::Network(format!("{context}: timed out"))
        } else {
            LookupError::Network(format!("{context}: {err}"))
        }
    }
}

/// Failure of a whole postal code → temperature lookup, tagged with the
/// step that failed.
#[derive(Debug, Error)]
pub enum TemperatureError {
    /// The postal code is not eight digits.
    #[error("invalid zipcode {0:?}")]
    InvalidPostalCode(String),

    #[error("address lookup failed: {0}")]
    Address(#[source] LookupError),

    #[error("temperature lookup failed: {0}")]
    Weather(#[source] LookupError),
}
