//! TransLink RTTI HTTP client.

use reqwest::Url;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::{Coordinate, StopNumber};

use super::StopResolver;
use super::error::ResolveError;

/// Default host for the RTTI API.
const DEFAULT_BASE_URL: &str = "http://api.translink.ca";

/// The RTTI API only honours this exact media type spelling.
const ACCEPT_JSON: &str = "application/JSON";

/// Location fields of a stop response. Other fields are ignored.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "PascalCase")]
struct StopLocationDto {
    latitude: f64,
    longitude: f64,
}

/// Configuration for the RTTI client.
#[derive(Debug, Clone)]
pub struct TranslinkConfig {
    /// API key passed as the `apikey` query parameter
    pub api_key: String,
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl TranslinkConfig {
    /// Create a new config with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Client for the TransLink RTTI stops endpoint.
#[derive(Debug, Clone)]
pub struct TranslinkClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl TranslinkClient {
    /// Create a new RTTI client.
    pub fn new(config: TranslinkConfig) -> Result<Self, ResolveError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ResolveError::RequestConstruction(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Build the lookup URL for a stop.
    pub fn endpoint(&self, stop: StopNumber) -> Result<Url, ResolveError> {
        if self.api_key.is_empty() {
            return Err(ResolveError::RequestConstruction(
                "API key is empty".to_string(),
            ));
        }

        if self
            .api_key
            .chars()
            .any(|c| c.is_whitespace() || c.is_control())
        {
            return Err(ResolveError::RequestConstruction(
                "API key contains whitespace or control characters".to_string(),
            ));
        }

        let raw = format!(
            "{}/rttiapi/v1/stops/{}",
            self.base_url.trim_end_matches('/'),
            stop
        );

        let mut url = Url::parse(&raw)
            .map_err(|e| ResolveError::RequestConstruction(format!("{raw}: {e}")))?;
        url.query_pairs_mut().append_pair("apikey", &self.api_key);

        Ok(url)
    }

    /// Look up the coordinate of an already-validated stop number.
    pub async fn resolve_stop(&self, stop: StopNumber) -> Result<Coordinate, ResolveError> {
        let url = self.endpoint(stop)?;

        debug!(%stop, "requesting stop location");

        let response = self
            .http
            .get(url)
            .header(ACCEPT, ACCEPT_JSON)
            .send()
            .await
            .map_err(ResolveError::Network)?;

        let status = response.status();
        if !status.is_success() {
            warn!(%stop, status = status.as_u16(), "stop lookup returned error status");
        }

        let body = response.bytes().await.map_err(ResolveError::Network)?;

        let coordinate = parse_stop_response(&body)?;
        debug!(%stop, %coordinate, "resolved stop");

        Ok(coordinate)
    }
}

impl StopResolver for TranslinkClient {
    async fn resolve(&self, input: &str) -> Result<Coordinate, ResolveError> {
        let stop = StopNumber::parse(input)?;
        self.resolve_stop(stop).await
    }
}

/// Parse an RTTI stop response body.
///
/// A `Message` field means the API rejected the request and wins over any
/// coordinates in the same body. The HTTP status is not consulted: RTTI
/// reports its errors as JSON bodies.
pub fn parse_stop_response(body: &[u8]) -> Result<Coordinate, ResolveError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ResolveError::EmptyResponse);
    }

    let value: serde_json::Value =
        serde_json::from_slice(body).map_err(|e| ResolveError::Parse(e.to_string()))?;

    let serde_json::Value::Object(ref fields) = value else {
        return Err(ResolveError::Parse("expected a JSON object".to_string()));
    };

    match fields.get("Message") {
        None | Some(serde_json::Value::Null) => {}
        Some(serde_json::Value::String(message)) => {
            return Err(ResolveError::Remote(message.clone()));
        }
        Some(other) => return Err(ResolveError::Remote(other.to_string())),
    }

    let location: StopLocationDto =
        serde_json::from_value(value).map_err(|e| ResolveError::Parse(e.to_string()))?;

    Coordinate::new(location.latitude, location.longitude)
        .map_err(|e| ResolveError::Parse(e.to_string()))
}
