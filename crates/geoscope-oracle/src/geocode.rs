//! Geocoding collaborator: address → coordinate lookup scoped to a
//! reference city or province.
//!
//! The trait returns the raw response body so callers can retain it for
//! diagnostics; [`GeocodeResponse`] is the typed view parsed on top.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use geoscope_core::GeoPoint;

use crate::error::OracleError;

/// Status value marking a successful response.
pub const STATUS_OK: i64 = 0;

/// Geocoding service contract. Any status other than [`STATUS_OK`] is a
/// non-fatal miss, not an error.
#[async_trait]
pub trait GeocodeOracle: Send + Sync {
    /// Query `address` scoped to the reference context `city`.
    async fn geocode(&self, address: &str, city: &str) -> Result<Value, OracleError>;
}

/// Typed view over a raw geocoder response.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResponse {
    pub status: i64,
    #[serde(default)]
    pub result: Option<GeocodeResult>,
}

/// Payload of a successful response.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeResult {
    pub location: GeocodeLocation,
    /// How well the returned address matches the query, 0-100.
    pub comprehension: f64,
    /// The service's certainty in the match, 0-100.
    pub confidence: f64,
}

/// Native-datum (BD-09) coordinates.
#[derive(Debug, Clone, Deserialize)]
pub struct GeocodeLocation {
    pub lng: f64,
    pub lat: f64,
}

impl GeocodeResponse {
    /// Parse a raw response body. A decode failure means the response is
    /// malformed; geocoding callers downgrade that to a miss.
    pub fn from_value(raw: &Value) -> Result<Self, OracleError> {
        serde_json::from_value(raw.clone()).map_err(OracleError::from)
    }

    /// The result payload, if the status marks success and the payload is
    /// present.
    pub fn success(&self) -> Option<&GeocodeResult> {
        if self.status == STATUS_OK {
            self.result.as_ref()
        } else {
            None
        }
    }
}

impl GeocodeResult {
    pub fn point(&self) -> GeoPoint {
        GeoPoint {
            longitude: self.location.lng,
            latitude: self.location.lat,
        }
    }
}

/// HTTP client for a `/geocoding/v3/` style endpoint.
pub struct HttpGeocoder {
    client: reqwest::Client,
    base_url: String,
    key: String,
}

impl HttpGeocoder {
    /// `base_url` like `http://api.map.baidu.com` (no trailing slash);
    /// `key` is the service access key.
    pub fn new(base_url: String, key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            key,
        }
    }
}

#[async_trait]
impl GeocodeOracle for HttpGeocoder {
    async fn geocode(&self, address: &str, city: &str) -> Result<Value, OracleError> {
        let url = format!("{}/geocoding/v3/", self.base_url);

        debug!(address, city, "geocode query");
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("city", city),
                ("address", address),
                ("output", "json"),
                ("ak", self.key.as_str()),
            ])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OracleError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let raw: Value = resp.json().await?;
        Ok(raw)
    }
}
