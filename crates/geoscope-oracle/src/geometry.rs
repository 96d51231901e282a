//! Geometry collaborator: per-article point store and minimum bounding
//! circle radius.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use geoscope_core::GeoPoint;

use crate::error::OracleError;

/// Spatial service owning per-article point storage.
///
/// Points are keyed by `(name, article_id)` with upsert-on-conflict
/// semantics; the radius query runs over every point stored for one
/// article. The service is opaque — how it indexes or computes is its
/// business.
#[async_trait]
pub trait GeometryOracle: Send + Sync {
    async fn upsert_point(
        &self,
        article_id: &str,
        name: &str,
        point: GeoPoint,
    ) -> Result<(), OracleError>;

    /// Minimum bounding circle radius over the article's stored points.
    async fn bounding_radius(&self, article_id: &str) -> Result<f64, OracleError>;
}

/// HTTP client for the geometry service.
pub struct HttpGeometryService {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Serialize)]
struct UpsertBody<'a> {
    article_id: &'a str,
    name: &'a str,
    longitude: f64,
    latitude: f64,
}

#[derive(Deserialize)]
struct RadiusResponse {
    radius: f64,
}

impl HttpGeometryService {
    /// `base_url` like `http://localhost:7700` (no trailing slash).
    pub fn new(base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl GeometryOracle for HttpGeometryService {
    async fn upsert_point(
        &self,
        article_id: &str,
        name: &str,
        point: GeoPoint,
    ) -> Result<(), OracleError> {
        let url = format!("{}/points", self.base_url);
        let body = UpsertBody {
            article_id,
            name,
            longitude: point.longitude,
            latitude: point.latitude,
        };

        let resp = self.client.post(&url).json(&body).send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OracleError::Server {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }

    async fn bounding_radius(&self, article_id: &str) -> Result<f64, OracleError> {
        let url = format!("{}/radius", self.base_url);

        let resp = self
            .client
            .get(&url)
            .query(&[("article_id", article_id)])
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

        let parsed: RadiusResponse = resp.json().await?;
        debug!(article_id, radius = parsed.radius, "bounding radius");
        Ok(parsed.radius)
    }
}
