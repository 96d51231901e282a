//! Geocode Resolver: best-of-candidates coordinate lookup.
//!
//! Each candidate name is queried once per reference context — the
//! matched cities, falling back to the matched provinces. A result is
//! accepted at comprehension ≥ 70 and confidence ≥ 20; among accepted
//! results the stored point is replaced whenever a later one ties or
//! beats the best pair seen so far, so an equally-good later match wins.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use geoscope_core::coord::bd09_to_wgs84;
use geoscope_core::GeoPoint;
use geoscope_oracle::{GeocodeOracle, GeocodeResponse};

use crate::error::PipelineError;

const MIN_COMPREHENSION: f64 = 70.0;
const MIN_CONFIDENCE: f64 = 20.0;

/// Coordinates and diagnostics for one article's candidate names.
#[derive(Debug, Default)]
pub struct ResolvedLocations {
    /// BD-09 points keyed by candidate name.
    pub native: BTreeMap<String, GeoPoint>,
    /// WGS-84 points keyed by candidate name.
    pub wgs84: BTreeMap<String, GeoPoint>,
    /// name → reference context → raw geocoder response, successes and
    /// misses alike.
    pub log: BTreeMap<String, BTreeMap<String, serde_json::Value>>,
}

/// Resolve coordinates for every candidate name.
///
/// Reference contexts are the matched cities if any, else the matched
/// provinces, else nothing — with no context at all, resolution is
/// skipped entirely and nationwide place names stay unresolved. Misses
/// (non-success status, malformed payloads, sub-threshold quality) are
/// logged and skipped; transport errors propagate.
pub async fn resolve_candidates(
    candidates: &BTreeSet<String>,
    cities: &BTreeSet<String>,
    provinces: &BTreeSet<String>,
    oracle: &dyn GeocodeOracle,
) -> Result<ResolvedLocations, PipelineError> {
    let mut out = ResolvedLocations::default();

    if candidates.is_empty() {
        return Ok(out);
    }

    let contexts: Vec<&String> = if !cities.is_empty() {
        cities.iter().collect()
    } else if !provinces.is_empty() {
        provinces.iter().collect()
    } else {
        debug!("no reference context, skipping geocode resolution");
        return Ok(out);
    };

    for name in candidates {
        let log = out.log.entry(name.clone()).or_default();
        let mut best: Option<(f64, f64)> = None;

        for context in &contexts {
            let raw = oracle
                .geocode(name, context.as_str())
                .await
                .map_err(|source| PipelineError::Geocode {
                    name: name.clone(),
                    context: (*context).clone(),
                    source,
                })?;
            log.insert((*context).clone(), raw.clone());

            let parsed = match GeocodeResponse::from_value(&raw) {
                Ok(parsed) => parsed,
                Err(err) => {
                    debug!(name = %name, context = %context, error = %err,
                        "malformed geocode response, skipping");
                    continue;
                }
            };
            let Some(result) = parsed.success() else {
                continue;
            };

            if result.comprehension < MIN_COMPREHENSION || result.confidence < MIN_CONFIDENCE {
                continue;
            }

            let replace = match best {
                None => true,
                // Ties replace: the later equally-good result wins.
                Some((comprehension, confidence)) => {
                    result.comprehension >= comprehension && result.confidence >= confidence
                }
            };
            if replace {
                best = Some((result.comprehension, result.confidence));
                let native = result.point();
                out.native.insert(name.clone(), native);
                out.wgs84.insert(name.clone(), bd09_to_wgs84(native));
            }
        }
    }

    debug!(
        resolved = out.wgs84.len(),
        candidates = candidates.len(),
        "geocode resolution complete"
    );
    Ok(out)
}
