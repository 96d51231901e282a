//! Per-article accumulator threaded through the pipeline stages.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::coord::GeoPoint;
use crate::scale::Scale;

/// Deduplicated named entities, bucketed by tagger class.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntitySet {
    pub persons: BTreeSet<String>,
    pub institutes: BTreeSet<String>,
    pub locations: BTreeSet<String>,
    pub other: BTreeSet<String>,
}

/// One article's pipeline state, populated cumulatively.
///
/// Created with identity and body text only, then enriched in order by
/// entity classification, region matching, district filtering, NER
/// reconciliation, geocoding, and scale/span computation, and finally
/// handed to the persistence sink. Never reused across articles. `scale`
/// and `span` are only meaningful once every upstream stage has run.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    pub content: String,

    #[serde(default)]
    pub entities: EntitySet,

    #[serde(default)]
    pub province_list: BTreeSet<String>,
    #[serde(default)]
    pub city_list: BTreeSet<String>,
    #[serde(default)]
    pub district_list: BTreeSet<String>,
    /// Parent-city names of rejected district candidates.
    #[serde(default)]
    pub debug: Vec<String>,

    /// Entities still awaiting coordinate resolution.
    #[serde(default)]
    pub geocode_candidates: BTreeSet<String>,
    /// name → reference context → raw geocoder response.
    #[serde(default)]
    pub geocode_log: BTreeMap<String, BTreeMap<String, serde_json::Value>>,

    /// BD-09 points as returned by the geocoder.
    #[serde(default)]
    pub resolved_points_native: BTreeMap<String, GeoPoint>,
    /// WGS-84 points derived from the native ones.
    #[serde(default)]
    pub resolved_points: BTreeMap<String, GeoPoint>,

    #[serde(default)]
    pub scale: Option<Scale>,
    /// Minimum bounding circle radius over the resolved points.
    #[serde(default)]
    pub span: Option<f64>,
}

impl ArticleRecord {
    /// A fresh record with only identity and body text set.
    pub fn new(id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            ..Self::default()
        }
    }

    /// All resolved region names: provinces, then cities, then districts.
    pub fn region_names(&self) -> impl Iterator<Item = &String> {
        self.province_list
            .iter()
            .chain(self.city_list.iter())
            .chain(self.district_list.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_record_is_empty_apart_from_identity() {
        let record = ArticleRecord::new("a-1", "正文");
        assert_eq!(record.id, "a-1");
        assert_eq!(record.content, "正文");
        assert!(record.province_list.is_empty());
        assert!(record.scale.is_none());
        assert!(record.span.is_none());
    }

    #[test]
    fn region_names_chains_all_three_levels() {
        let mut record = ArticleRecord::new("a-1", "");
        record.province_list.insert("湖北省".into());
        record.city_list.insert("武汉市".into());
        record.district_list.insert("江岸区".into());

        let names: Vec<&String> = record.region_names().collect();
        assert_eq!(names, ["湖北省", "武汉市", "江岸区"]);
    }

    #[test]
    fn scale_serializes_as_integer_field() {
        let mut record = ArticleRecord::new("a-1", "");
        record.scale = Some(Scale::National);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""scale":4"#), "got {json}");
    }

    #[test]
    fn minimal_input_json_deserializes() {
        let record: ArticleRecord =
            serde_json::from_str(r#"{"id": "a-1", "content": "武汉市"}"#).unwrap();
        assert_eq!(record.id, "a-1");
        assert!(record.entities.locations.is_empty());
    }
}
