//! Stage composition: one article through the full enrichment pipeline.
//!
//! Stages run strictly in order — entity classification, region matching,
//! district filtering, NER reconciliation, geocoding, scale, span — each
//! one a function over the shared [`ArticleRecord`]. The pipeline owns no
//! mutable state of its own, so one instance serves any number of
//! articles concurrently.

use std::sync::Arc;

use tracing::{info, warn};

use geoscope_core::hierarchy::filter_districts;
use geoscope_core::matcher::match_regions;
use geoscope_core::ner::classify_tokens;
use geoscope_core::reconcile::geocode_candidates;
use geoscope_core::scale::classify_scale;
use geoscope_core::{ArticleRecord, Gazetteer};
use geoscope_oracle::{GeocodeOracle, GeometryOracle, NerOracle};

use crate::error::PipelineError;
use crate::resolver::resolve_candidates;

/// Outcome of a successful enrichment. A failed span is reported here
/// rather than failing the article, because scale stays valid without it.
#[derive(Debug, Default)]
pub struct EnrichReport {
    pub span_error: Option<PipelineError>,
}

impl EnrichReport {
    pub fn is_clean(&self) -> bool {
        self.span_error.is_none()
    }
}

/// The enrichment pipeline: the immutable gazetteer plus the three
/// oracles. Share behind an `Arc` across workers.
pub struct Pipeline {
    gazetteer: Arc<Gazetteer>,
    ner: Arc<dyn NerOracle>,
    geocoder: Arc<dyn GeocodeOracle>,
    geometry: Arc<dyn GeometryOracle>,
}

impl Pipeline {
    pub fn new(
        gazetteer: Arc<Gazetteer>,
        ner: Arc<dyn NerOracle>,
        geocoder: Arc<dyn GeocodeOracle>,
        geometry: Arc<dyn GeometryOracle>,
    ) -> Self {
        Self {
            gazetteer,
            ner,
            geocoder,
            geometry,
        }
    }

    /// Run every stage over `article` in order.
    ///
    /// On success the record carries entities, region lists, resolved
    /// points, scale, and span. A geometry failure downgrades to a
    /// warning in the report; NER and geocode transport failures abort
    /// the article.
    pub async fn enrich(&self, article: &mut ArticleRecord) -> Result<EnrichReport, PipelineError> {
        // Named entities.
        let sentences = self
            .ner
            .tag(&article.content)
            .await
            .map_err(|source| PipelineError::Ner { source })?;
        article.entities = classify_tokens(&sentences);

        // Gazetteer regions. City matches pull in their provinces.
        let matches = match_regions(&article.content, &self.gazetteer);
        article.province_list = matches.provinces;
        article.city_list = matches.cities;

        // District sanity against the matched cities.
        let filtered = filter_districts(&matches.districts, &article.city_list, &self.gazetteer);
        article.district_list = filtered.districts;
        article.debug.extend(filtered.debug);

        // Drop entities the matcher already resolved.
        let candidates = geocode_candidates(&article.entities, article.region_names());
        article.geocode_candidates = candidates;

        // Coordinates for what's left.
        let resolved = resolve_candidates(
            &article.geocode_candidates,
            &article.city_list,
            &article.province_list,
            self.geocoder.as_ref(),
        )
        .await?;
        article.resolved_points_native = resolved.native;
        article.resolved_points = resolved.wgs84;
        article.geocode_log = resolved.log;

        // Scale from region counts; span over the resolved points.
        article.scale = Some(classify_scale(
            &article.province_list,
            &article.city_list,
            &article.district_list,
        ));

        let mut report = EnrichReport::default();
        match self.measure_span(article).await {
            Ok(span) => article.span = Some(span),
            Err(err) => {
                warn!(article = %article.id, error = %err, "span failed, keeping scale");
                report.span_error = Some(err);
            }
        }

        info!(
            article = %article.id,
            provinces = article.province_list.len(),
            cities = article.city_list.len(),
            districts = article.district_list.len(),
            points = article.resolved_points.len(),
            scale = article.scale.map(|s| s.as_u8()),
            "article enriched"
        );
        Ok(report)
    }

    /// Span is zero for at most one resolved point. Otherwise every point
    /// is upserted keyed by `(name, article_id)` and the geometry oracle
    /// supplies the minimum bounding circle radius.
    async fn measure_span(&self, article: &ArticleRecord) -> Result<f64, PipelineError> {
        if article.resolved_points.len() <= 1 {
            return Ok(0.0);
        }

        for (name, point) in &article.resolved_points {
            self.geometry
                .upsert_point(&article.id, name, *point)
                .await
                .map_err(|source| PipelineError::Geometry { source })?;
        }

        self.geometry
            .bounding_radius(&article.id)
            .await
            .map_err(|source| PipelineError::Geometry { source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    use geoscope_core::{GeoPoint, Region, RegionLevel, Scale};
    use geoscope_oracle::{OracleError, TaggedSentences};

    fn region(
        name: &str,
        level: RegionLevel,
        admin_code: &str,
        parent_admin_code: Option<&str>,
    ) -> Region {
        Region {
            name: name.into(),
            level,
            admin_code: admin_code.into(),
            parent_admin_code: parent_admin_code.map(Into::into),
        }
    }

    fn gazetteer() -> Arc<Gazetteer> {
        Arc::new(
            Gazetteer::from_records(vec![
                region("湖北省", RegionLevel::Province, "420000", None),
                region("武汉市", RegionLevel::City, "420100", Some("420000")),
                region("江岸区", RegionLevel::District, "420102", Some("420100")),
                region("汉阳区", RegionLevel::District, "420105", Some("420100")),
            ])
            .unwrap(),
        )
    }

    /// Returns a fixed tagging regardless of input.
    struct FixedTagger(TaggedSentences);

    #[async_trait]
    impl NerOracle for FixedTagger {
        async fn tag(&self, _text: &str) -> Result<TaggedSentences, OracleError> {
            Ok(self.0.clone())
        }
    }

    struct FailingTagger;

    #[async_trait]
    impl NerOracle for FailingTagger {
        async fn tag(&self, _text: &str) -> Result<TaggedSentences, OracleError> {
            Err(OracleError::Malformed("tagger down".into()))
        }
    }

    /// Accepts everything at fixed quality, one longitude per call.
    struct AcceptAllGeocoder;

    #[async_trait]
    impl GeocodeOracle for AcceptAllGeocoder {
        async fn geocode(&self, address: &str, _city: &str) -> Result<Value, OracleError> {
            // Spread points out so multi-point articles exercise the span path.
            let offset = address.chars().count() as f64 * 0.01;
            Ok(json!({
                "status": 0,
                "result": {
                    "location": {"lng": 114.3 + offset, "lat": 30.6},
                    "comprehension": 90,
                    "confidence": 50
                }
            }))
        }
    }

    /// Records upserts; answers a fixed radius or an error.
    struct ScriptedGeometry {
        radius: Result<f64, ()>,
        upserts: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedGeometry {
        fn ok(radius: f64) -> Self {
            Self {
                radius: Ok(radius),
                upserts: Mutex::new(Vec::new()),
            }
        }

        fn failing() -> Self {
            Self {
                radius: Err(()),
                upserts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GeometryOracle for ScriptedGeometry {
        async fn upsert_point(
            &self,
            article_id: &str,
            name: &str,
            _point: GeoPoint,
        ) -> Result<(), OracleError> {
            self.upserts
                .lock()
                .unwrap()
                .push((article_id.to_string(), name.to_string()));
            Ok(())
        }

        async fn bounding_radius(&self, _article_id: &str) -> Result<f64, OracleError> {
            self.radius
                .map_err(|_| OracleError::Malformed("geometry down".into()))
        }
    }

    /// Panics if the span step reaches the oracle.
    struct UnreachableGeometry;

    #[async_trait]
    impl GeometryOracle for UnreachableGeometry {
        async fn upsert_point(
            &self,
            _article_id: &str,
            _name: &str,
            _point: GeoPoint,
        ) -> Result<(), OracleError> {
            panic!("unexpected upsert");
        }

        async fn bounding_radius(&self, _article_id: &str) -> Result<f64, OracleError> {
            panic!("unexpected radius query");
        }
    }

    fn pairs(words: &[(&str, &str)]) -> TaggedSentences {
        vec![
            words
                .iter()
                .map(|(w, t)| (w.to_string(), t.to_string()))
                .collect(),
        ]
    }

    fn pipeline(
        ner: impl NerOracle + 'static,
        geometry: impl GeometryOracle + 'static,
    ) -> Pipeline {
        Pipeline::new(
            gazetteer(),
            Arc::new(ner),
            Arc::new(AcceptAllGeocoder),
            Arc::new(geometry),
        )
    }

    #[tokio::test]
    async fn full_enrichment_end_to_end() {
        // Content mentions 武汉市; the tagger extracts bare 武汉 plus two
        // geocodable names.
        let tagger = FixedTagger(pairs(&[
            ("武汉", "NS"),
            ("黄鹤楼", "NS"),
            ("武汉大学", "NT"),
            ("张三", "NR"),
        ]));
        let p = pipeline(tagger, ScriptedGeometry::ok(0.42));

        let mut article = ArticleRecord::new("a-1", "武汉市江岸区今日发布通告");
        let report = p.enrich(&mut article).await.unwrap();
        assert!(report.is_clean());

        assert!(article.city_list.contains("武汉市"));
        assert!(article.province_list.contains("湖北省"));
        assert!(article.district_list.contains("江岸区"));

        // 武汉 duplicates the suffix-trimmed city match and must not be
        // geocoded; the other two names must be.
        assert!(!article.geocode_candidates.contains("武汉"));
        assert!(article.geocode_candidates.contains("黄鹤楼"));
        assert!(article.geocode_candidates.contains("武汉大学"));

        assert_eq!(article.resolved_points.len(), 2);
        assert_eq!(article.scale, Some(Scale::SingleDistrict));
        assert_eq!(article.span, Some(0.42));
    }

    #[tokio::test]
    async fn ner_failure_aborts_the_article() {
        let p = pipeline(FailingTagger, UnreachableGeometry);
        let mut article = ArticleRecord::new("a-1", "武汉市");
        let err = p.enrich(&mut article).await.unwrap_err();
        assert!(matches!(err, PipelineError::Ner { .. }));
    }

    #[tokio::test]
    async fn single_point_span_is_zero_without_oracle() {
        let tagger = FixedTagger(pairs(&[("黄鹤楼", "NS")]));
        let p = pipeline(tagger, UnreachableGeometry);

        let mut article = ArticleRecord::new("a-1", "武汉市的黄鹤楼");
        let report = p.enrich(&mut article).await.unwrap();
        assert!(report.is_clean());
        assert_eq!(article.resolved_points.len(), 1);
        assert_eq!(article.span, Some(0.0));
    }

    #[tokio::test]
    async fn no_entities_span_is_zero() {
        let tagger = FixedTagger(vec![]);
        let p = pipeline(tagger, UnreachableGeometry);

        let mut article = ArticleRecord::new("a-1", "武汉市江岸区与汉阳区");
        p.enrich(&mut article).await.unwrap();
        assert_eq!(article.span, Some(0.0));
        assert_eq!(article.scale, Some(Scale::CityWide));
    }

    #[tokio::test]
    async fn geometry_failure_keeps_scale() {
        let tagger = FixedTagger(pairs(&[("黄鹤楼", "NS"), ("武汉大学", "NT")]));
        let p = pipeline(tagger, ScriptedGeometry::failing());

        let mut article = ArticleRecord::new("a-1", "武汉市江岸区");
        let report = p.enrich(&mut article).await.unwrap();

        assert!(matches!(
            report.span_error,
            Some(PipelineError::Geometry { .. })
        ));
        assert_eq!(article.span, None);
        assert_eq!(article.scale, Some(Scale::SingleDistrict));
    }

    #[tokio::test]
    async fn points_upserted_before_radius_query() {
        let tagger = FixedTagger(pairs(&[("黄鹤楼", "NS"), ("武汉大学", "NT")]));
        let geometry = Arc::new(ScriptedGeometry::ok(1.5));
        let p = Pipeline::new(
            gazetteer(),
            Arc::new(tagger),
            Arc::new(AcceptAllGeocoder),
            Arc::clone(&geometry) as Arc<dyn GeometryOracle>,
        );

        let mut article = ArticleRecord::new("a-9", "武汉市");
        p.enrich(&mut article).await.unwrap();

        let upserts = geometry.upserts.lock().unwrap();
        assert_eq!(upserts.len(), 2);
        assert!(upserts.iter().all(|(id, _)| id == "a-9"));
    }
}
