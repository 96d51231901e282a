use geoscope_oracle::OracleError;
use thiserror::Error;

/// Failures surfaced by the enrichment pipeline. Quality misses during
/// geocoding are not errors; only transport-level trouble lands here.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The tagger was unreachable or answered garbage. Fatal for the
    /// article: every downstream stage needs the entity set.
    #[error("ner tagging failed: {source}")]
    Ner {
        #[source]
        source: OracleError,
    },

    /// A geocode query failed at the transport level.
    #[error("geocode query for '{name}' in context '{context}' failed: {source}")]
    Geocode {
        name: String,
        context: String,
        #[source]
        source: OracleError,
    },

    /// Span computation failed. Scale stays valid; callers surface this
    /// as a partial-success warning.
    #[error("geometry span query failed: {source}")]
    Geometry {
        #[source]
        source: OracleError,
    },
}
