//! External collaborator contracts and their HTTP clients: the NER
//! tagger, the geocoding service, and the bounding-radius geometry
//! service. The pipeline depends only on the traits; the HTTP types are
//! the production wiring.

mod error;
pub mod geocode;
pub mod geometry;
pub mod ner;

pub use error::OracleError;
pub use geocode::{
    GeocodeOracle, GeocodeResponse, GeocodeResult, HttpGeocoder, STATUS_OK,
};
pub use geometry::{GeometryOracle, HttpGeometryService};
pub use ner::{HttpNerTagger, NerOracle, TaggedSentences};
