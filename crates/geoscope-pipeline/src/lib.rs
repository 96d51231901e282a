//! Enrichment pipeline: stage composition over one article record, the
//! geocode resolver, span measurement, the persistence sink contract, and
//! a bounded-concurrency batch driver.

mod error;
pub mod enrich;
pub mod pool;
pub mod resolver;
pub mod sink;

pub use enrich::{EnrichReport, Pipeline};
pub use error::PipelineError;
pub use pool::{enrich_batch, BatchItem};
pub use resolver::{resolve_candidates, ResolvedLocations};
pub use sink::ArticleSink;
