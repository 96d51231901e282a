//! Core data and decision logic: gazetteer, region matching, hierarchy
//! disambiguation, NER reconciliation, scale classification, and datum
//! transforms. Everything here is pure; network collaborators live in
//! `geoscope-oracle`.

pub mod article;
pub mod coord;
pub mod hierarchy;
pub mod matcher;
pub mod names;
pub mod ner;
pub mod reconcile;
pub mod region;
pub mod scale;

pub use article::{ArticleRecord, EntitySet};
pub use coord::GeoPoint;
pub use region::{Gazetteer, GazetteerError, Region, RegionLevel};
pub use scale::Scale;
