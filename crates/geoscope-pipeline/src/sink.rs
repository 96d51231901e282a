//! Persistence hand-off for finished article records.

use async_trait::async_trait;

use geoscope_core::ArticleRecord;

/// Accepts a finished [`ArticleRecord`] for storage.
///
/// The pipeline knows nothing about the storage schema beyond the record
/// itself; implementations decide where and how it lands.
#[async_trait]
pub trait ArticleSink: Send + Sync {
    async fn store(&self, article: &ArticleRecord) -> anyhow::Result<()>;
}
