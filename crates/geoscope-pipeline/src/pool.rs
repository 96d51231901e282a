//! Bounded-concurrency batch driver.
//!
//! Articles are independent, so a batch fans out across workers with no
//! shared mutable state beyond the read-only gazetteer inside the
//! pipeline. Failures are collected per article rather than aborting the
//! batch.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tracing::{error, info};

use geoscope_core::ArticleRecord;

use crate::enrich::{EnrichReport, Pipeline};
use crate::error::PipelineError;

/// One article's outcome inside a batch.
pub struct BatchItem {
    pub article: ArticleRecord,
    pub outcome: Result<EnrichReport, PipelineError>,
}

/// Enrich `articles` with at most `concurrency` in flight at once.
pub async fn enrich_batch(
    pipeline: Arc<Pipeline>,
    articles: Vec<ArticleRecord>,
    concurrency: usize,
) -> Vec<BatchItem> {
    let total = articles.len();

    let results: Vec<BatchItem> = stream::iter(articles)
        .map(|mut article| {
            let pipeline = Arc::clone(&pipeline);
            async move {
                let outcome = pipeline.enrich(&mut article).await;
                if let Err(err) = &outcome {
                    error!(article = %article.id, error = %err, "enrichment failed");
                }
                BatchItem { article, outcome }
            }
        })
        .buffer_unordered(concurrency.max(1))
        .collect()
        .await;

    let failed = results.iter().filter(|r| r.outcome.is_err()).count();
    info!(total, failed, "batch complete");
    results
}
