//! JSON-lines output sink: one serialized record per line.

use std::path::Path;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use geoscope_core::ArticleRecord;
use geoscope_pipeline::ArticleSink;

/// Appends one JSON object per stored article.
pub struct JsonLinesSink {
    file: Mutex<tokio::fs::File>,
}

impl JsonLinesSink {
    pub async fn create(path: &Path) -> anyhow::Result<Self> {
        let file = tokio::fs::File::create(path).await?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

#[async_trait]
impl ArticleSink for JsonLinesSink {
    async fn store(&self, article: &ArticleRecord) -> anyhow::Result<()> {
        let mut line = serde_json::to_vec(article)?;
        line.push(b'\n');

        let mut file = self.file.lock().await;
        file.write_all(&line).await?;
        Ok(())
    }
}
