//! NER tagger collaborator: article body in, `(token, tag)` pairs out.

use async_trait::async_trait;
use tracing::debug;

use crate::error::OracleError;

/// Ordered sentences of `(token, tag)` pairs, exactly as the tagger
/// segments them. Tags are `NR` person, `NT` institute, `NS` location,
/// anything else miscellaneous.
pub type TaggedSentences = Vec<Vec<(String, String)>>;

/// Named-entity tagger contract.
#[async_trait]
pub trait NerOracle: Send + Sync {
    async fn tag(&self, text: &str) -> Result<TaggedSentences, OracleError>;
}

/// HTTP client for the tagging service.
pub struct HttpNerTagger {
    client: reqwest::Client,
    url: String,
}

impl HttpNerTagger {
    /// `url` is the full tagger endpoint, e.g. `http://localhost:8889/NER`.
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl NerOracle for HttpNerTagger {
    async fn tag(&self, text: &str) -> Result<TaggedSentences, OracleError> {
        let resp = self
            .client
            .post(&self.url)
            .form(&[("text", text)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(OracleError::Server {
                status: status.as_u16(),
                body,
            });
        }

        let sentences: TaggedSentences = resp.json().await?;
        debug!(sentences = sentences.len(), "text tagged");
        Ok(sentences)
    }
}
