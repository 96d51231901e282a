use thiserror::Error;

/// Transport and decoding failures talking to an external oracle.
///
/// `Http` and `Server` mean the oracle was unavailable; `Json` and
/// `Malformed` mean it answered something unusable. Geocoding callers
/// treat the latter two as per-candidate misses; the geometry caller
/// treats every variant as fatal for the span step.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("oracle request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("oracle returned {status}: {body}")]
    Server { status: u16, body: String },

    #[error("oracle response parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("malformed oracle response: {0}")]
    Malformed(String),
}
