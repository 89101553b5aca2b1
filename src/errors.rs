use thiserror::Error;

/// Structured error type for the whole service.
///
/// The cache contributes exactly one failure mode: invalid construction.
/// Everything else comes from the upstream fetch path or startup config.
#[derive(Debug, Error)]
pub enum CoindataError {
    #[error("cache capacity must be at least 1")]
    ZeroCacheCapacity,

    #[error("COINMARKETCAP_API_KEY is not set")]
    MissingApiKey,

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("upstream returned HTTP {status}: {message}")]
    UpstreamStatus {
        status: u16,
        message: String,
    },
}
