/// Error types for the FRED library
use thiserror::Error;

/// Errors raised by catalog access.
#[derive(Error, Debug)]
pub enum FredError {
    /// A series id that is not part of the monitored catalog
    #[error("unknown series id: {0}")]
    UnknownSeries(String),

    /// Failed to parse the embedded catalog CSV
    #[error("failed to parse series catalog: {0}")]
    CatalogParse(#[from] csv::Error),
}

/// Errors raised while fetching or decoding a series from the provider.
#[derive(Error, Debug)]
pub enum FetchError {
    /// No API credential was supplied at startup
    #[error("FRED API credential is missing")]
    MissingCredential,

    /// HTTP request failed
    #[cfg(feature = "api")]
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Provider answered with a non-success status
    #[error("bad response status from provider: {0}")]
    BadStatus(u16),

    /// Failed to decode the observations payload
    #[error("failed to parse observations payload: {0}")]
    PayloadParse(#[from] serde_json::Error),

    /// An observation row carried an unparseable date
    #[error("failed to parse observation date: {0}")]
    DateParse(String),
}
