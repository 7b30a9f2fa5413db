use crate::error::FetchError;
use crate::observation::SeriesFrame;
use async_trait::async_trait;

/// Boundary for fetching raw observations of one series.
///
/// The live implementation talks to the FRED HTTP API; tests substitute
/// a canned provider so everything downstream stays deterministic.
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    async fn fetch(&self, series_id: &str) -> Result<SeriesFrame, FetchError>;
}
