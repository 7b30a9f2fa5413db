use crate::error::FetchError;
use crate::observation::SeriesFrame;
use crate::provider::SeriesProvider;
use async_trait::async_trait;
use log::debug;
use reqwest::StatusCode;
use std::time::Duration;

/// FRED observations endpoint; see https://fred.stlouisfed.org/docs/api/fred/
pub const OBSERVATIONS_URL: &str = "https://api.stlouisfed.org/fred/series/observations";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the FRED `series/observations` endpoint.
///
/// One instance is shared across all fetches so the underlying
/// connection pool is reused. There is no retry: a failed fetch is
/// reported to the caller and the series is skipped for that cycle.
pub struct FredClient {
    client: reqwest::Client,
    api_key: String,
}

impl FredClient {
    pub fn new(api_key: String) -> Result<FredClient, FetchError> {
        if api_key.trim().is_empty() {
            return Err(FetchError::MissingCredential);
        }
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(FredClient { client, api_key })
    }
}

#[async_trait]
impl SeriesProvider for FredClient {
    async fn fetch(&self, series_id: &str) -> Result<SeriesFrame, FetchError> {
        let response = self
            .client
            .get(OBSERVATIONS_URL)
            .query(&[
                ("series_id", series_id),
                ("api_key", self.api_key.as_str()),
                ("file_type", "json"),
            ])
            .send()
            .await?;
        if response.status() != StatusCode::OK {
            return Err(FetchError::BadStatus(response.status().as_u16()));
        }
        let body = response.text().await?;
        debug!("retrieved {} bytes for series {}", body.len(), series_id);
        SeriesFrame::from_fred_json(&body)
    }
}
