//! Export one series' standardized chart as JSON for an external
//! renderer.

use crate::config;
use fsw_alert::threshold::ThresholdStore;
use fsw_dashboard::chart;
use fsw_data::standardize;
use fsw_fred::client::FredClient;
use fsw_fred::provider::SeriesProvider;
use fsw_fred::series::SeriesDescriptor;
use log::info;
use std::fs::File;

pub async fn run_chart(
    series_id: &str,
    output_json: &str,
    threshold: Option<f64>,
) -> anyhow::Result<()> {
    let descriptor = SeriesDescriptor::lookup(series_id)?;
    let mut thresholds = ThresholdStore::new();
    if let Some(value) = threshold {
        thresholds.set(&descriptor.series_id, value)?;
    }
    let threshold = thresholds.effective(&descriptor);

    let api_key = config::load_fred()?;
    let provider = FredClient::new(api_key)?;
    let frame = provider.fetch(&descriptor.series_id).await?;
    let derived = standardize::standardize(frame.observations());

    let spec = chart::render(&descriptor, &derived, threshold);
    serde_json::to_writer_pretty(File::create(output_json)?, &spec)?;
    info!(
        "chart for {} written to {}",
        descriptor.series_id, output_json
    );
    Ok(())
}
