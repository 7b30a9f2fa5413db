use crate::error::FredError;
use serde::{Deserialize, Serialize};

/// The monitored series shipped with the binary. Editing the fixture is
/// how a deployment changes the watch list.
pub const CSV_OBJECT: &str = include_str!("../fixtures/series.csv");

/// One entry of the monitored-series catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesDescriptor {
    #[serde(rename = "SERIES_ID")]
    pub series_id: String,
    #[serde(rename = "DISPLAY_NAME")]
    pub display_name: String,
    #[serde(rename = "DEFAULT_THRESHOLD")]
    pub default_threshold: f64,
}

impl SeriesDescriptor {
    /// All catalog entries, in fixture order. The ordering is stable so
    /// selector indices stay meaningful across calls.
    pub fn get_series_vector() -> Vec<SeriesDescriptor> {
        SeriesDescriptor::parse_series_csv(CSV_OBJECT).expect("failed to parse csv file")
    }

    pub fn parse_series_csv(csv_object: &str) -> Result<Vec<SeriesDescriptor>, FredError> {
        let mut rdr = csv::Reader::from_reader(csv_object.as_bytes());
        let mut series = Vec::new();
        for row in rdr.deserialize() {
            let descriptor: SeriesDescriptor = row?;
            series.push(descriptor);
        }
        Ok(series)
    }

    /// Look a series up by id.
    pub fn lookup(series_id: &str) -> Result<SeriesDescriptor, FredError> {
        SeriesDescriptor::get_series_vector()
            .into_iter()
            .find(|descriptor| descriptor.series_id == series_id)
            .ok_or_else(|| FredError::UnknownSeries(series_id.to_string()))
    }
}
