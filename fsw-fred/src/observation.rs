use crate::error::FetchError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Date format used by the FRED JSON API: "YYYY-MM-DD"
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Marker used by FRED for dates with no reported value.
pub const MISSING_VALUE: &str = ".";

/// A single observation of one monitored series.
///
/// `value` is `None` for dates the provider reports as unavailable
/// (holidays, publication gaps). Downstream computation must tolerate
/// these holes rather than treat them as errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: Option<f64>,
}

impl Ord for Observation {
    fn cmp(&self, other: &Self) -> Ordering {
        self.date.cmp(&other.date)
    }
}

impl Eq for Observation {}

impl PartialEq for Observation {
    fn eq(&self, other: &Self) -> bool {
        self.date == other.date
    }
}

impl PartialOrd for Observation {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One row of the FRED `series/observations` JSON payload.
#[derive(Debug, Deserialize)]
struct FredRow {
    date: String,
    value: String,
}

/// The subset of the FRED `series/observations` response we consume.
#[derive(Debug, Deserialize)]
struct FredPayload {
    observations: Vec<FredRow>,
}

/// An ordered time series of raw observations, strictly increasing by date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeriesFrame {
    observations: Vec<Observation>,
}

impl SeriesFrame {
    /// Build a frame from raw observations, sorting by date and dropping
    /// duplicate dates (first one wins) so the ordering invariant holds.
    pub fn new(mut observations: Vec<Observation>) -> SeriesFrame {
        observations.sort();
        observations.dedup();
        SeriesFrame { observations }
    }

    /// Parse a FRED `series/observations` JSON body into a frame.
    ///
    /// The provider's missing marker ("." ) becomes `None`; any other
    /// non-numeric value is treated the same way rather than rejected.
    pub fn from_fred_json(body: &str) -> Result<SeriesFrame, FetchError> {
        let payload: FredPayload = serde_json::from_str(body)?;
        let mut observations = Vec::with_capacity(payload.observations.len());
        for row in payload.observations {
            let date = NaiveDate::parse_from_str(&row.date, DATE_FORMAT)
                .map_err(|_| FetchError::DateParse(row.date.clone()))?;
            let value = if row.value == MISSING_VALUE {
                None
            } else {
                row.value.parse::<f64>().ok()
            };
            observations.push(Observation { date, value });
        }
        Ok(SeriesFrame::new(observations))
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The most recent observation, defined or not.
    pub fn latest(&self) -> Option<&Observation> {
        self.observations.last()
    }
}
