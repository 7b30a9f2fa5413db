use crate::error::AlertError;
use fsw_fred::series::SeriesDescriptor;
use std::collections::HashMap;

/// Per-series threshold overrides, falling back to catalog defaults.
///
/// The store is long-lived: an override set while one series is
/// selected stays in force when the user moves away and back. Only a
/// restart returns a series to its catalog default.
#[derive(Debug, Default)]
pub struct ThresholdStore {
    overrides: HashMap<String, f64>,
}

impl ThresholdStore {
    pub fn new() -> ThresholdStore {
        ThresholdStore::default()
    }

    /// Record an override for one series. Zero is allowed (alert on any
    /// defined signal); negative and non-finite values are rejected and
    /// leave the previous setting untouched.
    pub fn set(&mut self, series_id: &str, threshold: f64) -> Result<(), AlertError> {
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(AlertError::InvalidThreshold(threshold));
        }
        self.overrides.insert(series_id.to_string(), threshold);
        Ok(())
    }

    /// The threshold in force for a series: its override if one was
    /// set, otherwise the catalog default.
    pub fn effective(&self, descriptor: &SeriesDescriptor) -> f64 {
        self.overrides
            .get(&descriptor.series_id)
            .copied()
            .unwrap_or(descriptor.default_threshold)
    }

    pub fn override_for(&self, series_id: &str) -> Option<f64> {
        self.overrides.get(series_id).copied()
    }
}
