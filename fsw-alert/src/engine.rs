use chrono::NaiveDate;
use fsw_data::standardize::DerivedFrame;
use log::info;
use std::collections::HashMap;

/// A threshold crossing that should be delivered to the operator.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    pub series_id: String,
    pub date: NaiveDate,
    pub z: f64,
    pub threshold: f64,
}

/// Decides when a crossing becomes an alert.
///
/// A series whose signal sits above its threshold would otherwise
/// re-alert on every recomputation; the engine remembers the last
/// observation date it raised for each series and stays quiet until a
/// newer observation crosses, or the series is re-armed.
#[derive(Debug, Default)]
pub struct AlertEngine {
    last_alerted: HashMap<String, NaiveDate>,
}

impl AlertEngine {
    pub fn new() -> AlertEngine {
        AlertEngine::default()
    }

    /// Evaluate the latest signal of one series against its threshold.
    ///
    /// Fires only when the magnitude strictly exceeds the threshold and
    /// the latest date has not alerted before. A frame with no defined
    /// signal never fires and changes no state.
    pub fn evaluate(
        &mut self,
        series_id: &str,
        frame: &DerivedFrame,
        threshold: f64,
    ) -> Option<AlertEvent> {
        let (date, z) = frame.latest_signal()?;
        if z.abs() <= threshold {
            return None;
        }
        if self.last_alerted.get(series_id) == Some(&date) {
            return None;
        }
        info!(
            "threshold crossing for {} on {}: z = {:.4}, threshold = {}",
            series_id, date, z, threshold
        );
        self.last_alerted.insert(series_id.to_string(), date);
        Some(AlertEvent {
            series_id: series_id.to_string(),
            date,
            z,
            threshold,
        })
    }

    /// Forget the last alerted date for one series so the next
    /// evaluation can fire again. Called when the series' threshold
    /// changes: a different threshold may legitimately re-trigger on
    /// the same observation.
    pub fn rearm(&mut self, series_id: &str) {
        self.last_alerted.remove(series_id);
    }
}
