use crate::chart::{self, ChartSpec};
use fsw_alert::engine::{AlertEngine, AlertEvent};
use fsw_alert::threshold::ThresholdStore;
use fsw_data::standardize::{standardize, DerivedFrame};
use fsw_fred::error::FetchError;
use fsw_fred::observation::SeriesFrame;
use fsw_fred::series::SeriesDescriptor;
use log::warn;

/// Identifies one fetch request. The controller only honours the token
/// it issued most recently; anything older is a stale result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchToken(u64);

/// Inputs the controller reacts to. The first two come from the
/// operator; `FetchResolved` is the shell handing back a completed
/// fetch that the controller asked for earlier.
#[derive(Debug)]
pub enum DashboardEvent {
    SelectSeries(String),
    SetThreshold { series_id: String, value: f64 },
    FetchResolved {
        token: FetchToken,
        series_id: String,
        outcome: Result<SeriesFrame, FetchError>,
    },
}

/// Work the shell must carry out after an event. Fetches run in the
/// background and come back as `FetchResolved`; notifications are
/// fire-and-forget so a slow transport never stalls the panel.
#[derive(Debug, PartialEq)]
pub enum Effect {
    Fetch { token: FetchToken, series_id: String },
    Notify {
        event: AlertEvent,
        descriptor: SeriesDescriptor,
    },
}

/// What the chart region should show.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ChartState {
    #[default]
    Empty,
    Loading,
    Ready(ChartSpec),
    Failed(String),
}

/// Reactive core of the panel.
///
/// Owns the threshold overrides and the alert state, consumes
/// `DashboardEvent`s one at a time, and answers with the effects to
/// run. Everything here is synchronous; the shell owns all I/O.
pub struct DashboardController {
    catalog: Vec<SeriesDescriptor>,
    thresholds: ThresholdStore,
    engine: AlertEngine,
    selected: Option<String>,
    // Derived data from the most recent successful fetch; lets a
    // threshold edit re-evaluate without another round trip.
    cache: Option<(String, DerivedFrame)>,
    pending: Option<FetchToken>,
    next_token: u64,
    chart: ChartState,
    status: Option<String>,
}

impl DashboardController {
    pub fn new(catalog: Vec<SeriesDescriptor>) -> DashboardController {
        DashboardController {
            catalog,
            thresholds: ThresholdStore::new(),
            engine: AlertEngine::new(),
            selected: None,
            cache: None,
            pending: None,
            next_token: 0,
            chart: ChartState::default(),
            status: None,
        }
    }

    pub fn catalog(&self) -> &[SeriesDescriptor] {
        &self.catalog
    }

    pub fn selected(&self) -> Option<&SeriesDescriptor> {
        self.selected.as_deref().map(|id| self.descriptor(id))
    }

    /// The threshold the operator should see for the selected series:
    /// their override if one exists, else the catalog default.
    pub fn threshold_shown(&self) -> Option<f64> {
        self.selected()
            .map(|descriptor| self.thresholds.effective(descriptor))
    }

    pub fn chart(&self) -> &ChartState {
        &self.chart
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Feed one event through the pipeline and collect the effects the
    /// shell has to run.
    pub fn apply(&mut self, event: DashboardEvent) -> Vec<Effect> {
        match event {
            DashboardEvent::SelectSeries(series_id) => {
                // Validate the id up front; the selector is built from
                // the catalog, so a miss is a programming error.
                self.descriptor(&series_id);
                self.selected = Some(series_id.clone());
                self.status = None;
                self.chart = ChartState::Loading;
                vec![self.issue_fetch(series_id)]
            }
            DashboardEvent::SetThreshold { series_id, value } => {
                let descriptor = self.descriptor(&series_id).clone();
                let previous = self.thresholds.effective(&descriptor);
                if let Err(err) = self.thresholds.set(&series_id, value) {
                    self.status = Some(err.to_string());
                    return Vec::new();
                }
                self.status = None;
                // A new threshold regime may legitimately re-trigger on
                // data that already alerted. Re-committing the same
                // value is not a new regime and must not re-send.
                if value != previous {
                    self.engine.rearm(&series_id);
                }
                if self.selected.as_deref() != Some(series_id.as_str()) {
                    return Vec::new();
                }
                let cached = matches!(&self.cache, Some((cached_id, _)) if *cached_id == series_id);
                if cached {
                    self.run_pipeline(&descriptor)
                } else {
                    self.chart = ChartState::Loading;
                    vec![self.issue_fetch(series_id)]
                }
            }
            DashboardEvent::FetchResolved {
                token,
                series_id,
                outcome,
            } => {
                if self.pending != Some(token) {
                    // Superseded by a newer request; render nothing of it.
                    return Vec::new();
                }
                self.pending = None;
                match outcome {
                    Ok(frame) => {
                        let descriptor = self.descriptor(&series_id).clone();
                        let derived = standardize(frame.observations());
                        self.cache = Some((series_id, derived));
                        self.run_pipeline(&descriptor)
                    }
                    Err(err) => {
                        warn!("fetch for {} failed: {}", series_id, err);
                        self.cache = None;
                        self.chart = ChartState::Failed(err.to_string());
                        self.status = Some(format!("fetch for {} failed: {}", series_id, err));
                        Vec::new()
                    }
                }
            }
        }
    }

    /// Evaluate and render the cached frame for one series.
    fn run_pipeline(&mut self, descriptor: &SeriesDescriptor) -> Vec<Effect> {
        let threshold = self.thresholds.effective(descriptor);
        let Some((cached_id, frame)) = &self.cache else {
            return Vec::new();
        };
        if *cached_id != descriptor.series_id {
            return Vec::new();
        }
        let alert = self.engine.evaluate(&descriptor.series_id, frame, threshold);
        let spec = chart::render(descriptor, frame, threshold);
        self.chart = ChartState::Ready(spec);
        match alert {
            Some(event) => vec![Effect::Notify {
                event,
                descriptor: descriptor.clone(),
            }],
            None => Vec::new(),
        }
    }

    fn issue_fetch(&mut self, series_id: String) -> Effect {
        self.next_token += 1;
        let token = FetchToken(self.next_token);
        self.pending = Some(token);
        Effect::Fetch { token, series_id }
    }

    fn descriptor(&self, series_id: &str) -> &SeriesDescriptor {
        self.catalog
            .iter()
            .find(|descriptor| descriptor.series_id == series_id)
            .unwrap_or_else(|| panic!("unknown series id: {}", series_id))
    }
}
