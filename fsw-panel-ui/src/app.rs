use crate::components;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use fsw_alert::notify::Notifier;
use fsw_dashboard::controller::{DashboardController, DashboardEvent, Effect, FetchToken};
use fsw_fred::error::FetchError;
use fsw_fred::observation::SeriesFrame;
use fsw_fred::provider::SeriesProvider;
use fsw_fred::series::SeriesDescriptor;
use log::error;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

/// Events sent from background tasks back to the panel loop.
pub(crate) enum AppEvent {
    FetchDone {
        token: FetchToken,
        series_id: String,
        outcome: Result<SeriesFrame, FetchError>,
    },
    NotifySent(String),
    NotifyFailed(String),
}

/// Panel state: the controller plus everything that is purely about
/// presentation (cursor position, edit buffer, transient notices).
pub struct App {
    pub(crate) controller: DashboardController,
    provider: Arc<dyn SeriesProvider>,
    notifier: Arc<dyn Notifier>,
    pub(crate) selector_index: usize,
    pub(crate) threshold_input: String,
    pub(crate) editing: bool,
    pub(crate) notice: Option<String>,
    pub(crate) event_rx: mpsc::Receiver<AppEvent>,
    event_tx: mpsc::Sender<AppEvent>,
    should_quit: bool,
}

impl App {
    pub fn new(
        catalog: Vec<SeriesDescriptor>,
        provider: Arc<dyn SeriesProvider>,
        notifier: Arc<dyn Notifier>,
    ) -> App {
        let (tx, rx) = mpsc::channel(100);
        App {
            controller: DashboardController::new(catalog),
            provider,
            notifier,
            selector_index: 0,
            threshold_input: String::new(),
            editing: false,
            notice: None,
            event_rx: rx,
            event_tx: tx,
            should_quit: false,
        }
    }

    /// Run every effect the controller asked for. Fetches and
    /// notifications go to background tasks that report back through
    /// the event channel, so the draw loop never waits on I/O.
    pub(crate) fn run_effects(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Fetch { token, series_id } => {
                    let provider = self.provider.clone();
                    let tx = self.event_tx.clone();
                    tokio::spawn(async move {
                        let outcome = provider.fetch(&series_id).await;
                        let _ = tx
                            .send(AppEvent::FetchDone {
                                token,
                                series_id,
                                outcome,
                            })
                            .await;
                    });
                }
                Effect::Notify { event, descriptor } => {
                    let notifier = self.notifier.clone();
                    let tx = self.event_tx.clone();
                    tokio::spawn(async move {
                        match notifier.notify(&event, &descriptor).await {
                            Ok(()) => {
                                let _ = tx
                                    .send(AppEvent::NotifySent(descriptor.display_name.clone()))
                                    .await;
                            }
                            Err(err) => {
                                error!(
                                    "alert delivery for {} failed: {}",
                                    event.series_id, err
                                );
                                let _ = tx.send(AppEvent::NotifyFailed(err.to_string())).await;
                            }
                        }
                    });
                }
            }
        }
    }

    pub(crate) fn on_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::FetchDone {
                token,
                series_id,
                outcome,
            } => {
                let effects = self.controller.apply(DashboardEvent::FetchResolved {
                    token,
                    series_id,
                    outcome,
                });
                self.run_effects(effects);
            }
            AppEvent::NotifySent(name) => {
                self.notice = Some(format!("alert sent for {}", name));
            }
            AppEvent::NotifyFailed(err) => {
                self.notice = Some(format!("alert delivery failed: {}", err));
            }
        }
    }

    pub(crate) fn on_key(&mut self, code: KeyCode) {
        if self.editing {
            self.on_edit_key(code);
        } else {
            self.on_nav_key(code);
        }
    }

    fn on_nav_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Up => {
                self.selector_index = self.selector_index.saturating_sub(1);
            }
            KeyCode::Down => {
                if self.selector_index + 1 < self.controller.catalog().len() {
                    self.selector_index += 1;
                }
            }
            KeyCode::Enter => {
                if let Some(descriptor) = self.controller.catalog().get(self.selector_index) {
                    let series_id = descriptor.series_id.clone();
                    self.notice = None;
                    let effects = self
                        .controller
                        .apply(DashboardEvent::SelectSeries(series_id));
                    self.run_effects(effects);
                }
            }
            KeyCode::Char('t') => {
                if let Some(value) = self.controller.threshold_shown() {
                    self.threshold_input = value.to_string();
                    self.editing = true;
                }
            }
            // Re-fetch the active series, e.g. after a failed fetch.
            KeyCode::Char('r') => {
                if let Some(descriptor) = self.controller.selected() {
                    let series_id = descriptor.series_id.clone();
                    let effects = self
                        .controller
                        .apply(DashboardEvent::SelectSeries(series_id));
                    self.run_effects(effects);
                }
            }
            _ => {}
        }
    }

    fn on_edit_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Enter => match self.threshold_input.parse::<f64>() {
                Ok(value) => {
                    if let Some(descriptor) = self.controller.selected() {
                        let series_id = descriptor.series_id.clone();
                        let effects = self
                            .controller
                            .apply(DashboardEvent::SetThreshold { series_id, value });
                        self.run_effects(effects);
                    }
                    self.editing = false;
                }
                Err(_) => {
                    self.notice = Some(format!("not a number: {}", self.threshold_input));
                }
            },
            KeyCode::Esc => self.editing = false,
            KeyCode::Backspace => {
                self.threshold_input.pop();
            }
            // The store rejects negatives itself; letting them through
            // here is what makes that rejection visible to the operator.
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => {
                self.threshold_input.push(c);
            }
            _ => {}
        }
    }
}

/// Drive the panel until the operator quits.
pub async fn run(mut app: App) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Open on the first catalog entry instead of an empty chart.
    if let Some(descriptor) = app.controller.catalog().first() {
        let series_id = descriptor.series_id.clone();
        let effects = app.controller.apply(DashboardEvent::SelectSeries(series_id));
        app.run_effects(effects);
    }

    let tick_rate = Duration::from_millis(50);
    let mut last_tick = Instant::now();

    while !app.should_quit {
        terminal.draw(|f| components::draw(f, &app))?;

        while let Ok(event) = app.event_rx.try_recv() {
            app.on_app_event(event);
        }

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key.code);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }
    }

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
