//! Launch the interactive panel.

use crate::config;
use fsw_alert::notify::Notifier;
use fsw_alert::smtp::SmtpNotifier;
use fsw_fred::client::FredClient;
use fsw_fred::series::SeriesDescriptor;
use fsw_panel_ui::app::{self, App};
use log::{error, info};
use std::sync::Arc;

/// Wire the live provider and notifier to the panel and run it.
///
/// Before the first interactive event, one test message is sent so a
/// broken mail setup is visible immediately. A failed check is logged
/// and the panel starts anyway.
pub async fn run_panel() -> anyhow::Result<()> {
    let config = config::load()?;
    let provider = Arc::new(FredClient::new(config.fred_api_key)?);
    let notifier = Arc::new(SmtpNotifier::new(&config.smtp)?);

    match notifier.self_check().await {
        Ok(()) => info!("smtp self-check succeeded"),
        Err(err) => error!("smtp self-check failed: {}", err),
    }

    let app = App::new(SeriesDescriptor::get_series_vector(), provider, notifier);
    app::run(app).await
}
