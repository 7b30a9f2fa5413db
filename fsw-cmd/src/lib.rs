//! Command implementations for the series monitor CLI.
//!
//! Provides the interactive panel plus one-shot commands for sweeping
//! the whole catalog and inspecting it.

use clap::Subcommand;

pub mod chart;
pub mod check;
pub mod config;
pub mod panel;
pub mod series;

#[derive(Subcommand)]
pub enum Command {
    /// Open the interactive panel (selector, threshold field, chart)
    Panel,

    /// Fetch every catalog series once, evaluate it against its
    /// default threshold and send alerts for crossings
    Check {
        /// Output path for a per-series evaluation report CSV
        #[arg(short = 'r', long)]
        report_csv: Option<String>,

        /// Evaluate and report only; do not send any mail
        #[arg(long)]
        dry_run: bool,
    },

    /// Fetch one series and write its standardized chart as JSON
    Chart {
        /// Series id to chart, e.g. NASDAQ100
        #[arg(short = 's', long)]
        series_id: String,

        /// Output path for the chart JSON
        #[arg(short = 'o', long)]
        output_json: String,

        /// Threshold for the guide lines; defaults to the catalog value
        #[arg(short = 't', long)]
        threshold: Option<f64>,
    },

    /// List the monitored series catalog
    Series,
}

pub async fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Panel => panel::run_panel().await,
        Command::Check {
            report_csv,
            dry_run,
        } => check::run_check(report_csv.as_deref(), dry_run).await,
        Command::Chart {
            series_id,
            output_json,
            threshold,
        } => chart::run_chart(&series_id, &output_json, threshold).await,
        Command::Series => series::run_series(),
    }
}
