//! One-shot evaluation sweep over the whole catalog.
//!
//! Fetches each monitored series once, standardizes it, evaluates the
//! latest signal against the catalog default threshold and delivers
//! alerts for crossings. Intended for cron-style scheduled runs where
//! nobody is watching the panel.

use crate::config;
use chrono::NaiveDate;
use fsw_alert::engine::AlertEngine;
use fsw_alert::notify::Notifier;
use fsw_alert::smtp::SmtpNotifier;
use fsw_data::standardize;
use fsw_fred::client::FredClient;
use fsw_fred::provider::SeriesProvider;
use fsw_fred::series::SeriesDescriptor;
use log::{error, info};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::time::Duration;

const REPORT_HEADER: [&str; 6] = [
    "SERIES_ID",
    "DISPLAY_NAME",
    "LATEST_DATE",
    "LATEST_Z",
    "THRESHOLD",
    "ALERTED",
];

// Field order matches REPORT_HEADER.
#[derive(Debug, Serialize)]
struct ReportRow {
    series_id: String,
    display_name: String,
    latest_date: Option<NaiveDate>,
    latest_z: Option<f64>,
    threshold: f64,
    alerted: bool,
}

pub async fn run_check(report_csv: Option<&str>, dry_run: bool) -> anyhow::Result<()> {
    let api_key = config::load_fred()?;
    let provider = FredClient::new(api_key)?;
    let notifier = if dry_run {
        None
    } else {
        Some(SmtpNotifier::new(&config::load_smtp()?)?)
    };

    let catalog = SeriesDescriptor::get_series_vector();
    info!(
        "checking {} series against default thresholds",
        catalog.len()
    );

    let rows = sweep(
        &provider,
        notifier.as_ref().map(|n| n as &dyn Notifier),
        &catalog,
        // Be polite to the FRED server
        Duration::from_millis(500),
    )
    .await;

    if let Some(path) = report_csv {
        write_report(File::create(path)?, &rows)?;
        info!("report written to {}", path);
    }

    info!(
        "check complete: {} series evaluated, {} alerts",
        rows.len(),
        rows.iter().filter(|row| row.alerted).count()
    );
    Ok(())
}

/// Evaluate every catalog entry once. Individual fetch failures are
/// logged and skipped so one broken series never aborts the batch; a
/// failed delivery is logged and the sweep moves on.
async fn sweep(
    provider: &dyn SeriesProvider,
    notifier: Option<&dyn Notifier>,
    catalog: &[SeriesDescriptor],
    delay: Duration,
) -> Vec<ReportRow> {
    let mut engine = AlertEngine::new();
    let mut rows = Vec::new();

    for descriptor in catalog {
        info!(
            "fetching {} ({})",
            descriptor.display_name, descriptor.series_id
        );

        let frame = match provider.fetch(&descriptor.series_id).await {
            Ok(frame) => frame,
            Err(err) => {
                error!("fetch for {} failed: {}", descriptor.series_id, err);
                continue;
            }
        };

        let derived = standardize::standardize(frame.observations());
        let threshold = descriptor.default_threshold;
        let signal = derived.latest_signal();
        let event = engine.evaluate(&descriptor.series_id, &derived, threshold);

        if let Some(event) = &event {
            match notifier {
                Some(notifier) => {
                    if let Err(err) = notifier.notify(event, descriptor).await {
                        error!(
                            "alert delivery for {} failed: {}",
                            descriptor.series_id, err
                        );
                    }
                }
                None => info!(
                    "dry run: {} crossed {} with z = {:.4}",
                    descriptor.series_id, threshold, event.z
                ),
            }
        }

        rows.push(ReportRow {
            series_id: descriptor.series_id.clone(),
            display_name: descriptor.display_name.clone(),
            latest_date: signal.map(|(date, _)| date),
            latest_z: signal.map(|(_, z)| z),
            threshold,
            alerted: event.is_some(),
        });

        tokio::time::sleep(delay).await;
    }

    rows
}

fn write_report<W: Write>(out: W, rows: &[ReportRow]) -> anyhow::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);
    // Written up front so the header survives a sweep with no rows.
    wtr.write_record(REPORT_HEADER)?;
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod test {
    use super::{sweep, write_report, ReportRow};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use fsw_alert::engine::AlertEvent;
    use fsw_alert::error::NotifyError;
    use fsw_alert::notify::Notifier;
    use fsw_fred::error::FetchError;
    use fsw_fred::observation::{Observation, SeriesFrame};
    use fsw_fred::provider::SeriesProvider;
    use fsw_fred::series::SeriesDescriptor;
    use std::sync::Mutex;
    use std::time::Duration;

    fn frame_of(values: &[f64]) -> SeriesFrame {
        let observations = values
            .iter()
            .enumerate()
            .map(|(i, v)| Observation {
                date: NaiveDate::from_ymd_opt(2024, 3, 1 + i as u32).unwrap(),
                value: Some(*v),
            })
            .collect();
        SeriesFrame::new(observations)
    }

    // One rising series, one unreachable, one flat.
    struct ScriptedProvider;

    #[async_trait]
    impl SeriesProvider for ScriptedProvider {
        async fn fetch(&self, series_id: &str) -> Result<SeriesFrame, FetchError> {
            match series_id {
                "UP" => Ok(frame_of(&[10.0, 11.0, 13.0, 16.0, 20.0])),
                "DOWN" => Err(FetchError::BadStatus(503)),
                _ => Ok(frame_of(&[5.0, 5.0, 5.0, 5.0])),
            }
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        delivered: Mutex<Vec<AlertEvent>>,
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn notify(
            &self,
            event: &AlertEvent,
            _descriptor: &SeriesDescriptor,
        ) -> Result<(), NotifyError> {
            self.delivered.lock().unwrap().push(event.clone());
            Ok(())
        }

        async fn self_check(&self) -> Result<(), NotifyError> {
            Ok(())
        }
    }

    #[derive(Default)]
    struct FailingNotifier {
        attempts: Mutex<usize>,
    }

    #[async_trait]
    impl Notifier for FailingNotifier {
        async fn notify(
            &self,
            _event: &AlertEvent,
            _descriptor: &SeriesDescriptor,
        ) -> Result<(), NotifyError> {
            *self.attempts.lock().unwrap() += 1;
            Err(NotifyError::Delivery("mailbox unavailable".to_string()))
        }

        async fn self_check(&self) -> Result<(), NotifyError> {
            Err(NotifyError::Delivery("mailbox unavailable".to_string()))
        }
    }

    fn catalog() -> Vec<SeriesDescriptor> {
        vec![
            SeriesDescriptor {
                series_id: "UP".to_string(),
                display_name: "Rising Series".to_string(),
                default_threshold: 1.0,
            },
            SeriesDescriptor {
                series_id: "DOWN".to_string(),
                display_name: "Unreachable Series".to_string(),
                default_threshold: 1.0,
            },
            SeriesDescriptor {
                series_id: "FLAT".to_string(),
                display_name: "Flat Series".to_string(),
                default_threshold: 1.0,
            },
        ]
    }

    #[tokio::test]
    async fn test_sweep_alerts_and_tolerates_failures() {
        let notifier = RecordingNotifier::default();
        let rows = sweep(
            &ScriptedProvider,
            Some(&notifier),
            &catalog(),
            Duration::ZERO,
        )
        .await;

        // The unreachable series is skipped, not reported.
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].series_id, "UP");
        assert!(rows[0].alerted);
        assert_eq!(rows[1].series_id, "FLAT");
        assert!(!rows[1].alerted);
        assert_eq!(rows[1].latest_z, None);

        let delivered = notifier.delivered.lock().unwrap();
        assert_eq!(delivered.len(), 1);
        assert_eq!(delivered[0].series_id, "UP");
    }

    #[tokio::test]
    async fn test_sweep_dry_run_sends_nothing() {
        let rows = sweep(&ScriptedProvider, None, &catalog(), Duration::ZERO).await;
        // The crossing is still evaluated and reported.
        assert!(rows[0].alerted);
    }

    #[tokio::test]
    async fn test_sweep_continues_after_failed_delivery() {
        let notifier = FailingNotifier::default();
        let rows = sweep(
            &ScriptedProvider,
            Some(&notifier),
            &catalog(),
            Duration::ZERO,
        )
        .await;

        // Delivery was attempted once and failed; the sweep still
        // covers the rest of the catalog and reports the crossing.
        assert_eq!(*notifier.attempts.lock().unwrap(), 1);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].alerted);
        assert!(!rows[1].alerted);
    }

    #[test]
    fn test_write_report() {
        let rows = vec![
            ReportRow {
                series_id: "BAMLC0A4CBBBEY".to_string(),
                display_name: "BBB Yield, AT&T, Ford, GM".to_string(),
                latest_date: NaiveDate::from_ymd_opt(2024, 3, 5),
                latest_z: Some(1.1618950038622251),
                threshold: 1.3,
                alerted: false,
            },
            ReportRow {
                series_id: "NASDAQ100".to_string(),
                display_name: "NASDAQ 100 Index".to_string(),
                latest_date: None,
                latest_z: None,
                threshold: 2.5,
                alerted: false,
            },
        ];
        let mut buf = Vec::new();
        write_report(&mut buf, &rows).unwrap();
        let text = String::from_utf8(buf).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "SERIES_ID,DISPLAY_NAME,LATEST_DATE,LATEST_Z,THRESHOLD,ALERTED"
        );
        // Display names containing commas stay one field.
        assert!(text.contains("\"BBB Yield, AT&T, Ford, GM\""));
        // A series with no signal reports empty date and z fields.
        assert!(text.contains("NASDAQ100,NASDAQ 100 Index,,,2.5,false"));
    }

    #[test]
    fn test_write_report_empty_still_has_header() {
        let mut buf = Vec::new();
        write_report(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(
            text.trim_end(),
            "SERIES_ID,DISPLAY_NAME,LATEST_DATE,LATEST_Z,THRESHOLD,ALERTED"
        );
    }
}
