use crate::engine::AlertEvent;
use crate::error::NotifyError;
use async_trait::async_trait;
use fsw_fred::series::SeriesDescriptor;

/// Boundary for delivering alerts to the operator.
///
/// The live implementation speaks SMTP; tests substitute a recording
/// notifier. Delivery failure is the caller's to log, never to retry.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(
        &self,
        event: &AlertEvent,
        descriptor: &SeriesDescriptor,
    ) -> Result<(), NotifyError>;

    /// One-shot connectivity check, sent at startup so a broken mail
    /// setup surfaces before the first real crossing.
    async fn self_check(&self) -> Result<(), NotifyError>;
}

pub fn alert_subject(descriptor: &SeriesDescriptor) -> String {
    format!("Alert: {} crossed the threshold!", descriptor.display_name)
}

pub fn alert_body(event: &AlertEvent, descriptor: &SeriesDescriptor) -> String {
    format!(
        "The instrument {} has crossed the threshold of {}.\nCurrent standardized value: {}",
        descriptor.display_name, event.threshold, event.z
    )
}

pub const SELF_CHECK_SUBJECT: &str = "Test Email";
pub const SELF_CHECK_BODY: &str =
    "This is a test email to confirm the SMTP setup works correctly.";
