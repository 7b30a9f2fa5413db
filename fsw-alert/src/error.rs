/// Error types for the alert library
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AlertError {
    #[error("invalid threshold {0}: thresholds must be non-negative")]
    InvalidThreshold(f64),
}

#[derive(Error, Debug)]
pub enum NotifyError {
    /// The notifier could not deliver the message
    #[error("delivery failed: {0}")]
    Delivery(String),

    #[cfg(feature = "smtp")]
    #[error("failed to compose mail message: {0}")]
    Compose(#[from] lettre::error::Error),

    #[cfg(feature = "smtp")]
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[cfg(feature = "smtp")]
    #[error("smtp delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}
