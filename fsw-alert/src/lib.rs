//! Alerting for monitored series.
//!
//! Decides when a standardized signal has crossed its threshold,
//! deduplicates repeat crossings, and delivers notifications by mail.

pub mod engine;
pub mod error;
pub mod notify;
pub mod threshold;

#[cfg(feature = "smtp")]
pub mod smtp;
