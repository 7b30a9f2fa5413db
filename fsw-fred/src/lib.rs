pub mod error;
pub mod observation;
pub mod provider;
pub mod series;

#[cfg(feature = "api")]
pub mod client;
