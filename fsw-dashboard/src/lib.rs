//! Reactive state for the interactive panel.
//!
//! The controller consumes panel events (series selection, threshold
//! edits, resolved fetches) and answers with the effects the shell
//! should run. All alerting and rendering decisions live here, behind
//! a synchronous API that tests can drive without any UI or I/O.

pub mod chart;
pub mod controller;
