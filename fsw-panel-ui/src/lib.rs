//! Terminal panel for the series monitor.
//!
//! A thin shell around [`fsw_dashboard::controller::DashboardController`]:
//! keys become controller events, controller effects become background
//! tasks, and the widgets only ever draw what the controller says.

pub mod app;
pub mod components;
