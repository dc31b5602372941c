//! wxdash library
//!
//! Weather-code catalog, historical analysis, Open-Meteo clients and text
//! rendering behind the `wxdash` binary. Exposed as a library for
//! integration tests.

pub mod analysis;
pub mod app;
pub mod catalog;
pub mod cli;
pub mod data;
pub mod logging;
pub mod render;

pub use analysis::{analyze, analyze_in, AnalysisSummary};
pub use catalog::{describe, describe_in, icon_for, Locale};
pub use data::DailySeries;
