//! `stockroom` application wiring: configuration, sample data and reporting.

pub mod config;
pub mod report;
pub mod seed;

pub use config::AppConfig;
