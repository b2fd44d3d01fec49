//! Shared types, error model, and configuration for the Curry dashboard.
//!
//! This crate is the foundation depended on by all other Curry crates.
//! It provides:
//! - [`DashboardError`]: the unified error type
//! - Domain types ([`RawOrderRecord`], [`CleanedOrderRecord`], column names)
//! - Configuration ([`AppConfig`], [`ViewConfig`], config loading)

pub mod config;
pub mod error;
pub mod types;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    AppConfig, DatasetConfig, FilterConfig, ReportsConfig, ViewConfig, config_dir,
    config_file_path, init_config, load_config, load_config_from, parse_cutoff,
};
pub use error::{DashboardError, Result};
pub use types::{
    CleanedOrderRecord, MISSING_SENTINEL, ORDER_DATE_FORMAT, RawOrderRecord, TIME_TAKEN_MARKER,
    columns, is_missing,
};
