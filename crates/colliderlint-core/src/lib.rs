//! Core types for colliderlint.
//!
//! This crate provides the fundamental data structures shared across the
//! colliderlint ecosystem: the prefab node tree, the conflictive-scale
//! predicate, report rows and counters, and scan configuration.

mod config;
mod error;
mod node;
mod report;
mod scale;

pub use config::{ScanConfig, ScanConfigBuilder};
pub use error::{ScanError, ScanWarning, WarningKind};
pub use node::{ColliderInfo, MeshRef, PrefabNode};
pub use report::{
    REPORT_FILE_NAME, REPORT_HEADER, ScanReport, ScanResult, ScanSummary, format_scale,
};
pub use scale::{SCALE_EPSILON, is_conflictive_scale};
