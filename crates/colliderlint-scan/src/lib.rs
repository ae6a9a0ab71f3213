//! Prefab scanning engine for colliderlint.
//!
//! This crate walks a project directory, loads every prefab asset, and
//! flags mesh colliders whose owning node has a negative or non-uniform
//! local scale.
//!
//! # Overview
//!
//! - **Asset enumeration** via jwalk, classification by extension
//! - **Hierarchy scan**: pre-order walk + conflictive-scale predicate
//! - **Incremental driver**: batched `step()` state machine with progress
//!   broadcasts and cooperative cancellation
//! - **TSV report** flushed once at finish, cancelled or not
//!
//! # Example
//!
//! ```rust,no_run
//! use colliderlint_scan::{ScanConfig, ScanDriver};
//!
//! let config = ScanConfig::new("/path/to/project");
//! let driver = ScanDriver::new(config).unwrap();
//! let report = driver.run_to_completion().unwrap();
//!
//! println!("Prefabs: {}", report.summary.prefabs_found);
//! println!("Conflictive colliders: {}", report.summary.conflictive_colliders);
//! ```
//!
//! # Incremental driving
//!
//! Host loops that need to stay responsive call `step()` themselves:
//!
//! ```rust,no_run
//! use colliderlint_scan::{ScanConfig, ScanDriver, StepOutcome};
//!
//! let mut driver = ScanDriver::new(ScanConfig::new(".")).unwrap();
//! while driver.step() == StepOutcome::Pending {
//!     // redraw UI, poll input, ...
//! }
//! let (report, write_result) = driver.finish();
//! write_result.unwrap();
//! # let _ = report;
//! ```

mod assets;
mod driver;
mod hierarchy;
mod progress;
mod report;

pub use assets::{enumerate_assets, load_prefab};
pub use driver::{ScanDriver, StepOutcome};
pub use hierarchy::{PrefabScan, scan_prefab};
pub use progress::ScanProgress;
pub use report::{render_report, write_report};

// Re-export core types for convenience
pub use colliderlint_core::{
    ColliderInfo, MeshRef, PrefabNode, REPORT_FILE_NAME, REPORT_HEADER, ScanConfig, ScanError,
    ScanReport, ScanResult, ScanSummary, ScanWarning, WarningKind,
};
