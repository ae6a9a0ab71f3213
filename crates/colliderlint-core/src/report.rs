//! Report rows and summary counters.

use std::path::PathBuf;
use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ScanWarning;

/// Report header line. The trailing "Check" column is carried over from the
/// historical report layout and is always empty in data rows.
pub const REPORT_HEADER: &str =
    "Prefab\tGameObject\tLocal scale\tLossy scale\tMesh\tPresent\tRead/Write\tCheck";

/// Default report filename. Tab-separated content despite the extension;
/// kept for compatibility with the historical report.
pub const REPORT_FILE_NAME: &str = "ConflictiveMeshColliders.csv";

/// Format a scale vector the way report rows expect: `(x,y,z)` with each
/// component in its shortest form (`1`, `0.5`, `-1`).
pub fn format_scale(scale: Vec3) -> String {
    format!("({},{},{})", scale.x, scale.y, scale.z)
}

/// One conflictive mesh collider found during a scan.
///
/// Created during traversal, appended to the report in traversal order,
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    /// Path identifying the source prefab asset.
    pub asset_path: String,
    /// Slash-joined node names from the prefab's display name to the node.
    pub hierarchy_path: String,
    /// Scale of the node relative to its parent.
    pub local_scale: Vec3,
    /// Effective world scale: componentwise product of all ancestor local
    /// scales, including the node's own. Approximate when shear is present.
    pub lossy_scale: Vec3,
    /// Name of the collider's mesh, if one is assigned.
    pub mesh_name: Option<String>,
    /// Asset path of the mesh, if known.
    pub mesh_asset_path: Option<String>,
    /// Importer read/write flag: `Some(true)`/`Some(false)` when known,
    /// `None` when there is no importer metadata.
    pub mesh_readable: Option<bool>,
}

impl ScanResult {
    /// Render this result as one tab-separated report row.
    ///
    /// The row ends with a tab: the trailing "Check" column is always empty.
    pub fn to_row(&self) -> String {
        let mesh = self.mesh_name.as_deref().unwrap_or("[null]");
        let mesh_asset = self.mesh_asset_path.as_deref().unwrap_or("-");
        let readable = match self.mesh_readable {
            Some(true) => "true",
            Some(false) => "false",
            None => "-",
        };
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}\t{}\t",
            self.asset_path,
            self.hierarchy_path,
            format_scale(self.local_scale),
            format_scale(self.lossy_scale),
            mesh,
            mesh_asset,
            readable,
        )
    }
}

/// Aggregate counters for a scan.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ScanSummary {
    /// Total assets visited, prefab or not.
    pub assets_scanned: u64,
    /// Assets that parsed as prefabs.
    pub prefabs_found: u64,
    /// Prefabs containing at least one conflictive collider.
    pub conflictive_prefabs: u64,
    /// Individual conflictive colliders across all prefabs.
    pub conflictive_colliders: u64,
}

impl ScanSummary {
    /// Create empty counters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one visited asset.
    pub fn record_asset(&mut self) {
        self.assets_scanned += 1;
    }

    /// Record one successfully loaded prefab.
    pub fn record_prefab(&mut self) {
        self.prefabs_found += 1;
    }

    /// Record the outcome of scanning one prefab hierarchy.
    pub fn record_prefab_scan(&mut self, conflictive: bool, collider_count: u64) {
        if conflictive {
            self.conflictive_prefabs += 1;
        }
        self.conflictive_colliders += collider_count;
    }
}

/// Complete scan outcome: counters, rows, warnings, timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// Aggregate counters.
    pub summary: ScanSummary,
    /// Conflictive colliders in traversal order.
    pub results: Vec<ScanResult>,
    /// Non-fatal per-asset failures encountered along the way.
    pub warnings: Vec<ScanWarning>,
    /// Wall-clock duration of the scan.
    pub duration: Duration,
    /// Where the report file was written.
    pub report_path: PathBuf,
    /// Whether the scan was cancelled before visiting every asset.
    pub cancelled: bool,
}

impl ScanReport {
    /// Check if there were any warnings during the scan.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
