//! Incremental batched scan driver.
//!
//! The driver is an explicit state machine: `step()` processes a small
//! batch of assets and returns, so whatever loop hosts it (CLI, test,
//! editor tick) stays responsive. Batch size never affects results.

use std::path::{Path, PathBuf};
use std::time::Instant;

use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use colliderlint_core::{
    ScanConfig, ScanError, ScanReport, ScanResult, ScanSummary, ScanWarning,
};

use crate::assets;
use crate::hierarchy::scan_prefab;
use crate::progress::ScanProgress;
use crate::report::write_report;

/// Outcome of one driver step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Assets remain; call `step()` again.
    Pending,
    /// Every asset has been processed.
    Finished,
    /// The cancellation token fired; remaining assets are skipped.
    Cancelled,
}

/// Batched prefab scanner over a project directory.
#[derive(Debug)]
pub struct ScanDriver {
    config: ScanConfig,
    root: PathBuf,
    assets: Vec<PathBuf>,
    cursor: usize,
    summary: ScanSummary,
    results: Vec<ScanResult>,
    warnings: Vec<ScanWarning>,
    started: Instant,
    cancelled: bool,
    progress_tx: broadcast::Sender<ScanProgress>,
    cancel: CancellationToken,
}

impl ScanDriver {
    /// Set up a scan: validate the root and enumerate every asset under it.
    pub fn new(config: ScanConfig) -> Result<Self, ScanError> {
        let root = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;
        if !root.is_dir() {
            return Err(ScanError::NotADirectory { path: root });
        }

        let mut warnings = Vec::new();
        let assets = assets::enumerate_assets(&root, &config, &mut warnings);

        let (progress_tx, _) = broadcast::channel(100);
        Ok(Self {
            config,
            root,
            assets,
            cursor: 0,
            summary: ScanSummary::new(),
            results: Vec::new(),
            warnings,
            started: Instant::now(),
            cancelled: false,
            progress_tx,
            cancel: CancellationToken::new(),
        })
    }

    /// Subscribe to progress snapshots, one per step.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Token that cancels the scan cooperatively. Checked once per step;
    /// whatever has accumulated is still flushed by `finish()`.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Canonicalized project root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of assets enumerated for this scan.
    pub fn assets_total(&self) -> usize {
        self.assets.len()
    }

    /// Current progress snapshot.
    pub fn progress(&self) -> ScanProgress {
        ScanProgress {
            assets_processed: self.cursor as u64,
            assets_total: self.assets.len() as u64,
            current_path: self
                .cursor
                .checked_sub(1)
                .and_then(|i| self.assets.get(i))
                .cloned()
                .unwrap_or_default(),
            prefabs_found: self.summary.prefabs_found,
            conflicts_found: self.summary.conflictive_colliders,
            warnings_count: self.warnings.len() as u64,
            elapsed: self.started.elapsed(),
        }
    }

    /// Process up to `batch_size` assets, emit a progress snapshot, and
    /// report whether the scan is pending, finished, or cancelled.
    pub fn step(&mut self) -> StepOutcome {
        if self.cancelled || self.cancel.is_cancelled() {
            self.cancelled = true;
            return StepOutcome::Cancelled;
        }

        let end = (self.cursor + self.config.batch_size).min(self.assets.len());
        while self.cursor < end {
            let path = self.assets[self.cursor].clone();
            self.cursor += 1;
            self.process_asset(&path);
        }

        let _ = self.progress_tx.send(self.progress());

        if self.cursor >= self.assets.len() {
            StepOutcome::Finished
        } else if self.cancel.is_cancelled() {
            self.cancelled = true;
            StepOutcome::Cancelled
        } else {
            StepOutcome::Pending
        }
    }

    fn process_asset(&mut self, path: &Path) {
        self.summary.record_asset();
        if !self.config.is_prefab_path(path) {
            return;
        }

        match assets::load_prefab(path) {
            Ok(node) => {
                self.summary.record_prefab();
                let asset_path = assets::asset_path(&self.root, path);
                let display_name = assets::display_name(path);
                let scan = scan_prefab(&asset_path, &display_name, &node);
                self.summary
                    .record_prefab_scan(scan.conflictive, scan.results.len() as u64);
                self.results.extend(scan.results);
            }
            Err(warning) => {
                tracing::error!(
                    target: "scan",
                    path = %warning.path.display(),
                    "{}",
                    warning.message
                );
                self.warnings.push(warning);
            }
        }
    }

    /// Finalize the scan and flush the report file. Runs whether the scan
    /// completed or was cancelled; whatever accumulated is written.
    ///
    /// The report (counters, rows, warnings) is returned even when the
    /// flush fails, so a failed write never hides what the scan found.
    /// `report_path` names the attempted location either way.
    pub fn finish(self) -> (ScanReport, Result<(), ScanError>) {
        let report_path = self.config.report_path(&self.root);
        let write_result = write_report(&report_path, &self.results);

        let report = ScanReport {
            summary: self.summary,
            results: self.results,
            warnings: self.warnings,
            duration: self.started.elapsed(),
            report_path,
            cancelled: self.cancelled,
        };
        (report, write_result)
    }

    /// Drive the scan to completion (or cancellation) and flush the report.
    pub fn run_to_completion(mut self) -> Result<ScanReport, ScanError> {
        while self.step() == StepOutcome::Pending {}
        let (report, write_result) = self.finish();
        write_result?;
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use colliderlint_core::REPORT_HEADER;
    use std::fs;
    use tempfile::TempDir;

    fn create_test_project() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("project/Assets/Props")).unwrap();

        // Conflictive: child with a negative scale component.
        fs::write(
            root.join("project/Assets/Props/Crate.prefab"),
            r#"{
                "name": "Crate",
                "children": [{
                    "name": "Lid",
                    "local_scale": [1.0, -1.0, 1.0],
                    "collider": {"mesh": {"name": "lid_mesh"}}
                }]
            }"#,
        )
        .unwrap();

        // Clean prefab.
        fs::write(
            root.join("project/Assets/Props/Barrel.prefab"),
            r#"{"name": "Barrel", "collider": {}}"#,
        )
        .unwrap();

        // Not a prefab.
        fs::write(root.join("project/Assets/notes.txt"), "todo").unwrap();

        temp
    }

    fn config_for(temp: &TempDir) -> ScanConfig {
        ScanConfig::builder()
            .root(temp.path().join("project"))
            .build()
            .unwrap()
    }

    #[test]
    fn test_end_to_end_scan() {
        let temp = create_test_project();
        let driver = ScanDriver::new(config_for(&temp)).unwrap();
        assert_eq!(driver.assets_total(), 3);

        let report = driver.run_to_completion().unwrap();

        assert_eq!(report.summary.assets_scanned, 3);
        assert_eq!(report.summary.prefabs_found, 2);
        assert_eq!(report.summary.conflictive_prefabs, 1);
        assert_eq!(report.summary.conflictive_colliders, 1);
        assert!(!report.cancelled);

        assert_eq!(report.results.len(), 1);
        assert_eq!(report.results[0].hierarchy_path, "Crate/Lid");
        assert_eq!(report.results[0].asset_path, "Assets/Props/Crate.prefab");

        // Report lands next to the project root by default.
        assert_eq!(
            report.report_path,
            temp.path()
                .canonicalize()
                .unwrap()
                .join("ConflictiveMeshColliders.csv")
        );
        let written = fs::read_to_string(&report.report_path).unwrap();
        assert!(written.starts_with(REPORT_HEADER));
        assert!(written.contains("Crate/Lid"));
        assert!(written.contains("lid_mesh"));
    }

    #[test]
    fn test_batch_size_does_not_affect_results() {
        let temp = create_test_project();

        let one_at_a_time = ScanDriver::new(
            ScanConfig::builder()
                .root(temp.path().join("project"))
                .batch_size(1usize)
                .build()
                .unwrap(),
        )
        .unwrap()
        .run_to_completion()
        .unwrap();

        let all_at_once = ScanDriver::new(
            ScanConfig::builder()
                .root(temp.path().join("project"))
                .batch_size(100usize)
                .build()
                .unwrap(),
        )
        .unwrap()
        .run_to_completion()
        .unwrap();

        assert_eq!(
            one_at_a_time.summary.assets_scanned,
            all_at_once.summary.assets_scanned
        );
        assert_eq!(one_at_a_time.results.len(), all_at_once.results.len());
        assert_eq!(
            one_at_a_time.results[0].hierarchy_path,
            all_at_once.results[0].hierarchy_path
        );
    }

    #[test]
    fn test_step_batches_and_finishes() {
        let temp = create_test_project();
        let mut driver = ScanDriver::new(
            ScanConfig::builder()
                .root(temp.path().join("project"))
                .batch_size(2usize)
                .build()
                .unwrap(),
        )
        .unwrap();

        assert_eq!(driver.step(), StepOutcome::Pending);
        assert_eq!(driver.progress().assets_processed, 2);
        assert_eq!(driver.step(), StepOutcome::Finished);
        assert_eq!(driver.progress().fraction(), 1.0);
    }

    #[test]
    fn test_malformed_prefab_is_skipped_with_warning() {
        let temp = create_test_project();
        fs::write(
            temp.path().join("project/Assets/Broken.prefab"),
            "{ not valid json",
        )
        .unwrap();

        let report = ScanDriver::new(config_for(&temp))
            .unwrap()
            .run_to_completion()
            .unwrap();

        // The bad asset is counted as scanned but not as a prefab, and the
        // rest of the scan still happens.
        assert_eq!(report.summary.assets_scanned, 4);
        assert_eq!(report.summary.prefabs_found, 2);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.results.len(), 1);
    }

    #[test]
    fn test_cancel_before_first_step_flushes_empty_report() {
        let temp = create_test_project();
        let mut driver = ScanDriver::new(config_for(&temp)).unwrap();
        driver.cancellation_token().cancel();

        assert_eq!(driver.step(), StepOutcome::Cancelled);
        let (report, write_result) = driver.finish();
        write_result.unwrap();

        assert!(report.cancelled);
        assert_eq!(report.summary.assets_scanned, 0);
        let written = fs::read_to_string(&report.report_path).unwrap();
        assert_eq!(written, format!("{REPORT_HEADER}\n"));
    }

    #[test]
    fn test_cancel_mid_scan_keeps_partial_results() {
        let temp = create_test_project();
        let mut driver = ScanDriver::new(
            ScanConfig::builder()
                .root(temp.path().join("project"))
                .batch_size(2usize)
                .build()
                .unwrap(),
        )
        .unwrap();

        assert_eq!(driver.step(), StepOutcome::Pending);
        driver.cancellation_token().cancel();
        assert_eq!(driver.step(), StepOutcome::Cancelled);

        let (report, write_result) = driver.finish();
        write_result.unwrap();
        assert!(report.cancelled);
        assert_eq!(report.summary.assets_scanned, 2);
    }

    #[test]
    fn test_progress_snapshots_are_broadcast() {
        let temp = create_test_project();
        let mut driver = ScanDriver::new(
            ScanConfig::builder()
                .root(temp.path().join("project"))
                .batch_size(1usize)
                .build()
                .unwrap(),
        )
        .unwrap();
        let mut rx = driver.subscribe();

        assert_eq!(driver.step(), StepOutcome::Pending);
        let progress = rx.try_recv().unwrap();
        assert_eq!(progress.assets_processed, 1);
        assert_eq!(progress.assets_total, 3);
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let temp = TempDir::new().unwrap();
        let config = ScanConfig::new(temp.path().join("does-not-exist"));
        let err = ScanDriver::new(config).unwrap_err();
        assert!(matches!(err, ScanError::NotFound { .. }));
    }

    #[test]
    fn test_empty_project_finishes_immediately() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("project")).unwrap();
        let mut driver = ScanDriver::new(config_for(&temp)).unwrap();

        assert_eq!(driver.step(), StepOutcome::Finished);
        let (report, write_result) = driver.finish();
        write_result.unwrap();
        assert_eq!(report.summary.assets_scanned, 0);
        assert!(!report.cancelled);
    }

    #[test]
    fn test_failed_report_write_still_returns_summary() {
        let temp = create_test_project();
        let mut config = config_for(&temp);
        // A directory cannot be overwritten as a file, so the flush fails.
        config.output = Some(temp.path().join("project"));

        let mut driver = ScanDriver::new(config).unwrap();
        while driver.step() == StepOutcome::Pending {}
        let (report, write_result) = driver.finish();

        assert!(matches!(write_result, Err(ScanError::Report { .. })));
        assert_eq!(report.summary.assets_scanned, 3);
        assert_eq!(report.summary.prefabs_found, 2);
        assert_eq!(report.summary.conflictive_colliders, 1);
        assert_eq!(report.results.len(), 1);
        // Even on failure the report names the attempted location.
        assert_eq!(report.report_path, temp.path().join("project"));
    }
}
