//! Scan progress reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Progress snapshot emitted after each driver step.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Assets processed so far.
    pub assets_processed: u64,
    /// Total assets enumerated for this scan.
    pub assets_total: u64,
    /// Most recently processed asset.
    pub current_path: PathBuf,
    /// Prefabs successfully loaded so far.
    pub prefabs_found: u64,
    /// Conflictive colliders found so far.
    pub conflicts_found: u64,
    /// Warnings recorded so far.
    pub warnings_count: u64,
    /// Time elapsed since the scan started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            assets_processed: 0,
            assets_total: 0,
            current_path: PathBuf::new(),
            prefabs_found: 0,
            conflicts_found: 0,
            warnings_count: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Completed fraction in `[0, 1]`; 0.0 for an empty asset list.
    pub fn fraction(&self) -> f64 {
        if self.assets_total > 0 {
            self.assets_processed as f64 / self.assets_total as f64
        } else {
            0.0
        }
    }

    /// Completed percentage in `[0, 100]`.
    pub fn percent(&self) -> f64 {
        self.fraction() * 100.0
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction() {
        let mut progress = ScanProgress::new();
        assert_eq!(progress.fraction(), 0.0);

        progress.assets_total = 200;
        progress.assets_processed = 50;
        assert_eq!(progress.fraction(), 0.25);
        assert_eq!(progress.percent(), 25.0);
    }
}
