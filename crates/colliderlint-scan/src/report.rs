//! TSV report rendering and writing.

use std::path::Path;

use colliderlint_core::{REPORT_HEADER, ScanError, ScanResult};

/// Render the full report: header line plus one row per result, in
/// traversal order. UTF-8, tab-separated, `\n` line endings.
pub fn render_report(results: &[ScanResult]) -> String {
    let mut out = String::from(REPORT_HEADER);
    out.push('\n');
    for result in results {
        out.push_str(&result.to_row());
        out.push('\n');
    }
    out
}

/// Write the report file. Called exactly once per scan, at finish, whether
/// the scan completed or was cancelled.
pub fn write_report(path: &Path, results: &[ScanResult]) -> Result<(), ScanError> {
    std::fs::write(path, render_report(results)).map_err(|source| ScanError::Report {
        path: path.to_path_buf(),
        source,
    })
}
