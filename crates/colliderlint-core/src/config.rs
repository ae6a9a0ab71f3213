//! Scan configuration types.

use std::path::{Path, PathBuf};

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

use crate::report::REPORT_FILE_NAME;

/// Configuration for a prefab scan.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Project directory to scan.
    pub root: PathBuf,

    /// Report file location. Defaults to a sibling of the project root.
    #[builder(default)]
    #[serde(default)]
    pub output: Option<PathBuf>,

    /// Assets processed per driver step. Purely a responsiveness knob;
    /// does not affect results.
    #[builder(default = "5")]
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// File extension that classifies an asset as a prefab.
    #[builder(default = "String::from(\"prefab\")")]
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Follow symbolic links while enumerating assets.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Include hidden files (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,
}

fn default_batch_size() -> usize {
    5
}

fn default_extension() -> String {
    String::from("prefab")
}

fn default_true() -> bool {
    true
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        if let Some(batch_size) = self.batch_size {
            if batch_size == 0 {
                return Err("Batch size must be at least 1".to_string());
            }
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a project directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            output: None,
            batch_size: 5,
            extension: default_extension(),
            follow_symlinks: false,
            include_hidden: true,
        }
    }

    /// Check whether a path classifies as a prefab asset.
    pub fn is_prefab_path(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(&self.extension))
    }

    /// Resolve where the report file goes for a given (canonicalized) root:
    /// the explicit `output` if set, otherwise `ConflictiveMeshColliders.csv`
    /// next to the project root. A root with no parent keeps the file inside
    /// the root itself.
    pub fn report_path(&self, root: &Path) -> PathBuf {
        match &self.output {
            Some(output) => output.clone(),
            None => root
                .parent()
                .unwrap_or(root)
                .join(REPORT_FILE_NAME),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
