//! Asset enumeration and prefab loading.

use std::fs;
use std::path::{Path, PathBuf};

use jwalk::WalkDir;

use colliderlint_core::{PrefabNode, ScanConfig, ScanWarning, WarningKind};

/// Enumerate every file under the project root, prefab or not.
///
/// Mirrors the asset-database behaviour of listing all assets and leaving
/// classification to the caller. Entries that cannot be read become
/// warnings. The returned list is sorted so scan order is deterministic.
pub fn enumerate_assets(
    root: &Path,
    config: &ScanConfig,
    warnings: &mut Vec<ScanWarning>,
) -> Vec<PathBuf> {
    let walker = WalkDir::new(root)
        .skip_hidden(!config.include_hidden)
        .follow_links(config.follow_symlinks);

    let mut assets = Vec::new();
    for entry_result in walker {
        match entry_result {
            Ok(entry) => {
                if entry.file_type().is_file() {
                    assets.push(entry.path());
                }
            }
            Err(err) => {
                let path = err.path().map(|p| p.to_path_buf()).unwrap_or_default();
                warnings.push(ScanWarning::new(path, err.to_string(), WarningKind::WalkError));
            }
        }
    }

    assets.sort();
    assets
}

/// Load and parse a prefab file into its node hierarchy.
///
/// Failures are per-asset warnings, never fatal.
pub fn load_prefab(path: &Path) -> Result<PrefabNode, ScanWarning> {
    let data = fs::read_to_string(path).map_err(|e| ScanWarning::read_error(path, &e))?;
    serde_json::from_str(&data).map_err(|e| ScanWarning::parse_error(path, &e))
}

/// Display name of a prefab asset: the file stem, matching how the engine
/// names an instantiated prefab after its source asset.
pub fn display_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

/// Asset path as reported: relative to the project root when possible.
pub fn asset_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_enumerate_lists_all_files_sorted() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir(root.join("Assets")).unwrap();
        fs::write(root.join("Assets/b.prefab"), "{}").unwrap();
        fs::write(root.join("Assets/a.mat"), "").unwrap();
        fs::write(root.join("readme.txt"), "hi").unwrap();

        let config = ScanConfig::new(root);
        let mut warnings = Vec::new();
        let assets = enumerate_assets(root, &config, &mut warnings);

        assert!(warnings.is_empty());
        assert_eq!(assets.len(), 3);
        let sorted = {
            let mut copy = assets.clone();
            copy.sort();
            copy
        };
        assert_eq!(assets, sorted);
    }

    #[test]
    fn test_enumerate_skips_hidden_when_configured() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::write(root.join(".hidden.prefab"), "{}").unwrap();
        fs::write(root.join("visible.prefab"), "{}").unwrap();

        let mut config = ScanConfig::new(root);
        config.include_hidden = false;
        let mut warnings = Vec::new();
        let assets = enumerate_assets(root, &config, &mut warnings);

        assert_eq!(assets.len(), 1);
        assert!(assets[0].ends_with("visible.prefab"));
    }

    #[test]
    fn test_load_prefab_parses_hierarchy() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Crate.prefab");
        fs::write(
            &path,
            r#"{"name":"Crate","children":[{"name":"Lid","local_scale":[1.0,-1.0,1.0]}]}"#,
        )
        .unwrap();

        let node = load_prefab(&path).unwrap();
        assert_eq!(node.name, "Crate");
        assert_eq!(node.children.len(), 1);
    }

    #[test]
    fn test_load_prefab_malformed_is_warning() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("Broken.prefab");
        fs::write(&path, "not json at all").unwrap();

        let warning = load_prefab(&path).unwrap_err();
        assert_eq!(warning.kind, WarningKind::ParseError);
        assert_eq!(warning.path, path);
    }

    #[test]
    fn test_display_and_asset_paths() {
        assert_eq!(display_name(Path::new("/p/Assets/Crate.prefab")), "Crate");
        assert_eq!(
            asset_path(Path::new("/p"), Path::new("/p/Assets/Crate.prefab")),
            "Assets/Crate.prefab"
        );
    }
}
