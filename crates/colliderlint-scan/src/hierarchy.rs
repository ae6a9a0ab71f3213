//! Depth-first prefab hierarchy scan.

use glam::Vec3;

use colliderlint_core::{PrefabNode, ScanResult};

/// Outcome of scanning one prefab hierarchy.
#[derive(Debug, Clone)]
pub struct PrefabScan {
    /// Whether any node in the hierarchy is conflictive.
    pub conflictive: bool,
    /// All conflictive colliders found, in pre-order traversal order.
    pub results: Vec<ScanResult>,
}

/// Walk a prefab's hierarchy and collect every conflictive mesh collider.
///
/// Pre-order depth-first over owned children. A conflictive ancestor does
/// not prune its subtree. The hierarchy path is rooted at `display_name`
/// (the prefab asset's name, not necessarily the serialized root node name),
/// with `/`-joined child names below it.
///
/// Pure: no I/O, no counters. `conflictive` equals the OR of the conflict
/// predicate over every node in the tree.
pub fn scan_prefab(asset_path: &str, display_name: &str, root: &PrefabNode) -> PrefabScan {
    let mut results = Vec::new();
    let conflictive = walk(
        asset_path,
        root,
        display_name.to_string(),
        Vec3::ONE,
        &mut results,
    );
    PrefabScan {
        conflictive,
        results,
    }
}

fn walk(
    asset_path: &str,
    node: &PrefabNode,
    hierarchy_path: String,
    parent_scale: Vec3,
    results: &mut Vec<ScanResult>,
) -> bool {
    let lossy_scale = parent_scale * node.local_scale;
    let mut conflictive = node.is_conflictive();
    if conflictive {
        results.push(build_result(asset_path, node, &hierarchy_path, lossy_scale));
    }

    for child in &node.children {
        let child_path = format!("{hierarchy_path}/{}", child.name);
        conflictive = walk(asset_path, child, child_path, lossy_scale, results) || conflictive;
    }

    conflictive
}

fn build_result(
    asset_path: &str,
    node: &PrefabNode,
    hierarchy_path: &str,
    lossy_scale: Vec3,
) -> ScanResult {
    let mesh = node.collider.as_ref().and_then(|c| c.mesh.as_ref());
    ScanResult {
        asset_path: asset_path.to_string(),
        hierarchy_path: hierarchy_path.to_string(),
        local_scale: node.local_scale,
        lossy_scale,
        mesh_name: mesh.map(|m| m.name.to_string()),
        mesh_asset_path: mesh.and_then(|m| m.asset_path.clone()),
        mesh_readable: mesh.and_then(|m| m.readable),
    }
}
