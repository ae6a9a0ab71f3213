//! Prefab node tree types.

use compact_str::CompactString;
use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::scale::is_conflictive_scale;

/// Reference to the mesh a collider was built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshRef {
    /// Mesh name.
    pub name: CompactString,

    /// Path of the mesh asset, when it lives in its own file.
    #[serde(default)]
    pub asset_path: Option<String>,

    /// Importer read/write flag. `None` when the importer settings are
    /// unknown for this mesh.
    #[serde(default)]
    pub readable: Option<bool>,
}

impl MeshRef {
    /// Create a mesh reference with no importer metadata.
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            asset_path: None,
            readable: None,
        }
    }
}

/// A mesh collider component attached to a node.
///
/// A collider with no mesh assigned is still a collider; the report renders
/// its mesh columns as placeholders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColliderInfo {
    /// The mesh the collision shape is built from, if assigned.
    #[serde(default)]
    pub mesh: Option<MeshRef>,
}

impl ColliderInfo {
    /// Collider with a mesh assigned.
    pub fn with_mesh(mesh: MeshRef) -> Self {
        Self { mesh: Some(mesh) }
    }
}

/// One entity in a prefab's spatial hierarchy.
///
/// This is the deserialized form of a `.prefab` file: a single root node
/// owning its children. The tree is finite and acyclic by construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefabNode {
    /// Node name (one path segment in the hierarchy path).
    pub name: CompactString,

    /// Scale relative to the parent node.
    #[serde(default = "default_scale")]
    pub local_scale: Vec3,

    /// Mesh collider component, if one is attached.
    #[serde(default)]
    pub collider: Option<ColliderInfo>,

    /// Child nodes, exclusively owned by this node.
    #[serde(default)]
    pub children: Vec<PrefabNode>,
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

impl PrefabNode {
    /// Create a node with identity scale and no collider.
    pub fn new(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            local_scale: Vec3::ONE,
            collider: None,
            children: Vec::new(),
        }
    }

    /// Set the local scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.local_scale = scale;
        self
    }

    /// Attach a mesh collider.
    pub fn with_collider(mut self, collider: ColliderInfo) -> Self {
        self.collider = Some(collider);
        self
    }

    /// Add a child node.
    pub fn with_child(mut self, child: PrefabNode) -> Self {
        self.children.push(child);
        self
    }

    /// Whether a mesh collider is attached to this node.
    pub fn has_collider(&self) -> bool {
        self.collider.is_some()
    }

    /// Whether this node carries a mesh collider with a conflictive scale.
    ///
    /// Nodes without a collider are never conflictive, regardless of scale.
    pub fn is_conflictive(&self) -> bool {
        self.has_collider() && is_conflictive_scale(self.local_scale)
    }

    /// Get the number of direct children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}
