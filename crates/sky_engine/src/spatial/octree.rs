//! Octree spatial partitioning structure
//!
//! Divides the static world into hierarchical regions so capsule queries only
//! run the narrow phase against triangles near the player. Built once when a
//! level loads and read-only afterwards.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::AABB;
use crate::physics::collision::{Capsule, Contact, ContactPolicy, GeometryError, Triangle, WorldMesh};

/// Configuration for octree behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OctreeConfig {
    /// Maximum triangles per node before subdivision
    pub triangles_per_leaf: usize,

    /// Maximum subdivision depth
    pub max_depth: u32,

    /// Minimum node size (prevents excessive subdivision)
    pub min_node_size: f32,

    /// Margin added around the triangle bounds so flat levels get a non-degenerate root
    pub bounds_padding: f32,

    /// How simultaneous contacts are combined into one result
    pub contact_policy: ContactPolicy,
}

impl Default for OctreeConfig {
    fn default() -> Self {
        Self {
            triangles_per_leaf: 8,
            max_depth: 16,
            min_node_size: 0.05,
            bounds_padding: 0.01,
            contact_policy: ContactPolicy::Deepest,
        }
    }
}

/// Single node in the octree hierarchy
///
/// Leaves hold triangle indices; internal nodes hold up to eight non-empty
/// children. A triangle straddling octant boundaries is referenced by every
/// leaf it overlaps.
#[derive(Debug, Clone)]
pub struct OctreeNode {
    /// World-space bounds of this node
    pub bounds: AABB,

    /// Indices into the octree's triangle list (leaves only)
    pub triangles: Vec<usize>,

    /// Non-empty child octants, empty if this is a leaf
    pub children: Vec<OctreeNode>,

    /// Depth in the tree (0 = root)
    pub depth: u32,
}

impl OctreeNode {
    /// Create a new leaf node
    pub fn new(bounds: AABB, depth: u32) -> Self {
        Self {
            bounds,
            triangles: Vec::new(),
            children: Vec::new(),
            depth,
        }
    }

    /// Check if this node is a leaf (has no children)
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn should_split(&self, config: &OctreeConfig) -> bool {
        self.triangles.len() > config.triangles_per_leaf
            && self.depth < config.max_depth
            && self.bounds.extents().max() > config.min_node_size
    }

    /// Distribute this node's triangles over its eight octants, recursively
    fn split(&mut self, world: &[Triangle], config: &OctreeConfig) {
        let parent_triangles = std::mem::take(&mut self.triangles);

        for bounds in self.bounds.octants() {
            let mut child = OctreeNode::new(bounds, self.depth + 1);
            child.triangles = parent_triangles
                .iter()
                .copied()
                .filter(|&index| bounds.intersects_triangle(&world[index]))
                .collect();

            if child.triangles.is_empty() {
                continue;
            }

            // A child that kept every triangle made no progress; splitting it
            // again would only duplicate the same set deeper down
            if child.triangles.len() < parent_triangles.len() && child.should_split(config) {
                child.split(world, config);
            }

            self.children.push(child);
        }
    }

    /// Collect triangle indices from every leaf whose bounds overlap `query`
    fn collect_triangles(&self, query: &AABB, seen: &mut HashSet<usize>, results: &mut Vec<usize>) {
        if !self.bounds.intersects(query) {
            return;
        }

        if self.is_leaf() {
            for &index in &self.triangles {
                if seen.insert(index) {
                    results.push(index);
                }
            }
            return;
        }

        for child in &self.children {
            child.collect_triangles(query, seen, results);
        }
    }

    /// Get all leaf nodes (for visualization)
    pub fn get_all_leaves<'a>(&'a self, leaves: &mut Vec<&'a OctreeNode>) {
        if self.is_leaf() {
            leaves.push(self);
        } else {
            for child in &self.children {
                child.get_all_leaves(leaves);
            }
        }
    }

    /// Count this node and all descendants
    pub fn count_nodes(&self) -> usize {
        1 + self.children.iter().map(OctreeNode::count_nodes).sum::<usize>()
    }

    /// Deepest node depth in this subtree
    pub fn max_depth(&self) -> u32 {
        self.children
            .iter()
            .map(OctreeNode::max_depth)
            .max()
            .unwrap_or(self.depth)
    }
}

/// Static octree of world triangles answering capsule queries
#[derive(Debug, Clone)]
pub struct Octree {
    /// Root node, `None` for a world without triangles
    root: Option<OctreeNode>,

    /// World triangles referenced by index from the leaves
    triangles: Vec<Triangle>,

    /// Configuration
    config: OctreeConfig,
}

impl Octree {
    /// Build an octree over a fixed set of world triangles
    ///
    /// An empty triangle set yields an index that never reports a contact.
    pub fn build(triangles: Vec<Triangle>, config: OctreeConfig) -> Self {
        let bounds = AABB::from_points(triangles.iter().flat_map(Triangle::vertices))
            .map(|aabb| aabb.padded(config.bounds_padding));

        let root = bounds.map(|bounds| {
            let mut root = OctreeNode::new(bounds, 0);
            root.triangles = (0..triangles.len()).collect();
            if root.should_split(&config) {
                root.split(&triangles, &config);
            }
            root
        });

        let octree = Self { root, triangles, config };
        log::info!(
            "Built collision octree: {} triangles, {} nodes, {} leaves, depth {}",
            octree.triangle_count(),
            octree.node_count(),
            octree.leaf_count(),
            octree.depth()
        );
        octree
    }

    /// Build from the meshes of a loaded level
    pub fn from_meshes(meshes: &[WorldMesh], config: OctreeConfig) -> Result<Self, GeometryError> {
        let mut triangles = Vec::new();
        for mesh in meshes {
            let mesh_triangles = mesh.triangles()?;
            log::debug!("Mesh '{}' contributes {} triangles", mesh.name, mesh_triangles.len());
            triangles.extend(mesh_triangles);
        }
        Ok(Self::build(triangles, config))
    }

    /// An octree with no geometry
    pub fn empty() -> Self {
        Self::build(Vec::new(), OctreeConfig::default())
    }

    /// Candidate triangles for a capsule, deduplicated, in traversal order
    pub fn capsule_triangles(&self, capsule: &Capsule) -> Vec<&Triangle> {
        let Some(root) = &self.root else {
            return Vec::new();
        };

        let mut seen = HashSet::new();
        let mut indices = Vec::new();
        root.collect_triangles(&capsule.bounding_box(), &mut seen, &mut indices);
        indices.into_iter().map(|index| &self.triangles[index]).collect()
    }

    /// Combined contact between a capsule and the world, if any
    ///
    /// Deterministic and side-effect free; the combination of several
    /// contacts follows the configured [`ContactPolicy`].
    pub fn capsule_intersect(&self, capsule: &Capsule) -> Option<Contact> {
        let candidates = self.capsule_triangles(capsule);

        match self.config.contact_policy {
            ContactPolicy::Deepest => candidates
                .into_iter()
                .filter_map(|triangle| capsule.intersect_triangle(triangle))
                .fold(None, |deepest: Option<Contact>, contact| match deepest {
                    Some(best) if best.depth >= contact.depth => Some(best),
                    _ => Some(contact),
                }),
            ContactPolicy::Accumulated => {
                let mut scratch = *capsule;
                let mut first: Option<Contact> = None;
                let mut last_point = None;

                for triangle in candidates {
                    if let Some(contact) = scratch.intersect_triangle(triangle) {
                        scratch.translate(contact.correction());
                        first.get_or_insert(contact);
                        last_point = Some(contact.point);
                    }
                }

                let first = first?;
                let displacement = scratch.center() - capsule.center();
                Some(Contact {
                    normal: displacement.try_normalize(0.0).unwrap_or(first.normal),
                    depth: displacement.norm(),
                    point: last_point.unwrap_or(first.point),
                })
            }
        }
    }

    /// Total number of world triangles
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Total number of nodes
    pub fn node_count(&self) -> usize {
        self.root.as_ref().map_or(0, OctreeNode::count_nodes)
    }

    /// Number of leaf nodes
    pub fn leaf_count(&self) -> usize {
        self.get_all_leaves().len()
    }

    /// Depth of the deepest node
    pub fn depth(&self) -> u32 {
        self.root.as_ref().map_or(0, OctreeNode::max_depth)
    }

    /// Root bounds, `None` for an empty world
    pub fn bounds(&self) -> Option<AABB> {
        self.root.as_ref().map(|root| root.bounds)
    }

    /// Root node, `None` for an empty world
    pub fn root(&self) -> Option<&OctreeNode> {
        self.root.as_ref()
    }

    /// Get all leaf nodes (for visualization)
    pub fn get_all_leaves(&self) -> Vec<&OctreeNode> {
        let mut leaves = Vec::new();
        if let Some(root) = &self.root {
            root.get_all_leaves(&mut leaves);
        }
        leaves
    }

    /// Configuration the octree was built with
    pub fn config(&self) -> &OctreeConfig {
        &self.config
    }
}
