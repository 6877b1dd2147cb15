//! # BSP Tree
//!
//! Binary Space Partitioning tree for CSG boolean operations.
//! Based on the csg.js algorithm by Evan Wallace.
//!
//! ## Algorithm
//!
//! Each BSP node contains:
//! - A dividing plane
//! - Polygons coplanar with the plane
//! - Front subtree (polygons in front of plane)
//! - Back subtree (polygons behind plane)
//!
//! ## Storage
//!
//! Nodes live in a flat arena and refer to their children by index. Every
//! traversal is an explicit loop, so deep trees never touch the call stack,
//! and `invert` simply walks the arena.
//!
//! Builds and clips count live fragments and stop with [`BudgetExceeded`]
//! once the tree's limit is passed.

use super::plane::Plane;
use super::polygon::{Polygon, SplitBuckets};
use super::CsgMode;

/// A node in the BSP tree.
#[derive(Debug, Clone)]
struct BspNode {
    /// Splitting plane; kept even when clipping empties `polygons`.
    plane: Plane,
    /// Polygons coplanar with this node's plane
    polygons: Vec<Polygon>,
    front: Option<usize>,
    back: Option<usize>,
}

/// A BSP tree over the polygons of one solid.
#[derive(Debug, Clone)]
pub struct BspTree {
    nodes: Vec<BspNode>,
    mode: CsgMode,
    /// Most fragments a build or a clip may hold at once.
    limit: usize,
}

/// A build or clip needed more fragments than the tree's limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BudgetExceeded {
    pub limit: usize,
}

/// Running count of live fragments against a limit.
struct FragmentCount {
    live: usize,
    limit: usize,
}

impl FragmentCount {
    fn start(live: usize, limit: usize) -> Result<Self, BudgetExceeded> {
        let count = Self { live, limit };
        count.check()?;
        Ok(count)
    }

    /// Records `before` polygons turning into `after` fragments.
    fn update(&mut self, before: usize, after: usize) -> Result<(), BudgetExceeded> {
        self.live = (self.live + after).saturating_sub(before);
        self.check()
    }

    fn check(&self) -> Result<(), BudgetExceeded> {
        if self.live > self.limit {
            return Err(BudgetExceeded { limit: self.limit });
        }
        Ok(())
    }
}

impl BspTree {
    /// Builds a tree from polygons, taking each node's splitter from the
    /// first polygon it receives.
    ///
    /// Fails once more than `limit` fragments would exist.
    pub fn new(
        polygons: Vec<Polygon>,
        mode: CsgMode,
        limit: usize,
    ) -> Result<Self, BudgetExceeded> {
        let mut tree = Self {
            nodes: Vec::new(),
            mode,
            limit,
        };

        if polygons.is_empty() {
            return Ok(tree);
        }

        let mut count = FragmentCount::start(polygons.len(), limit)?;

        // Work items: (node being filled, polygons to distribute)
        let root = tree.push_node(&polygons[0]);
        let mut stack: Vec<(usize, Vec<Polygon>)> = vec![(root, polygons)];

        while let Some((index, polys)) = stack.pop() {
            let plane = tree.nodes[index].plane;
            let before = polys.len();
            let mut out = SplitBuckets::default();
            for poly in polys {
                poly.split(&plane, mode, &mut out);
            }
            count.update(before, out.len())?;

            let SplitBuckets {
                coplanar_front,
                coplanar_back,
                front,
                back,
            } = out;
            let node = &mut tree.nodes[index];
            node.polygons.extend(coplanar_front);
            node.polygons.extend(coplanar_back);

            if !front.is_empty() {
                let child = tree.push_node(&front[0]);
                tree.nodes[index].front = Some(child);
                stack.push((child, front));
            }
            if !back.is_empty() {
                let child = tree.push_node(&back[0]);
                tree.nodes[index].back = Some(child);
                stack.push((child, back));
            }
        }

        Ok(tree)
    }

    fn push_node(&mut self, splitter: &Polygon) -> usize {
        self.nodes.push(BspNode {
            plane: *splitter.plane(),
            polygons: Vec::new(),
            front: None,
            back: None,
        });
        self.nodes.len() - 1
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Converts solid space to empty space and vice versa.
    ///
    /// Flips every polygon and plane and swaps front/back subtrees.
    pub fn invert(&mut self) {
        for node in &mut self.nodes {
            for poly in &mut node.polygons {
                poly.flip();
            }
            node.plane.flip();
            std::mem::swap(&mut node.front, &mut node.back);
        }
    }

    /// Removes the parts of `polygons` that lie inside this tree's solid.
    ///
    /// Only node planes and structure are consulted, never the polygons
    /// stored at the nodes.
    pub fn clip_polygons(
        &self,
        polygons: Vec<Polygon>,
    ) -> Result<Vec<Polygon>, BudgetExceeded> {
        if self.nodes.is_empty() {
            return Ok(polygons);
        }

        let mut count = FragmentCount::start(polygons.len(), self.limit)?;
        let mut result = Vec::new();
        let mut stack: Vec<(usize, Vec<Polygon>)> = vec![(0, polygons)];

        while let Some((index, polys)) = stack.pop() {
            if polys.is_empty() {
                continue;
            }

            let node = &self.nodes[index];
            let before = polys.len();
            let mut out = SplitBuckets::default();
            for poly in polys {
                poly.split(&node.plane, self.mode, &mut out);
            }
            count.update(before, out.len())?;

            let SplitBuckets {
                coplanar_front,
                coplanar_back,
                mut front,
                mut back,
            } = out;
            front.extend(coplanar_front);
            back.extend(coplanar_back);

            // Back pushed first so front fragments come out first
            match node.back {
                Some(child) => stack.push((child, back)),
                // No back subtree means the back side is solid: discard
                None => count.update(back.len(), 0)?,
            }

            match node.front {
                Some(child) => stack.push((child, front)),
                None => result.extend(front),
            }
        }

        Ok(result)
    }

    /// Returns the number of polygons in this tree.
    #[cfg(test)]
    pub fn polygon_count(&self) -> usize {
        self.nodes.iter().map(|n| n.polygons.len()).sum()
    }
}
