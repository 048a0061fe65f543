// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flat vector tree with linear scans. Small and simple; good for tiny sets.

use alloc::vec::Vec;
use core::fmt::Debug;

use glam::Vec3;

use crate::error::BuildError;
use crate::tree::SpatialTree;
use crate::types::{Aabb3D, Ray};

/// Largest leaf count a [`FlatVec`] accepts, matching 32-bit slot indices.
pub const MAX_LEAVES: usize = u32::MAX as usize;

/// Flat vector tree with linear scans.
///
/// Traversal visits leaves in ascending slot order. A ray query skips any leaf
/// whose bounds the ray does not enter within the current `max_dist`, so hits
/// accepted early prune leaves that lie farther along the ray.
#[derive(Clone, Default)]
pub struct FlatVec {
    leaves: Vec<Aabb3D>,
}

impl FlatVec {
    /// Number of leaves from the last successful build.
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// True if the tree has no leaves.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
}

impl Debug for FlatVec {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.leaves.iter().fold(Aabb3D::EMPTY, |acc, b| acc.union(b));
        f.debug_struct("FlatVec")
            .field("leaves", &self.leaves.len())
            .field("bounds", &total)
            .finish_non_exhaustive()
    }
}

impl SpatialTree for FlatVec {
    fn build<B>(&mut self, len: usize, bounds_of: B) -> Result<(), BuildError>
    where
        B: Fn(usize) -> Aabb3D,
    {
        self.leaves.clear();
        if len > MAX_LEAVES {
            return Err(BuildError::TooManyLeaves {
                len,
                max: MAX_LEAVES,
            });
        }
        self.leaves
            .try_reserve_exact(len)
            .map_err(|_| BuildError::OutOfMemory { requested: len })?;
        self.leaves.extend((0..len).map(bounds_of));
        Ok(())
    }

    fn clear(&mut self) {
        self.leaves.clear();
    }

    fn intersect_ray<L>(
        &self,
        ray: &Ray,
        max_dist: &mut f32,
        stop_at_first_hit: bool,
        mut leaf: L,
    ) -> bool
    where
        L: FnMut(&Ray, usize, &mut f32, bool) -> bool,
    {
        let mut hit = false;
        for (i, b) in self.leaves.iter().enumerate() {
            if b.intersect_ray(ray, *max_dist).is_none() {
                continue;
            }
            if leaf(ray, i, max_dist, stop_at_first_hit) {
                hit = true;
                if stop_at_first_hit {
                    break;
                }
            }
        }
        hit
    }

    fn intersect_point<L>(&self, point: Vec3, mut leaf: L)
    where
        L: FnMut(Vec3, usize),
    {
        for (i, b) in self.leaves.iter().enumerate() {
            if b.contains_point(point) {
                leaf(point, i);
            }
        }
    }
}
