// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spatial tree trait used by [`BihWrap`](crate::BihWrap).

use glam::Vec3;

use crate::error::BuildError;
use crate::types::{Aabb3D, Ray};

/// Spatial tree abstraction rebuilt wholesale by `BihWrap` on each rebalance.
///
/// Trees only ever see slot indices `0..len`; mapping a slot back to a handle is
/// the wrapper's job.
pub trait SpatialTree {
    /// Rebuild from `len` leaves. `bounds_of(i)` returns the bounds of slot `i`
    /// and may be called any number of times.
    ///
    /// On error the tree must be left empty rather than partially built.
    fn build<B>(&mut self, len: usize, bounds_of: B) -> Result<(), BuildError>
    where
        B: Fn(usize) -> Aabb3D;

    /// Drop all leaves.
    fn clear(&mut self);

    /// Walk the leaves whose bounds the ray enters within `max_dist`.
    ///
    /// `leaf` receives the slot index and reports whether it accepted a hit,
    /// narrowing `max_dist` as it does. With `stop_at_first_hit`, traversal ends
    /// at the first accepted hit. Returns whether any hit was accepted.
    fn intersect_ray<L>(
        &self,
        ray: &Ray,
        max_dist: &mut f32,
        stop_at_first_hit: bool,
        leaf: L,
    ) -> bool
    where
        L: FnMut(&Ray, usize, &mut f32, bool) -> bool;

    /// Report every leaf whose bounds contain `point`.
    fn intersect_point<L>(&self, point: Vec3, leaf: L)
    where
        L: FnMut(Vec3, usize);
}
