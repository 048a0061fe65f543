// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `BihWrap` API: incremental bookkeeping over a rebuilt-on-demand tree.

use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use glam::Vec3;
use hashbrown::{HashMap, HashSet};

use crate::bounds::BoundsFn;
use crate::error::BuildError;
use crate::tree::SpatialTree;
use crate::trees::flatvec::FlatVec;
use crate::types::{Aabb3D, Ray};

/// An incremental spatial index over caller-owned handles.
///
/// Inserts and removals only touch bookkeeping. The first query after any
/// mutation compacts the slot array and rebuilds the tree once, however many
/// mutations came before it.
///
/// Handles are identity tokens: two handles are the same object exactly when
/// they compare equal. The index never looks behind a handle except through
/// the bounds function.
///
/// Slots are refilled in hash-map order on every rebalance, and the map is
/// randomly seeded. Slot order, and with it the object a `stop_at_first_hit`
/// ray reports among several candidates, is not stable across runs.
pub struct BihWrap<T, F, S = FlatVec> {
    tree: S,
    /// Slot array; `None` marks a slot removed since the last rebalance.
    objects: Vec<Option<T>>,
    obj_to_idx: HashMap<T, usize>,
    pending: HashSet<T>,
    unbalanced: u32,
    bounds: F,
}

impl<T, F> BihWrap<T, F, FlatVec>
where
    T: Copy + Eq + Hash + Debug,
    F: BoundsFn<T>,
{
    /// Create an empty index backed by a [`FlatVec`] tree.
    pub fn new(bounds: F) -> Self {
        Self::with_tree(bounds, FlatVec::default())
    }
}

impl<T, F, S> Default for BihWrap<T, F, S>
where
    T: Copy + Eq + Hash + Debug,
    F: BoundsFn<T> + Default,
    S: SpatialTree + Default,
{
    fn default() -> Self {
        Self::with_tree(F::default(), S::default())
    }
}

impl<T, F, S> BihWrap<T, F, S>
where
    T: Copy + Eq + Hash + Debug,
    F: BoundsFn<T>,
    S: SpatialTree,
{
    /// Create an empty index over a caller-supplied tree.
    ///
    /// The tree is cleared; anything it held before is discarded.
    pub fn with_tree(bounds: F, mut tree: S) -> Self {
        tree.clear();
        Self {
            tree,
            objects: Vec::new(),
            obj_to_idx: HashMap::new(),
            pending: HashSet::new(),
            unbalanced: 0,
            bounds,
        }
    }

    /// Reserve space for at least `n` more handles.
    pub fn reserve(&mut self, n: usize) {
        self.objects.reserve(n);
        self.obj_to_idx.reserve(n);
        self.pending.reserve(n);
    }

    /// Queue `obj` for insertion at the next rebalance.
    ///
    /// Returns `false` without changing anything if `obj` is already indexed
    /// or already queued.
    pub fn insert(&mut self, obj: T) -> bool {
        if self.obj_to_idx.contains_key(&obj) {
            log::debug!("ignoring insert of already indexed {obj:?}");
            return false;
        }
        if !self.pending.insert(obj) {
            return false;
        }
        self.mark_dirty();
        true
    }

    /// Stop tracking `obj`.
    ///
    /// An indexed handle leaves a tombstone in its slot until the next
    /// rebalance; a queued one is simply dropped from the queue. Untracked
    /// handles are ignored. Returns whether `obj` was tracked.
    pub fn remove(&mut self, obj: &T) -> bool {
        if let Some(idx) = self.obj_to_idx.remove(obj) {
            if let Some(slot) = self.objects.get_mut(idx) {
                *slot = None;
            }
        } else if !self.pending.remove(obj) {
            return false;
        }
        self.mark_dirty();
        true
    }

    /// Drop every handle and empty the tree.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.obj_to_idx.clear();
        self.pending.clear();
        self.tree.clear();
        self.unbalanced = 0;
    }

    /// Compact the slot array and rebuild the tree if anything changed since
    /// the last rebalance.
    ///
    /// Queries call this first, so calling it directly is only needed to move
    /// the rebuild cost to a convenient point. If the tree fails to build, it is
    /// left empty, the index stays dirty, and the next call tries again.
    pub fn balance(&mut self) -> Result<(), BuildError> {
        if self.unbalanced == 0 {
            return Ok(());
        }

        // Reserve up front so a failed allocation leaves bookkeeping untouched.
        // Both stores are sized to hold `live` entries once refilled.
        let live = self.obj_to_idx.len() + self.pending.len();
        self.objects
            .try_reserve(live.saturating_sub(self.objects.len()))
            .map_err(|_| BuildError::OutOfMemory { requested: live })?;
        self.obj_to_idx
            .try_reserve(self.pending.len())
            .map_err(|_| BuildError::OutOfMemory { requested: live })?;

        self.unbalanced = 0;
        self.objects.clear();
        for (obj, idx) in &mut self.obj_to_idx {
            *idx = self.objects.len();
            self.objects.push(Some(*obj));
        }
        for obj in self.pending.drain() {
            self.obj_to_idx.insert(obj, self.objects.len());
            self.objects.push(Some(obj));
        }

        if self.objects.is_empty() {
            self.tree.clear();
            log::debug!("spatial index emptied");
            return Ok(());
        }

        let objects = &self.objects;
        let bounds = &self.bounds;
        let built = self.tree.build(objects.len(), |i| {
            objects
                .get(i)
                .and_then(Option::as_ref)
                .map_or(Aabb3D::EMPTY, |obj| bounds.bounds(obj))
        });
        match built {
            Ok(()) => {
                log::debug!("rebuilt spatial tree over {} objects", self.objects.len());
                Ok(())
            }
            Err(err) => {
                self.tree.clear();
                self.unbalanced = 1;
                log::warn!("spatial tree rebuild failed: {err}");
                Err(err)
            }
        }
    }

    /// Cast a ray through the index.
    ///
    /// `callback(ray, obj, max_dist, stop_at_first_hit)` runs for each object
    /// whose bounds the ray enters within `max_dist`. It returns whether it
    /// accepted a hit and may shrink `max_dist` to the hit distance, which
    /// prunes farther candidates. With `stop_at_first_hit` the cast ends at the
    /// first accepted hit in the tree's traversal order, which need not be the
    /// nearest one.
    ///
    /// Returns whether any hit was accepted.
    pub fn intersect_ray<C>(
        &mut self,
        ray: &Ray,
        mut callback: C,
        max_dist: &mut f32,
        stop_at_first_hit: bool,
    ) -> Result<bool, BuildError>
    where
        C: FnMut(&Ray, &T, &mut f32, bool) -> bool,
    {
        self.balance()?;
        let objects = &self.objects;
        Ok(self
            .tree
            .intersect_ray(ray, max_dist, stop_at_first_hit, |ray, idx, dist, stop| {
                resolve(objects, idx).is_some_and(|obj| callback(ray, obj, dist, stop))
            }))
    }

    /// Report every object whose bounds contain `point`.
    pub fn intersect_point<C>(&mut self, point: Vec3, mut callback: C) -> Result<(), BuildError>
    where
        C: FnMut(Vec3, &T),
    {
        self.balance()?;
        let objects = &self.objects;
        self.tree.intersect_point(point, |point, idx| {
            if let Some(obj) = resolve(objects, idx) {
                callback(point, obj);
            }
        });
        Ok(())
    }

    /// Number of tracked handles, indexed or queued.
    pub fn len(&self) -> usize {
        self.obj_to_idx.len() + self.pending.len()
    }

    /// True if no handles are tracked.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `obj` is tracked, indexed or queued.
    pub fn contains(&self, obj: &T) -> bool {
        self.obj_to_idx.contains_key(obj) || self.pending.contains(obj)
    }

    /// Slot of an indexed handle. Queued handles have no slot yet.
    pub fn slot_of(&self, obj: &T) -> Option<usize> {
        self.obj_to_idx.get(obj).copied()
    }

    /// The slot array, tombstones included.
    pub fn slots(&self) -> &[Option<T>] {
        &self.objects
    }

    /// Length of the slot array, tombstones included.
    pub fn slot_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of handles queued for the next rebalance.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Whether the next query will rebuild the tree.
    pub fn is_dirty(&self) -> bool {
        self.unbalanced != 0
    }

    /// The underlying tree.
    pub fn tree(&self) -> &S {
        &self.tree
    }

    fn mark_dirty(&mut self) {
        self.unbalanced = self.unbalanced.saturating_add(1);
    }
}

/// Map a leaf slot back to its live handle.
fn resolve<T>(objects: &[Option<T>], idx: usize) -> Option<&T> {
    let obj = objects.get(idx).and_then(Option::as_ref);
    if obj.is_none() {
        log::trace!("leaf {idx} has no live object");
    }
    obj
}

impl<T, F, S: Debug> Debug for BihWrap<T, F, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let tombstones = self.objects.iter().filter(|o| o.is_none()).count();
        f.debug_struct("BihWrap")
            .field("slots", &self.objects.len())
            .field("tombstones", &tombstones)
            .field("pending", &self.pending.len())
            .field("unbalanced", &self.unbalanced)
            .field("tree", &self.tree)
            .finish_non_exhaustive()
    }
}
