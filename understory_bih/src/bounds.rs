// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounds lookup for indexed handles.

use crate::types::Aabb3D;

/// Maps an indexed handle to its world-space bounds.
///
/// Called during every rebuild, once or more per live handle, so it should be
/// pure and cheap. Any `Fn(&T) -> Aabb3D` closure or function item qualifies.
pub trait BoundsFn<T> {
    /// Bounds of `obj`.
    fn bounds(&self, obj: &T) -> Aabb3D;
}

impl<T, F> BoundsFn<T> for F
where
    F: Fn(&T) -> Aabb3D,
{
    #[inline]
    fn bounds(&self, obj: &T) -> Aabb3D {
        self(obj)
    }
}
