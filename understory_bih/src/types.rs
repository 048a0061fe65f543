// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and helpers.

use glam::Vec3;

/// Axis-aligned bounding box in 3D.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb3D {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb3D {
    /// An inverted box that contains nothing and is the identity for [`Aabb3D::union`].
    pub const EMPTY: Self = Self {
        min: Vec3::INFINITY,
        max: Vec3::NEG_INFINITY,
    };

    /// Create a new AABB from min/max corners.
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from its center and half extents.
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        Self::new(center - half_extents, center + half_extents)
    }

    /// Create an AABB from its minimum corner and size.
    pub fn from_min_size(min: Vec3, size: Vec3) -> Self {
        Self::new(min, min + size)
    }

    /// Return true if the AABB is inverted on any axis. Assumes no NaN.
    ///
    /// Degenerate boxes (zero extent on an axis) are not empty.
    pub fn is_empty(&self) -> bool {
        self.max.cmplt(self.min).any()
    }

    /// Whether this AABB contains the point. Boundaries are inclusive.
    pub fn contains_point(&self, p: Vec3) -> bool {
        self.min.cmple(p).all() && p.cmple(self.max).all()
    }

    /// The smallest AABB enclosing both boxes.
    pub fn union(&self, other: &Self) -> Self {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Slab test against a ray segment `[0, max_dist]`.
    ///
    /// Returns the distance along the ray at which it enters the box, or zero
    /// if the origin is already inside. Axes where the ray direction is zero
    /// are handled by checking the origin against the slab directly, so the
    /// test never divides by zero.
    pub fn intersect_ray(&self, ray: &Ray, max_dist: f32) -> Option<f32> {
        if self.is_empty() || max_dist < 0.0 {
            return None;
        }
        let mut t_near = 0.0_f32;
        let mut t_far = max_dist;
        for axis in 0..3 {
            let o = ray.origin[axis];
            let d = ray.direction[axis];
            let lo = self.min[axis];
            let hi = self.max[axis];
            if d == 0.0 {
                if o < lo || o > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / d;
            let mut t0 = (lo - o) * inv;
            let mut t1 = (hi - o) * inv;
            if t0 > t1 {
                core::mem::swap(&mut t0, &mut t1);
            }
            t_near = t_near.max(t0);
            t_far = t_far.min(t1);
            if t_near > t_far {
                return None;
            }
        }
        Some(t_near)
    }
}

impl Default for Aabb3D {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// A half-line with an origin and a direction.
///
/// The direction is not normalized; distances reported against a ray are in
/// units of its direction length.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Ray {
    /// Start point.
    pub origin: Vec3,
    /// Direction of travel.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray from an origin and direction.
    pub const fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// The point at distance `t` along the ray.
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
