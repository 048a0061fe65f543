// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_bih --heading-base-level=0

//! Understory BIH: an incremental 3D bounding-volume index with lazy rebuilds.
//!
//! Understory BIH keeps a changing set of caller-owned objects in a spatial tree
//! and answers two kinds of queries against their bounds:
//!
//! - Ray casts with nearest-hit clipping (`max_dist` shrinks as hits are accepted)
//!   and an optional stop-at-first-hit mode.
//! - Point containment: every object whose bounds contain a point.
//!
//! Objects are identified by small `Copy` handles (entity ids, arena keys, and
//! so on). Bounds come from a [`BoundsFn`] you supply, so the index never
//! stores or copies the objects themselves.
//!
//! Inserting and removing objects is cheap bookkeeping. The tree is rebuilt
//! lazily, once, by the first query after any number of mutations, so churn
//! during a simulation tick coalesces into a single rebuild.
//!
//! Trees are pluggable via the [`SpatialTree`] trait. The default tree is a
//! flat vector (linear scan) that visits leaves in slot order.
//!
//! # Example
//!
//! ```rust
//! use glam::Vec3;
//! use understory_bih::{Aabb3D, BihWrap, Ray};
//!
//! // Handles are plain ids; bounds are looked up on demand.
//! let boxes = [
//!     Aabb3D::from_min_size(Vec3::ZERO, Vec3::ONE),
//!     Aabb3D::from_min_size(Vec3::splat(10.0), Vec3::ONE),
//! ];
//! let mut idx = BihWrap::new(|id: &usize| boxes[*id]);
//! idx.insert(0);
//! idx.insert(1);
//!
//! // Cast a ray along +X and keep the nearest entry distance.
//! let ray = Ray::new(Vec3::new(-5.0, 0.5, 0.5), Vec3::X);
//! let mut max_dist = f32::MAX;
//! let mut nearest = None;
//! let hit = idx
//!     .intersect_ray(
//!         &ray,
//!         |ray, id, max_dist, _| match boxes[*id].intersect_ray(ray, *max_dist) {
//!             Some(t) => {
//!                 *max_dist = t;
//!                 nearest = Some(*id);
//!                 true
//!             }
//!             None => false,
//!         },
//!         &mut max_dist,
//!         false,
//!     )
//!     .unwrap();
//! assert!(hit);
//! assert_eq!(nearest, Some(0));
//! assert_eq!(max_dist, 5.0);
//!
//! // Query a point inside the second box.
//! let mut inside = Vec::new();
//! idx.intersect_point(Vec3::new(10.5, 10.2, 10.1), |_, id| inside.push(*id))
//!     .unwrap();
//! assert_eq!(inside, [1]);
//! ```
//!
//! ## Rebuilds and failures
//!
//! [`BihWrap::balance`] runs at the start of every query and does nothing when
//! the index is clean. A tree that cannot be built (for example because an
//! allocation failed) yields a [`BuildError`] from the query that triggered it.
//! The tree is then left empty and the index stays dirty, so no query ever
//! sees a partially built or outdated tree.
//!
//! ## Traversal order
//!
//! Order of results within a query is whatever the tree's traversal produces.
//! With `stop_at_first_hit`, the reported object is the first one the traversal
//! accepts, which need not be the nearest.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs in bounds, rays, or points.

#![no_std]

extern crate alloc;

pub mod bounds;
pub mod error;
pub mod tree;
pub mod trees;
pub mod types;
pub mod wrap;

pub use bounds::BoundsFn;
pub use error::BuildError;
pub use tree::SpatialTree;
pub use trees::flatvec::FlatVec;
pub use types::{Aabb3D, Ray};
pub use wrap::BihWrap;
