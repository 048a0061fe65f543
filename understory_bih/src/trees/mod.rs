// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree implementations for [`SpatialTree`](crate::SpatialTree).
//!
//! - `flatvec`: flat vector with linear scans, visiting leaves in slot order.
//!   Slot order itself is assigned by [`BihWrap`](crate::BihWrap) and is not
//!   stable across runs.
//!
//! Hierarchical trees (BIH, BVH, R-tree) plug in by implementing the same trait;
//! the wrapper never depends on a tree's internal layout.

pub mod flatvec;

pub use flatvec::FlatVec;
