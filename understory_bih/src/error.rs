// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors surfaced by a tree rebuild.

use thiserror::Error;

/// Failure to rebuild the spatial tree during a rebalance.
///
/// A rebuild that fails leaves the tree empty and the index still marked
/// stale, so no query ever runs against a half-built or outdated tree.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    /// Storage for the object array or the tree's leaves could not be reserved.
    #[error("could not reserve storage for {requested} leaves")]
    OutOfMemory {
        /// Total entries the storage was sized to hold, i.e. every live
        /// object after the rebalance. This is not the size of the
        /// additional allocation.
        requested: usize,
    },
    /// More leaves than the tree can address.
    #[error("{len} leaves exceed the addressable maximum of {max}")]
    TooManyLeaves {
        /// Number of leaves handed to the build.
        len: usize,
        /// Largest leaf count the tree supports.
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn messages_name_the_sizes() {
        let oom = BuildError::OutOfMemory { requested: 12 };
        assert_eq!(oom.to_string(), "could not reserve storage for 12 leaves");
        let cap = BuildError::TooManyLeaves { len: 3, max: 2 };
        assert_eq!(cap.to_string(), "3 leaves exceed the addressable maximum of 2");
    }
}
