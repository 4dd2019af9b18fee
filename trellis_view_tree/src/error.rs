// Copyright 2025 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Usage errors reported by structural tree operations.

use thiserror::Error;

use crate::types::{ContainerId, NodeId};

/// Errors returned when a tree operation is used incorrectly.
///
/// These are programming errors at the call site; the tree is left unchanged.
#[derive(Copy, Clone, Debug, Error, PartialEq, Eq)]
pub enum TreeError {
    /// The identifier refers to a destroyed node.
    #[error("node {0:?} is no longer alive")]
    StaleNode(NodeId),
    /// The node already has a container and must be removed first.
    #[error("node {0:?} is already attached to a container")]
    AlreadyAttached(NodeId),
    /// The node has no container.
    #[error("node {0:?} is not attached to a container")]
    NotAttached(NodeId),
    /// The node is not a child of the given container.
    #[error("node {node:?} is not a child of {container:?}")]
    NotAChild {
        /// The node that was looked up.
        node: NodeId,
        /// The container it was expected in.
        container: ContainerId,
    },
    /// Attaching the node would place it inside its own subtree.
    #[error("attaching {node:?} to {container:?} would create a cycle")]
    WouldCreateCycle {
        /// The node being attached.
        node: NodeId,
        /// The requested container.
        container: ContainerId,
    },
    /// The two nodes do not share a container.
    #[error("nodes {0:?} and {1:?} are not siblings")]
    NotSiblings(NodeId, NodeId),
}
