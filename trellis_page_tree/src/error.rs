// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types for page queries and tree edits.

use alloc::string::String;
use core::fmt;

use crate::node::NodeId;

/// Error returned by [`Page`](crate::Page) queries and edits.
///
/// Queries fail only with [`PageError::NotFound`]; edits can additionally
/// fail with a structural [`InvalidEdit`]. Both indicate caller bugs given a
/// consistent tree and a correctly filtered drop target, but they are
/// reported rather than panicking so the editing surface can recover.
#[derive(Clone, Debug, PartialEq)]
pub enum PageError {
    /// A node id was not present in the page.
    NotFound(NodeId),
    /// An edit would violate slot arity, index bounds, or the forest
    /// invariant.
    InvalidEdit(InvalidEdit),
}

/// The specific way a tree edit was structurally invalid.
#[derive(Clone, Debug, PartialEq)]
pub enum InvalidEdit {
    /// The named slot does not exist on the target node.
    NoSuchSlot {
        /// The node that was expected to carry the slot.
        node: NodeId,
        /// The requested slot name.
        slot: String,
    },
    /// The insertion index is past the end of a list slot, or nonzero for a
    /// single-valued slot.
    IndexOutOfRange {
        /// The requested slot name.
        slot: String,
        /// The requested insertion index.
        index: usize,
        /// The current number of children in the slot.
        len: usize,
    },
    /// A single-valued slot already holds a child.
    SlotOccupied {
        /// The node carrying the occupied slot.
        node: NodeId,
        /// The occupied slot name.
        slot: String,
    },
    /// The child is already attached somewhere in the tree.
    AlreadyAttached(NodeId),
    /// The child is not present in the named slot.
    NotInSlot {
        /// The node whose slot was searched.
        node: NodeId,
        /// The searched slot name.
        slot: String,
        /// The child that was expected there.
        child: NodeId,
    },
    /// Attaching here would make a node its own ancestor.
    WouldCreateCycle {
        /// The subtree root being attached.
        child: NodeId,
        /// The insertion target, which lies inside `child`'s subtree.
        target: NodeId,
    },
    /// The page root cannot be removed.
    RootRemoval,
}

impl From<InvalidEdit> for PageError {
    fn from(e: InvalidEdit) -> Self {
        Self::InvalidEdit(e)
    }
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "node {id:?} is not in the page"),
            Self::InvalidEdit(e) => write!(f, "invalid edit: {e}"),
        }
    }
}

impl fmt::Display for InvalidEdit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSuchSlot { node, slot } => {
                write!(f, "node {node:?} has no slot {slot:?}")
            }
            Self::IndexOutOfRange { slot, index, len } => {
                write!(f, "index {index} out of range for slot {slot:?} of length {len}")
            }
            Self::SlotOccupied { node, slot } => {
                write!(f, "single-valued slot {slot:?} on {node:?} is already occupied")
            }
            Self::AlreadyAttached(id) => {
                write!(f, "node {id:?} is already attached to a slot")
            }
            Self::NotInSlot { node, slot, child } => {
                write!(f, "node {child:?} is not in slot {slot:?} of {node:?}")
            }
            Self::WouldCreateCycle { child, target } => {
                write!(
                    f,
                    "inserting {child:?} into {target:?} would make it its own ancestor"
                )
            }
            Self::RootRemoval => write!(f, "the page root cannot be removed"),
        }
    }
}

impl core::error::Error for PageError {}
impl core::error::Error for InvalidEdit {}
