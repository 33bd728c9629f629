// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An in-memory [`RenderedElement`] implementation.
//!
//! This is the reference surface used by the workspace's tests and demos:
//! a plain tree of rects with optional node/slot markers, standing in for
//! whatever the host actually renders into. It has no behavior of its own
//! beyond satisfying the [`RenderedElement`] contract.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use trellis_page_tree::NodeId;

use crate::builder::{RenderedElement, SlotKind, SlotMarker};
use crate::types::SlotDirection;

/// A fake rendered element: a rect, optional markers, and children.
#[derive(Clone, Debug, PartialEq)]
pub struct TestElement {
    handle: u64,
    node: Option<NodeId>,
    slot: Option<SlotMarker>,
    rect: Rect,
    children: Vec<TestElement>,
}

impl TestElement {
    /// An element rendered for the tree node with raw id `raw`.
    ///
    /// The watch handle defaults to `raw`; override it with
    /// [`TestElement::with_handle`] when handle identity matters.
    #[must_use]
    pub fn node(raw: u64, rect: Rect) -> Self {
        Self {
            handle: raw,
            node: Some(NodeId::from_raw(raw)),
            slot: None,
            rect,
            children: Vec::new(),
        }
    }

    /// An unmarked structural element (wrapper div, decoration).
    #[must_use]
    pub fn plain(rect: Rect) -> Self {
        Self {
            handle: 0,
            node: None,
            slot: None,
            rect,
            children: Vec::new(),
        }
    }

    /// An element rendered for a list-valued slot.
    #[must_use]
    pub fn list_slot(name: impl Into<String>, direction: SlotDirection, rect: Rect) -> Self {
        Self {
            handle: 0,
            node: None,
            slot: Some(SlotMarker {
                name: name.into(),
                kind: SlotKind::List(direction),
            }),
            rect,
            children: Vec::new(),
        }
    }

    /// An element rendered for a single-valued slot.
    #[must_use]
    pub fn single_slot(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            handle: 0,
            node: None,
            slot: Some(SlotMarker {
                name: name.into(),
                kind: SlotKind::Single,
            }),
            rect,
            children: Vec::new(),
        }
    }

    /// Builder-style: set the children.
    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = Self>) -> Self {
        self.children = children.into_iter().collect();
        self
    }

    /// Builder-style: set the watch handle.
    #[must_use]
    pub fn with_handle(mut self, handle: u64) -> Self {
        self.handle = handle;
        self
    }
}

impl RenderedElement for TestElement {
    type Handle = u64;

    fn handle(&self) -> u64 {
        self.handle
    }

    fn node_marker(&self) -> Option<NodeId> {
        self.node
    }

    fn slot_marker(&self) -> Option<SlotMarker> {
        self.slot.clone()
    }

    fn bounds(&self) -> Rect {
        self.rect
    }

    fn children(&self) -> &[Self] {
        &self.children
    }
}
