// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Drop Target: which node, and which insertion point, is under the
//! pointer?
//!
//! These are the pure functions the editor's drag loop runs on every
//! pointer move: given the page tree, the current [`ViewLayout`] snapshot,
//! and a point in content-space coordinates, they resolve the topmost node
//! under the pointer and the nearest valid insertion slot. They never
//! mutate anything and never fail: "nothing under the pointer" is the
//! routine outcome and is represented by `None`, not an error.
//!
//! ## Deepest first
//!
//! Rendered node rects nest: a child's rect lies within its ancestors'.
//! Searching shallowest-first would always resolve to the outermost
//! ancestor, so both [`find_node_at`] and [`find_active_slot_at`] walk
//! [`Page::nodes_by_depth`] in reverse.
//!
//! ## Cycle prevention
//!
//! [`available_nodes`] is the sole cycle guard for drag and drop: it
//! removes the dragged node and its whole subtree from consideration, so a
//! drop can never target a node's own descendant. The tree-edit API checks
//! again defensively, but correct callers only offer targets drawn from
//! this filtered set.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use trellis_drop_target::find_node_at;
//! use trellis_page_tree::{ComponentKind, Node, Page, SlotValue};
//! use trellis_view_layout::{build_snapshot, test_surface::TestElement};
//!
//! let page = Page::new(
//!     Node::new(ComponentKind::new("Page")).with_slot("children", SlotValue::empty_list()),
//! );
//! let (page, inner) = page
//!     .insert_new_into_slot(page.root(), "children", 0, Node::new(ComponentKind::new("Card")))
//!     .unwrap();
//!
//! let surface = TestElement::node(page.root().to_raw(), Rect::new(0.0, 0.0, 100.0, 100.0))
//!     .with_children([TestElement::node(inner.to_raw(), Rect::new(10.0, 10.0, 60.0, 60.0))]);
//! let layout = build_snapshot(&surface).unwrap().layout;
//!
//! // The nested card wins over the page that also contains the point.
//! assert_eq!(find_node_at(&page, &layout, Point::new(20.0, 20.0)), Some(inner));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashSet;
use kurbo::Point;
use trellis_geometry::{distance_to_rect, distance_to_segment, rect_contains_point};
use trellis_page_tree::{NodeId, Page};
use trellis_view_layout::{NodeLayout, SlotLayout, ViewLayout};

/// A resolved drop target: the triple a drag commits to if dropped now.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropTarget {
    /// The node that owns the slot.
    pub node: NodeId,
    /// The slot name on that node.
    pub slot: String,
    /// The splice index. Insertion points carry their index, and an empty
    /// list-valued slot's placeholder is index 0; `None` only for
    /// single-valued slots, which have no index space (the committing edit
    /// treats that as index 0).
    pub index: Option<usize>,
}

/// Resolves the deepest rendered node whose rect contains `p`.
///
/// Nodes without a layout entry (not rendered this cycle) are skipped.
/// Returns `None` when the point is over empty surface.
#[must_use]
pub fn find_node_at(page: &Page, layout: &ViewLayout, p: Point) -> Option<NodeId> {
    let nodes = page.nodes_by_depth();
    for &id in nodes.iter().rev() {
        if let Some(node_layout) = layout.get(id) {
            if rect_contains_point(node_layout.rect, p) {
                return Some(id);
            }
        }
    }
    None
}

/// All nodes available as drop targets, shallowest first.
///
/// When `dragged` is set, that node and every node in its subtree are
/// excluded: inserting into one of them would make the dragged node its own
/// ancestor. An unknown `dragged` id excludes nothing.
#[must_use]
pub fn available_nodes(page: &Page, dragged: Option<NodeId>) -> Vec<NodeId> {
    let excluded: HashSet<NodeId> = match dragged {
        Some(id) => {
            let mut set = page.descendants(id).unwrap_or_default();
            set.insert(id);
            set
        }
        None => HashSet::new(),
    };
    page.nodes_by_depth()
        .into_iter()
        .filter(|id| !excluded.contains(id))
        .collect()
}

/// The distance from `p` to one slot's drop geometry.
fn slot_distance(slot: &SlotLayout, p: Point) -> f64 {
    match slot {
        SlotLayout::Slot { rect, .. } => distance_to_rect(*rect, p),
        SlotLayout::Insert { .. } => {
            // The insertion line always exists for this variant.
            slot.insertion_line()
                .map_or(f64::INFINITY, |line| distance_to_segment(line, p))
        }
    }
}

/// The closest slot to `p`, or `None` if `slots` is empty.
///
/// A slot containing the point (distance ≤ 0) wins immediately, even if a
/// later slot would be equally close: geometric containment beats proximity.
/// Otherwise the minimum distance wins, with the first encountered taking
/// equidistant ties — slot order is the builder's emission order, so the
/// result is deterministic.
#[must_use]
pub fn find_closest_slot<'s>(slots: &'s [SlotLayout], p: Point) -> Option<&'s SlotLayout> {
    let mut closest_distance = f64::INFINITY;
    let mut closest: Option<&SlotLayout> = None;
    for slot in slots {
        let distance = slot_distance(slot, p);
        if distance <= 0.0 {
            return Some(slot);
        }
        if distance < closest_distance {
            closest_distance = distance;
            closest = Some(slot);
        }
    }
    closest
}

fn active_slot_in(id: NodeId, node_layout: &NodeLayout, p: Point) -> Option<DropTarget> {
    find_closest_slot(&node_layout.slots, p).map(|slot| DropTarget {
        node: id,
        slot: String::from(slot.name()),
        index: slot.index(),
    })
}

/// Resolves the active drop slot at `p` among `nodes` (shallowest-first
/// order, as produced by [`available_nodes`]).
///
/// Scans deepest first; for the first node whose rect contains the point,
/// only that node's own slots are searched, and a hit returns immediately.
/// If no containing node yields a slot, the *shallowest* node seen during
/// the scan is retried regardless of containment — that recovers a usable
/// target near the root when the pointer sits over empty surface. This
/// fallback intentionally has no distance bound; do not add one without
/// revisiting how empty-margin drops should feel.
#[must_use]
pub fn find_active_slot_at(
    nodes: &[NodeId],
    layout: &ViewLayout,
    p: Point,
) -> Option<DropTarget> {
    let mut shallowest: Option<(NodeId, &NodeLayout)> = None;
    for &id in nodes.iter().rev() {
        if let Some(node_layout) = layout.get(id) {
            shallowest = Some((id, node_layout));
            if rect_contains_point(node_layout.rect, p) {
                // Only the hovered node's own slots are considered while
                // the pointer is inside it.
                if let Some(target) = active_slot_in(id, node_layout, p) {
                    return Some(target);
                }
            }
        }
    }
    // One last attempt against the shallowest scanned node, whether or not
    // the pointer is over it.
    let (id, node_layout) = shallowest?;
    active_slot_in(id, node_layout, p)
}
