// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The snapshot builder: walk rendered elements, emit node and slot
//! geometry.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;
use trellis_page_tree::NodeId;

use crate::types::{SlotDirection, SlotLayout, ViewLayout};

/// The kind of a rendered slot, as declared by its marker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotKind {
    /// A single-valued slot; its whole rendered region is the drop target.
    Single,
    /// A list-valued slot flowing in the given direction; drop targets are
    /// insertion lines between the rendered children (or the region itself
    /// when empty).
    List(SlotDirection),
}

/// The marker a renderer attaches to each element it renders for a slot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SlotMarker {
    /// The slot's name on its owning node.
    pub name: String,
    /// The slot's kind.
    pub kind: SlotKind,
}

/// The renderer's external interface: one rendered element in the preview
/// surface.
///
/// Implementations wrap whatever the host renders into (DOM elements, a
/// retained widget tree, a test fixture). All rects are in the preview
/// surface's scrollable content space.
///
/// Contract for list-valued slots: the element carrying the slot marker has
/// the slot's rendered children as *direct* children, each carrying its node
/// marker. The builder derives insertion indices from their order and
/// rendered positions.
pub trait RenderedElement {
    /// A copyable handle identifying this element to the host's size
    /// observer.
    type Handle: Copy;

    /// This element's watch handle.
    fn handle(&self) -> Self::Handle;

    /// The originating node id, for elements rendered for a tree node.
    fn node_marker(&self) -> Option<NodeId>;

    /// The slot marker, for elements rendered for a slot.
    fn slot_marker(&self) -> Option<SlotMarker>;

    /// The element's rendered bounding rect, in content space.
    fn bounds(&self) -> Rect;

    /// The element's direct children, in render order.
    fn children(&self) -> &[Self]
    where
        Self: Sized;
}

/// A freshly built snapshot plus the elements that must be size-watched
/// until the next rebuild.
#[derive(Clone, Debug)]
pub struct Snapshot<H> {
    /// The rendered-geometry snapshot.
    pub layout: ViewLayout,
    /// Handles of every marked element; each one can affect layout, so each
    /// one is watched individually.
    pub watched: Vec<H>,
}

/// Error from a snapshot build.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LayoutError {
    /// The rendered tree contained no node-marked elements; there is
    /// nothing to hit-test against.
    NoMarkedNodes,
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoMarkedNodes => {
                f.write_str("rendered surface has no node-marked elements")
            }
        }
    }
}

impl core::error::Error for LayoutError {}

/// Builds a [`ViewLayout`] snapshot by walking the rendered element tree.
///
/// Node-marked elements contribute their bounds; slot-marked elements
/// contribute drop-target geometry to the nearest node-marked ancestor. A
/// slot marker outside any node-marked element is a renderer inconsistency;
/// it is skipped with a warning rather than failing the build.
///
/// The builder has no side effects on the page tree; it is purely an
/// adapter from "what got painted" to named rectangles.
pub fn build_snapshot<E: RenderedElement>(root: &E) -> Result<Snapshot<E::Handle>, LayoutError> {
    let mut layout = ViewLayout::new();
    let mut watched = Vec::new();
    walk(root, None, &mut layout, &mut watched);
    if layout.is_empty() {
        return Err(LayoutError::NoMarkedNodes);
    }
    Ok(Snapshot { layout, watched })
}

fn walk<E: RenderedElement>(
    elm: &E,
    enclosing: Option<NodeId>,
    layout: &mut ViewLayout,
    watched: &mut Vec<E::Handle>,
) {
    let mut enclosing = enclosing;
    if let Some(id) = elm.node_marker() {
        layout.entry_mut(id).rect = elm.bounds();
        watched.push(elm.handle());
        enclosing = Some(id);
    }
    if let Some(marker) = elm.slot_marker() {
        match enclosing {
            Some(owner) => {
                let slots = slot_geometry(elm, &marker);
                layout.entry_mut(owner).slots.extend(slots);
                watched.push(elm.handle());
            }
            None => {
                log::warn!(
                    "slot marker {:?} has no node-marked ancestor; skipping",
                    marker.name
                );
            }
        }
    }
    for child in elm.children() {
        walk(child, enclosing, layout, watched);
    }
}

/// Computes the drop targets contributed by one slot-marked element.
fn slot_geometry<E: RenderedElement>(elm: &E, marker: &SlotMarker) -> Vec<SlotLayout> {
    let rect = elm.bounds();
    let direction = match marker.kind {
        SlotKind::Single => {
            return alloc::vec![SlotLayout::Slot {
                name: marker.name.clone(),
                rect,
                index: None,
            }];
        }
        SlotKind::List(direction) => direction,
    };

    let child_rects: Vec<Rect> = elm
        .children()
        .iter()
        .filter(|c| c.node_marker().is_some())
        .map(RenderedElement::bounds)
        .collect();

    // An empty list slot renders a placeholder region; the whole region is
    // the index-0 drop target.
    if child_rects.is_empty() {
        return alloc::vec![SlotLayout::Slot {
            name: marker.name.clone(),
            rect,
            index: Some(0),
        }];
    }

    // One insertion line per splice index: the first child's leading edge,
    // the midpoint of each gap, and the last child's trailing edge.
    let mut slots = Vec::with_capacity(child_rects.len() + 1);
    for index in 0..=child_rects.len() {
        let offset = if index == 0 {
            leading_edge(child_rects[0], direction)
        } else if index == child_rects.len() {
            trailing_edge(child_rects[index - 1], direction)
        } else {
            let gap_start = trailing_edge(child_rects[index - 1], direction);
            let gap_end = leading_edge(child_rects[index], direction);
            (gap_start + gap_end) / 2.0
        };
        let (position, size) = match direction {
            SlotDirection::Horizontal => (kurbo::Point::new(offset, rect.y0), rect.height()),
            SlotDirection::Vertical => (kurbo::Point::new(rect.x0, offset), rect.width()),
        };
        slots.push(SlotLayout::Insert {
            name: marker.name.clone(),
            index,
            position,
            size,
            direction,
        });
    }
    slots
}

fn leading_edge(rect: Rect, direction: SlotDirection) -> f64 {
    match direction {
        SlotDirection::Horizontal => rect.x0,
        SlotDirection::Vertical => rect.y0,
    }
}

fn trailing_edge(rect: Rect, direction: SlotDirection) -> f64 {
    match direction {
        SlotDirection::Horizontal => rect.x1,
        SlotDirection::Vertical => rect.y1,
    }
}
