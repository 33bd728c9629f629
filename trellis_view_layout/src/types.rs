// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot types: slot geometry, per-node layout, and the full view layout.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Line, Point, Rect};
use trellis_page_tree::NodeId;

/// The flow direction of a list-valued slot, as rendered.
///
/// The direction describes how children flow, so the insertion lines run
/// across it: a `Horizontal` flow yields vertical insertion lines and vice
/// versa.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SlotDirection {
    /// Children flow left to right.
    Horizontal,
    /// Children flow top to bottom.
    Vertical,
}

/// One drop target's geometry within a node.
///
/// All coordinates are in the preview surface's scrollable content space,
/// the same space pointer coordinates are translated into.
#[derive(Clone, Debug, PartialEq)]
pub enum SlotLayout {
    /// A slot region with droppable area: a single-valued slot, or a
    /// list-valued slot rendered empty (its placeholder). Dropping here
    /// means inserting into that slot.
    Slot {
        /// The slot name on the owning node.
        name: String,
        /// The rendered region of the slot.
        rect: Rect,
        /// The splice index a drop here commits to: `Some(0)` for an empty
        /// list-valued slot's placeholder, `None` for a single-valued slot
        /// (which has no index space).
        index: Option<usize>,
    },
    /// A zero-thickness insertion position within a non-empty list-valued
    /// slot.
    Insert {
        /// The slot name on the owning node.
        name: String,
        /// The splice index a drop here commits to.
        index: usize,
        /// The line's origin (top of a vertical line, left of a horizontal
        /// one).
        position: Point,
        /// The line's extent along the slot's cross axis.
        size: f64,
        /// The slot's flow direction.
        direction: SlotDirection,
    },
}

impl SlotLayout {
    /// The slot name this target belongs to.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Slot { name, .. } | Self::Insert { name, .. } => name,
        }
    }

    /// The splice index a drop on this target commits to, when it has one.
    #[must_use]
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Slot { index, .. } => *index,
            Self::Insert { index, .. } => Some(*index),
        }
    }

    /// The insertion line segment, for insertion points.
    ///
    /// A `Horizontal` flow produces a vertical segment of length `size`
    /// starting at `position`, and a `Vertical` flow a horizontal one.
    #[must_use]
    pub fn insertion_line(&self) -> Option<Line> {
        match self {
            Self::Slot { .. } => None,
            Self::Insert {
                position,
                size,
                direction,
                ..
            } => {
                let end = match direction {
                    SlotDirection::Horizontal => Point::new(position.x, position.y + size),
                    SlotDirection::Vertical => Point::new(position.x + size, position.y),
                };
                Some(Line::new(*position, end))
            }
        }
    }
}

/// The rendered geometry of one node: its rect and its drop slots.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct NodeLayout {
    /// The node's bounding rect.
    pub rect: Rect,
    /// Drop-slot geometry, in builder emission order. Order matters: the
    /// resolver breaks equidistant ties by taking the first encountered.
    pub slots: Vec<SlotLayout>,
}

/// A full snapshot: node id to rendered layout.
///
/// Immutable once returned by the builder; rebuilt from scratch whenever the
/// rendered surface changes shape or size.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ViewLayout {
    nodes: HashMap<NodeId, NodeLayout>,
}

impl ViewLayout {
    /// Creates an empty layout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The layout for `id`, if that node was rendered.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&NodeLayout> {
        self.nodes.get(&id)
    }

    pub(crate) fn entry_mut(&mut self, id: NodeId) -> &mut NodeLayout {
        self.nodes.entry(id).or_default()
    }

    /// Iterates `(id, layout)` pairs in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeLayout)> {
        self.nodes.iter().map(|(&id, l)| (id, l))
    }

    /// The number of rendered nodes in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if no nodes were captured.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insertion_line_runs_across_the_flow() {
        let vertical_line = SlotLayout::Insert {
            name: String::from("children"),
            index: 1,
            position: Point::new(40.0, 10.0),
            size: 30.0,
            direction: SlotDirection::Horizontal,
        };
        assert_eq!(
            vertical_line.insertion_line(),
            Some(Line::new((40.0, 10.0), (40.0, 40.0)))
        );

        let horizontal_line = SlotLayout::Insert {
            name: String::from("children"),
            index: 0,
            position: Point::new(10.0, 25.0),
            size: 80.0,
            direction: SlotDirection::Vertical,
        };
        assert_eq!(
            horizontal_line.insertion_line(),
            Some(Line::new((10.0, 25.0), (90.0, 25.0)))
        );
    }

    #[test]
    fn slot_regions_have_no_line() {
        let single = SlotLayout::Slot {
            name: String::from("content"),
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            index: None,
        };
        assert_eq!(single.index(), None);
        assert_eq!(single.insertion_line(), None);
        assert_eq!(single.name(), "content");

        let placeholder = SlotLayout::Slot {
            name: String::from("children"),
            rect: Rect::new(0.0, 0.0, 10.0, 10.0),
            index: Some(0),
        };
        assert_eq!(placeholder.index(), Some(0));
        assert_eq!(placeholder.insertion_line(), None);
    }
}
