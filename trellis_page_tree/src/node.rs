// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node identity, component kinds, slots, and the opaque property bag.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use smallvec::SmallVec;

/// Identifier for a node in a [`Page`](crate::Page).
///
/// Ids are allocated by the page and never reused within a page lineage
/// (every edit produces a new page value sharing the same counter history),
/// so a stale id can dangle but never alias a different node.
///
/// The raw representation is exposed for the renderer interface: rendered
/// elements carry their originating node id as a marker, and
/// [`NodeId::from_raw`]/[`NodeId::to_raw`] are the stable round-trip for
/// that marker.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Reconstruct an id from its raw marker representation.
    ///
    /// This does not validate membership in any page; pair it with
    /// [`Page::contains`](crate::Page::contains) when consuming untrusted
    /// markers.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw marker representation of this id.
    #[must_use]
    pub const fn to_raw(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({})", self.0)
    }
}

/// The component-type tag of a node.
///
/// Opaque to this core: the component catalog defines what kinds exist and
/// what they render as. Equality is by name.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ComponentKind(String);

impl ComponentKind {
    /// Creates a kind from its catalog name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The catalog name of this kind.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ComponentKind({:?})", self.0)
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The contents of one named slot.
///
/// A slot is either single-valued (at most one child) or list-valued (an
/// ordered sequence). Which arity a slot has is fixed by the component kind
/// that declared it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotValue {
    /// At most one child.
    Single(Option<NodeId>),
    /// An ordered sequence of children.
    List(SmallVec<[NodeId; 4]>),
}

impl SlotValue {
    /// An empty single-valued slot.
    #[must_use]
    pub const fn empty_single() -> Self {
        Self::Single(None)
    }

    /// An empty list-valued slot.
    #[must_use]
    pub const fn empty_list() -> Self {
        Self::List(SmallVec::new_const())
    }

    /// The children currently in this slot, in order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        match self {
            Self::Single(child) => child.as_slice(),
            Self::List(children) => children,
        }
    }

    /// Returns `true` if the slot holds no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children().is_empty()
    }
}

/// A single property value.
///
/// Properties are opaque to this core; the catalog and the prop editor give
/// them meaning. This is deliberately a small JSON-ish subset.
#[derive(Clone, Debug, PartialEq)]
pub enum PropValue {
    /// A boolean value.
    Bool(bool),
    /// A numeric value.
    Number(f64),
    /// A text value.
    Text(String),
}

impl From<bool> for PropValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<f64> for PropValue {
    fn from(v: f64) -> Self {
        Self::Number(v)
    }
}

impl From<&str> for PropValue {
    fn from(v: &str) -> Self {
        Self::Text(String::from(v))
    }
}

/// An ordered, string-keyed bag of [`PropValue`]s.
///
/// Carried through tree edits untouched. Insertion order is preserved so
/// prop editors can show properties the way the catalog declared them.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PropBag {
    entries: Vec<(String, PropValue)>,
}

impl PropBag {
    /// Creates an empty bag.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Sets `name` to `value`, replacing any previous value in place.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropValue>) {
        let name = name.into();
        let value = value.into();
        if let Some(entry) = self.entries.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.entries.push((name, value));
        }
    }

    /// Looks up the value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropValue> {
        self.entries
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &PropValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// The number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the bag has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One placed component instance.
///
/// A node is its kind, its ordered named slots, and its property bag. It
/// does not know its own id or parent; both are the page's business.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    /// The component-type tag.
    pub kind: ComponentKind,
    slots: Vec<(String, SlotValue)>,
    /// Properties, opaque to this core.
    pub props: PropBag,
}

impl Node {
    /// Creates a node of the given kind with no slots and no props.
    #[must_use]
    pub fn new(kind: ComponentKind) -> Self {
        Self {
            kind,
            slots: Vec::new(),
            props: PropBag::new(),
        }
    }

    /// Builder-style: declare a slot. Slot order is declaration order.
    ///
    /// Re-declaring an existing name replaces its value in place.
    #[must_use]
    pub fn with_slot(mut self, name: impl Into<String>, value: SlotValue) -> Self {
        let name = name.into();
        if let Some(entry) = self.slots.iter_mut().find(|(n, _)| *n == name) {
            entry.1 = value;
        } else {
            self.slots.push((name, value));
        }
        self
    }

    /// Builder-style: set a default property.
    #[must_use]
    pub fn with_prop(mut self, name: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.props.set(name, value);
        self
    }

    /// Looks up a slot by name.
    #[must_use]
    pub fn slot(&self, name: &str) -> Option<&SlotValue> {
        self.slots
            .iter()
            .find_map(|(n, v)| (n == name).then_some(v))
    }

    pub(crate) fn slot_mut(&mut self, name: &str) -> Option<&mut SlotValue> {
        self.slots
            .iter_mut()
            .find_map(|(n, v)| (n == name).then_some(v))
    }

    /// Iterates slots in declaration order.
    pub fn slots(&self) -> impl Iterator<Item = (&str, &SlotValue)> {
        self.slots.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// All children across all slots, in slot order.
    pub fn child_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.slots
            .iter()
            .flat_map(|(_, v)| v.children().iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_declaration_order_is_preserved() {
        let node = Node::new(ComponentKind::new("Grid"))
            .with_slot("header", SlotValue::empty_single())
            .with_slot("children", SlotValue::empty_list())
            .with_slot("footer", SlotValue::empty_single());

        let names: alloc::vec::Vec<&str> = node.slots().map(|(n, _)| n).collect();
        assert_eq!(names, ["header", "children", "footer"]);
    }

    #[test]
    fn redeclaring_a_slot_replaces_in_place() {
        let node = Node::new(ComponentKind::new("Stack"))
            .with_slot("children", SlotValue::empty_list())
            .with_slot("children", SlotValue::Single(Some(NodeId::from_raw(7))));

        assert_eq!(node.slots().count(), 1);
        assert_eq!(
            node.slot("children"),
            Some(&SlotValue::Single(Some(NodeId::from_raw(7))))
        );
    }

    #[test]
    fn child_ids_cross_slots_in_slot_order() {
        let a = NodeId::from_raw(1);
        let b = NodeId::from_raw(2);
        let c = NodeId::from_raw(3);
        let node = Node::new(ComponentKind::new("Split"))
            .with_slot("left", SlotValue::Single(Some(a)))
            .with_slot("right", SlotValue::List(smallvec::smallvec![b, c]));

        let ids: alloc::vec::Vec<NodeId> = node.child_ids().collect();
        assert_eq!(ids, [a, b, c]);
    }

    #[test]
    fn prop_bag_set_replaces_and_preserves_order() {
        let mut props = PropBag::new();
        props.set("label", "Go");
        props.set("disabled", false);
        props.set("label", "Stop");

        assert_eq!(props.len(), 2);
        assert_eq!(props.get("label"), Some(&PropValue::Text("Stop".into())));
        let names: alloc::vec::Vec<&str> = props.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["label", "disabled"]);
    }
}
