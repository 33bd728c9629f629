// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page: an arena of nodes, structural queries, and pure tree edits.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

use crate::error::{InvalidEdit, PageError};
use crate::node::{Node, NodeId, SlotValue};

/// A page: a root node plus the arena of all nodes in the tree.
///
/// The slot membership of attached nodes forms a forest rooted at
/// [`Page::root`]. Nodes can temporarily be *unattached* (present in the
/// arena but in no slot) between the two halves of a reparent; the pure
/// edit API keeps that window internal to a single operation.
#[derive(Clone, Debug, PartialEq)]
pub struct Page {
    root: NodeId,
    nodes: HashMap<NodeId, Node>,
    next_id: u64,
}

impl Page {
    /// Creates a page containing just the given root node.
    #[must_use]
    pub fn new(root: Node) -> Self {
        let root_id = NodeId::new(0);
        let mut nodes = HashMap::new();
        nodes.insert(root_id, root);
        Self {
            root: root_id,
            nodes,
            next_id: 1,
        }
    }

    /// The root node id.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Returns `true` if `id` is in the arena.
    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// The number of nodes in the arena.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false`; a page holds at least its root.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Looks up a node, failing with [`PageError::NotFound`] for unknown ids.
    pub fn node(&self, id: NodeId) -> Result<&Node, PageError> {
        self.nodes.get(&id).ok_or(PageError::NotFound(id))
    }

    /// Looks up a node, `None` for unknown ids.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Iterates all node ids in the arena, in no particular order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// The parent of `id` and the slot name it occupies, or `None` for the
    /// root and for unattached or unknown ids.
    #[must_use]
    pub fn parent_of(&self, id: NodeId) -> Option<(NodeId, &str)> {
        for (&candidate, node) in &self.nodes {
            for (name, value) in node.slots() {
                if value.children().contains(&id) {
                    return Some((candidate, name));
                }
            }
        }
        None
    }

    /// The ancestors of `id`, ordered from its parent up to the root.
    ///
    /// Empty for the root itself. Fails with [`PageError::NotFound`] for
    /// unknown ids.
    pub fn ancestors(&self, id: NodeId) -> Result<Vec<NodeId>, PageError> {
        if !self.contains(id) {
            return Err(PageError::NotFound(id));
        }
        let mut chain = Vec::new();
        let mut current = id;
        while let Some((parent, _)) = self.parent_of(current) {
            chain.push(parent);
            current = parent;
        }
        Ok(chain)
    }

    /// All nodes transitively contained in `id`'s slots, as an unordered set.
    ///
    /// Does not include `id` itself. Fails with [`PageError::NotFound`] for
    /// unknown ids.
    pub fn descendants(&self, id: NodeId) -> Result<HashSet<NodeId>, PageError> {
        let mut out = HashSet::new();
        let mut stack = Vec::new();
        stack.push(self.node(id)?);
        while let Some(node) = stack.pop() {
            for child in node.child_ids() {
                if out.insert(child) {
                    if let Some(child_node) = self.get(child) {
                        stack.push(child_node);
                    }
                }
            }
        }
        Ok(out)
    }

    /// All node ids reachable from the root, shallowest first (root first).
    ///
    /// Children within one node are visited in slot order. Reversing this
    /// sequence gives the deepest-first order hit testing needs. Unattached
    /// nodes are not included.
    #[must_use]
    pub fn nodes_by_depth(&self) -> Vec<NodeId> {
        let mut out = Vec::with_capacity(self.nodes.len());
        out.push(self.root);
        let mut cursor = 0;
        while cursor < out.len() {
            let id = out[cursor];
            cursor += 1;
            if let Some(node) = self.get(id) {
                out.extend(node.child_ids());
            }
        }
        out
    }

    /// Splices an existing, unattached node into a slot, returning the new
    /// page.
    ///
    /// For a list-valued slot, `index` is the splice position (`0..=len`).
    /// For a single-valued slot, `index` must be `0` and the slot must be
    /// vacant. Fails if either node is unknown, the child is already
    /// attached, or the target lies inside the child's own subtree.
    pub fn insert_into_slot(
        &self,
        parent: NodeId,
        slot: &str,
        index: usize,
        child: NodeId,
    ) -> Result<Self, PageError> {
        let mut next = self.clone();
        next.splice(parent, slot, index, child)?;
        Ok(next)
    }

    /// Allocates a fresh node and splices it into a slot, returning the new
    /// page and the new node's id.
    ///
    /// This is the commit path for dropping a component picked from the
    /// catalog.
    pub fn insert_new_into_slot(
        &self,
        parent: NodeId,
        slot: &str,
        index: usize,
        node: Node,
    ) -> Result<(Self, NodeId), PageError> {
        let mut next = self.clone();
        let id = NodeId::new(next.next_id);
        next.next_id += 1;
        next.nodes.insert(id, node);
        next.splice(parent, slot, index, id)?;
        Ok((next, id))
    }

    /// Detaches `child` from the named slot, returning the new page.
    ///
    /// The child and its subtree stay in the arena, unattached. Fails if the
    /// child is not in that slot.
    pub fn remove_from_slot(
        &self,
        parent: NodeId,
        slot: &str,
        child: NodeId,
    ) -> Result<Self, PageError> {
        let mut next = self.clone();
        next.detach(parent, slot, child)?;
        Ok(next)
    }

    /// Moves `child` from wherever it is attached into the given slot, as a
    /// single all-or-nothing operation.
    ///
    /// This is the commit path for dropping an existing node. The insertion
    /// index is interpreted against the slot *after* the child has been
    /// detached, so moving a node later within its own slot uses the
    /// post-removal indices.
    pub fn reparent(
        &self,
        child: NodeId,
        parent: NodeId,
        slot: &str,
        index: usize,
    ) -> Result<Self, PageError> {
        let mut next = self.clone();
        if let Some((old_parent, old_slot)) = next.parent_of(child) {
            let old_slot = String::from(old_slot);
            next.detach(old_parent, &old_slot, child)?;
        }
        next.splice(parent, slot, index, child)?;
        Ok(next)
    }

    /// Removes `id` and its whole subtree from the page.
    ///
    /// The node is detached from its parent slot (if attached) and every
    /// node in its subtree is dropped from the arena. Removing the root is
    /// an [`InvalidEdit::RootRemoval`].
    pub fn remove_node(&self, id: NodeId) -> Result<Self, PageError> {
        if id == self.root {
            return Err(InvalidEdit::RootRemoval.into());
        }
        let doomed = self.descendants(id)?;
        let mut next = self.clone();
        if let Some((parent, slot)) = next.parent_of(id) {
            let slot = String::from(slot);
            next.detach(parent, &slot, id)?;
        }
        next.nodes.remove(&id);
        for d in doomed {
            next.nodes.remove(&d);
        }
        Ok(next)
    }

    /// In-place splice with full validation. Callers operate on a clone so
    /// an `Err` discards any partial work.
    fn splice(
        &mut self,
        parent: NodeId,
        slot: &str,
        index: usize,
        child: NodeId,
    ) -> Result<(), PageError> {
        if !self.contains(child) {
            return Err(PageError::NotFound(child));
        }
        if !self.contains(parent) {
            return Err(PageError::NotFound(parent));
        }
        if child == self.root || self.parent_of(child).is_some() {
            return Err(InvalidEdit::AlreadyAttached(child).into());
        }
        // Last line of defense for the forest invariant. The drop-target
        // resolver already excludes the dragged subtree; a target inside it
        // can only get here through a caller bypassing that filter.
        if parent == child || self.descendants(child)?.contains(&parent) {
            return Err(InvalidEdit::WouldCreateCycle {
                child,
                target: parent,
            }
            .into());
        }
        let parent_node = self
            .nodes
            .get_mut(&parent)
            .ok_or(PageError::NotFound(parent))?;
        let value = parent_node
            .slot_mut(slot)
            .ok_or_else(|| InvalidEdit::NoSuchSlot {
                node: parent,
                slot: String::from(slot),
            })?;
        match value {
            SlotValue::Single(existing) => {
                if index != 0 {
                    return Err(InvalidEdit::IndexOutOfRange {
                        slot: String::from(slot),
                        index,
                        len: existing.iter().count(),
                    }
                    .into());
                }
                if existing.is_some() {
                    return Err(InvalidEdit::SlotOccupied {
                        node: parent,
                        slot: String::from(slot),
                    }
                    .into());
                }
                *existing = Some(child);
            }
            SlotValue::List(children) => {
                if index > children.len() {
                    return Err(InvalidEdit::IndexOutOfRange {
                        slot: String::from(slot),
                        index,
                        len: children.len(),
                    }
                    .into());
                }
                children.insert(index, child);
            }
        }
        Ok(())
    }

    /// In-place detach with validation; the counterpart of [`Self::splice`].
    fn detach(&mut self, parent: NodeId, slot: &str, child: NodeId) -> Result<(), PageError> {
        let parent_node = self
            .nodes
            .get_mut(&parent)
            .ok_or(PageError::NotFound(parent))?;
        let value = parent_node
            .slot_mut(slot)
            .ok_or_else(|| InvalidEdit::NoSuchSlot {
                node: parent,
                slot: String::from(slot),
            })?;
        let not_in_slot = || InvalidEdit::NotInSlot {
            node: parent,
            slot: String::from(slot),
            child,
        };
        match value {
            SlotValue::Single(existing) => {
                if *existing != Some(child) {
                    return Err(not_in_slot().into());
                }
                *existing = None;
            }
            SlotValue::List(children) => {
                let pos = children
                    .iter()
                    .position(|&c| c == child)
                    .ok_or_else(not_in_slot)?;
                children.remove(pos);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ComponentKind;

    fn container(kind: &str) -> Node {
        Node::new(ComponentKind::new(kind)).with_slot("children", SlotValue::empty_list())
    }

    fn leaf(kind: &str) -> Node {
        Node::new(ComponentKind::new(kind))
    }

    /// root ┬ stack ┬ button
    ///      │       └ text
    ///      └ image
    fn sample_page() -> (Page, NodeId, NodeId, NodeId, NodeId) {
        let page = Page::new(container("Page"));
        let root = page.root();
        let (page, stack) = page
            .insert_new_into_slot(root, "children", 0, container("Stack"))
            .unwrap();
        let (page, button) = page
            .insert_new_into_slot(stack, "children", 0, leaf("Button"))
            .unwrap();
        let (page, text) = page
            .insert_new_into_slot(stack, "children", 1, leaf("Text"))
            .unwrap();
        let (page, image) = page
            .insert_new_into_slot(root, "children", 1, leaf("Image"))
            .unwrap();
        (page, stack, button, text, image)
    }

    #[test]
    fn ancestors_run_parent_to_root() {
        let (page, stack, button, _, _) = sample_page();
        assert_eq!(page.ancestors(button).unwrap(), [stack, page.root()]);
        assert!(page.ancestors(page.root()).unwrap().is_empty());
    }

    #[test]
    fn no_node_is_its_own_ancestor_or_descendant() {
        let (page, ..) = sample_page();
        for id in page.node_ids() {
            assert!(!page.ancestors(id).unwrap().contains(&id));
            assert!(!page.descendants(id).unwrap().contains(&id));
        }
    }

    #[test]
    fn descendants_are_transitive() {
        let (page, stack, button, text, image) = sample_page();
        let from_root = page.descendants(page.root()).unwrap();
        assert_eq!(from_root.len(), 4);
        let from_stack = page.descendants(stack).unwrap();
        assert!(from_stack.contains(&button));
        assert!(from_stack.contains(&text));
        assert!(!from_stack.contains(&image));
    }

    #[test]
    fn nodes_by_depth_is_shallowest_first() {
        let (page, stack, button, text, image) = sample_page();
        let order = page.nodes_by_depth();
        assert_eq!(order, [page.root(), stack, image, button, text]);
    }

    #[test]
    fn unknown_ids_are_not_found() {
        let (page, ..) = sample_page();
        let ghost = NodeId::from_raw(999);
        assert_eq!(page.node(ghost), Err(PageError::NotFound(ghost)));
        assert_eq!(page.ancestors(ghost), Err(PageError::NotFound(ghost)));
        assert_eq!(page.descendants(ghost), Err(PageError::NotFound(ghost)));
    }

    #[test]
    fn edits_leave_the_original_untouched() {
        let (page, _, button, _, _) = sample_page();
        let before = page.clone();
        let _ = page.remove_node(button).unwrap();
        assert_eq!(page, before);
    }

    #[test]
    fn splice_index_bounds_are_checked() {
        let (page, stack, ..) = sample_page();
        let err = page
            .insert_new_into_slot(stack, "children", 5, leaf("Late"))
            .unwrap_err();
        assert!(matches!(
            err,
            PageError::InvalidEdit(InvalidEdit::IndexOutOfRange { index: 5, len: 2, .. })
        ));
    }

    #[test]
    fn missing_slot_is_rejected() {
        let (page, _, button, _, _) = sample_page();
        let err = page
            .insert_new_into_slot(button, "children", 0, leaf("Child"))
            .unwrap_err();
        assert!(matches!(
            err,
            PageError::InvalidEdit(InvalidEdit::NoSuchSlot { .. })
        ));
    }

    #[test]
    fn single_slot_arity_is_enforced() {
        let page = Page::new(
            Node::new(ComponentKind::new("Frame")).with_slot("content", SlotValue::empty_single()),
        );
        let root = page.root();
        let (page, _) = page
            .insert_new_into_slot(root, "content", 0, leaf("First"))
            .unwrap();
        let err = page
            .insert_new_into_slot(root, "content", 0, leaf("Second"))
            .unwrap_err();
        assert!(matches!(
            err,
            PageError::InvalidEdit(InvalidEdit::SlotOccupied { .. })
        ));
    }

    #[test]
    fn reparent_moves_a_subtree() {
        let (page, stack, button, text, _) = sample_page();
        let page = page.reparent(button, page.root(), "children", 0).unwrap();
        assert_eq!(page.parent_of(button), Some((page.root(), "children")));
        let stack_children = page.node(stack).unwrap().slot("children").unwrap().children();
        assert_eq!(stack_children, [text]);
    }

    #[test]
    fn reparent_into_own_subtree_is_a_cycle() {
        let (page, stack, _, _, _) = sample_page();
        // Give the stack's button a slot so the target is plausible, then
        // try to move the stack under its own descendant.
        let (page, inner) = page
            .insert_new_into_slot(stack, "children", 2, container("Inner"))
            .unwrap();
        let err = page.reparent(stack, inner, "children", 0).unwrap_err();
        assert!(matches!(
            err,
            PageError::InvalidEdit(InvalidEdit::WouldCreateCycle { .. })
        ));
    }

    #[test]
    fn remove_node_drops_the_whole_subtree() {
        let (page, stack, button, text, image) = sample_page();
        let page = page.remove_node(stack).unwrap();
        assert!(!page.contains(stack));
        assert!(!page.contains(button));
        assert!(!page.contains(text));
        assert!(page.contains(image));
        let root_children = page
            .node(page.root())
            .unwrap()
            .slot("children")
            .unwrap()
            .children()
            .to_vec();
        assert_eq!(root_children, [image]);
    }

    #[test]
    fn root_cannot_be_removed() {
        let (page, ..) = sample_page();
        assert_eq!(
            page.remove_node(page.root()),
            Err(PageError::InvalidEdit(InvalidEdit::RootRemoval))
        );
    }

    #[test]
    fn ids_are_not_reused_after_removal() {
        let (page, _, button, _, _) = sample_page();
        let page = page.remove_node(button).unwrap();
        let (_, fresh) = page
            .insert_new_into_slot(page.root(), "children", 0, leaf("Fresh"))
            .unwrap();
        assert_ne!(fresh, button);
    }
}
