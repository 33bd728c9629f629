// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The editor state machine: one struct, one `handle` entry point.

use bitflags::bitflags;
use hashbrown::HashSet;
use kurbo::{Point, Rect, Vec2};
use trellis_drop_target::{DropTarget, available_nodes, find_active_slot_at, find_node_at};
use trellis_geometry::rect_contains_point;
use trellis_page_tree::{Node, NodeId, Page};
use trellis_view_layout::ViewLayout;

/// What is being dragged, if anything.
#[derive(Clone, Debug, PartialEq)]
pub enum DragSource {
    /// A prototype picked from the component catalog. No tree node exists
    /// yet; one is created from the prototype when the drop commits.
    NewComponent(Node),
    /// A node already in the page, being moved to a new slot.
    ExistingNode(NodeId),
}

/// Input to [`Editor::handle`]. Pointer events carry client coordinates;
/// the editor translates them against the surface rect.
#[derive(Clone, Debug, PartialEq)]
pub enum EditorEvent {
    /// Pointer click on the surface overlay.
    Click(Point),
    /// The pointer started dragging on the surface overlay.
    DragStart(Point),
    /// The user picked a component from the catalog and began dragging it
    /// toward the surface.
    ComponentPicked(Node),
    /// The pointer moved while a drag is in flight.
    DragOver(Point),
    /// The pointer was released while a drag is in flight.
    Drop(Point),
    /// The drag ended without a drop on the surface (cancelled, or released
    /// outside the window).
    DragEnd,
    /// The Backspace key, for removing the selected node.
    Backspace,
    /// The editor surface gained keyboard focus.
    FocusGained,
    /// The editor surface lost keyboard focus.
    FocusLost,
}

/// The coarse interaction phase, derived from the editor's state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditorPhase {
    /// Nothing selected, nothing dragging.
    Idle,
    /// A node is selected; no drag in flight.
    NodeSelected,
    /// An existing page node is being moved.
    DraggingExistingNode,
    /// A catalog component is being dragged onto the page.
    DraggingNewComponent,
}

bitflags! {
    /// Per-node flags the renderer uses to draw HUD chrome and route
    /// pointer events.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct HudFlags: u8 {
        /// The node is the current selection; draw the selection outline.
        const SELECTED = 1 << 0;
        /// Pointer events pass through the overlay to this node. Only the
        /// selection and its ancestors are interactive, so clicking inside
        /// a selected container drills down instead of re-hitting chrome.
        const INTERACTIVE = 1 << 1;
    }
}

/// The interaction state machine for one editor surface.
///
/// Owns the current [`Page`] and everything the renderer needs to draw
/// selection and drag feedback. See the crate docs for the event flow.
#[derive(Debug)]
pub struct Editor {
    page: Page,
    layout: ViewLayout,
    surface_rect: Rect,
    selection: Option<NodeId>,
    drag: Option<DragSource>,
    highlight: Option<DropTarget>,
    focused: bool,
}

impl Editor {
    /// Creates an editor over `page` with an empty layout and a zero
    /// surface rect. Until [`Self::set_surface_rect`] and
    /// [`Self::install_layout`] are called, no pointer event resolves to
    /// anything.
    #[must_use]
    pub fn new(page: Page) -> Self {
        Self {
            page,
            layout: ViewLayout::default(),
            surface_rect: Rect::ZERO,
            selection: None,
            drag: None,
            highlight: None,
            focused: false,
        }
    }

    /// The current page tree.
    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    /// The currently selected node, if any.
    #[must_use]
    pub fn selection(&self) -> Option<NodeId> {
        self.selection
    }

    /// The drop target the in-flight drag would commit to, if any.
    #[must_use]
    pub fn highlight(&self) -> Option<&DropTarget> {
        self.highlight.as_ref()
    }

    /// The in-flight drag source, if any.
    #[must_use]
    pub fn drag(&self) -> Option<&DragSource> {
        self.drag.as_ref()
    }

    /// The coarse interaction phase.
    #[must_use]
    pub fn phase(&self) -> EditorPhase {
        match (&self.drag, self.selection) {
            (Some(DragSource::NewComponent(_)), _) => EditorPhase::DraggingNewComponent,
            (Some(DragSource::ExistingNode(_)), _) => EditorPhase::DraggingExistingNode,
            (None, Some(_)) => EditorPhase::NodeSelected,
            (None, None) => EditorPhase::Idle,
        }
    }

    /// The selected node's rendered rect, for drawing the selection HUD.
    /// `None` when nothing is selected or the node was not rendered in the
    /// current layout.
    #[must_use]
    pub fn selected_rect(&self) -> Option<Rect> {
        let id = self.selection?;
        self.layout.get(id).map(|node_layout| node_layout.rect)
    }

    /// HUD flags for `id` under the current selection.
    #[must_use]
    pub fn hud_flags(&self, id: NodeId) -> HudFlags {
        let mut flags = HudFlags::empty();
        let Some(selected) = self.selection else {
            return flags;
        };
        if id == selected {
            flags |= HudFlags::SELECTED | HudFlags::INTERACTIVE;
        } else if self.interactive_nodes().contains(&id) {
            flags |= HudFlags::INTERACTIVE;
        }
        flags
    }

    /// The interaction-enabled set: the selection plus its ancestors.
    /// Empty when nothing is selected.
    #[must_use]
    pub fn interactive_nodes(&self) -> HashSet<NodeId> {
        let mut set = HashSet::new();
        if let Some(selected) = self.selection {
            set.insert(selected);
            if let Ok(ancestors) = self.page.ancestors(selected) {
                set.extend(ancestors);
            }
        }
        set
    }

    /// Sets the surface rect: the client-space rect of the rendered page
    /// area, used to translate pointer coordinates.
    pub fn set_surface_rect(&mut self, rect: Rect) {
        self.surface_rect = rect;
    }

    /// Installs a fresh layout snapshot, typically right after the host's
    /// surface binding rebuilt it. If the selected node is gone from the
    /// new layout the selection is kept; it simply stops resolving a rect
    /// until the node renders again.
    pub fn install_layout(&mut self, layout: ViewLayout) {
        self.layout = layout;
    }

    /// Feeds one event through the state machine.
    pub fn handle(&mut self, event: EditorEvent) {
        match event {
            EditorEvent::Click(p) => self.on_click(p),
            EditorEvent::DragStart(p) => self.on_drag_start(p),
            EditorEvent::ComponentPicked(prototype) => self.on_component_picked(prototype),
            EditorEvent::DragOver(p) => self.on_drag_over(p),
            EditorEvent::Drop(p) => self.on_drop(p),
            EditorEvent::DragEnd => self.clear_drag(),
            EditorEvent::Backspace => self.on_backspace(),
            EditorEvent::FocusGained => self.focused = true,
            EditorEvent::FocusLost => self.focused = false,
        }
    }

    /// Client → content coordinates. `None` when the point is outside the
    /// surface rect, which every pointer handler treats as "not over the
    /// page".
    fn view_coordinates(&self, client: Point) -> Option<Point> {
        if !rect_contains_point(self.surface_rect, client) {
            return None;
        }
        Some(client - Vec2::new(self.surface_rect.x0, self.surface_rect.y0))
    }

    fn on_click(&mut self, client: Point) {
        let Some(p) = self.view_coordinates(client) else {
            return;
        };
        // Clicking empty surface clears the selection.
        self.selection = find_node_at(&self.page, &self.layout, p);
    }

    fn on_drag_start(&mut self, client: Point) {
        if self.drag.is_some() {
            return;
        }
        let Some(p) = self.view_coordinates(client) else {
            return;
        };
        if let Some(id) = find_node_at(&self.page, &self.layout, p) {
            // Grabbing a node selects it, so the HUD follows it through the
            // drag.
            self.selection = Some(id);
            self.drag = Some(DragSource::ExistingNode(id));
        }
    }

    fn on_component_picked(&mut self, prototype: Node) {
        self.drag = Some(DragSource::NewComponent(prototype));
        self.highlight = None;
    }

    fn on_drag_over(&mut self, client: Point) {
        if self.drag.is_none() {
            return;
        }
        self.highlight = self
            .view_coordinates(client)
            .and_then(|p| self.resolve_target(p));
    }

    fn on_drop(&mut self, client: Point) {
        let Some(drag) = self.drag.take() else {
            return;
        };
        self.highlight = None;
        // Re-resolve at the drop coordinates rather than trusting the last
        // hover highlight; the two can disagree after a scroll or re-render.
        let target = self
            .view_coordinates(client)
            .and_then(|p| self.resolve_target_for(&drag, p));
        let Some(target) = target else {
            log::warn!("drop without a resolvable target; page unchanged");
            return;
        };
        let index = target.index.unwrap_or(0);
        let committed = match drag {
            DragSource::NewComponent(prototype) => self
                .page
                .insert_new_into_slot(target.node, &target.slot, index, prototype)
                .map(|(page, id)| {
                    self.selection = Some(id);
                    page
                }),
            DragSource::ExistingNode(id) => {
                // The highlight's index counts the rendered child list, which
                // still contains the dragged node; `reparent` splices after
                // detaching it. For a same-slot move past the node's own
                // position, shift the index down to compensate.
                let index = match self.page.parent_of(id) {
                    Some((parent, slot)) if parent == target.node && target.slot == slot => {
                        let pos = self
                            .page
                            .get(parent)
                            .and_then(|node| node.slot(&target.slot))
                            .and_then(|value| value.children().iter().position(|&c| c == id));
                        match pos {
                            Some(pos) if pos < index => index - 1,
                            _ => index,
                        }
                    }
                    _ => index,
                };
                self.page.reparent(id, target.node, &target.slot, index)
            }
        };
        match committed {
            Ok(page) => self.page = page,
            Err(err) => log::warn!("drop rejected: {err}"),
        }
    }

    fn on_backspace(&mut self) {
        if !self.focused {
            return;
        }
        let Some(selected) = self.selection else {
            return;
        };
        match self.page.remove_node(selected) {
            Ok(page) => {
                self.page = page;
                self.selection = None;
            }
            Err(err) => log::warn!("cannot remove selected node: {err}"),
        }
    }

    fn clear_drag(&mut self) {
        self.drag = None;
        self.highlight = None;
    }

    /// Resolves the drop target at `p` for the in-flight drag.
    fn resolve_target(&self, p: Point) -> Option<DropTarget> {
        self.drag
            .as_ref()
            .and_then(|drag| self.resolve_target_for(drag, p))
    }

    fn resolve_target_for(&self, drag: &DragSource, p: Point) -> Option<DropTarget> {
        let dragged = match drag {
            DragSource::NewComponent(_) => None,
            DragSource::ExistingNode(id) => Some(*id),
        };
        let nodes = available_nodes(&self.page, dragged);
        find_active_slot_at(&nodes, &self.layout, p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;
    use kurbo::Rect;
    use trellis_page_tree::{ComponentKind, SlotValue};
    use trellis_view_layout::{SlotDirection, build_snapshot, test_surface::TestElement};

    fn container(kind: &str) -> Node {
        Node::new(ComponentKind::new(kind)).with_slot("children", SlotValue::empty_list())
    }

    /// Root page with one stack child; the stack's list slot is empty. The
    /// surface sits at a (50, 40) client offset to exercise translation.
    fn editor_with_layout() -> (Editor, NodeId) {
        let page = Page::new(container("Page"));
        let root = page.root();
        let (page, stack) = page
            .insert_new_into_slot(root, "children", 0, container("Stack"))
            .unwrap();

        let stack_elm = TestElement::node(stack.to_raw(), Rect::new(20.0, 20.0, 180.0, 120.0))
            .with_children([TestElement::list_slot(
                "children",
                SlotDirection::Vertical,
                Rect::new(25.0, 25.0, 175.0, 115.0),
            )]);
        let root_elm = TestElement::node(root.to_raw(), Rect::new(0.0, 0.0, 300.0, 200.0))
            .with_children([TestElement::list_slot(
                "children",
                SlotDirection::Vertical,
                Rect::new(5.0, 5.0, 295.0, 195.0),
            )
            .with_children([stack_elm])]);

        let mut editor = Editor::new(page);
        editor.set_surface_rect(Rect::new(50.0, 40.0, 350.0, 240.0));
        editor.install_layout(build_snapshot(&root_elm).unwrap().layout);
        (editor, stack)
    }

    /// Client point for a content point under the (50, 40) surface offset.
    fn client(x: f64, y: f64) -> Point {
        Point::new(x + 50.0, y + 40.0)
    }

    #[test]
    fn click_selects_the_deepest_node_and_empty_click_clears() {
        let (mut editor, stack) = editor_with_layout();
        editor.handle(EditorEvent::Click(client(30.0, 30.0)));
        assert_eq!(editor.selection(), Some(stack));
        assert_eq!(editor.phase(), EditorPhase::NodeSelected);

        // Over the root but outside the stack.
        editor.handle(EditorEvent::Click(client(250.0, 180.0)));
        assert_eq!(editor.selection(), Some(editor.page().root()));

        // Outside the surface entirely: no-op, selection kept.
        editor.handle(EditorEvent::Click(Point::new(0.0, 0.0)));
        assert_eq!(editor.selection(), Some(editor.page().root()));
    }

    #[test]
    fn click_past_the_rendered_page_clears_selection() {
        let (mut editor, stack) = editor_with_layout();
        editor.handle(EditorEvent::Click(client(30.0, 30.0)));
        assert_eq!(editor.selection(), Some(stack));

        // Inside the surface rect but past every rendered rect (the root
        // rect is 300x200; the surface is larger only in client space).
        editor.set_surface_rect(Rect::new(50.0, 40.0, 450.0, 340.0));
        editor.handle(EditorEvent::Click(client(350.0, 250.0)));
        assert_eq!(editor.selection(), None);
        assert_eq!(editor.phase(), EditorPhase::Idle);
    }

    #[test]
    fn drag_start_selects_and_enters_the_existing_node_phase() {
        let (mut editor, stack) = editor_with_layout();
        editor.handle(EditorEvent::DragStart(client(30.0, 30.0)));
        assert_eq!(editor.selection(), Some(stack));
        assert_eq!(editor.phase(), EditorPhase::DraggingExistingNode);
        assert_eq!(editor.drag(), Some(&DragSource::ExistingNode(stack)));

        // A second drag start while one is in flight is ignored.
        editor.handle(EditorEvent::DragStart(client(250.0, 180.0)));
        assert_eq!(editor.drag(), Some(&DragSource::ExistingNode(stack)));
    }

    #[test]
    fn drag_start_on_empty_surface_does_not_start_a_drag() {
        let (mut editor, _) = editor_with_layout();
        editor.handle(EditorEvent::DragStart(Point::new(0.0, 0.0)));
        assert_eq!(editor.phase(), EditorPhase::Idle);
        assert_eq!(editor.drag(), None);
    }

    #[test]
    fn drag_over_highlights_the_empty_container_slot() {
        let (mut editor, stack) = editor_with_layout();
        editor.handle(EditorEvent::ComponentPicked(container("Button")));
        assert_eq!(editor.phase(), EditorPhase::DraggingNewComponent);

        editor.handle(EditorEvent::DragOver(client(100.0, 70.0)));
        let highlight = editor.highlight().unwrap();
        assert_eq!(highlight.node, stack);
        assert_eq!(highlight.slot, "children");
        assert_eq!(highlight.index, Some(0));

        // Leaving the surface clears the highlight but not the drag.
        editor.handle(EditorEvent::DragOver(Point::new(0.0, 0.0)));
        assert_eq!(editor.highlight(), None);
        assert_eq!(editor.phase(), EditorPhase::DraggingNewComponent);
    }

    #[test]
    fn drag_over_without_a_drag_is_ignored() {
        let (mut editor, _) = editor_with_layout();
        editor.handle(EditorEvent::DragOver(client(100.0, 70.0)));
        assert_eq!(editor.highlight(), None);
    }

    #[test]
    fn drop_commits_a_new_component_and_selects_it() {
        let (mut editor, stack) = editor_with_layout();
        editor.handle(EditorEvent::ComponentPicked(container("Button")));
        editor.handle(EditorEvent::Drop(client(100.0, 70.0)));

        let stack_children: Vec<NodeId> = editor.page().get(stack).unwrap().child_ids().collect();
        assert_eq!(stack_children.len(), 1);
        let new_id = stack_children[0];
        assert_eq!(editor.page().get(new_id).unwrap().kind.as_str(), "Button");
        assert_eq!(editor.selection(), Some(new_id));
        assert_eq!(editor.phase(), EditorPhase::NodeSelected);
        assert_eq!(editor.highlight(), None);
    }

    #[test]
    fn drop_reparents_an_existing_node() {
        let (mut editor, stack) = editor_with_layout();
        // Grab the stack and drop it near the root slot's leading insertion
        // line, away from the stack's own rect.
        editor.handle(EditorEvent::DragStart(client(30.0, 30.0)));
        editor.handle(EditorEvent::Drop(client(250.0, 10.0)));

        // The stack stays the root's only child; a same-parent drop is a
        // reorder, not a duplication.
        let root = editor.page().root();
        let root_children: Vec<NodeId> = editor.page().get(root).unwrap().child_ids().collect();
        assert_eq!(root_children, [stack]);
        assert_eq!(editor.page().len(), 2);
        assert_eq!(editor.phase(), EditorPhase::NodeSelected);
    }

    #[test]
    fn drop_outside_the_surface_is_a_no_op_that_ends_the_drag() {
        let (mut editor, stack) = editor_with_layout();
        editor.handle(EditorEvent::ComponentPicked(container("Button")));
        editor.handle(EditorEvent::Drop(Point::new(0.0, 0.0)));

        assert_eq!(editor.page().len(), 2);
        assert_eq!(editor.page().get(stack).unwrap().child_ids().count(), 0);
        assert_eq!(editor.drag(), None);
        assert_eq!(editor.highlight(), None);
    }

    #[test]
    fn drag_end_cancels_without_mutation() {
        let (mut editor, _) = editor_with_layout();
        editor.handle(EditorEvent::ComponentPicked(container("Button")));
        editor.handle(EditorEvent::DragOver(client(100.0, 70.0)));
        assert!(editor.highlight().is_some());

        editor.handle(EditorEvent::DragEnd);
        assert_eq!(editor.page().len(), 2);
        assert_eq!(editor.drag(), None);
        assert_eq!(editor.highlight(), None);
        assert_eq!(editor.phase(), EditorPhase::Idle);
    }

    #[test]
    fn backspace_removes_the_selection_only_when_focused() {
        let (mut editor, stack) = editor_with_layout();
        editor.handle(EditorEvent::Click(client(30.0, 30.0)));
        assert_eq!(editor.selection(), Some(stack));

        // Unfocused: the key belongs to someone else.
        editor.handle(EditorEvent::Backspace);
        assert!(editor.page().contains(stack));

        editor.handle(EditorEvent::FocusGained);
        editor.handle(EditorEvent::Backspace);
        assert!(!editor.page().contains(stack));
        assert_eq!(editor.selection(), None);
        assert_eq!(editor.phase(), EditorPhase::Idle);
    }

    #[test]
    fn backspace_on_the_root_is_a_logged_no_op() {
        let (mut editor, _) = editor_with_layout();
        editor.handle(EditorEvent::FocusGained);
        editor.handle(EditorEvent::Click(client(250.0, 180.0)));
        assert_eq!(editor.selection(), Some(editor.page().root()));

        editor.handle(EditorEvent::Backspace);
        assert_eq!(editor.page().len(), 2);
        assert_eq!(editor.selection(), Some(editor.page().root()));
    }

    #[test]
    fn hud_flags_cover_the_selection_and_its_ancestors() {
        let (mut editor, stack) = editor_with_layout();
        let root = editor.page().root();
        assert_eq!(editor.hud_flags(stack), HudFlags::empty());

        editor.handle(EditorEvent::Click(client(30.0, 30.0)));
        assert_eq!(
            editor.hud_flags(stack),
            HudFlags::SELECTED | HudFlags::INTERACTIVE
        );
        assert_eq!(editor.hud_flags(root), HudFlags::INTERACTIVE);
        assert_eq!(editor.hud_flags(NodeId::from_raw(999)), HudFlags::empty());

        let interactive = editor.interactive_nodes();
        assert!(interactive.contains(&stack));
        assert!(interactive.contains(&root));
        assert_eq!(interactive.len(), 2);
    }

    #[test]
    fn selected_rect_tracks_the_layout() {
        let (mut editor, stack) = editor_with_layout();
        assert_eq!(editor.selected_rect(), None);

        editor.handle(EditorEvent::Click(client(30.0, 30.0)));
        assert_eq!(
            editor.selected_rect(),
            Some(Rect::new(20.0, 20.0, 180.0, 120.0))
        );

        // The node vanished from the next render; the selection stays but
        // stops resolving a rect.
        editor.install_layout(ViewLayout::default());
        assert_eq!(editor.selection(), Some(stack));
        assert_eq!(editor.selected_rect(), None);
    }
}
