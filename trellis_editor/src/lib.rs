// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Editor: the interaction state machine for the page editor.
//!
//! [`Editor`] owns the page tree, the latest layout snapshot, and the
//! current interaction state (selection, in-flight drag, drop highlight).
//! Every input — clicks, drag moves, drops, Backspace — funnels through a
//! single [`Editor::handle`] entry point, so the whole interaction model is
//! one synchronous transition function over [`EditorEvent`]s.
//!
//! ## Event flow
//!
//! The host translates raw input into [`EditorEvent`]s and feeds them in.
//! Pointer events carry *client* coordinates; the editor translates them
//! into content space against the surface rect set via
//! [`Editor::set_surface_rect`], treating points outside the surface as
//! "not over the page". After each render the host rebuilds its layout
//! snapshot and hands it over with [`Editor::install_layout`]; the editor
//! never inspects the render tree itself.
//!
//! Drops commit exactly one tree edit, producing a whole new [`Page`]
//! (edits are persistent, see `trellis_page_tree`). A drop with no
//! resolvable target, or one the tree-edit API rejects, is a logged no-op:
//! the page the renderer is showing stays untouched.
//!
//! ```
//! use kurbo::{Point, Rect};
//! use trellis_editor::{Editor, EditorEvent, EditorPhase};
//! use trellis_page_tree::{ComponentKind, Node, Page, SlotValue};
//!
//! let page = Page::new(
//!     Node::new(ComponentKind::new("Page")).with_slot("children", SlotValue::empty_list()),
//! );
//! let mut editor = Editor::new(page);
//! editor.set_surface_rect(Rect::new(0.0, 0.0, 300.0, 200.0));
//!
//! // No layout installed yet, so nothing resolves; the click just clears.
//! editor.handle(EditorEvent::Click(Point::new(20.0, 20.0)));
//! assert_eq!(editor.phase(), EditorPhase::Idle);
//! assert_eq!(editor.selection(), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod editor;

pub use editor::{DragSource, Editor, EditorEvent, EditorPhase, HudFlags};
