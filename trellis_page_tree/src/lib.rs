// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Page Tree: the persistent hierarchy of placed components.
//!
//! A [`Page`] is an arena of [`Node`]s keyed by opaque [`NodeId`]s, plus a
//! distinguished root. Structure lives entirely in named *slots*: each node
//! carries an ordered list of `(name, SlotValue)` pairs, where a slot holds
//! either a single optional child or an ordered list of children. There are
//! no parent back-pointers; the parent relation is derived, which keeps the
//! arena free of cycle risk by construction and leaves exactly one place
//! (the edit operations) where the forest invariant must be enforced.
//!
//! ## Edits are pure
//!
//! All tree edits take `&self` and return a fresh [`Page`], leaving the
//! original untouched. A failed edit therefore cannot leave a half-applied
//! mutation behind; callers either get the new value or keep the old one.
//! This is the all-or-nothing commit the drag-and-drop layer relies on.
//!
//! ## Minimal example
//!
//! ```
//! use trellis_page_tree::{ComponentKind, Node, Page, SlotValue};
//!
//! let root = Node::new(ComponentKind::new("Page"))
//!     .with_slot("children", SlotValue::empty_list());
//! let page = Page::new(root);
//!
//! let button = Node::new(ComponentKind::new("Button"));
//! let (page, button_id) = page
//!     .insert_new_into_slot(page.root(), "children", 0, button)
//!     .unwrap();
//!
//! assert_eq!(page.parent_of(button_id), Some((page.root(), "children")));
//! assert!(page.descendants(page.root()).unwrap().contains(&button_id));
//! ```
//!
//! Hit testing, drop-target resolution, and interaction state live in the
//! sibling crates; they consume this model read-only.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod error;
mod node;
mod page;

pub use error::{InvalidEdit, PageError};
pub use node::{ComponentKind, Node, NodeId, PropBag, PropValue, SlotValue};
pub use page::Page;
