// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis View Layout: rendered geometry mapped back to page nodes.
//!
//! The preview surface renders the page tree however it likes; this crate
//! turns what actually got painted into a [`ViewLayout`]: a snapshot mapping
//! every node id to its on-screen rect and the geometry of its drop slots.
//! The drop-target resolver consumes nothing but this snapshot plus pointer
//! coordinates, so the whole hit-testing pipeline works off rendered truth
//! rather than what the layout *should* have been.
//!
//! ## The renderer contract
//!
//! The renderer's only obligations are captured by [`RenderedElement`]:
//!
//! - every element rendered for a tree node carries that node's id as a
//!   marker, and
//! - every element rendered for a slot carries a [`SlotMarker`] naming the
//!   slot and its kind (single-valued, or list-valued with a flow
//!   direction).
//!
//! [`build_snapshot`] walks the element tree and derives all slot geometry
//! from rendered positions: occupied or placeholder slot regions become
//! [`SlotLayout::Slot`] rects, and the gaps of a list-valued slot become
//! zero-thickness [`SlotLayout::Insert`] lines, one per splice index.
//!
//! ## Rebuilds and size watching
//!
//! A snapshot is immutable once built and is fully rebuilt (never patched)
//! after every paint and on every observed size change. [`SurfaceBinding`]
//! owns that cycle: it keeps the current snapshot, registers every marked
//! element with the host's [`SizeObserver`], and tears all watches down
//! before installing the next set so watches on removed elements cannot
//! accumulate across renders. A failed rebuild keeps the previous snapshot
//! in place and logs a warning; the next successful rebuild supersedes it.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod binding;
mod builder;
pub mod test_surface;
mod types;

pub use binding::{SizeObserver, SurfaceBinding};
pub use builder::{LayoutError, RenderedElement, SlotKind, SlotMarker, Snapshot, build_snapshot};
pub use types::{NodeLayout, SlotDirection, SlotLayout, ViewLayout};
