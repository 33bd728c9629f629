// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Snapshot lifecycle: rebuild-on-render, rebuild-on-resize, and size-watch
//! bookkeeping.

use alloc::vec::Vec;

use crate::builder::{RenderedElement, build_snapshot};
use crate::types::ViewLayout;

/// The host's size-change notification channel.
///
/// The analog of a resize observer: elements registered with `observe`
/// produce size-change events on the host's event queue until
/// `disconnect` drops every registration at once.
pub trait SizeObserver<H> {
    /// Start watching an element for size changes.
    fn observe(&mut self, handle: H);
    /// Stop watching all currently observed elements.
    fn disconnect(&mut self);
}

/// Owns the current snapshot and the watches backing it.
///
/// Call [`SurfaceBinding::rebuild`] after every paint and on every
/// size-change notification. Each rebuild replaces both the snapshot and
/// the watch set; old watches are always disconnected before new ones are
/// installed, so watches on elements that no longer exist cannot
/// accumulate across renders.
#[derive(Debug)]
pub struct SurfaceBinding<H, O> {
    observer: O,
    watched: Vec<H>,
    layout: ViewLayout,
}

impl<H: Copy, O: SizeObserver<H>> SurfaceBinding<H, O> {
    /// Creates a binding with no snapshot yet.
    #[must_use]
    pub fn new(observer: O) -> Self {
        Self {
            observer,
            watched: Vec::new(),
            layout: ViewLayout::new(),
        }
    }

    /// The current snapshot. Empty until the first successful rebuild.
    #[must_use]
    pub fn layout(&self) -> &ViewLayout {
        &self.layout
    }

    /// The host observer (mainly for tests and teardown).
    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Rebuilds the snapshot from the rendered surface.
    ///
    /// On success the previous watches are disconnected, the new marked
    /// elements are observed, and the new snapshot replaces the old one;
    /// returns `true`. On failure the previous snapshot and watches stay in
    /// place, a warning is logged, and `false` is returned; the next
    /// successful rebuild supersedes the stale snapshot.
    pub fn rebuild<E>(&mut self, root: &E) -> bool
    where
        E: RenderedElement<Handle = H>,
    {
        match build_snapshot(root) {
            Ok(snapshot) => {
                self.observer.disconnect();
                for &handle in &snapshot.watched {
                    self.observer.observe(handle);
                }
                self.watched = snapshot.watched;
                self.layout = snapshot.layout;
                true
            }
            Err(err) => {
                log::warn!("layout rebuild failed: {err}; keeping previous snapshot");
                false
            }
        }
    }

    /// Disconnects all watches and drops the snapshot.
    ///
    /// For closing the editing surface; the binding can be reused with a
    /// later [`SurfaceBinding::rebuild`].
    pub fn release(&mut self) {
        self.observer.disconnect();
        self.watched.clear();
        self.layout = ViewLayout::new();
    }
}
