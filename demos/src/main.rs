// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scripted editing session against a fake rendered surface.
//!
//! This binary plays the role of the host application: it "renders" the
//! page as a tree of marked elements, keeps the layout snapshot in sync
//! through a [`SurfaceBinding`], and feeds a fixed stream of pointer and
//! keyboard events into the [`Editor`], printing the interaction state
//! after each step. Run it with `cargo run -p demos`.

use kurbo::{Point, Rect};
use log::{Log, Metadata, Record};
use trellis_editor::{Editor, EditorEvent};
use trellis_page_tree::{ComponentKind, Node, NodeId, Page, SlotValue};
use trellis_view_layout::{
    SizeObserver, SlotDirection, SurfaceBinding, test_surface::TestElement,
};

/// Plain stderr logger, so the library crates' `log::warn!` paths show up.
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, _metadata: &Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &Record<'_>) {
        eprintln!("[{}] {}", record.level(), record.args());
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

/// Stands in for a platform resize-observer API: counts what is watched.
#[derive(Debug, Default)]
struct CountingObserver {
    watching: usize,
    observed_total: usize,
}

impl SizeObserver<u64> for CountingObserver {
    fn observe(&mut self, _handle: u64) {
        self.watching += 1;
        self.observed_total += 1;
    }

    fn disconnect(&mut self) {
        self.watching = 0;
    }
}

const SURFACE: Rect = Rect::new(0.0, 0.0, 300.0, 200.0);

fn container(kind: &str) -> Node {
    Node::new(ComponentKind::new(kind)).with_slot("children", SlotValue::empty_list())
}

/// Row-stacking fake renderer: every list slot is its node's rect inset by
/// 5, and each child gets a 30-high row from the slot's top.
fn render(page: &Page) -> TestElement {
    render_node(page, page.root(), SURFACE)
}

fn render_node(page: &Page, id: NodeId, rect: Rect) -> TestElement {
    let mut elm = TestElement::node(id.to_raw(), rect);
    let Some(node) = page.get(id) else {
        return elm;
    };
    for (name, slot) in node.slots() {
        let slot_rect = rect.inset(-5.0);
        let children: Vec<TestElement> = slot
            .children()
            .iter()
            .enumerate()
            .map(|(row, &child)| {
                let y = slot_rect.y0 + 40.0 * row as f64;
                let child_rect =
                    Rect::new(slot_rect.x0 + 5.0, y + 5.0, slot_rect.x1 - 5.0, y + 35.0);
                render_node(page, child, child_rect)
            })
            .collect();
        elm = elm.with_children([
            TestElement::list_slot(name, SlotDirection::Vertical, slot_rect)
                .with_children(children),
        ]);
    }
    elm
}

/// The host side: the editor plus the binding that keeps its layout fresh.
struct Host {
    editor: Editor,
    binding: SurfaceBinding<u64, CountingObserver>,
}

impl Host {
    /// The "Rendered" host event: re-render, rebuild watches, hand the new
    /// snapshot to the editor.
    fn rendered(&mut self) {
        let surface = render(self.editor.page());
        if self.binding.rebuild(&surface) {
            self.editor.install_layout(self.binding.layout().clone());
        }
    }

    fn step(&mut self, label: &str, event: EditorEvent) {
        self.editor.handle(event);
        let highlight = self
            .editor
            .highlight()
            .map_or_else(|| String::from("-"), |t| format!("{t:?}"));
        println!(
            "{label:<28} phase={:?} selection={:?} highlight={highlight}",
            self.editor.phase(),
            self.editor.selection(),
        );
    }
}

fn main() {
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Debug);
    }

    let mut host = Host {
        editor: Editor::new(Page::new(container("Page"))),
        binding: SurfaceBinding::new(CountingObserver::default()),
    };
    host.editor.set_surface_rect(SURFACE);
    host.rendered();
    host.step("focus", EditorEvent::FocusGained);

    // Drag a stack from the catalog onto the empty page.
    host.step(
        "pick Stack",
        EditorEvent::ComponentPicked(container("Stack")),
    );
    host.step("drag over page", EditorEvent::DragOver(Point::new(150.0, 100.0)));
    host.step("drop", EditorEvent::Drop(Point::new(150.0, 100.0)));
    host.rendered();

    // Drop a labelled button inside the stack's row.
    let button = Node::new(ComponentKind::new("Button"))
        .with_slot("children", SlotValue::empty_list())
        .with_prop("label", "Buy now");
    host.step("pick Button", EditorEvent::ComponentPicked(button));
    host.step("drag over stack", EditorEvent::DragOver(Point::new(150.0, 25.0)));
    host.step("drop", EditorEvent::Drop(Point::new(150.0, 25.0)));
    host.rendered();

    // Start moving the stack, then think better of it.
    host.step("grab stack", EditorEvent::DragStart(Point::new(12.0, 12.0)));
    host.step("drag over own child", EditorEvent::DragOver(Point::new(150.0, 25.0)));
    host.step("cancel", EditorEvent::DragEnd);

    // Select the button and delete it.
    host.step("click button", EditorEvent::Click(Point::new(150.0, 25.0)));
    if let Some(rect) = host.editor.selected_rect() {
        println!("{:>28} {rect:?}", "selection HUD rect");
    }
    host.step("backspace", EditorEvent::Backspace);
    host.rendered();

    println!(
        "final page: {} nodes; watches live={} installed-over-session={}",
        host.editor.page().len(),
        host.binding.observer().watching,
        host.binding.observer().observed_total,
    );
    host.binding.release();
}
