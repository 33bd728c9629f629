// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trellis Geometry: pointer-oriented distance helpers for hit testing.
//!
//! These are small, pure functions over [`kurbo`] types, shared by the
//! drop-target resolver and the view-layout builder. They differ from the
//! stock Kurbo operations in two deliberate ways:
//!
//! - [`rect_contains_point`] is inclusive of **all** rect edges, whereas
//!   [`kurbo::Rect::contains`] is half-open. A pointer resting exactly on a
//!   node's bottom/right border still counts as hovering that node.
//! - [`distance_to_segment`] is the distance to the *segment*, clamped to
//!   its endpoints, not to the infinite line. Insertion points are finite
//!   line segments; snapping to their infinite extension would let a slot
//!   far off to the side win.
//!
//! All functions are exact for degenerate inputs: zero-area rects behave as
//! points or segments, and zero-length segments behave as points.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Line, Point, Rect};
//! use trellis_geometry::{distance_to_rect, distance_to_segment, rect_contains_point};
//!
//! let rect = Rect::new(0.0, 0.0, 100.0, 50.0);
//! assert!(rect_contains_point(rect, Point::new(100.0, 50.0))); // far corner counts
//! assert_eq!(distance_to_rect(rect, Point::new(103.0, 54.0)), 5.0);
//!
//! let seg = Line::new((0.0, 0.0), (10.0, 0.0));
//! assert_eq!(distance_to_segment(seg, Point::new(5.0, 3.0)), 3.0);
//! assert_eq!(distance_to_segment(seg, Point::new(14.0, 3.0)), 5.0); // clamped to endpoint
//! ```
//!
//! This crate is `no_std` and has no allocations.

#![no_std]

use kurbo::{Line, Point, Rect, Vec2};

/// Returns `true` if `p` lies inside `rect` or on any of its edges.
///
/// Unlike [`Rect::contains`], this treats the maximum edges as part of the
/// rect. Degenerate rects (zero width and/or height) contain exactly the
/// points on their remaining extent.
#[must_use]
pub fn rect_contains_point(rect: Rect, p: Point) -> bool {
    p.x >= rect.x0 && p.x <= rect.x1 && p.y >= rect.y0 && p.y <= rect.y1
}

/// Euclidean distance from `p` to the nearest point on or in `rect`.
///
/// Returns `0.0` when the point is inside the rect or on its boundary.
#[must_use]
pub fn distance_to_rect(rect: Rect, p: Point) -> f64 {
    let dx = (rect.x0 - p.x).max(0.0).max(p.x - rect.x1);
    let dy = (rect.y0 - p.y).max(0.0).max(p.y - rect.y1);
    Vec2::new(dx, dy).hypot()
}

/// Distance from `p` to the line segment `seg`, clamped to the endpoints.
///
/// For a zero-length segment this is the distance to its (coincident)
/// endpoints.
#[must_use]
pub fn distance_to_segment(seg: Line, p: Point) -> f64 {
    let d = seg.p1 - seg.p0;
    let len2 = d.hypot2();
    if len2 == 0.0 {
        return (p - seg.p0).hypot();
    }
    let t = ((p - seg.p0).dot(d) / len2).clamp(0.0, 1.0);
    let nearest = seg.p0 + t * d;
    (p - nearest).hypot()
}
