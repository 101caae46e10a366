// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Geometric utility types and functions.
//!
//! All textbox geometry lives in page pixel space: the origin is the
//! top-left corner of the page image and one unit is one image pixel.
//! Pointer positions arrive from the display in viewport pixels and are
//! mapped into page space before they reach the model.

use serde::{Deserialize, Serialize};

/// A position in page pixel space. May lie outside the page while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset from `self` to `other`. Wide enough for any pair of points.
    pub fn delta_to(&self, other: Point) -> (i64, i64) {
        (
            i64::from(other.x) - i64::from(self.x),
            i64::from(other.y) - i64::from(self.y),
        )
    }
}

/// An axis-aligned box in page pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Build a box from two opposite corners, in any order.
    pub fn from_corners(x1: u32, y1: u32, x2: u32, y2: u32) -> Self {
        Self {
            x: x1.min(x2),
            y: y1.min(y2),
            width: x1.abs_diff(x2),
            height: y1.abs_diff(y2),
        }
    }

    /// Build the part of a drag rectangle that lies on a page of the given
    /// size. Returns `None` when nothing of it is on the page.
    pub fn clipped_from_points(a: Point, b: Point, page_width: u32, page_height: u32) -> Option<Self> {
        let clip = |v: i32, max: u32| v.clamp(0, max.min(i32::MAX as u32) as i32) as u32;
        let (x1, x2) = (clip(a.x.min(b.x), page_width), clip(a.x.max(b.x), page_width));
        let (y1, y2) = (clip(a.y.min(b.y), page_height), clip(a.y.max(b.y), page_height));
        if x1 == x2 || y1 == y2 {
            return None;
        }
        Some(Self::from_corners(x1, y1, x2, y2))
    }

    /// The same box with its size cut so `right` and `bottom` are exact.
    pub fn fitted(&self) -> Self {
        Self {
            width: self.width.min(u32::MAX - self.x),
            height: self.height.min(u32::MAX - self.y),
            ..*self
        }
    }

    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Corner coordinates `[x1, y1, x2, y2]`.
    pub fn corners(&self) -> [u32; 4] {
        [self.x, self.y, self.right(), self.bottom()]
    }

    pub fn contains(&self, point: Point) -> bool {
        let (px, py) = (i64::from(point.x), i64::from(point.y));
        px >= i64::from(self.x)
            && px <= i64::from(self.right())
            && py >= i64::from(self.y)
            && py <= i64::from(self.bottom())
    }

    /// Translate by a signed offset, keeping the whole box on the page.
    ///
    /// The box keeps its size. On an axis where it is larger than the page
    /// it is pinned to the origin.
    pub fn translated_within(&self, dx: i64, dy: i64, page_width: u32, page_height: u32) -> Self {
        Self {
            x: shift_within(self.x, dx, self.width, page_width),
            y: shift_within(self.y, dy, self.height, page_height),
            width: self.width,
            height: self.height,
        }
    }
}

fn shift_within(origin: u32, delta: i64, extent: u32, limit: u32) -> u32 {
    let max = i64::from(limit.saturating_sub(extent));
    i64::from(origin).saturating_add(delta).clamp(0, max) as u32
}

/// Map a viewport position onto page pixels.
///
/// `display` is where the page image is drawn on screen as
/// `(left, top, width, height)`; `page` is the image size in pixels.
pub fn viewport_to_page(
    viewport_x: f64,
    viewport_y: f64,
    display: (f64, f64, f64, f64),
    page: (u32, u32),
) -> Point {
    let (left, top, width, height) = display;
    let scale_x = if width > 0.0 { page.0 as f64 / width } else { 1.0 };
    let scale_y = if height > 0.0 { page.1 as f64 / height } else { 1.0 };
    Point {
        x: ((viewport_x - left) * scale_x).round() as i32,
        y: ((viewport_y - top) * scale_y).round() as i32,
    }
}

/// Map a page position back onto the viewport.
pub fn page_to_viewport(point: Point, display: (f64, f64, f64, f64), page: (u32, u32)) -> (f64, f64) {
    let (left, top, width, height) = display;
    let scale_x = if page.0 > 0 { width / page.0 as f64 } else { 1.0 };
    let scale_y = if page.1 > 0 { height / page.1 as f64 } else { 1.0 };
    (left + point.x as f64 * scale_x, top + point.y as f64 * scale_y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_page_roundtrip() {
        let display = (100.0, 50.0, 640.0, 960.0);
        let page = (1280, 1920);

        let point = viewport_to_page(420.0, 530.0, display, page);
        assert_eq!(point, Point::new(640, 960));

        let (vx, vy) = page_to_viewport(point, display, page);
        assert!((vx - 420.0).abs() < 0.0001);
        assert!((vy - 530.0).abs() < 0.0001);
    }

    #[test]
    fn test_viewport_corners() {
        let display = (0.0, 0.0, 800.0, 1200.0);
        let page = (1600, 2400);
        assert_eq!(viewport_to_page(0.0, 0.0, display, page), Point::new(0, 0));
        assert_eq!(viewport_to_page(800.0, 1200.0, display, page), Point::new(1600, 2400));
    }

    #[test]
    fn test_from_corners_any_order() {
        assert_eq!(Rect::from_corners(110, 40, 10, 10), Rect::new(10, 10, 100, 30));
        assert_eq!(Rect::new(10, 10, 100, 30).corners(), [10, 10, 110, 40]);
    }

    #[test]
    fn test_clipped_from_points() {
        let rect = Rect::clipped_from_points(Point::new(-20, 10), Point::new(50, 300), 100, 200);
        assert_eq!(rect, Some(Rect::new(0, 10, 50, 190)));

        // Entirely off the page.
        assert_eq!(
            Rect::clipped_from_points(Point::new(150, 10), Point::new(180, 40), 100, 200),
            None
        );
        // Zero width.
        assert_eq!(
            Rect::clipped_from_points(Point::new(10, 10), Point::new(10, 40), 100, 200),
            None
        );
    }

    #[test]
    fn test_translated_within_clamps_without_shrinking() {
        let rect = Rect::new(10, 10, 100, 30);
        assert_eq!(rect.translated_within(5, -3, 500, 500), Rect::new(15, 7, 100, 30));
        assert_eq!(rect.translated_within(-50, -50, 500, 500), Rect::new(0, 0, 100, 30));
        assert_eq!(rect.translated_within(900, 900, 500, 500), Rect::new(400, 470, 100, 30));
    }

    #[test]
    fn test_delta_to_extreme_points() {
        let (dx, dy) = Point::new(i32::MIN, i32::MAX).delta_to(Point::new(i32::MAX, i32::MIN));
        assert_eq!(dx, i64::from(u32::MAX));
        assert_eq!(dy, -i64::from(u32::MAX));

        let rect = Rect::new(10, 10, 100, 30);
        assert_eq!(rect.translated_within(dx, dy, 500, 500), Rect::new(400, 0, 100, 30));
        assert_eq!(rect.translated_within(i64::MIN, i64::MAX, 500, 500), Rect::new(0, 470, 100, 30));
    }

    #[test]
    fn test_fitted_keeps_corners_exact() {
        let rect = Rect::new(u32::MAX - 5, 3, 100, 10).fitted();
        assert_eq!(rect, Rect::new(u32::MAX - 5, 3, 5, 10));
        assert_eq!(rect.corners(), [u32::MAX - 5, 3, u32::MAX, 13]);
        assert_eq!(Rect::new(1, 2, 3, 4).fitted(), Rect::new(1, 2, 3, 4));
    }

    #[test]
    fn test_translated_within_oversized_box() {
        let rect = Rect::new(0, 0, 600, 30);
        assert_eq!(rect.translated_within(40, 0, 500, 500), Rect::new(0, 0, 600, 30));
    }

    #[test]
    fn test_contains_edges() {
        let rect = Rect::new(10, 10, 100, 30);
        assert!(rect.contains(Point::new(10, 10)));
        assert!(rect.contains(Point::new(110, 40)));
        assert!(!rect.contains(Point::new(111, 40)));
        assert!(!rect.contains(Point::new(-1, 20)));
    }
}
