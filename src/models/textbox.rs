// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Textbox data structures.
//!
//! A textbox is one OCR text block drawn over a page image: a bounding box
//! in page pixels, a writing direction, a font size and the recognized
//! lines of text. All mutations act on a single textbox and never look at
//! its siblings.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::util::geometry::{Point, Rect};
use crate::util::layout;

/// Smallest font size a textbox can have.
pub const MIN_FONT_SIZE: f64 = 1.0;

/// Font size given to new textboxes unless configured otherwise.
pub const DEFAULT_FONT_SIZE: f64 = 16.0;

/// Writing direction of a textbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Orientation implied by a creation drag.
    ///
    /// Dragging left to right creates horizontal text, right to left
    /// creates vertical text. A drag with no horizontal movement has no
    /// orientation.
    pub fn from_drag(start: Point, end: Point) -> Option<Self> {
        match end.x.cmp(&start.x) {
            std::cmp::Ordering::Greater => Some(Orientation::Horizontal),
            std::cmp::Ordering::Less => Some(Orientation::Vertical),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn is_vertical(self) -> bool {
        self == Orientation::Vertical
    }
}

/// An editable text overlay on a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Textbox {
    rect: Rect,
    orientation: Orientation,
    font_size: f64,
    lines: Vec<String>,
    #[serde(default)]
    opaque: bool,
    /// Block fields this crate does not interpret, kept for export.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    extra: Map<String, Value>,
}

impl Textbox {
    /// Create an empty textbox.
    pub fn new(rect: Rect, orientation: Orientation, font_size: f64) -> Self {
        Self {
            rect: rect.fitted(),
            orientation,
            font_size: clamp_font_size(font_size),
            lines: Vec::new(),
            opaque: false,
            extra: Map::new(),
        }
    }

    /// Builder-style helper to set the text.
    pub fn with_text(mut self, text: &str) -> Self {
        self.set_text(text);
        self
    }

    pub(crate) fn with_lines(mut self, lines: Vec<String>) -> Self {
        self.lines = lines;
        self
    }

    pub(crate) fn with_opaque(mut self, opaque: bool) -> Self {
        self.opaque = opaque;
        self
    }

    pub(crate) fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn font_size(&self) -> f64 {
        self.font_size
    }

    /// The text as recognized, one entry per line.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The text with lines joined by `\n`.
    pub fn text(&self) -> String {
        self.lines.join("\n")
    }

    pub fn is_opaque(&self) -> bool {
        self.opaque
    }

    pub(crate) fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Translate the box, keeping it inside a page of the given size.
    pub fn move_by(&mut self, dx: i32, dy: i32, page_width: u32, page_height: u32) {
        self.rect = self
            .rect
            .translated_within(i64::from(dx), i64::from(dy), page_width, page_height);
    }

    /// Set the box dimensions. Non-positive values leave the box unchanged.
    ///
    /// A size that would reach past the page edge is cut back to it, but
    /// never below one pixel. Returns whether the box was resized.
    pub fn resize(&mut self, width: i64, height: i64, page_width: u32, page_height: u32) -> bool {
        if width <= 0 || height <= 0 {
            return false;
        }
        self.rect.width = fit_extent(width, self.rect.x, page_width);
        self.rect.height = fit_extent(height, self.rect.y, page_height);
        true
    }

    /// Replace the whole bounding box.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect.fitted();
    }

    /// Size the box to its text, keeping the top-left corner.
    ///
    /// Lines that would run off the page wrap onto extra lines.
    pub fn auto_fit(&mut self, page_width: u32, page_height: u32) {
        let available = match self.orientation {
            Orientation::Horizontal => page_width.saturating_sub(self.rect.x),
            Orientation::Vertical => page_height.saturating_sub(self.rect.y),
        };
        let (along, across) = layout::text_extent(&self.lines, self.font_size, available);
        let (width, height) = match self.orientation {
            Orientation::Horizontal => (along, across),
            Orientation::Vertical => (across, along),
        };
        self.rect.width = fit_extent(i64::from(width), self.rect.x, page_width);
        self.rect.height = fit_extent(i64::from(height), self.rect.y, page_height);
    }

    /// Set the font size, clamped to [`MIN_FONT_SIZE`].
    pub fn set_font_size(&mut self, size: f64) {
        self.font_size = clamp_font_size(size);
    }

    /// Grow or shrink the font size by `delta`.
    pub fn adjust_font_size(&mut self, delta: f64) {
        self.set_font_size(self.font_size + delta);
    }

    /// Replace the text verbatim. The box keeps its size.
    ///
    /// Text equal to the current text leaves the stored lines untouched.
    pub fn set_text(&mut self, content: &str) {
        if content == self.text() {
            return;
        }
        self.lines = if content.is_empty() {
            Vec::new()
        } else {
            content.split('\n').map(str::to_string).collect()
        };
    }

    pub fn toggle_opacity(&mut self) {
        self.opaque = !self.opaque;
    }
}

/// A positive extent cut back to the page edge, at least one pixel.
fn fit_extent(extent: i64, origin: u32, limit: u32) -> u32 {
    let room = limit.saturating_sub(origin).max(1);
    u32::try_from(extent).map_or(room, |extent| extent.min(room))
}

fn clamp_font_size(size: f64) -> f64 {
    if size.is_finite() {
        size.max(MIN_FONT_SIZE)
    } else {
        MIN_FONT_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Textbox {
        Textbox::new(Rect::new(10, 10, 100, 30), Orientation::Horizontal, 20.0).with_text("こんにちは")
    }

    #[test]
    fn test_orientation_from_drag() {
        let start = Point::new(50, 50);
        assert_eq!(Orientation::from_drag(start, Point::new(80, 10)), Some(Orientation::Horizontal));
        assert_eq!(Orientation::from_drag(start, Point::new(20, 90)), Some(Orientation::Vertical));
        assert_eq!(Orientation::from_drag(start, Point::new(50, 90)), None);
    }

    #[test]
    fn test_move_clamps_to_page() {
        let mut textbox = sample();
        textbox.move_by(-100, 5, 500, 500);
        assert_eq!(textbox.rect(), Rect::new(0, 15, 100, 30));
        textbox.move_by(1000, 1000, 500, 500);
        assert_eq!(textbox.rect(), Rect::new(400, 470, 100, 30));
    }

    #[test]
    fn test_resize_rejects_non_positive() {
        let mut textbox = sample();
        assert!(!textbox.resize(0, 50, 500, 500));
        assert!(!textbox.resize(50, -1, 500, 500));
        assert_eq!(textbox.rect(), Rect::new(10, 10, 100, 30));

        assert!(textbox.resize(60, 70, 500, 500));
        assert_eq!(textbox.rect(), Rect::new(10, 10, 60, 70));
    }

    #[test]
    fn test_resize_stops_at_page_edge() {
        let mut textbox = sample();
        assert!(textbox.resize(i64::MAX, 5_000_000_000, 500, 400));
        assert_eq!(textbox.rect(), Rect::new(10, 10, 490, 390));
        assert_eq!(textbox.rect().corners(), [10, 10, 500, 400]);

        // A box already past the edge keeps one pixel.
        let mut outside = Textbox::new(Rect::new(600, 10, 20, 20), Orientation::Horizontal, 20.0);
        assert!(outside.resize(50, 50, 500, 500));
        assert_eq!(outside.rect(), Rect::new(600, 10, 1, 50));
    }

    #[test]
    fn test_auto_fit_huge_font_stays_on_page() {
        let mut textbox = sample().with_text("一二\n一二");
        textbox.set_font_size(f64::MAX);
        textbox.auto_fit(1000, 800);
        assert_eq!(textbox.rect(), Rect::new(10, 10, 990, 790));
    }

    #[test]
    fn test_new_textbox_corners_fit() {
        let textbox = Textbox::new(Rect::new(u32::MAX, 0, 10, 10), Orientation::Vertical, 16.0);
        assert_eq!(textbox.rect().width, 0);
        assert_eq!(textbox.rect().corners(), [u32::MAX, 0, u32::MAX, 10]);
    }

    #[test]
    fn test_font_size_clamps() {
        let mut textbox = sample();
        textbox.set_font_size(0.0);
        assert_eq!(textbox.font_size(), MIN_FONT_SIZE);
        textbox.set_font_size(f64::NAN);
        assert_eq!(textbox.font_size(), MIN_FONT_SIZE);
        textbox.set_font_size(32.5);
        textbox.adjust_font_size(-2.5);
        assert_eq!(textbox.font_size(), 30.0);
    }

    #[test]
    fn test_set_text_verbatim() {
        let mut textbox = sample();
        textbox.set_text("一行目\n二行目");
        assert_eq!(textbox.lines(), &["一行目".to_string(), "二行目".to_string()]);
        assert_eq!(textbox.text(), "一行目\n二行目");
        assert_eq!(textbox.rect(), Rect::new(10, 10, 100, 30));

        textbox.set_text("");
        assert!(textbox.lines().is_empty());
    }

    #[test]
    fn test_set_same_text_keeps_lines() {
        let mut textbox = sample().with_lines(vec![String::new()]);
        textbox.set_text("");
        assert_eq!(textbox.lines(), &[String::new()]);

        let mut textbox = sample().with_lines(vec!["a".into(), String::new()]);
        textbox.set_text("a\n");
        assert_eq!(textbox.lines().len(), 2);
        textbox.set_text("b");
        assert_eq!(textbox.lines(), &["b".to_string()]);
    }

    #[test]
    fn test_toggle_opacity_leaves_geometry() {
        let mut textbox = sample();
        let before = textbox.rect();
        textbox.toggle_opacity();
        assert!(textbox.is_opaque());
        textbox.toggle_opacity();
        assert!(!textbox.is_opaque());
        assert_eq!(textbox.rect(), before);
        assert_eq!(textbox.text(), "こんにちは");
    }

    #[test]
    fn test_auto_fit_horizontal_and_vertical() {
        let mut textbox = sample();
        textbox.auto_fit(1000, 1000);
        assert_eq!(textbox.rect(), Rect::new(10, 10, 100, 24));

        let mut vertical =
            Textbox::new(Rect::new(10, 10, 5, 5), Orientation::Vertical, 20.0).with_text("こんにちは");
        vertical.auto_fit(1000, 1000);
        assert_eq!(vertical.rect(), Rect::new(10, 10, 24, 100));
    }

    #[test]
    fn test_auto_fit_wraps_at_page_edge() {
        let mut textbox =
            Textbox::new(Rect::new(960, 0, 5, 5), Orientation::Horizontal, 10.0).with_text("一二三四五六七八九十");
        textbox.auto_fit(1000, 1000);
        assert_eq!(textbox.rect(), Rect::new(960, 0, 40, 36));
    }
}
