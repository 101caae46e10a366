// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! A single page: one image and the textboxes drawn over it.
//!
//! Textboxes are identified by their index in the page's list. The list
//! order is the tab order used for navigation, and deleting a textbox
//! shifts every later one down by one.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::textbox::{Orientation, Textbox};
use crate::util::geometry::{Point, Rect};

/// One page image and its ordered textboxes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    image: String,
    width: u32,
    height: u32,
    textboxes: Vec<Textbox>,
    /// Page fields this crate does not interpret, kept for export.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    extra: Map<String, Value>,
}

impl Page {
    /// Create a page without textboxes.
    pub fn new(image: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            image: image.into(),
            width,
            height,
            textboxes: Vec::new(),
            extra: Map::new(),
        }
    }

    pub(crate) fn with_textboxes(mut self, textboxes: Vec<Textbox>) -> Self {
        self.textboxes = textboxes;
        self
    }

    pub(crate) fn with_extra(mut self, extra: Map<String, Value>) -> Self {
        self.extra = extra;
        self
    }

    /// Name of the image entry in the archive.
    pub fn image(&self) -> &str {
        &self.image
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn textboxes(&self) -> &[Textbox] {
        &self.textboxes
    }

    pub fn textbox(&self, index: usize) -> Option<&Textbox> {
        self.textboxes.get(index)
    }

    pub fn textbox_mut(&mut self, index: usize) -> Option<&mut Textbox> {
        self.textboxes.get_mut(index)
    }

    pub fn len(&self) -> usize {
        self.textboxes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textboxes.is_empty()
    }

    pub(crate) fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    /// Append a new empty textbox and return its index.
    pub fn create(&mut self, rect: Rect, orientation: Orientation, font_size: f64) -> usize {
        self.textboxes.push(Textbox::new(rect, orientation, font_size));
        let index = self.textboxes.len() - 1;
        log::info!("Created {:?} textbox {} on {}", orientation, index, self.image);
        index
    }

    /// Append a textbox spanning a drag from `start` to `end`.
    ///
    /// The orientation follows the drag direction and the box is clipped to
    /// the page. Returns `None` when the drag has no width or height on the
    /// page.
    pub fn create_from_drag(&mut self, start: Point, end: Point, font_size: f64) -> Option<usize> {
        let orientation = Orientation::from_drag(start, end)?;
        let rect = Rect::clipped_from_points(start, end, self.width, self.height)?;
        Some(self.create(rect, orientation, font_size))
    }

    /// Remove a textbox, shifting later indices down by one.
    pub fn delete(&mut self, index: usize) -> Option<Textbox> {
        if index >= self.textboxes.len() {
            return None;
        }
        let removed = self.textboxes.remove(index);
        log::info!("Deleted textbox {} on {}, {} left", index, self.image, self.textboxes.len());
        Some(removed)
    }

    /// Translate a textbox within this page's bounds.
    pub fn move_textbox(&mut self, index: usize, dx: i32, dy: i32) -> bool {
        let (width, height) = (self.width, self.height);
        match self.textboxes.get_mut(index) {
            Some(textbox) => {
                textbox.move_by(dx, dy, width, height);
                true
            }
            None => false,
        }
    }

    /// Resize a textbox, keeping it on the page. Non-positive sizes are
    /// ignored.
    pub fn resize_textbox(&mut self, index: usize, width: i64, height: i64) -> bool {
        let (page_width, page_height) = (self.width, self.height);
        self.textboxes
            .get_mut(index)
            .is_some_and(|textbox| textbox.resize(width, height, page_width, page_height))
    }

    /// Size a textbox to its text.
    pub fn auto_fit(&mut self, index: usize) -> bool {
        let (width, height) = (self.width, self.height);
        match self.textboxes.get_mut(index) {
            Some(textbox) => {
                textbox.auto_fit(width, height);
                true
            }
            None => false,
        }
    }

    /// Topmost textbox under a point. Later textboxes are drawn on top.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.textboxes.iter().rposition(|t| t.rect().contains(point))
    }

    pub(crate) fn replace_textboxes(&mut self, textboxes: Vec<Textbox>) {
        self.textboxes = textboxes;
    }
}
