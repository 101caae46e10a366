// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Volume state.
//!
//! A volume is one manga book: a title and its pages in reading order.

use super::page::Page;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A manga volume and its annotated pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Volume {
    pub title: String,
    pages: Vec<Page>,
    /// Manifest fields other than the title and pages, kept for export.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    metadata: Map<String, Value>,
}

impl Volume {
    /// Create a new volume from pages in reading order.
    pub fn new(title: impl Into<String>, pages: Vec<Page>) -> Self {
        Self {
            title: title.into(),
            pages,
            metadata: Map::new(),
        }
    }

    pub(crate) fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    pub fn page_mut(&mut self, index: usize) -> Option<&mut Page> {
        self.pages.get_mut(index)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Find a page by its image entry name.
    pub fn page_by_image(&self, image: &str) -> Option<(usize, &Page)> {
        self.pages
            .iter()
            .enumerate()
            .find(|(_, page)| page.image() == image)
    }

    /// Total number of textboxes over all pages.
    pub fn textbox_count(&self) -> usize {
        self.pages.iter().map(Page::len).sum()
    }

    /// A metadata string such as `volume` or `volume_uuid`.
    pub fn metadata_str(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).and_then(Value::as_str)
    }

    pub(crate) fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }
}
