// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! On-disk OCR documents as written by mokuro.
//!
//! Two manifest layouts exist in the wild. A `.mokuro` file lists every
//! page inline (`{"img_path": ..., "blocks": [...]}`), while archives
//! produced by the reader list `[image, ocr_file]` pairs and keep each
//! page's OCR in its own entry under `_ocr/`. Fields this crate does not
//! interpret are captured in `extra` maps and written back unchanged.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use crate::models::{Orientation, Page, Textbox, DEFAULT_FONT_SIZE};
use crate::util::geometry::Rect;

/// Manifest entry names, in lookup order.
pub const MANIFEST_NAMES: &[&str] = &["mokuro.json", "mokuro-metadata.json"];

/// Extension of standalone mokuro manifests.
pub const MOKURO_EXTENSION: &str = ".mokuro";

/// Folder holding per-page OCR entries in the split layout.
pub const OCR_DIRECTORY: &str = "_ocr/";

/// The volume-level OCR description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub title: String,
    pub pages: Vec<PageRef>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One manifest page, in either layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageRef {
    /// `[image_name, ocr_entry_name]`
    Pair(String, String),
    Inline(InlinePage),
}

/// A page record carrying its own OCR data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InlinePage {
    #[serde(alias = "image")]
    pub img_path: String,
    #[serde(flatten)]
    pub ocr: PageOcr,
}

/// OCR results for one page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageOcr {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img_height: Option<u32>,
    #[serde(default)]
    pub blocks: Vec<Block>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One recognized text block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// Corners as `[x1, y1, x2, y2]`.
    #[serde(rename = "box", deserialize_with = "deserialize_box")]
    pub bbox: [u32; 4],
    #[serde(default)]
    pub vertical: bool,
    #[serde(default = "default_font_size", serialize_with = "serialize_number")]
    pub font_size: f64,
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub opaque: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Block {
    pub fn to_textbox(&self) -> Textbox {
        let [x1, y1, x2, y2] = self.bbox;
        let orientation = if self.vertical {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        Textbox::new(Rect::from_corners(x1, y1, x2, y2), orientation, self.font_size)
            .with_lines(self.lines.clone())
            .with_opaque(self.opaque)
            .with_extra(self.extra.clone())
    }

    pub fn from_textbox(textbox: &Textbox) -> Self {
        Self {
            bbox: textbox.rect().corners(),
            vertical: textbox.orientation().is_vertical(),
            font_size: textbox.font_size(),
            lines: textbox.lines().to_vec(),
            opaque: textbox.is_opaque(),
            extra: textbox.extra().clone(),
        }
    }
}

impl PageOcr {
    /// OCR document for a page in the model.
    pub fn from_page(page: &Page) -> Self {
        Self {
            img_width: Some(page.width()),
            img_height: Some(page.height()),
            blocks: page.textboxes().iter().map(Block::from_textbox).collect(),
            extra: page.extra().clone(),
        }
    }
}

fn default_font_size() -> f64 {
    DEFAULT_FONT_SIZE
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// Accept integer or fractional coordinates; negatives clamp to zero.
fn deserialize_box<'de, D>(deserializer: D) -> Result<[u32; 4], D::Error>
where
    D: Deserializer<'de>,
{
    let raw = <[f64; 4]>::deserialize(deserializer)?;
    Ok(raw.map(|v| v.max(0.0).round().min(u32::MAX as f64) as u32))
}

/// Write whole numbers as integers, the way mokuro does.
fn serialize_number<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.fract() == 0.0 && *value >= 0.0 && *value <= u32::MAX as f64 {
        serializer.serialize_u64(*value as u64)
    } else {
        serializer.serialize_f64(*value)
    }
}
