// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Volume archives: a zip of page images plus the mokuro OCR description.

mod load;
mod save;
pub mod schema;

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;

use crate::error::Result;
use crate::io::archive::Archive;
use crate::models::Volume;

/// How the OCR description was laid out in the source archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Every page record lives inside the manifest.
    Inline,
    /// The manifest pairs images with separate OCR entries.
    Split {
        /// OCR entry name keyed by image name.
        ocr_entries: BTreeMap<String, String>,
    },
}

/// What the serializer needs to know about the loaded archive.
#[derive(Debug, Clone)]
pub(crate) struct Source {
    pub(crate) manifest: String,
    pub(crate) layout: Layout,
    /// Image names in manifest order.
    pub(crate) order: Vec<String>,
    /// Parsed JSON of every OCR document, keyed by entry name.
    pub(crate) originals: HashMap<String, Value>,
}

/// A loaded volume together with the archive it came from.
#[derive(Debug, Clone)]
pub struct VolumeFile {
    archive: Archive,
    volume: Volume,
    source: Source,
}

impl VolumeFile {
    /// Parse a `.mbz.zip` blob.
    pub fn open(bytes: &[u8]) -> Result<Self> {
        Self::from_archive(Archive::load(bytes)?)
    }

    /// Build the volume model from an already loaded archive.
    pub fn from_archive(archive: Archive) -> Result<Self> {
        let (volume, source) = load::load_volume(&archive)?;
        Ok(Self {
            archive,
            volume,
            source,
        })
    }

    pub fn volume(&self) -> &Volume {
        &self.volume
    }

    pub fn volume_mut(&mut self) -> &mut Volume {
        &mut self.volume
    }

    /// The archive as it was loaded. Edits are not reflected until export.
    pub fn archive(&self) -> &Archive {
        &self.archive
    }

    /// Name of the entry holding the manifest.
    pub fn manifest_name(&self) -> &str {
        &self.source.manifest
    }

    pub fn layout(&self) -> &Layout {
        &self.source.layout
    }

    /// Raw bytes of a page's image.
    pub fn page_image(&self, index: usize) -> Option<&[u8]> {
        let page = self.volume.page(index)?;
        self.archive.get(page.image()).ok()
    }

    /// A copy of the source archive with the OCR entries rebuilt.
    pub fn to_archive(&self) -> Result<Archive> {
        let mut archive = self.archive.clone();
        save::save_volume(&self.volume, &self.source, &mut archive)?;
        Ok(archive)
    }

    /// Serialize the current model into a new zip blob.
    pub fn export(&self) -> Result<Vec<u8>> {
        let bytes = self.to_archive()?.generate()?;
        log::info!("Exported '{}': {} bytes", self.volume.title, bytes.len());
        Ok(bytes)
    }
}
