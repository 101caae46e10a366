// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Writing the volume model back into archive entries.

use std::collections::HashMap;

use serde::Serialize;
use serde_json::Value;

use super::schema::{InlinePage, Manifest, PageOcr, PageRef, OCR_DIRECTORY};
use super::{Layout, Source};
use crate::error::{Error, Result};
use crate::io::archive::Archive;
use crate::models::{Page, Volume};

/// Rebuild the OCR entries of `archive` from `volume`.
///
/// Image entries and anything else the volume does not describe are left
/// untouched. Documents whose content did not change keep their original
/// bytes.
pub(crate) fn save_volume(volume: &Volume, source: &Source, archive: &mut Archive) -> Result<()> {
    let pages = ordered_pages(volume, &source.order)?;
    let mut written = 0;

    let refs = match &source.layout {
        Layout::Inline => pages
            .iter()
            .map(|page| {
                PageRef::Inline(InlinePage {
                    img_path: page.image().to_string(),
                    ocr: PageOcr::from_page(page),
                })
            })
            .collect(),
        Layout::Split { ocr_entries } => {
            if ocr_entries.values().any(|name| name.starts_with(OCR_DIRECTORY)) {
                archive.add_directory(OCR_DIRECTORY);
            }
            let mut refs = Vec::with_capacity(pages.len());
            for page in &pages {
                let ocr_name = ocr_entries
                    .get(page.image())
                    .ok_or_else(|| Error::mismatch(format!("page {} has no OCR entry", page.image())))?;
                let document = PageOcr::from_page(page);
                if write_entry(archive, ocr_name, &document, &source.originals)? {
                    written += 1;
                }
                refs.push(PageRef::Pair(page.image().to_string(), ocr_name.clone()));
            }
            refs
        }
    };

    let manifest = Manifest {
        title: volume.title.clone(),
        pages: refs,
        extra: volume.metadata().clone(),
    };
    if write_entry(archive, &source.manifest, &manifest, &source.originals)? {
        written += 1;
    }

    log::info!(
        "Serialized volume '{}': {} of {} OCR entries rewritten",
        volume.title,
        written,
        pages.len() + 1
    );
    Ok(())
}

/// Pages in the order the manifest listed them.
fn ordered_pages<'a>(volume: &'a Volume, order: &[String]) -> Result<Vec<&'a Page>> {
    order
        .iter()
        .map(|image| {
            volume
                .page_by_image(image)
                .map(|(_, page)| page)
                .ok_or_else(|| Error::mismatch(format!("page {image} is no longer in the volume")))
        })
        .collect()
}

/// Store a document unless it equals the parsed original.
///
/// Returns whether the entry was rewritten.
fn write_entry<T: Serialize>(
    archive: &mut Archive,
    name: &str,
    document: &T,
    originals: &HashMap<String, Value>,
) -> Result<bool> {
    let invalid = |source| Error::InvalidOcr {
        entry: name.to_string(),
        source,
    };
    let value = serde_json::to_value(document).map_err(invalid)?;
    if archive.contains(name) && originals.get(name) == Some(&value) {
        log::debug!("Keeping original bytes of {name}");
        return Ok(false);
    }

    let bytes = serde_json::to_vec(document).map_err(invalid)?;
    archive.set(name, bytes);
    Ok(true)
}
