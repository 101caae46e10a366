// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Building the volume model from archive entries.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::schema::{Manifest, PageOcr, PageRef, MANIFEST_NAMES, MOKURO_EXTENSION};
use super::{Layout, Source};
use crate::error::{Error, Result};
use crate::io::archive::Archive;
use crate::io::media;
use crate::models::{Page, Volume};
use crate::util::naming::natural_cmp;

/// Parse the OCR description of a loaded archive into a volume.
pub(crate) fn load_volume(archive: &Archive) -> Result<(Volume, Source)> {
    let manifest_name = find_manifest(archive)?;
    let mut originals = HashMap::new();
    let manifest: Manifest = parse_entry(archive, &manifest_name, &mut originals)?;

    let images = page_images(archive);
    let (layout, order, mut ocr_by_image) = collect_pages(archive, &manifest, &mut originals)?;

    let image_set: HashSet<&str> = images.iter().copied().collect();
    if let Some(missing) = ocr_by_image.keys().find(|name| !image_set.contains(name.as_str())) {
        return Err(Error::mismatch(format!("OCR page {missing} has no image entry")));
    }

    let mut pages = Vec::with_capacity(images.len());
    for image in &images {
        let Some(ocr) = ocr_by_image.remove(*image) else {
            return Err(Error::mismatch(format!("image {image} has no OCR page")));
        };
        pages.push(build_page(archive, image, ocr)?);
    }

    let volume = Volume::new(manifest.title, pages).with_metadata(manifest.extra);
    log::info!(
        "Loaded volume '{}' from {}: {} pages, {} textboxes",
        volume.title,
        manifest_name,
        volume.page_count(),
        volume.textbox_count()
    );

    Ok((
        volume,
        Source {
            manifest: manifest_name,
            layout,
            order,
            originals,
        },
    ))
}

/// Page image entries in reading order.
pub(crate) fn page_images(archive: &Archive) -> Vec<&str> {
    let mut images: Vec<&str> = archive.names().filter(|n| media::is_page_image(n)).collect();
    images.sort_by(|a, b| natural_cmp(a, b));
    images
}

fn find_manifest(archive: &Archive) -> Result<String> {
    if let Some(name) = MANIFEST_NAMES.iter().find(|name| archive.contains(name)) {
        return Ok(name.to_string());
    }

    let mut candidates = archive.files().map(|(name, _)| name).filter(|n| n.ends_with(MOKURO_EXTENSION));
    match (candidates.next(), candidates.next()) {
        (Some(name), None) => Ok(name.to_string()),
        (Some(_), Some(_)) => Err(Error::mismatch("archive holds more than one .mokuro manifest")),
        (None, _) => Err(Error::not_found(MANIFEST_NAMES[0])),
    }
}

/// Read the manifest pages into OCR documents keyed by image name.
///
/// Also returns the image names in manifest order.
fn collect_pages(
    archive: &Archive,
    manifest: &Manifest,
    originals: &mut HashMap<String, Value>,
) -> Result<(Layout, Vec<String>, BTreeMap<String, PageOcr>)> {
    let mut order = Vec::with_capacity(manifest.pages.len());
    let mut ocr_by_image = BTreeMap::new();
    let mut ocr_entries = BTreeMap::new();
    let mut inline = 0;

    for page in &manifest.pages {
        let (image, ocr) = match page {
            PageRef::Inline(record) => {
                inline += 1;
                (record.img_path.clone(), record.ocr.clone())
            }
            PageRef::Pair(image, ocr_name) => {
                if !archive.contains(ocr_name) {
                    return Err(Error::mismatch(format!(
                        "OCR entry {ocr_name} for {image} is missing"
                    )));
                }
                let ocr: PageOcr = parse_entry(archive, ocr_name, originals)?;
                ocr_entries.insert(image.clone(), ocr_name.clone());
                (image.clone(), ocr)
            }
        };

        if ocr_by_image.insert(image.clone(), ocr).is_some() {
            return Err(Error::mismatch(format!("page {image} is listed twice")));
        }
        order.push(image);
    }

    let layout = match (inline, ocr_entries.len()) {
        (_, 0) => Layout::Inline,
        (0, _) => Layout::Split { ocr_entries },
        _ => return Err(Error::mismatch("manifest mixes inline and split pages")),
    };
    Ok((layout, order, ocr_by_image))
}

fn build_page(archive: &Archive, image: &str, ocr: PageOcr) -> Result<Page> {
    let (width, height) = match (ocr.img_width, ocr.img_height) {
        (Some(width), Some(height)) => (width, height),
        _ => {
            let data = archive.get(image)?;
            media::probe_dimensions(data).ok_or_else(|| {
                Error::mismatch(format!("page {image} has no recorded or readable dimensions"))
            })?
        }
    };

    let textboxes = ocr.blocks.iter().map(|block| block.to_textbox()).collect();
    Ok(Page::new(image, width, height)
        .with_textboxes(textboxes)
        .with_extra(ocr.extra))
}

/// Parse a JSON entry, remembering its value for the serializer.
fn parse_entry<T: DeserializeOwned>(
    archive: &Archive,
    name: &str,
    originals: &mut HashMap<String, Value>,
) -> Result<T> {
    let invalid = |source| Error::InvalidOcr {
        entry: name.to_string(),
        source,
    };
    let value: Value = serde_json::from_slice(archive.get(name)?).map_err(invalid)?;
    let parsed = T::deserialize(&value).map_err(invalid)?;
    originals.insert(name.to_string(), value);
    Ok(parsed)
}
