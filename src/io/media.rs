// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Page image inspection.
//!
//! Page images are never decoded here. Only their headers are read to
//! recover pixel dimensions when an OCR page does not record them.

use std::io::Cursor;
use std::path::Path;

/// File extensions treated as page images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif", "gif", "bmp"];

/// Check whether an archive entry name looks like a page image.
pub fn is_page_image(name: &str) -> bool {
    if name.ends_with('/') {
        return false;
    }
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Read the pixel dimensions from an encoded image header.
///
/// Returns `None` when the format is unknown or the header is unreadable.
pub fn probe_dimensions(data: &[u8]) -> Option<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .ok()?;
    match reader.into_dimensions() {
        Ok(dimensions) => Some(dimensions),
        Err(e) => {
            log::debug!("Could not read image dimensions: {}", e);
            None
        }
    }
}
