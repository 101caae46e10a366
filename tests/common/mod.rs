// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Shared volume builders for integration tests.
//!
//! Each test file compiles as its own crate and uses only part of this.

#![allow(dead_code)]

use std::io::Cursor;

use mbz::io::archive::Archive;

/// A tiny real JPEG, so image entries look like what mokuro ships.
pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::new(width, height);
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Jpeg).unwrap();
    buffer.into_inner()
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::new(width, height);
    let mut buffer = Cursor::new(Vec::new());
    img.write_to(&mut buffer, image::ImageFormat::Png).unwrap();
    buffer.into_inner()
}

pub const P1_OCR: &str = r#"{"img_width":800,"img_height":1200,"blocks":[{"box":[10,10,110,40],"vertical":false,"font_size":20,"lines":["こんにちは"],"lines_coords":[[[10.0,10.0],[110.0,10.0],[110.0,40.0],[10.0,40.0]]]}]}"#;
pub const P2_OCR: &str = r#"{"img_width":800,"img_height":1200,"blocks":[]}"#;

/// Two pages in the split layout written by the reader's exporter.
pub fn split_archive() -> Archive {
    let mut archive = Archive::new();
    archive.set(
        "mokuro-metadata.json",
        r#"{"version":"0.1.6","created_at":"2024-01-01","modified_at":"2024-01-01","title":"Test Volume","volume":"Vol. 1","volume_uuid":"0f3a","pages":[["p1.jpg","_ocr/p1.json"],["p2.jpg","_ocr/p2.json"]]}"#,
    );
    archive.add_directory("_ocr");
    archive.set("_ocr/p1.json", P1_OCR);
    archive.set("_ocr/p2.json", P2_OCR);
    archive.set("p1.jpg", jpeg(8, 12));
    archive.set("p2.jpg", jpeg(8, 12));
    archive
}

/// The same volume as a single `.mokuro` file with inline pages.
pub fn inline_archive() -> Archive {
    let mut archive = Archive::new();
    archive.set("p1.jpg", jpeg(8, 12));
    archive.set("p2.jpg", jpeg(8, 12));
    archive.set(
        "Test Volume.mokuro",
        format!(
            r#"{{"version":"0.2.0","title":"Test Volume","pages":[{},{}]}}"#,
            P1_OCR.replacen('{', r#"{"img_path":"p1.jpg","#, 1),
            P2_OCR.replacen('{', r#"{"img_path":"p2.jpg","#, 1),
        ),
    );
    archive
}

/// Zip bytes of an archive.
pub fn blob(archive: &Archive) -> Vec<u8> {
    archive.generate().unwrap()
}
