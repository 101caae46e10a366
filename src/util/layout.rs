// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Text extent estimate used to size textboxes to their content.
//!
//! No font is available here, so glyph advances are approximated: ASCII
//! characters take half an em, everything else (kana, kanji, full-width
//! punctuation) a full em. Lines are stacked at 1.2 em. The estimate is a
//! pure function of its inputs.

/// Advance of an ASCII character, in ems.
pub const NARROW_ADVANCE: f64 = 0.5;
/// Advance of any other character, in ems.
pub const WIDE_ADVANCE: f64 = 1.0;
/// Distance between consecutive lines, in ems.
pub const LINE_PITCH: f64 = 1.2;

/// Estimated advance of one line, in ems.
pub fn line_advance(line: &str) -> f64 {
    line.chars()
        .map(|c| if c.is_ascii() { NARROW_ADVANCE } else { WIDE_ADVANCE })
        .sum()
}

/// Extent of a block of text as `(along, across)` in pixels.
///
/// `along` runs in the writing direction (left to right for horizontal
/// text, top to bottom for vertical text), `across` is the stacking
/// direction. Lines longer than `available` pixels wrap.
pub fn text_extent(lines: &[String], font_size: f64, available: u32) -> (u32, u32) {
    let em = font_size;
    let available = f64::from(available).max(em);

    let mut longest: f64 = 0.0;
    let mut visual_lines: u32 = 0;
    for line in lines {
        let advance = line_advance(line) * em;
        longest = longest.max(advance);
        visual_lines = visual_lines.saturating_add(if advance > available {
            (advance / available).ceil() as u32
        } else {
            1
        });
    }

    let along = longest.min(available).max(em);
    let across = f64::from(visual_lines.max(1)) * LINE_PITCH * em;
    (to_pixels(along), to_pixels(across))
}

fn to_pixels(value: f64) -> u32 {
    // Absorb float noise such as 3.0 * 1.2 * 10.0 = 36.000000000000004.
    ((value - 1e-6).ceil() as u32).max(1)
}
