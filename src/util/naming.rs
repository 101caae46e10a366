// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Page filename ordering.

use std::cmp::Ordering;

/// Compare two entry names in natural order.
///
/// Runs of ASCII digits compare by numeric value, so `p2.jpg` sorts before
/// `p10.jpg`. Everything else compares by byte value; no locale is
/// consulted. Names that are equal under this rule fall back to a plain
/// byte comparison, which keeps the order total.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (a_bytes, b_bytes) = (a.as_bytes(), b.as_bytes());
    let (mut i, mut j) = (0, 0);

    while i < a_bytes.len() && j < b_bytes.len() {
        if a_bytes[i].is_ascii_digit() && b_bytes[j].is_ascii_digit() {
            let a_end = digit_run_end(a_bytes, i);
            let b_end = digit_run_end(b_bytes, j);
            let ordering = compare_digit_runs(&a_bytes[i..a_end], &b_bytes[j..b_end]);
            if ordering != Ordering::Equal {
                return ordering;
            }
            i = a_end;
            j = b_end;
        } else {
            match a_bytes[i].cmp(&b_bytes[j]) {
                Ordering::Equal => {
                    i += 1;
                    j += 1;
                }
                ordering => return ordering,
            }
        }
    }

    (a_bytes.len() - i)
        .cmp(&(b_bytes.len() - j))
        .then_with(|| a_bytes.cmp(b_bytes))
}

fn digit_run_end(bytes: &[u8], start: usize) -> usize {
    bytes[start..]
        .iter()
        .position(|b| !b.is_ascii_digit())
        .map_or(bytes.len(), |offset| start + offset)
}

fn compare_digit_runs(a: &[u8], b: &[u8]) -> Ordering {
    let trim = |run: &[u8]| -> usize { run.iter().take_while(|&&d| d == b'0').count() };
    let (a, b) = (&a[trim(a)..], &b[trim(b)..]);
    // Without leading zeros, a longer run is a larger number.
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}
