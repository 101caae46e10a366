// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Data models for volumes, pages and textboxes.

pub mod page;
pub mod textbox;
pub mod volume;

pub use page::Page;
pub use textbox::{Orientation, Textbox, DEFAULT_FONT_SIZE, MIN_FONT_SIZE};
pub use volume::Volume;
