// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Manga volume archives with editable OCR textbox overlays.
//!
//! A volume is a zip of page images together with the text blocks mokuro
//! recognized on them. [`VolumeFile`] opens such an archive into a
//! [`Volume`] model, [`EditSession`] drives interactive changes to its
//! textboxes, and [`VolumeFile::export`] writes the result back.

pub mod error;
pub mod format;
pub mod io;
pub mod library;
pub mod loader;
pub mod models;
pub mod session;
pub mod settings;
pub mod store;
pub mod util;

pub use error::{Error, Result};
pub use format::VolumeFile;
pub use models::{Orientation, Page, Textbox, Volume};
pub use session::{EditSession, Event, Mode};
pub use settings::EditorSettings;
