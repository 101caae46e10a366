// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Editor settings.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::io::serialization;
use crate::models::DEFAULT_FONT_SIZE;

/// Tunables for the edit session. Missing keys fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    /// Font size given to newly created textboxes.
    pub default_font_size: f64,
    /// Smallest drag extent, in page pixels, that creates a textbox.
    pub min_create_extent: u32,
    /// Side of the square resize handle at a box's bottom-right corner.
    pub handle_size: u32,
    /// Undo steps kept per session.
    pub history_limit: usize,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            default_font_size: DEFAULT_FONT_SIZE,
            min_create_extent: 8,
            handle_size: 12,
            history_limit: 50,
        }
    }
}

impl EditorSettings {
    /// Read settings from a JSON or YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let settings: Self = serialization::import(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }
}
