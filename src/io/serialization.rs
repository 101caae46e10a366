// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Annotation and settings files on disk.
//!
//! The annotation model can be dumped as YAML or JSON for inspection, and
//! editor settings are read back from either format.

use anyhow::{bail, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::Path;

/// Supported text formats, picked from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Json,
    Yaml,
}

impl TextFormat {
    /// Pick the format for a path, or `None` for an unknown extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Some(TextFormat::Yaml),
            Some("json") => Some(TextFormat::Json),
            _ => None,
        }
    }
}

/// Render a value in the given format.
pub fn to_string<T: Serialize>(value: &T, format: TextFormat) -> Result<String> {
    let text = match format {
        TextFormat::Yaml => serde_yaml::to_string(value)?,
        TextFormat::Json => serde_json::to_string_pretty(value)?,
    };
    Ok(text)
}

/// Parse a value from text in the given format.
pub fn from_str<T: DeserializeOwned>(text: &str, format: TextFormat) -> Result<T> {
    let value = match format {
        TextFormat::Yaml => serde_yaml::from_str(text)?,
        TextFormat::Json => serde_json::from_str(text)?,
    };
    Ok(value)
}

/// Write a value to a file, choosing the format from the extension.
pub fn export<T: Serialize>(value: &T, path: &Path) -> Result<()> {
    let Some(format) = TextFormat::from_path(path) else {
        bail!("Unsupported file extension: {}", path.display());
    };
    std::fs::write(path, to_string(value, format)?)?;
    Ok(())
}

/// Read a value from a file, choosing the format from the extension.
pub fn import<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let Some(format) = TextFormat::from_path(path) else {
        bail!("Unsupported file extension: {}", path.display());
    };
    let text = std::fs::read_to_string(path)?;
    from_str(&text, format)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::EditorSettings;

    #[test]
    fn test_format_from_path() {
        assert_eq!(TextFormat::from_path(Path::new("a.yml")), Some(TextFormat::Yaml));
        assert_eq!(TextFormat::from_path(Path::new("a.yaml")), Some(TextFormat::Yaml));
        assert_eq!(TextFormat::from_path(Path::new("a.json")), Some(TextFormat::Json));
        assert_eq!(TextFormat::from_path(Path::new("a.toml")), None);
    }

    #[test]
    fn test_export_import_yaml_and_json() {
        let dir = tempfile::tempdir().unwrap();
        let settings = EditorSettings {
            default_font_size: 24.0,
            ..EditorSettings::default()
        };

        for name in ["settings.yaml", "settings.json"] {
            let path = dir.path().join(name);
            export(&settings, &path).unwrap();
            let loaded: EditorSettings = import(&path).unwrap();
            assert_eq!(loaded, settings);
        }
    }

    #[test]
    fn test_unknown_extension_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.ini");
        assert!(export(&EditorSettings::default(), &path).is_err());
        assert!(import::<EditorSettings>(&path).is_err());
    }
}
