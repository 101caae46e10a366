// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Error types for volume archive operations.
//!
//! Codec and model failures bubble up to the caller as [`Error`]. The edit
//! session never produces one: mistaken input is ignored instead.

use std::io;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong while opening, reading or writing a volume.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The blob is not a readable zip archive, or an entry could not be
    /// decompressed. Opening the volume is aborted.
    #[error("corrupt archive: {reason}")]
    CorruptArchive {
        /// What the zip reader complained about.
        reason: String,
    },

    /// A named entry is absent. Should not happen on well-formed archives.
    #[error("entry not found: {name}")]
    EntryNotFound {
        /// The entry that was requested.
        name: String,
    },

    /// The OCR description and the page images disagree.
    ///
    /// The affected volume is rejected; other volumes stay usable.
    #[error("OCR data does not match page images: {reason}")]
    SchemaMismatch {
        /// Which page or entry could not be paired.
        reason: String,
    },

    /// An OCR entry is not valid JSON for any known layout.
    #[error("invalid OCR entry {entry}: {source}")]
    InvalidOcr {
        /// The entry that failed to parse.
        entry: String,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// An I/O error from a collaborator (file system, store).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn corrupt(reason: impl Into<String>) -> Self {
        Error::CorruptArchive {
            reason: reason.into(),
        }
    }

    pub(crate) fn mismatch(reason: impl Into<String>) -> Self {
        Error::SchemaMismatch {
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(name: impl Into<String>) -> Self {
        Error::EntryNotFound { name: name.into() }
    }

    /// Returns `true` if the failure only flags the affected volume.
    ///
    /// Schema mismatches are reported as warnings; everything else aborts
    /// the operation and needs an explicit retry by the user.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::SchemaMismatch { .. })
    }

    /// Returns `true` if the archive bytes themselves are damaged.
    pub fn is_corruption(&self) -> bool {
        matches!(self, Error::CorruptArchive { .. })
    }
}

impl From<zip::result::ZipError> for Error {
    fn from(error: zip::result::ZipError) -> Self {
        Error::corrupt(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_schema_mismatch_is_recoverable() {
        assert!(Error::mismatch("p3.jpg has no OCR page").is_recoverable());
        assert!(!Error::corrupt("bad signature").is_recoverable());
        assert!(!Error::not_found("mokuro.json").is_recoverable());
    }

    #[test]
    fn test_zip_errors_map_to_corruption() {
        let error: Error = zip::result::ZipError::InvalidArchive("no end record".into()).into();
        assert!(error.is_corruption());
        assert!(error.to_string().contains("no end record"));
    }
}
