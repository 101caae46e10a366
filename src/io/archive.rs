// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! In-memory zip archive of named entries.
//!
//! An [`Archive`] holds decompressed entry data keyed by name, in the order
//! entries were read or added. Files are recompressed with DEFLATE at the
//! maximum level when the archive is generated, with fixed timestamps and
//! permissions so that the same entries always produce the same bytes.

use std::io::{Cursor, Read, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipArchive, ZipWriter};

use crate::error::{Error, Result};

/// DEFLATE level used for every file entry.
pub const COMPRESSION_LEVEL: i64 = 9;

/// A single archive entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A file with its decompressed contents.
    File(Vec<u8>),
    /// A folder marker. Carries no data.
    Directory,
}

impl Entry {
    pub fn is_directory(&self) -> bool {
        matches!(self, Entry::Directory)
    }
}

/// A mutable collection of uniquely named entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Archive {
    entries: Vec<(String, Entry)>,
}

impl Archive {
    /// Create an empty archive.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a zip blob, decompressing every entry.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let mut zip = ZipArchive::new(Cursor::new(bytes))?;
        let mut archive = Archive::new();

        for index in 0..zip.len() {
            let mut file = zip.by_index(index)?;
            let name = file.name().to_string();
            if archive.contains(&name) {
                return Err(Error::corrupt(format!("duplicate entry {name}")));
            }

            let entry = if file.is_dir() {
                Entry::Directory
            } else {
                let mut data = Vec::with_capacity(read_capacity(file.size(), bytes.len()));
                file.read_to_end(&mut data)
                    .map_err(|e| Error::corrupt(format!("failed to decompress {name}: {e}")))?;
                Entry::File(data)
            };
            archive.entries.push((name, entry));
        }

        log::debug!("Loaded archive with {} entries", archive.len());
        Ok(archive)
    }

    /// Number of entries, folders included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Decompressed contents of a file entry.
    pub fn get(&self, name: &str) -> Result<&[u8]> {
        match self.entry(name) {
            Some(Entry::File(data)) => Ok(data),
            _ => Err(Error::not_found(name)),
        }
    }

    /// Look up any entry, folders included.
    pub fn entry(&self, name: &str) -> Option<&Entry> {
        self.position(name).map(|i| &self.entries[i].1)
    }

    /// Insert or replace a file entry.
    ///
    /// A replaced entry keeps its position; new entries are appended.
    pub fn set(&mut self, name: &str, data: impl Into<Vec<u8>>) {
        let entry = Entry::File(data.into());
        match self.position(name) {
            Some(i) => self.entries[i].1 = entry,
            None => self.entries.push((name.to_string(), entry)),
        }
    }

    /// Register a folder marker. The name is normalized to end with `/`.
    pub fn add_directory(&mut self, name: &str) {
        let name = directory_name(name);
        if !self.contains(&name) {
            self.entries.push((name, Entry::Directory));
        }
    }

    /// Remove an entry, returning it if present.
    pub fn remove(&mut self, name: &str) -> Option<Entry> {
        self.position(name).map(|i| self.entries.remove(i).1)
    }

    /// All entry names in archive order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// File entries (name, contents) in archive order.
    pub fn files(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries.iter().filter_map(|(name, entry)| match entry {
            Entry::File(data) => Some((name.as_str(), data.as_slice())),
            Entry::Directory => None,
        })
    }

    /// Serialize every entry into a zip blob.
    pub fn generate(&self) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let file_options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Deflated)
            .compression_level(Some(COMPRESSION_LEVEL))
            .last_modified_time(DateTime::default())
            .unix_permissions(0o644);
        let dir_options = SimpleFileOptions::default()
            .compression_method(CompressionMethod::Stored)
            .last_modified_time(DateTime::default())
            .unix_permissions(0o755);

        for (name, entry) in &self.entries {
            match entry {
                Entry::File(data) => {
                    writer.start_file(name.as_str(), file_options)?;
                    writer.write_all(data)?;
                }
                Entry::Directory => writer.add_directory(name.as_str(), dir_options)?,
            }
        }

        let bytes = writer.finish()?.into_inner();
        log::debug!("Generated archive: {} entries, {} bytes", self.len(), bytes.len());
        Ok(bytes)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|(n, _)| n == name)
    }
}

/// Preallocation for an entry. The declared size comes from the archive
/// and is only trusted up to the size of the archive itself.
fn read_capacity(declared: u64, archive_len: usize) -> usize {
    usize::try_from(declared).map_or(archive_len, |size| size.min(archive_len))
}

fn directory_name(name: &str) -> String {
    if name.ends_with('/') {
        name.to_string()
    } else {
        format!("{name}/")
    }
}
