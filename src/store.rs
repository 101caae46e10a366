// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Persistence of volume blobs.
//!
//! The library only needs to put, fetch and drop whole archives by id;
//! where they end up is up to the [`VolumeStore`] implementation.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::Result;

/// Identifier of a stored volume.
pub type VolumeId = u64;

/// Storage for archive blobs keyed by volume id.
pub trait VolumeStore {
    fn put(&mut self, id: VolumeId, bytes: Vec<u8>) -> Result<()>;

    /// The stored blob, or `None` if nothing is stored under `id`.
    fn get(&self, id: VolumeId) -> Result<Option<Vec<u8>>>;

    /// Remove a blob. Returns whether anything was stored.
    fn delete(&mut self, id: VolumeId) -> Result<bool>;

    /// Stored ids in ascending order.
    fn ids(&self) -> Result<Vec<VolumeId>>;
}

/// Keeps blobs in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: BTreeMap<VolumeId, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VolumeStore for MemoryStore {
    fn put(&mut self, id: VolumeId, bytes: Vec<u8>) -> Result<()> {
        self.blobs.insert(id, bytes);
        Ok(())
    }

    fn get(&self, id: VolumeId) -> Result<Option<Vec<u8>>> {
        Ok(self.blobs.get(&id).cloned())
    }

    fn delete(&mut self, id: VolumeId) -> Result<bool> {
        Ok(self.blobs.remove(&id).is_some())
    }

    fn ids(&self) -> Result<Vec<VolumeId>> {
        Ok(self.blobs.keys().copied().collect())
    }
}

/// Keeps each blob as `<id>.mbz.zip` in a directory.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Use `root`, creating it if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    fn path(&self, id: VolumeId) -> PathBuf {
        self.root.join(format!("{id}.mbz.zip"))
    }
}

impl VolumeStore for DirectoryStore {
    fn put(&mut self, id: VolumeId, bytes: Vec<u8>) -> Result<()> {
        fs::write(self.path(id), bytes)?;
        Ok(())
    }

    fn get(&self, id: VolumeId) -> Result<Option<Vec<u8>>> {
        match fs::read(self.path(id)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn delete(&mut self, id: VolumeId) -> Result<bool> {
        match fs::remove_file(self.path(id)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn ids(&self) -> Result<Vec<VolumeId>> {
        let mut ids = Vec::new();
        for entry in fs::read_dir(&self.root)? {
            let name = entry?.file_name();
            let id = name
                .to_str()
                .and_then(|n| n.strip_suffix(".mbz.zip"))
                .and_then(|n| n.parse().ok());
            if let Some(id) = id {
                ids.push(id);
            }
        }
        ids.sort_unstable();
        Ok(ids)
    }
}
