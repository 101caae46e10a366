// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! A collection of imported volumes.
//!
//! Every import gets a fresh id, so the same archive can be imported more
//! than once. Ids are never reused after a delete.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::format::VolumeFile;
use crate::store::{VolumeId, VolumeStore};

/// What the library shows for a volume without opening it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeSummary {
    pub id: VolumeId,
    pub title: String,
    pub page_count: usize,
    /// Image entry of the first page.
    pub cover: Option<String>,
}

/// Outcome of importing one file.
#[derive(Debug)]
pub struct ImportReport {
    /// The name the file was offered under.
    pub name: String,
    pub result: Result<VolumeId>,
}

/// Imported volumes backed by a [`VolumeStore`].
#[derive(Debug)]
pub struct Library<S: VolumeStore> {
    store: S,
    volumes: BTreeMap<VolumeId, VolumeSummary>,
    next_id: VolumeId,
}

impl<S: VolumeStore> Library<S> {
    /// Open a library over a store, indexing whatever it already holds.
    ///
    /// Stored blobs that no longer load are skipped with a warning.
    pub fn open(store: S) -> Result<Self> {
        let mut volumes = BTreeMap::new();
        let mut next_id = 1;
        for id in store.ids()? {
            next_id = next_id.max(id.saturating_add(1));
            let Some(bytes) = store.get(id)? else {
                continue;
            };
            match VolumeFile::open(&bytes) {
                Ok(file) => {
                    volumes.insert(id, summarize(id, &file));
                }
                Err(e) => log::warn!("Skipping stored volume {}: {}", id, e),
            }
        }
        log::info!("Opened library with {} volumes", volumes.len());
        Ok(Self {
            store,
            volumes,
            next_id,
        })
    }

    /// Import one archive blob.
    pub fn import(&mut self, bytes: Vec<u8>) -> Result<VolumeId> {
        let file = VolumeFile::open(&bytes)?;
        let id = self.next_id;
        let next_id = id
            .checked_add(1)
            .ok_or_else(|| std::io::Error::other("volume ids exhausted"))?;
        self.store.put(id, bytes)?;
        self.next_id = next_id;

        let summary = summarize(id, &file);
        log::info!(
            "Imported volume {} '{}' ({} pages)",
            id,
            summary.title,
            summary.page_count
        );
        self.volumes.insert(id, summary);
        Ok(id)
    }

    /// Import several named blobs. A failed file does not stop the rest.
    pub fn import_all<I>(&mut self, files: I) -> Vec<ImportReport>
    where
        I: IntoIterator<Item = (String, Vec<u8>)>,
    {
        files
            .into_iter()
            .map(|(name, bytes)| {
                let result = self.import(bytes);
                if let Err(e) = &result {
                    log::warn!("Rejected {}: {}", name, e);
                }
                ImportReport { name, result }
            })
            .collect()
    }

    /// Summaries of all volumes, by id.
    pub fn volumes(&self) -> impl Iterator<Item = &VolumeSummary> {
        self.volumes.values()
    }

    pub fn len(&self) -> usize {
        self.volumes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Load a stored volume for editing.
    pub fn open_volume(&self, id: VolumeId) -> Result<VolumeFile> {
        match self.store.get(id)? {
            Some(bytes) if self.volumes.contains_key(&id) => VolumeFile::open(&bytes),
            _ => Err(Error::not_found(format!("volume {id}"))),
        }
    }

    /// Store an edited volume under its id.
    pub fn save_volume(&mut self, id: VolumeId, file: &VolumeFile) -> Result<()> {
        if !self.volumes.contains_key(&id) {
            return Err(Error::not_found(format!("volume {id}")));
        }
        self.store.put(id, file.export()?)?;
        self.volumes.insert(id, summarize(id, file));
        log::info!("Saved volume {}", id);
        Ok(())
    }

    /// Remove a volume and its stored archive. Returns whether it existed.
    pub fn delete(&mut self, id: VolumeId) -> Result<bool> {
        let known = self.volumes.remove(&id).is_some();
        let stored = self.store.delete(id)?;
        if known || stored {
            log::info!("Deleted volume {}", id);
        }
        Ok(known || stored)
    }
}

fn summarize(id: VolumeId, file: &VolumeFile) -> VolumeSummary {
    let volume = file.volume();
    VolumeSummary {
        id,
        title: volume.title.clone(),
        page_count: volume.page_count(),
        cover: volume.page(0).map(|page| page.image().to_string()),
    }
}
