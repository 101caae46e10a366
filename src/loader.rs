// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Opening volumes off the calling thread.
//!
//! Each request parses an archive on its own worker thread. Only the most
//! recent request counts: results of superseded requests are dropped when
//! they arrive.

use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};
use std::thread;

use crate::error::Result;
use crate::format::VolumeFile;

type Message = (u64, Result<VolumeFile>);

/// Loads volumes in the background, one outstanding request at a time.
#[derive(Debug)]
pub struct BackgroundLoader {
    sender: Sender<Message>,
    receiver: Receiver<Message>,
    generation: u64,
    pending: bool,
}

impl Default for BackgroundLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl BackgroundLoader {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self {
            sender,
            receiver,
            generation: 0,
            pending: false,
        }
    }

    /// Start loading an archive, superseding any earlier request.
    pub fn request(&mut self, bytes: Vec<u8>) {
        self.generation += 1;
        self.pending = true;
        let generation = self.generation;
        let sender = self.sender.clone();

        thread::spawn(move || {
            let result = VolumeFile::open(&bytes);
            // The loader may be gone already.
            let _ = sender.send((generation, result));
        });
        log::debug!("Started background load {}", generation);
    }

    /// Whether the latest request has not delivered yet.
    pub fn is_loading(&self) -> bool {
        self.pending
    }

    /// The result of the latest request, if it is ready.
    pub fn poll(&mut self) -> Option<Result<VolumeFile>> {
        loop {
            match self.receiver.try_recv() {
                Ok((generation, result)) => {
                    if let Some(result) = self.accept(generation, result) {
                        return Some(result);
                    }
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return None,
            }
        }
    }

    /// Block until the latest request delivers.
    pub fn wait(&mut self) -> Option<Result<VolumeFile>> {
        while self.pending {
            let (generation, result) = self.receiver.recv().ok()?;
            if let Some(result) = self.accept(generation, result) {
                return Some(result);
            }
        }
        None
    }

    fn accept(&mut self, generation: u64, result: Result<VolumeFile>) -> Option<Result<VolumeFile>> {
        if generation != self.generation {
            log::debug!("Discarding stale load {}", generation);
            return None;
        }
        self.pending = false;
        Some(result)
    }
}
