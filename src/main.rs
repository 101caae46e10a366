// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! mbz - inspect and edit manga volume archives from the command line.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use mbz::io::serialization;
use mbz::{EditSession, EditorSettings, Event, VolumeFile};

#[derive(Parser, Debug)]
#[command(name = "mbz", version, about = "Manga volume archives with editable OCR overlays")]
struct Cli {
    /// Editor settings file (JSON or YAML)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the title, page count and textboxes per page
    Info {
        /// Volume archive (.mbz.zip)
        file: PathBuf,
    },
    /// Dump the annotation model as JSON or YAML
    #[command(name = "export-annotations")]
    ExportAnnotations {
        file: PathBuf,
        /// Output path; the extension picks the format
        out: PathBuf,
    },
    /// Load a volume and write it back out
    Repack { file: PathBuf, out: PathBuf },
    /// Replay a JSON list of edit events and export the result
    Script {
        file: PathBuf,
        events: PathBuf,
        out: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let cli = Cli::parse();
    let settings = match &cli.settings {
        Some(path) => EditorSettings::load(path)?,
        None => EditorSettings::default(),
    };

    match cli.command {
        Commands::Info { file } => info(&file),
        Commands::ExportAnnotations { file, out } => export_annotations(&file, &out),
        Commands::Repack { file, out } => repack(&file, &out),
        Commands::Script { file, events, out } => script(&file, &events, &out, settings),
    }
}

fn open(path: &Path) -> Result<VolumeFile> {
    let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    VolumeFile::open(&bytes).with_context(|| format!("Failed to open volume {}", path.display()))
}

fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}

fn info(path: &Path) -> Result<()> {
    let file = open(path)?;
    let volume = file.volume();
    println!("Title: {}", volume.title);
    if let Some(name) = volume.metadata_str("volume") {
        println!("Volume: {}", name);
    }
    println!("Pages: {}", volume.page_count());
    println!("Textboxes: {}", volume.textbox_count());
    for (index, page) in volume.pages().iter().enumerate() {
        println!(
            "  {:>4}  {}  {}x{}  {} textboxes",
            index + 1,
            page.image(),
            page.width(),
            page.height(),
            page.len()
        );
    }
    Ok(())
}

fn export_annotations(path: &Path, out: &Path) -> Result<()> {
    let file = open(path)?;
    serialization::export(file.volume(), out)
        .with_context(|| format!("Failed to export annotations to {}", out.display()))?;
    log::info!("Wrote annotations to {}", out.display());
    Ok(())
}

fn repack(path: &Path, out: &Path) -> Result<()> {
    let file = open(path)?;
    write(out, &file.export()?)
}

fn script(path: &Path, events: &Path, out: &Path, settings: EditorSettings) -> Result<()> {
    let text = fs::read_to_string(events)
        .with_context(|| format!("Failed to read events from {}", events.display()))?;
    let events: Vec<Event> = serde_json::from_str(&text).context("Invalid event list")?;

    let mut session = EditSession::new(open(path)?, settings);
    let mut changes = 0;
    for event in events {
        if session.handle(event) {
            changes += 1;
        }
    }
    log::info!("Replayed events, {} changed the volume", changes);

    write(out, &session.export()?)
}
