// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Input events understood by the edit session.
//!
//! Pointer positions are already in page pixel space; mapping from the
//! viewport is the caller's job (see [`crate::util::geometry::viewport_to_page`]).

use serde::{Deserialize, Serialize};

use crate::util::geometry::Point;

/// One user intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "arg", rename_all = "snake_case")]
pub enum Event {
    /// Switch between viewing and editing.
    ToggleEdit,

    // Pointer gestures
    DragStart(Point),
    DragUpdate(Point),
    DragEnd(Point),
    /// Abort the running gesture and restore the box it touched.
    CancelGesture,

    // Selection
    Select(usize),
    Deselect,
    SelectNext,
    SelectPrevious,

    // Text editing
    BeginTextEdit,
    UpdateDraft(String),
    EndTextEdit,
    CancelTextEdit,

    // Selected textbox
    SetFontSize(f64),
    AdjustFontSize(f64),
    AutoFit,
    ToggleOpacity,
    Delete,

    // Navigation
    NextPage,
    PreviousPage,

    Undo,
    Redo,
}
