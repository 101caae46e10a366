// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! The edit session: mode, selection and gestures over a loaded volume.
//!
//! [`EditSession::handle`] is the only way input reaches the model. Every
//! event is either applied completely or ignored, so the session is never
//! left half way through a transition. Only one gesture can run at a time
//! because the gesture lives inside [`Mode`].

pub mod event;
pub mod history;

pub use event::Event;
pub use history::{History, Snapshot};

use crate::error::Result;
use crate::format::VolumeFile;
use crate::models::{Page, Volume};
use crate::settings::EditorSettings;
use crate::util::geometry::{Point, Rect};

/// What the session is currently doing.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Reading only. Textboxes cannot be touched.
    Viewing,
    /// Textboxes can be selected, dragged and changed.
    Editing,
    /// The selected textbox's text is being typed.
    TextEditing { draft: String },
    /// Dragging out a new textbox.
    Creating { start: Point, current: Point },
    /// Dragging a textbox body.
    Moving { index: usize, start: Point, original: Rect },
    /// Dragging a textbox's resize handle.
    Resizing { index: usize, start: Point, original: Rect },
}

impl Mode {
    /// Whether a pointer gesture is running.
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            Mode::Creating { .. } | Mode::Moving { .. } | Mode::Resizing { .. }
        )
    }
}

/// How a renderer should present one textbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextboxState {
    /// Read-only overlay.
    Idle,
    /// Can be picked up.
    Editable,
    /// Selected; shows its resize handle.
    Selected,
    /// Selected with its text open for typing.
    EditingText,
}

/// Interactive editing state for one volume.
#[derive(Debug)]
pub struct EditSession {
    file: VolumeFile,
    page: usize,
    mode: Mode,
    selection: Option<usize>,
    settings: EditorSettings,
    history: History,
}

impl EditSession {
    pub fn new(file: VolumeFile, settings: EditorSettings) -> Self {
        Self {
            file,
            page: 0,
            mode: Mode::Viewing,
            selection: None,
            history: History::new(settings.history_limit),
            settings,
        }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn selection(&self) -> Option<usize> {
        self.selection
    }

    pub fn current_page(&self) -> usize {
        self.page
    }

    pub fn page(&self) -> Option<&Page> {
        self.file.volume().page(self.page)
    }

    pub fn volume(&self) -> &Volume {
        self.file.volume()
    }

    pub fn file(&self) -> &VolumeFile {
        &self.file
    }

    pub fn into_file(self) -> VolumeFile {
        self.file
    }

    pub fn settings(&self) -> &EditorSettings {
        &self.settings
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// The text being typed, if any.
    pub fn draft(&self) -> Option<&str> {
        match &self.mode {
            Mode::TextEditing { draft } => Some(draft),
            _ => None,
        }
    }

    /// Presentation state of a textbox on the current page.
    pub fn textbox_state(&self, index: usize) -> TextboxState {
        match (&self.mode, self.selection == Some(index)) {
            (Mode::Viewing, _) => TextboxState::Idle,
            (Mode::TextEditing { .. }, true) => TextboxState::EditingText,
            (_, true) => TextboxState::Selected,
            (_, false) => TextboxState::Editable,
        }
    }

    /// Serialize the volume with all committed edits.
    pub fn export(&self) -> Result<Vec<u8>> {
        self.file.export()
    }

    /// Apply one event. Returns whether the volume model changed.
    ///
    /// Events that make no sense in the current mode are ignored.
    pub fn handle(&mut self, event: Event) -> bool {
        log::debug!("{:?} in {:?}", event, self.mode);
        match event {
            Event::ToggleEdit => self.toggle_edit(),
            Event::DragStart(point) => self.drag_start(point),
            Event::DragUpdate(point) => self.drag_update(point),
            Event::DragEnd(point) => self.drag_end(point),
            Event::CancelGesture => self.cancel_gesture(),
            Event::Select(index) => self.select(index),
            Event::Deselect => self.deselect(),
            Event::SelectNext => self.cycle_selection(true),
            Event::SelectPrevious => self.cycle_selection(false),
            Event::BeginTextEdit => self.begin_text_edit(),
            Event::UpdateDraft(text) => self.update_draft(text),
            Event::EndTextEdit => self.end_text_edit(),
            Event::CancelTextEdit => self.cancel_text_edit(),
            Event::SetFontSize(size) => self.edit_selected(|page, i| {
                page.textbox_mut(i).map(|t| t.set_font_size(size)).is_some()
            }),
            Event::AdjustFontSize(delta) => self.edit_selected(|page, i| {
                page.textbox_mut(i).map(|t| t.adjust_font_size(delta)).is_some()
            }),
            Event::AutoFit => self.edit_selected(|page, i| page.auto_fit(i)),
            Event::ToggleOpacity => self.edit_selected(|page, i| {
                page.textbox_mut(i).map(|t| t.toggle_opacity()).is_some()
            }),
            Event::Delete => self.delete_selected(),
            Event::NextPage => self.go_to_page(self.page.checked_add(1)),
            Event::PreviousPage => self.go_to_page(self.page.checked_sub(1)),
            Event::Undo => self.undo(),
            Event::Redo => self.redo(),
        }
    }

    fn current_page_mut(&mut self) -> Option<&mut Page> {
        self.file.volume_mut().page_mut(self.page)
    }

    fn textbox_count(&self) -> usize {
        self.page().map_or(0, Page::len)
    }

    fn toggle_edit(&mut self) -> bool {
        match self.mode {
            Mode::Viewing => self.mode = Mode::Editing,
            Mode::Editing => {
                self.mode = Mode::Viewing;
                self.selection = None;
            }
            _ => {}
        }
        false
    }

    fn drag_start(&mut self, point: Point) -> bool {
        if self.mode != Mode::Editing {
            return false;
        }
        let Some(page) = self.page() else {
            return false;
        };

        let handle = self.settings.handle_size;
        let on_handle = self
            .selection
            .and_then(|i| page.textbox(i).map(|t| (i, t.rect())))
            .filter(|(_, rect)| handle_rect(*rect, handle).contains(point));
        let on_body = page
            .hit_test(point)
            .and_then(|i| page.textbox(i).map(|t| (i, t.rect())));

        self.mode = match (on_handle, on_body) {
            (Some((index, original)), _) => Mode::Resizing {
                index,
                start: point,
                original,
            },
            (None, Some((index, original))) => {
                self.selection = Some(index);
                Mode::Moving {
                    index,
                    start: point,
                    original,
                }
            }
            (None, None) => {
                self.selection = None;
                Mode::Creating {
                    start: point,
                    current: point,
                }
            }
        };
        false
    }

    fn drag_update(&mut self, point: Point) -> bool {
        match self.mode {
            Mode::Creating { start, .. } => {
                self.mode = Mode::Creating {
                    start,
                    current: point,
                };
                false
            }
            Mode::Moving {
                index,
                start,
                original,
            } => {
                let (dx, dy) = start.delta_to(point);
                self.preview(index, |rect, pw, ph| rect.translated_within(dx, dy, pw, ph), original)
            }
            Mode::Resizing {
                index,
                start,
                original,
            } => {
                let (dx, dy) = start.delta_to(point);
                let width = i64::from(original.width) + dx;
                let height = i64::from(original.height) + dy;
                match self.current_page_mut() {
                    Some(page) => {
                        let before = page.textbox(index).map(|t| t.rect());
                        page.resize_textbox(index, width, height);
                        page.textbox(index).map(|t| t.rect()) != before
                    }
                    None => false,
                }
            }
            _ => false,
        }
    }

    /// Place a textbox at a position derived from its pre-gesture box.
    fn preview(&mut self, index: usize, place: impl FnOnce(Rect, u32, u32) -> Rect, original: Rect) -> bool {
        let Some(page) = self.current_page_mut() else {
            return false;
        };
        let (width, height) = (page.width(), page.height());
        match page.textbox_mut(index) {
            Some(textbox) => {
                let target = place(original, width, height);
                let changed = textbox.rect() != target;
                textbox.set_rect(target);
                changed
            }
            None => false,
        }
    }

    fn drag_end(&mut self, point: Point) -> bool {
        let previewed = self.drag_update(point);
        match std::mem::replace(&mut self.mode, Mode::Editing) {
            Mode::Creating { start, current } => self.finish_create(start, current),
            Mode::Moving { index, original, .. } | Mode::Resizing { index, original, .. } => {
                self.finish_gesture(index, original) || previewed
            }
            other => {
                self.mode = other;
                false
            }
        }
    }

    fn finish_create(&mut self, start: Point, end: Point) -> bool {
        let min = self.settings.min_create_extent;
        let font_size = self.settings.default_font_size;
        let page_index = self.page;
        let Some(page) = self.current_page_mut() else {
            return false;
        };
        // The threshold applies to what lands on the page.
        let on_page = Rect::clipped_from_points(start, end, page.width(), page.height());
        if !on_page.is_some_and(|rect| rect.width >= min && rect.height >= min) {
            log::debug!("Creation drag too small, ignored");
            return false;
        }
        let before = page.textboxes().to_vec();
        let Some(index) = page.create_from_drag(start, end, font_size) else {
            return false;
        };
        self.history.push(Snapshot {
            page: page_index,
            textboxes: before,
        });
        self.selection = Some(index);
        true
    }

    /// Record a finished move or resize in the history.
    fn finish_gesture(&mut self, index: usize, original: Rect) -> bool {
        let page_index = self.page;
        let Some(page) = self.page() else {
            return false;
        };
        let mut before = page.textboxes().to_vec();
        match before.get_mut(index) {
            Some(textbox) if textbox.rect() != original => textbox.set_rect(original),
            _ => return false,
        }
        log::info!("Committed textbox {} on page {}", index, page_index);
        self.history.push(Snapshot {
            page: page_index,
            textboxes: before,
        });
        true
    }

    fn cancel_gesture(&mut self) -> bool {
        match std::mem::replace(&mut self.mode, Mode::Editing) {
            Mode::Creating { .. } => false,
            Mode::Moving { index, original, .. } | Mode::Resizing { index, original, .. } => {
                self.preview(index, |rect, _, _| rect, original)
            }
            other => {
                self.mode = other;
                false
            }
        }
    }

    fn select(&mut self, index: usize) -> bool {
        if self.mode == Mode::Editing && index < self.textbox_count() {
            self.selection = Some(index);
        }
        false
    }

    fn deselect(&mut self) -> bool {
        if self.mode == Mode::Editing {
            self.selection = None;
        }
        false
    }

    fn cycle_selection(&mut self, forward: bool) -> bool {
        let count = self.textbox_count();
        if self.mode != Mode::Editing || count == 0 {
            return false;
        }
        self.selection = Some(match (self.selection, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        });
        false
    }

    fn begin_text_edit(&mut self) -> bool {
        if self.mode != Mode::Editing {
            return false;
        }
        let draft = self
            .selection
            .and_then(|i| self.page().and_then(|page| page.textbox(i)))
            .map(|textbox| textbox.text());
        if let Some(draft) = draft {
            self.mode = Mode::TextEditing { draft };
        }
        false
    }

    fn update_draft(&mut self, text: String) -> bool {
        if let Mode::TextEditing { draft } = &mut self.mode {
            *draft = text;
        }
        false
    }

    fn end_text_edit(&mut self) -> bool {
        if !matches!(self.mode, Mode::TextEditing { .. }) {
            return false;
        }
        let Mode::TextEditing { draft } = std::mem::replace(&mut self.mode, Mode::Editing) else {
            return false;
        };
        self.edit_selected(|page, i| page.textbox_mut(i).map(|t| t.set_text(&draft)).is_some())
    }

    fn cancel_text_edit(&mut self) -> bool {
        if matches!(self.mode, Mode::TextEditing { .. }) {
            self.mode = Mode::Editing;
        }
        false
    }

    /// Run a mutation on the selected textbox and record it when it changed
    /// anything.
    fn edit_selected(&mut self, apply: impl FnOnce(&mut Page, usize) -> bool) -> bool {
        if self.mode != Mode::Editing {
            return false;
        }
        let Some(index) = self.selection else {
            return false;
        };
        let page_index = self.page;
        let Some(page) = self.current_page_mut() else {
            return false;
        };

        let before = page.textboxes().to_vec();
        if !apply(page, index) || page.textboxes() == before.as_slice() {
            return false;
        }
        self.history.push(Snapshot {
            page: page_index,
            textboxes: before,
        });
        true
    }

    fn delete_selected(&mut self) -> bool {
        let deleted = self.edit_selected(|page, i| page.delete(i).is_some());
        if deleted {
            self.selection = None;
        }
        deleted
    }

    fn go_to_page(&mut self, target: Option<usize>) -> bool {
        if !matches!(self.mode, Mode::Viewing | Mode::Editing) {
            return false;
        }
        match target {
            Some(page) if page < self.volume().page_count() => {
                self.page = page;
                self.selection = None;
                log::debug!("Showing page {}", page);
            }
            _ => {}
        }
        false
    }

    fn undo(&mut self) -> bool {
        self.step_history(true)
    }

    fn redo(&mut self) -> bool {
        self.step_history(false)
    }

    fn step_history(&mut self, backwards: bool) -> bool {
        if !matches!(self.mode, Mode::Viewing | Mode::Editing) {
            return false;
        }
        let target = if backwards {
            self.history.peek_undo()
        } else {
            self.history.peek_redo()
        };
        let Some(page_index) = target else {
            return false;
        };
        let Some(current) = self.file.volume().page(page_index).map(|p| p.textboxes().to_vec()) else {
            return false;
        };

        let current = Snapshot {
            page: page_index,
            textboxes: current,
        };
        let restored = if backwards {
            self.history.undo(current)
        } else {
            self.history.redo(current)
        };
        let Some(snapshot) = restored else {
            return false;
        };
        if let Some(page) = self.file.volume_mut().page_mut(snapshot.page) {
            page.replace_textboxes(snapshot.textboxes);
        }
        self.page = snapshot.page;
        self.selection = None;
        true
    }
}

/// Square resize handle at a box's bottom-right corner.
fn handle_rect(rect: Rect, size: u32) -> Rect {
    Rect::new(
        rect.right().saturating_sub(size),
        rect.bottom().saturating_sub(size),
        size,
        size,
    )
}
