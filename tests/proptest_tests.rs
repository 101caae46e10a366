// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Property-based tests for the textbox model and edit session.

mod common;

use mbz::io::archive::Archive;
use mbz::util::geometry::{Point, Rect};
use mbz::{EditSession, EditorSettings, Event, Orientation, Page, VolumeFile};
use proptest::prelude::*;

const PAGE_WIDTH: u32 = 1000;
const PAGE_HEIGHT: u32 = 1500;

fn page_with(count: usize) -> Page {
    let mut page = Page::new("p1.jpg", PAGE_WIDTH, PAGE_HEIGHT);
    for i in 0..count {
        let index = page.create(Rect::new(i as u32, i as u32, 40, 40), Orientation::Vertical, 16.0);
        page.textbox_mut(index).unwrap().set_text(&format!("box {i}"));
    }
    page
}

fn session_with(count: usize) -> EditSession {
    let blocks: Vec<String> = (0..count)
        .map(|i| format!(r#"{{"box":[{i},0,{},40],"lines":["box {i}"]}}"#, i + 40))
        .collect();
    let mut archive = Archive::new();
    archive.set("p1.jpg", common::jpeg(4, 4));
    archive.set(
        "mokuro.json",
        format!(
            r#"{{"pages":[{{"img_path":"p1.jpg","img_width":{PAGE_WIDTH},"img_height":{PAGE_HEIGHT},"blocks":[{}]}}]}}"#,
            blocks.join(",")
        ),
    );
    let mut session = EditSession::new(VolumeFile::from_archive(archive).unwrap(), EditorSettings::default());
    session.handle(Event::ToggleEdit);
    session
}

fn point() -> impl Strategy<Value = Point> {
    (-200i32..1200, -200i32..1700).prop_map(|(x, y)| Point::new(x, y))
}

fn any_point() -> impl Strategy<Value = Point> {
    (any::<i32>(), any::<i32>()).prop_map(|(x, y)| Point::new(x, y))
}

/// One model edit, with indices taken modulo what exists.
#[derive(Debug, Clone)]
enum Edit {
    Create { page: usize, x: u32, y: u32, width: u32, height: u32, vertical: bool, font_size: f64 },
    Move { page: usize, index: usize, dx: i32, dy: i32 },
    Resize { page: usize, index: usize, width: i64, height: i64 },
    AutoFit { page: usize, index: usize },
    FontSize { page: usize, index: usize, size: f64 },
    Text { page: usize, index: usize, text: String },
    ToggleOpacity { page: usize, index: usize },
    Delete { page: usize, index: usize },
}

fn font_size() -> impl Strategy<Value = f64> {
    (0u32..400).prop_map(|quarters| f64::from(quarters) / 4.0)
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0usize..3, 0u32..2000, 0u32..2000, 1u32..600, 1u32..600, any::<bool>(), font_size()).prop_map(
            |(page, x, y, width, height, vertical, font_size)| Edit::Create {
                page, x, y, width, height, vertical, font_size
            }
        ),
        (0usize..3, 0usize..8, -3000i32..3000, -3000i32..3000)
            .prop_map(|(page, index, dx, dy)| Edit::Move { page, index, dx, dy }),
        (0usize..3, 0usize..8, -50i64..5000, -50i64..5000)
            .prop_map(|(page, index, width, height)| Edit::Resize { page, index, width, height }),
        (0usize..3, 0usize..8).prop_map(|(page, index)| Edit::AutoFit { page, index }),
        (0usize..3, 0usize..8, font_size()).prop_map(|(page, index, size)| Edit::FontSize { page, index, size }),
        (0usize..3, 0usize..8, "[a-zあ-ん漢字 \n]{0,12}")
            .prop_map(|(page, index, text)| Edit::Text { page, index, text }),
        (0usize..3, 0usize..8).prop_map(|(page, index)| Edit::ToggleOpacity { page, index }),
        (0usize..3, 0usize..8).prop_map(|(page, index)| Edit::Delete { page, index }),
    ]
}

/// A volume with empty pages of the given sizes, inline or split.
fn empty_volume(sizes: &[(u32, u32)], split: bool) -> VolumeFile {
    let mut archive = Archive::new();
    let mut pages = Vec::new();
    for (i, (width, height)) in sizes.iter().enumerate() {
        let image = format!("p{}.jpg", i + 1);
        archive.set(&image, common::jpeg(4, 4));
        let doc = format!(r#"{{"img_width":{width},"img_height":{height},"blocks":[]}}"#);
        if split {
            let ocr = format!("_ocr/p{}.json", i + 1);
            pages.push(format!(r#"["{image}","{ocr}"]"#));
            archive.set(&ocr, doc);
        } else {
            pages.push(format!(r#"{{"img_path":"{image}",{}"#, &doc[1..]));
        }
    }
    archive.set(
        "mokuro.json",
        format!(r#"{{"title":"Generated","pages":[{}]}}"#, pages.join(",")),
    );
    VolumeFile::from_archive(archive).unwrap()
}

fn apply(file: &mut VolumeFile, edit: Edit) {
    let volume = file.volume_mut();
    let pages = volume.page_count();
    let pick = |page: usize| page % pages;
    match edit {
        Edit::Create { page, x, y, width, height, vertical, font_size } => {
            let page = volume.page_mut(pick(page)).unwrap();
            let rect = Rect::new(x % page.width(), y % page.height(), width, height);
            let orientation = if vertical { Orientation::Vertical } else { Orientation::Horizontal };
            page.create(rect, orientation, font_size);
        }
        Edit::Move { page, index, dx, dy } => {
            let page = volume.page_mut(pick(page)).unwrap();
            if !page.is_empty() {
                page.move_textbox(index % page.len(), dx, dy);
            }
        }
        Edit::Resize { page, index, width, height } => {
            let page = volume.page_mut(pick(page)).unwrap();
            if !page.is_empty() {
                page.resize_textbox(index % page.len(), width, height);
            }
        }
        Edit::AutoFit { page, index } => {
            let page = volume.page_mut(pick(page)).unwrap();
            if !page.is_empty() {
                page.auto_fit(index % page.len());
            }
        }
        Edit::FontSize { page, index, size } => {
            let page = volume.page_mut(pick(page)).unwrap();
            if !page.is_empty() {
                let index = index % page.len();
                page.textbox_mut(index).unwrap().set_font_size(size);
            }
        }
        Edit::Text { page, index, text } => {
            let page = volume.page_mut(pick(page)).unwrap();
            if !page.is_empty() {
                let index = index % page.len();
                page.textbox_mut(index).unwrap().set_text(&text);
            }
        }
        Edit::ToggleOpacity { page, index } => {
            let page = volume.page_mut(pick(page)).unwrap();
            if !page.is_empty() {
                let index = index % page.len();
                page.textbox_mut(index).unwrap().toggle_opacity();
            }
        }
        Edit::Delete { page, index } => {
            let page = volume.page_mut(pick(page)).unwrap();
            if !page.is_empty() {
                page.delete(index % page.len());
            }
        }
    }
}

proptest! {
    /// Deleting one textbox shifts exactly the later ones down by one.
    #[test]
    fn delete_keeps_order_without_gaps(count in 1usize..12, pick in 0usize..12) {
        let index = pick % count;
        let mut page = page_with(count);
        let before: Vec<String> = page.textboxes().iter().map(|t| t.text()).collect();

        page.delete(index).unwrap();

        let mut expected = before.clone();
        expected.remove(index);
        let after: Vec<String> = page.textboxes().iter().map(|t| t.text()).collect();
        prop_assert_eq!(after, expected);
    }

    /// The drag direction alone decides the orientation of a new textbox.
    #[test]
    fn drag_direction_sets_orientation(start in point(), end in point()) {
        let mut page = page_with(0);
        match page.create_from_drag(start, end, 16.0) {
            Some(index) => {
                let textbox = page.textbox(index).unwrap();
                let expected = if end.x > start.x { Orientation::Horizontal } else { Orientation::Vertical };
                prop_assert_eq!(textbox.orientation(), expected);
                prop_assert!(textbox.rect().right() <= PAGE_WIDTH);
                prop_assert!(textbox.rect().bottom() <= PAGE_HEIGHT);
            }
            None => prop_assert!(page.is_empty()),
        }
    }

    /// Non-positive sizes never change a box.
    #[test]
    fn resize_rejects_non_positive(width in -100i64..=0, height in -100i64..100, swap in any::<bool>()) {
        let mut page = page_with(1);
        let before = page.textbox(0).unwrap().clone();
        let (w, h) = if swap { (height, width) } else { (width, height) };

        prop_assert!(!page.resize_textbox(0, w, h));
        prop_assert_eq!(page.textbox(0).unwrap(), &before);
    }

    /// Moving never takes a box off the page or changes its size.
    #[test]
    fn move_stays_on_page(dx in -3000i32..3000, dy in -3000i32..3000) {
        let mut page = page_with(3);
        page.move_textbox(1, dx, dy);
        let rect = page.textbox(1).unwrap().rect();
        prop_assert!(rect.right() <= PAGE_WIDTH);
        prop_assert!(rect.bottom() <= PAGE_HEIGHT);
        prop_assert_eq!((rect.width, rect.height), (40, 40));
    }

    /// Pressing "next" once per textbox comes back to the start.
    #[test]
    fn select_next_cycles(count in 1usize..10, start in 0usize..10) {
        let mut session = session_with(count);
        session.handle(Event::Select(start % count));
        for _ in 0..count {
            session.handle(Event::SelectNext);
        }
        prop_assert_eq!(session.selection(), Some(start % count));
    }

    /// Edited volumes reload to the same model and export deterministically.
    #[test]
    fn export_then_open_gives_same_volume(
        sizes in proptest::collection::vec((50u32..2000, 50u32..2000), 1..4),
        split in any::<bool>(),
        edits in proptest::collection::vec(edit(), 0..30),
    ) {
        let mut file = empty_volume(&sizes, split);
        for edit in edits {
            apply(&mut file, edit);
        }

        let bytes = file.export().unwrap();
        prop_assert_eq!(&bytes, &file.export().unwrap());

        let reloaded = VolumeFile::open(&bytes).unwrap();
        prop_assert_eq!(reloaded.volume(), file.volume());
        prop_assert_eq!(reloaded.layout(), file.layout());
    }

    /// Pointer positions anywhere in the coordinate space keep boxes on the page.
    #[test]
    fn gestures_at_any_position_stay_on_page(events in proptest::collection::vec(wide_event(), 0..30)) {
        let mut session = session_with(3);
        for event in events {
            session.handle(event);
            for textbox in session.page().unwrap().textboxes() {
                prop_assert!(textbox.rect().right() <= PAGE_WIDTH);
                prop_assert!(textbox.rect().bottom() <= PAGE_HEIGHT);
            }
        }
    }

    /// Any event sequence leaves at most one valid selection.
    #[test]
    fn selection_stays_valid(events in proptest::collection::vec(event(), 0..40)) {
        let mut session = session_with(3);
        for event in events {
            session.handle(event);
            if let Some(index) = session.selection() {
                prop_assert!(index < session.page().unwrap().len());
            }
        }
    }
}

fn event() -> impl Strategy<Value = Event> {
    prop_oneof![
        Just(Event::ToggleEdit),
        point().prop_map(Event::DragStart),
        point().prop_map(Event::DragUpdate),
        point().prop_map(Event::DragEnd),
        Just(Event::CancelGesture),
        (0usize..5).prop_map(Event::Select),
        Just(Event::SelectNext),
        Just(Event::SelectPrevious),
        Just(Event::BeginTextEdit),
        "[a-z\n]{0,8}".prop_map(Event::UpdateDraft),
        Just(Event::EndTextEdit),
        Just(Event::Delete),
        Just(Event::Undo),
        Just(Event::Redo),
    ]
}

fn wide_event() -> impl Strategy<Value = Event> {
    prop_oneof![
        any_point().prop_map(Event::DragStart),
        any_point().prop_map(Event::DragUpdate),
        any_point().prop_map(Event::DragEnd),
        point().prop_map(Event::DragStart),
        (0usize..5).prop_map(Event::Select),
        Just(Event::AutoFit),
        Just(Event::CancelGesture),
        Just(Event::Undo),
        Just(Event::Redo),
    ]
}
