//! Property-based invariant tests for timeline gestures.
//!
//! 1. A dragged clip never starts before zero and keeps its duration.
//! 2. Left-edge resizing keeps the clip's end fixed and its offset >= 0.
//! 3. Right-edge resizing never produces a clip shorter than the minimum.

use cutline_edit_engine::EditorStore;
use cutline_interaction::{Edge, GestureController, TimelineViewport};
use cutline_project_model::{Clip, ClipKind};
use proptest::prelude::*;

const VIEW: TimelineViewport = TimelineViewport {
    left: 0.0,
    scroll_left: 0.0,
};

fn store_with(start: f64, duration: f64, offset: f64, magnetic: bool) -> EditorStore {
    let mut store = EditorStore::new();
    store
        .add_clip(
            "video-1",
            Clip::new("a", "a", "/m/a.mp4", ClipKind::Video, start, duration).with_offset(offset),
        )
        .unwrap();
    store
        .add_clip(
            "audio-1",
            Clip::new("b", "b", "/m/b.wav", ClipKind::Audio, 20.0, 4.0),
        )
        .unwrap();
    store.set_magnetic(magnetic);
    store
}

proptest! {
    #[test]
    fn drag_keeps_start_non_negative(
        start in 0.0f64..50.0,
        moves in proptest::collection::vec(-2000.0f64..2000.0, 1..20),
        magnetic in any::<bool>(),
        zoom in 0.5f64..5.0,
    ) {
        let mut store = store_with(start, 3.0, 0.0, magnetic);
        store.set_zoom_level(zoom);
        let mut gestures = GestureController::default();
        gestures.begin_clip_drag(&mut store, "a", 500.0).unwrap();

        for x in moves {
            gestures.pointer_move(&mut store, &VIEW, x).unwrap();
            let clip = store.project().clip("a").unwrap();
            prop_assert!(clip.start >= 0.0);
            prop_assert!(clip.start == 0.0 || clip.start >= 0.1);
            prop_assert_eq!(clip.duration, 3.0);
        }
    }
}

proptest! {
    #[test]
    fn left_resize_keeps_end_fixed(
        start in 0.0f64..50.0,
        duration in 0.5f64..20.0,
        offset in 0.0f64..10.0,
        moves in proptest::collection::vec(-3000.0f64..3000.0, 1..20),
    ) {
        let mut store = store_with(start, duration, offset, false);
        let end = start + duration;
        let mut gestures = GestureController::default();
        gestures.begin_resize(&mut store, "a", Edge::Left, 1000.0).unwrap();

        for x in moves {
            gestures.pointer_move(&mut store, &VIEW, x).unwrap();
            let clip = store.project().clip("a").unwrap();
            prop_assert!((clip.end() - end).abs() < 1e-9);
            prop_assert!(clip.offset >= -1e-12);
            prop_assert!(clip.start >= -1e-12);
            prop_assert!(clip.duration >= 0.1 - 1e-9);
        }
    }
}

proptest! {
    #[test]
    fn right_resize_respects_minimum(
        duration in 0.5f64..20.0,
        moves in proptest::collection::vec(-3000.0f64..3000.0, 1..20),
    ) {
        let mut store = store_with(5.0, duration, 0.0, false);
        let mut gestures = GestureController::default();
        gestures.begin_resize(&mut store, "a", Edge::Right, 1000.0).unwrap();

        for x in moves {
            gestures.pointer_move(&mut store, &VIEW, x).unwrap();
            let clip = store.project().clip("a").unwrap();
            prop_assert!(clip.duration >= 0.1);
            prop_assert_eq!(clip.start, 5.0);
            prop_assert_eq!(clip.speed(), 1.0);
        }
    }
}
