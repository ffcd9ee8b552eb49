use cutline_edit_engine::{resolve_drag_start, ClipUpdate, EditorStore, NoOp, SnapConfig};
use cutline_project_model::{Clip, ClipKind, MediaItem, MediaKind, ProjectSnapshot, TrackKind};

fn clip_for(media: &MediaItem, id: &str, start: f64) -> Clip {
    Clip::new(
        id,
        media.file_name(),
        media.url.clone(),
        media.kind.clip_kind(),
        start,
        media.duration,
    )
}

#[test]
fn placing_media_past_the_floor_extends_the_project() {
    let mut store = EditorStore::new();
    let media = MediaItem::from_file("/footage/intro.mp4", 10.0, MediaKind::Video);
    store.add_media(media.clone());

    store.add_clip("video-1", clip_for(&media, "a", 0.0)).unwrap();
    assert_eq!(store.project().duration, 60.0);

    store.add_clip("video-1", clip_for(&media, "b", 55.0)).unwrap();
    assert_eq!(store.project().duration, 65.0);

    store.delete_clip("b").unwrap();
    assert_eq!(store.project().duration, 60.0);
}

#[test]
fn halving_duration_doubles_speed() {
    let mut store = EditorStore::new();
    store
        .add_clip(
            "video-1",
            Clip::new("a", "a", "/m/a.mp4", ClipKind::Video, 2.0, 10.0),
        )
        .unwrap();

    store
        .update_clip("a", &ClipUpdate::new().duration(5.0))
        .unwrap();
    let clip = store.project().clip("a").unwrap();
    assert!((clip.speed() - 2.0).abs() < 1e-12);
    assert_eq!(clip.end(), 7.0);
}

#[test]
fn split_then_ripple_delete_closes_the_gap() {
    let mut store = EditorStore::new();
    store
        .add_clip(
            "video-1",
            Clip::new("a", "a", "/m/a.mp4", ClipKind::Video, 0.0, 10.0),
        )
        .unwrap();
    store
        .add_clip(
            "video-1",
            Clip::new("b", "b", "/m/b.mp4", ClipKind::Video, 10.0, 4.0),
        )
        .unwrap();
    store.set_magnetic(true);
    store.set_selected_clip(Some("a".to_string()));
    store.set_playhead(6.0);

    let right = store.split_clip().unwrap();
    assert_eq!(store.project().selected_clip_id.as_deref(), Some("a"));

    store.delete_clip(&right).unwrap();
    let b = store.project().clip("b").unwrap();
    assert_eq!(b.start, 6.0);
}

#[test]
fn drag_onto_neighbour_edge_snaps_when_magnetic() {
    let mut store = EditorStore::new();
    store
        .add_clip(
            "video-1",
            Clip::new("a", "a", "/m/a.mp4", ClipKind::Video, 10.0, 5.0),
        )
        .unwrap();
    let track = store.add_track(TrackKind::Video);
    store
        .add_clip(&track, Clip::new("b", "b", "/m/b.mp4", ClipKind::Video, 30.0, 2.0))
        .unwrap();
    store.toggle_magnetic();

    let start = resolve_drag_start(store.project(), "b", 14.7, &SnapConfig::default());
    assert_eq!(start, 15.0);
    store
        .trim_clip("b", &ClipUpdate::new().start(start))
        .unwrap();
    assert_eq!(store.project().clip("b").unwrap().start, 15.0);
}

#[test]
fn media_in_use_survives_removal_until_its_clips_are_gone() {
    let mut store = EditorStore::new();
    let media = MediaItem::from_file("/footage/b-roll.mov", 8.0, MediaKind::Video);
    store.add_media(media.clone());
    store.add_clip("video-1", clip_for(&media, "a", 0.0)).unwrap();

    assert!(matches!(
        store.remove_media(&media.id),
        Err(NoOp::MediaInUse { .. })
    ));
    store.delete_clip("a").unwrap();
    store.remove_media(&media.id).unwrap();
    assert!(store.media().is_empty());
}

#[test]
fn saved_project_reloads_into_a_fresh_store() {
    let dir = std::env::temp_dir().join("cutline_test_store_roundtrip");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("roundtrip.json");

    let mut store = EditorStore::new();
    store
        .add_clip(
            "audio-1",
            Clip::new("v", "v", "/m/v.wav", ClipKind::Audio, 50.0, 30.0),
        )
        .unwrap();
    store.set_dimensions(1080, 1920, 60);
    store.save_file(&path).unwrap();

    let mut reloaded = EditorStore::new();
    let recent = cutline_project_model::RecentProjectsStore::new(dir.join("recent.json"));
    reloaded.load_file(&path, Some(&recent)).unwrap();

    assert_eq!(reloaded.project().duration, 80.0);
    assert_eq!(reloaded.project().width, 1080);
    assert_eq!(reloaded.project().clip("v").unwrap().track_id, "audio-1");
    assert_eq!(recent.list().entries()[0].name, "roundtrip");

    let snapshot = ProjectSnapshot::load(&path).unwrap();
    assert_eq!(snapshot.clip_count(), 1);

    std::fs::remove_dir_all(&dir).ok();
}
