use super::*;

#[test]
fn frame_count_floors_with_float_tolerance() {
    assert_eq!(frame_count(6.0, 30), 180);
    assert_eq!(frame_count(5.6, 30), 168);
    assert_eq!(frame_count(5.0, 24), 120);
    assert_eq!(frame_count(1.99, 1), 1);
    assert_eq!(frame_count(0.01, 30), 0);
    assert_eq!(frame_count(f64::NAN, 30), 0);
    assert_eq!(frame_count(-1.0, 30), 0);
}

#[test]
fn frame_names_are_zero_padded() {
    assert_eq!(frame_file_name(0), "frame_000000.png");
    assert_eq!(frame_file_name(179), "frame_000179.png");
}

#[test]
fn scratch_dir_sits_next_to_the_output() {
    assert_eq!(
        scratch_dir_for(Path::new("out/clip.mp4")),
        Path::new("out").join(".frames_clip")
    );
    assert_eq!(
        scratch_dir_for(Path::new("clip.mp4")),
        Path::new(".").join(".frames_clip")
    );
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).is_err());
    assert_eq!(build_thread_pool(Some(2)).unwrap().current_num_threads(), 2);
}

#[test]
fn unpremultiply_restores_straight_color() {
    assert_eq!(unpremultiply(&[64, 0, 32, 128]), vec![128, 0, 64, 128]);
    assert_eq!(unpremultiply(&[10, 10, 10, 0]), vec![0, 0, 0, 0]);
}

#[test]
fn scratch_dir_clears_stale_frames_and_removes_only_frames_on_drop() {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit-scratch")
        .join(".frames_guard");
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("frame_000999.png"), b"stale").unwrap();
    std::fs::write(dir.join("notes.txt"), b"keep").unwrap();

    let guard = ScratchDir::create(dir.clone()).unwrap();
    assert!(!dir.join("frame_000999.png").exists());
    assert!(dir.join("notes.txt").exists());
    std::fs::write(dir.join("frame_000000.png"), b"frame").unwrap();
    drop(guard);

    // Only frames are removed; an unexpected file keeps the directory alive.
    assert!(!dir.join("frame_000000.png").exists());
    assert!(dir.join("notes.txt").exists());

    std::fs::remove_file(dir.join("notes.txt")).unwrap();
    let guard = ScratchDir::create(dir.clone()).unwrap();
    std::fs::write(dir.join("frame_000001.png"), b"frame").unwrap();
    drop(guard);
    assert!(!dir.exists());
}

#[test]
fn only_numbered_frames_count_as_frame_files() {
    assert!(is_frame_file(Path::new("x/frame_000012.png")));
    assert!(!is_frame_file(Path::new("x/cover.png")));
    assert!(!is_frame_file(Path::new("x/frame_000012.txt")));
}
