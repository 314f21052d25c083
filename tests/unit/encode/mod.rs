use super::*;

fn job() -> EncodeJob {
    EncodeJob {
        frames_dir: PathBuf::from("out/.frames_clip"),
        pattern: "frame_%06d.png".to_string(),
        fps: 30,
        width: 1280,
        height: 720,
        out_path: PathBuf::from("out/clip.mp4"),
    }
}

#[test]
fn job_validation_catches_bad_values() {
    assert!(job().validate().is_ok());
    assert!(EncodeJob { width: 0, ..job() }.validate().is_err());
    assert!(EncodeJob { width: 641, ..job() }.validate().is_err());
    assert!(EncodeJob { height: 361, ..job() }.validate().is_err());
    assert!(EncodeJob { fps: 0, ..job() }.validate().is_err());
    assert!(
        EncodeJob {
            pattern: "frame.png".to_string(),
            ..job()
        }
        .validate()
        .is_err()
    );
}

#[test]
fn input_path_joins_dir_and_pattern() {
    assert_eq!(
        job().input_path(),
        PathBuf::from("out/.frames_clip").join("frame_%06d.png")
    );
}
