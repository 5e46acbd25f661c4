use super::*;

fn scene(duration: Option<f64>, audio: Option<&str>) -> VideoScene {
    VideoScene {
        id: "scene01".to_owned(),
        image: PathBuf::from("pic/scene01.png"),
        audio: audio.map(PathBuf::from),
        duration,
        gap: 1.0,
    }
}

#[test]
fn explicit_duration_skips_probe() {
    let seg = plan_segment(&scene(Some(7.4), Some("a.mp3")), &AssembleOpts::default(), |_| {
        panic!("probe must not run")
    })
    .unwrap();
    assert_eq!(seg.speech_secs, 7.4);
    assert_eq!(seg.gap_secs, 1.0);
    assert_eq!(seg.size, FrameSize::FULL_HD);
    assert!((seg.total_secs() - 8.4).abs() < 1e-9);
}

#[test]
fn missing_duration_is_probed_from_audio() {
    let mut probed = None;
    let seg = plan_segment(&scene(None, Some("a.mp3")), &AssembleOpts::default(), |p| {
        probed = Some(p.to_path_buf());
        Ok(16.5)
    })
    .unwrap();
    assert_eq!(probed, Some(PathBuf::from("a.mp3")));
    assert_eq!(seg.speech_secs, 16.5);
}

#[test]
fn probe_failures_and_bad_sizes_propagate() {
    let err = plan_segment(&scene(None, Some("a.mp3")), &AssembleOpts::default(), |_| {
        Err(ReelError::process("ffprobe printed no duration"))
    })
    .unwrap_err();
    assert!(matches!(err, ReelError::Process(_)));

    assert!(plan_segment(&scene(None, None), &AssembleOpts::default(), |_| Ok(1.0)).is_err());

    let odd = AssembleOpts {
        size: FrameSize {
            width: 1921,
            height: 1080,
        },
        ..AssembleOpts::default()
    };
    assert!(plan_segment(&scene(Some(1.0), None), &odd, |_| Ok(1.0)).is_err());
}

#[test]
fn temp_dir_guard_removes_directory() {
    let dir = scratch_dir();
    std::fs::create_dir_all(&dir).unwrap();
    std::fs::write(dir.join("x.mp4"), b"x").unwrap();
    drop(TempDirGuard(Some(dir.clone())));
    assert!(!dir.exists());
}
