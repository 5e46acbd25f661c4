use super::*;

fn seg(audio: Option<&str>) -> StillSegment {
    StillSegment {
        image: PathBuf::from("shots/scene01.png"),
        audio: audio.map(PathBuf::from),
        speech_secs: 7.4,
        gap_secs: 1.0,
        size: FrameSize::FULL_HD,
        fps: Fps { num: 30, den: 1 },
    }
}

fn strs(args: &[OsString]) -> Vec<String> {
    args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
}

fn value_after(args: &[String], flag: &str) -> String {
    let i = args.iter().position(|a| a == flag).unwrap();
    args[i + 1].clone()
}

#[test]
fn narrated_segment_pads_audio_to_total_length() {
    let args = strs(&seg(Some("audio/scene01.mp3")).ffmpeg_args(Path::new("tmp/s1.mp4")));
    assert_eq!(value_after(&args, "-loop"), "1");
    assert_eq!(value_after(&args, "-tune"), "stillimage");
    assert_eq!(value_after(&args, "-b:a"), "192k");
    assert_eq!(value_after(&args, "-af"), "apad");
    assert_eq!(value_after(&args, "-s"), "1920x1080");
    assert_eq!(value_after(&args, "-t"), "8.400");
    assert!(args.contains(&"audio/scene01.mp3".to_owned()));
    assert!(!args.contains(&"-shortest".to_owned()));
    assert_eq!(args.last().map(String::as_str), Some("tmp/s1.mp4"));
}

#[test]
fn silent_segment_gets_null_audio_source() {
    let args = strs(&seg(None).ffmpeg_args(Path::new("s.mp4")));
    assert_eq!(value_after(&args, "-f"), "lavfi");
    assert!(args.iter().any(|a| a.starts_with("anullsrc=")));
}

#[test]
fn segment_validation() {
    assert!(seg(None).validate().is_ok());
    let mut s = seg(None);
    s.speech_secs = 0.0;
    s.gap_secs = 0.0;
    assert!(s.validate().is_err());
    let mut s = seg(None);
    s.gap_secs = -1.0;
    assert!(s.validate().is_err());
    let mut s = seg(None);
    s.size = FrameSize {
        width: 1919,
        height: 1080,
    };
    assert!(s.validate().is_err());
}

#[test]
fn missing_image_fails_before_spawning() {
    let err = seg(None).encode(Path::new("target/x.mp4")).unwrap_err();
    assert!(matches!(err, ReelError::Validation(_)));
}

#[test]
fn concat_lines_are_absolute_and_escaped() {
    assert_eq!(escape_concat_path("/a/it's.mp4"), r"/a/it'\''s.mp4");
    let list = concat_list(&[PathBuf::from("a.mp4"), PathBuf::from("/x/b's.mp4")]).unwrap();
    let lines: Vec<&str> = list.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("file '/"));
    assert!(lines[0].ends_with("a.mp4'"));
    assert_eq!(lines[1], r"file '/x/b'\''s.mp4'");
}

#[test]
fn concat_args_stream_copy() {
    let args = strs(&concat_args(Path::new("l.txt"), Path::new("o.mp4")));
    assert_eq!(value_after(&args, "-f"), "concat");
    assert_eq!(value_after(&args, "-safe"), "0");
    assert_eq!(value_after(&args, "-c"), "copy");
    assert!(concat_segments(&[], Path::new("l.txt"), Path::new("o.mp4")).is_err());
}

#[test]
fn video_info_parses_ffprobe_output() {
    let out = "width=1920\nheight=1080\nr_frame_rate=30/1\nduration=128.000000\n";
    let info = parse_video_info(out).unwrap();
    assert_eq!((info.width, info.height), (1920, 1080));
    assert_eq!(info.frame_rate, "30/1");
    assert_eq!(info.duration_secs, Some(128.0));
    assert!(parse_video_info("").is_err());
}
