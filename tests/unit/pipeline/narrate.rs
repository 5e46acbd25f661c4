use super::*;

#[test]
fn clip_paths_follow_narration_naming() {
    assert_eq!(
        clip_path(Path::new("audio"), "scene01", "mp3"),
        PathBuf::from("audio/scene01_narration.mp3")
    );
    assert_eq!(
        clip_path(Path::new("audio"), "scene01", "aiff"),
        PathBuf::from("audio/scene01_narration.aiff")
    );
}

#[test]
fn default_opts_drop_aiff() {
    let opts = NarrateOpts::default();
    assert!(!opts.keep_aiff);
    assert_eq!(opts.speech.voice, "Kyoko");
    assert_eq!(opts.speech.rate, 225);
}

#[test]
fn invalid_voice_fails_before_any_tool_runs() {
    let manifest = NarrationManifest {
        items: vec![NarrationItem {
            id: "scene01".to_owned(),
            text: "hello".to_owned(),
        }],
    };
    let opts = NarrateOpts {
        speech: SpeechOpts {
            voice: String::new(),
            rate: 225,
        },
        keep_aiff: false,
    };
    let err = narrate(&manifest, Path::new("target/unit-output/narrate"), &opts).unwrap_err();
    assert!(matches!(
        err,
        crate::foundation::error::ReelError::Validation(_)
    ));
}

#[test]
fn clips_serialize_for_reports() {
    let clip = NarrationClip {
        id: "scene01".to_owned(),
        mp3: PathBuf::from("audio/scene01_narration.mp3"),
        duration: Some(7.4),
    };
    let v = serde_json::to_value(&clip).unwrap();
    assert_eq!(v["id"], "scene01");
    assert_eq!(v["duration"], 7.4);
}
