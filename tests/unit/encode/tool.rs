use super::*;

#[test]
fn program_names_and_hints() {
    assert_eq!(Tool::Ffmpeg.program(), "ffmpeg");
    assert_eq!(Tool::Ffprobe.to_string(), "ffprobe");
    assert!(Tool::Ffmpeg.install_hint().contains("brew install ffmpeg"));
    assert!(Tool::Say.install_hint().contains("macOS"));
}

#[test]
fn missing_tool_error_names_tool_and_hint() {
    let err = Tool::Say.missing();
    let msg = err.to_string();
    assert!(msg.starts_with("process error: say is required"));
    assert!(msg.contains("macOS"));
}

#[test]
fn require_matches_availability() {
    for tool in [Tool::Ffmpeg, Tool::Ffprobe] {
        assert_eq!(tool.require().is_ok(), tool.is_available());
    }
}

#[test]
fn run_reports_spawn_failure_as_process_error() {
    let mut cmd = Command::new("codereel-no-such-program-xyz");
    let err = Tool::Ffmpeg.run(&mut cmd).unwrap_err();
    assert!(matches!(err, ReelError::Process(_)));
    assert!(err.to_string().contains("ffmpeg"));
}
