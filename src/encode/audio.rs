use std::ffi::OsString;
use std::path::Path;

use anyhow::Context as _;

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::tool::Tool;
use crate::foundation::error::{ReelError, ReelResult};

/// Voice settings for `say`.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SpeechOpts {
    /// Voice name as listed by `say -v ?`.
    pub voice: String,
    /// Words per minute.
    pub rate: u32,
}

impl Default for SpeechOpts {
    fn default() -> Self {
        Self {
            voice: "Kyoko".to_owned(),
            rate: 225,
        }
    }
}

impl SpeechOpts {
    pub fn validate(&self) -> ReelResult<()> {
        if self.voice.trim().is_empty() {
            return Err(ReelError::validation("voice must be non-empty"));
        }
        if self.rate == 0 {
            return Err(ReelError::validation("speech rate must be > 0"));
        }
        Ok(())
    }
}

/// Arguments for `say` reading text from `text_file` and writing an AIFF file.
pub fn say_args(opts: &SpeechOpts, text_file: &Path, out_aiff: &Path) -> Vec<OsString> {
    vec![
        "-v".into(),
        opts.voice.clone().into(),
        "-r".into(),
        opts.rate.to_string().into(),
        "-o".into(),
        out_aiff.into(),
        "-f".into(),
        text_file.into(),
    ]
}

/// Speak `text` into `out_aiff`.
///
/// The text is handed to `say` through a sibling `.txt` file, removed afterwards.
pub fn synthesize_speech(opts: &SpeechOpts, text: &str, out_aiff: &Path) -> ReelResult<()> {
    opts.validate()?;
    if text.trim().is_empty() {
        return Err(ReelError::validation("narration text must be non-empty"));
    }
    ensure_parent_dir(out_aiff)?;

    let text_file = out_aiff.with_extension("txt");
    std::fs::write(&text_file, text)
        .with_context(|| format!("write narration text '{}'", text_file.display()))?;

    let mut cmd = Tool::Say.command();
    cmd.args(say_args(opts, &text_file, out_aiff));
    let res = Tool::Say.run(&mut cmd);
    let _ = std::fs::remove_file(&text_file);
    res.map(|_| ())
}

/// Arguments for `ffmpeg` transcoding `input` to MP3 at `bitrate`.
pub fn mp3_args(input: &Path, out_mp3: &Path, bitrate: &str) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-loglevel".into(),
        "error".into(),
        "-i".into(),
        input.into(),
        "-acodec".into(),
        "mp3".into(),
        "-ab".into(),
        bitrate.into(),
        out_mp3.into(),
    ]
}

/// Transcode any audio file `ffmpeg` can read into MP3.
pub fn transcode_to_mp3(input: &Path, out_mp3: &Path, bitrate: &str) -> ReelResult<()> {
    ensure_parent_dir(out_mp3)?;
    let mut cmd = Tool::Ffmpeg.command();
    cmd.args(mp3_args(input, out_mp3, bitrate));
    Tool::Ffmpeg.run(&mut cmd)?;
    Ok(())
}

/// Arguments for `ffprobe` printing the container duration in seconds.
pub fn duration_probe_args(path: &Path) -> Vec<OsString> {
    vec![
        "-v".into(),
        "error".into(),
        "-show_entries".into(),
        "format=duration".into(),
        "-of".into(),
        "default=noprint_wrappers=1:nokey=1".into(),
        path.into(),
    ]
}

/// Parse `ffprobe` duration output.
pub fn parse_duration(stdout: &str) -> ReelResult<f64> {
    let line = stdout
        .lines()
        .map(str::trim)
        .find(|l| !l.is_empty())
        .ok_or_else(|| ReelError::process("ffprobe printed no duration"))?;
    let secs: f64 = line
        .parse()
        .map_err(|_| ReelError::process(format!("ffprobe printed an invalid duration '{line}'")))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(ReelError::process(format!(
            "ffprobe printed an invalid duration '{line}'"
        )));
    }
    Ok(secs)
}

/// Media duration in seconds.
pub fn probe_duration(path: &Path) -> ReelResult<f64> {
    let mut cmd = Tool::Ffprobe.command();
    cmd.args(duration_probe_args(path));
    let out = Tool::Ffprobe.run(&mut cmd)?;
    parse_duration(&String::from_utf8_lossy(&out.stdout))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/audio.rs"]
mod tests;
