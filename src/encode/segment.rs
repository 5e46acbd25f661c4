//! Still-image video segments and concat-demuxer assembly.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::encode::tool::Tool;
use crate::foundation::core::{Fps, FrameSize};
use crate::foundation::error::{ReelError, ReelResult};

/// Sample rate of the silent track given to segments without narration.
const SILENCE_SAMPLE_RATE: u32 = 44_100;

/// One still image shown for `speech + gap` seconds, optionally narrated.
#[derive(Clone, Debug)]
pub struct StillSegment {
    pub image: PathBuf,
    pub audio: Option<PathBuf>,
    /// Narration length in seconds.
    pub speech_secs: f64,
    /// Silence appended after the narration.
    pub gap_secs: f64,
    pub size: FrameSize,
    pub fps: Fps,
}

impl StillSegment {
    pub fn total_secs(&self) -> f64 {
        self.speech_secs + self.gap_secs
    }

    pub fn validate(&self) -> ReelResult<()> {
        if !self.speech_secs.is_finite() || self.speech_secs < 0.0 {
            return Err(ReelError::validation("segment duration must be >= 0"));
        }
        if !self.gap_secs.is_finite() || self.gap_secs < 0.0 {
            return Err(ReelError::validation("segment gap must be >= 0"));
        }
        if self.total_secs() <= 0.0 {
            return Err(ReelError::validation("segment must last longer than zero seconds"));
        }
        if !self.size.width.is_multiple_of(2) || !self.size.height.is_multiple_of(2) {
            return Err(ReelError::validation(
                "segment width/height must be even (required for yuv420p mp4 output)",
            ));
        }
        Ok(())
    }

    /// `ffmpeg` arguments producing this segment at `out`.
    ///
    /// Narration is padded with silence (`apad`) and cut at the total length, so the gap survives;
    /// segments without narration get a silent track so every segment has the same streams.
    pub fn ffmpeg_args(&self, out: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-y".into(),
            "-loglevel".into(),
            "error".into(),
            "-loop".into(),
            "1".into(),
            "-i".into(),
            self.image.as_os_str().into(),
        ];
        match &self.audio {
            Some(audio) => {
                args.extend(["-i".into(), audio.as_os_str().into()]);
            }
            None => {
                args.extend([
                    "-f".into(),
                    "lavfi".into(),
                    "-i".into(),
                    format!("anullsrc=channel_layout=stereo:sample_rate={SILENCE_SAMPLE_RATE}")
                        .into(),
                ]);
            }
        }
        args.extend(
            [
                "-map",
                "0:v:0",
                "-map",
                "1:a:0",
                "-c:v",
                "libx264",
                "-tune",
                "stillimage",
                "-c:a",
                "aac",
                "-b:a",
                "192k",
                "-af",
                "apad",
                "-pix_fmt",
                "yuv420p",
            ]
            .map(OsString::from),
        );
        args.extend([
            "-s".into(),
            format!("{}x{}", self.size.width, self.size.height).into(),
            "-r".into(),
            format!("{}/{}", self.fps.num, self.fps.den).into(),
            "-t".into(),
            format!("{:.3}", self.total_secs()).into(),
            out.as_os_str().into(),
        ]);
        args
    }

    /// Encode the segment with `ffmpeg`.
    pub fn encode(&self, out: &Path) -> ReelResult<()> {
        self.validate()?;
        if !self.image.is_file() {
            return Err(ReelError::validation(format!(
                "segment image '{}' does not exist",
                self.image.display()
            )));
        }
        if let Some(audio) = &self.audio
            && !audio.is_file()
        {
            return Err(ReelError::validation(format!(
                "segment audio '{}' does not exist",
                audio.display()
            )));
        }
        ensure_parent_dir(out)?;
        let mut cmd = Tool::Ffmpeg.command();
        cmd.args(self.ffmpeg_args(out));
        Tool::Ffmpeg.run(&mut cmd)?;
        Ok(())
    }
}

/// Quote a path for a concat-demuxer `file '...'` line.
pub fn escape_concat_path(path: &str) -> String {
    path.replace('\'', r"'\''")
}

/// Concat-demuxer list for `segments`, one absolute `file '...'` line each.
pub fn concat_list(segments: &[PathBuf]) -> ReelResult<String> {
    let mut out = String::new();
    for seg in segments {
        let abs = std::path::absolute(seg)
            .with_context(|| format!("resolve segment path '{}'", seg.display()))?;
        let s = abs.to_str().ok_or_else(|| {
            ReelError::validation(format!("segment path '{}' is not UTF-8", abs.display()))
        })?;
        out.push_str(&format!("file '{}'\n", escape_concat_path(s)));
    }
    Ok(out)
}

/// `ffmpeg` arguments for stream-copy concatenation of a list file.
pub fn concat_args(list_file: &Path, out: &Path) -> Vec<OsString> {
    vec![
        "-y".into(),
        "-loglevel".into(),
        "error".into(),
        "-f".into(),
        "concat".into(),
        "-safe".into(),
        "0".into(),
        "-i".into(),
        list_file.into(),
        "-c".into(),
        "copy".into(),
        out.into(),
    ]
}

/// Join `segments` into `out` without re-encoding.
pub fn concat_segments(segments: &[PathBuf], list_file: &Path, out: &Path) -> ReelResult<()> {
    if segments.is_empty() {
        return Err(ReelError::validation("nothing to concatenate"));
    }
    let list = concat_list(segments)?;
    ensure_parent_dir(list_file)?;
    std::fs::write(list_file, list)
        .with_context(|| format!("write concat list '{}'", list_file.display()))?;

    ensure_parent_dir(out)?;
    let mut cmd = Tool::Ffmpeg.command();
    cmd.args(concat_args(list_file, out));
    Tool::Ffmpeg.run(&mut cmd)?;
    Ok(())
}

/// Stream summary of a finished video.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VideoInfo {
    pub width: u32,
    pub height: u32,
    /// Frame rate as `ffprobe` reports it (e.g. `30/1`).
    pub frame_rate: String,
    pub duration_secs: Option<f64>,
}

/// Parse `key=value` lines from `ffprobe -show_entries stream=...`.
pub fn parse_video_info(stdout: &str) -> ReelResult<VideoInfo> {
    let mut info = VideoInfo::default();
    for line in stdout.lines() {
        let Some((key, value)) = line.trim().split_once('=') else {
            continue;
        };
        match key {
            "width" => info.width = value.parse().unwrap_or(0),
            "height" => info.height = value.parse().unwrap_or(0),
            "r_frame_rate" => info.frame_rate = value.to_owned(),
            "duration" => info.duration_secs = value.parse().ok(),
            _ => {}
        }
    }
    if info.width == 0 || info.height == 0 {
        return Err(ReelError::process("ffprobe reported no video stream"));
    }
    Ok(info)
}

/// Probe the first video stream of `path`.
pub fn probe_video(path: &Path) -> ReelResult<VideoInfo> {
    let mut cmd = Tool::Ffprobe.command();
    cmd.args([
        "-v",
        "error",
        "-select_streams",
        "v:0",
        "-show_entries",
        "stream=width,height,r_frame_rate,duration",
        "-of",
        "default=noprint_wrappers=1",
    ])
    .arg(path);
    let out = Tool::Ffprobe.run(&mut cmd)?;
    parse_video_info(&String::from_utf8_lossy(&out.stdout))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/segment.rs"]
mod tests;
