use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::encode::audio::probe_duration;
use crate::encode::segment::{StillSegment, concat_segments, probe_video};
use crate::encode::tool::Tool;
use crate::foundation::core::{Fps, FrameSize};
use crate::foundation::error::{ReelError, ReelResult};
use crate::pipeline::batch::BatchReport;
use crate::pipeline::manifest::{VideoManifest, VideoScene};

#[derive(Clone, Debug, PartialEq)]
pub struct AssembleOpts {
    pub size: FrameSize,
    pub fps: Fps,
    /// Leave the per-scene segments on disk for inspection.
    pub keep_segments: bool,
}

impl Default for AssembleOpts {
    fn default() -> Self {
        Self {
            size: FrameSize::FULL_HD,
            fps: Fps { num: 30, den: 1 },
            keep_segments: false,
        }
    }
}

/// Turn one manifest scene into a segment, probing the narration when no duration is given.
pub fn plan_segment(
    scene: &VideoScene,
    opts: &AssembleOpts,
    probe: impl FnOnce(&Path) -> ReelResult<f64>,
) -> ReelResult<StillSegment> {
    let speech_secs = match (scene.duration, scene.audio.as_deref()) {
        (Some(d), _) => d,
        (None, Some(audio)) => probe(audio)?,
        (None, None) => {
            return Err(ReelError::validation(format!(
                "scene '{}' has neither a duration nor audio",
                scene.id
            )));
        }
    };
    let seg = StillSegment {
        image: scene.image.clone(),
        audio: scene.audio.clone(),
        speech_secs,
        gap_secs: scene.gap,
        size: opts.size,
        fps: opts.fps,
    };
    seg.validate()?;
    Ok(seg)
}

/// Scratch directory removed on drop unless disarmed.
struct TempDirGuard(Option<PathBuf>);

impl Drop for TempDirGuard {
    fn drop(&mut self) {
        if let Some(path) = self.0.take() {
            let _ = std::fs::remove_dir_all(path);
        }
    }
}

fn scratch_dir() -> PathBuf {
    std::env::temp_dir().join(format!(
        "codereel_segments_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0)
    ))
}

/// Encode one still segment per scene and concatenate them into `out`.
///
/// Scenes that fail are logged and left out; the video is still written from the rest.
#[tracing::instrument(skip_all, fields(scenes = manifest.scenes.len(), out = %out.display()))]
pub fn assemble(
    manifest: &VideoManifest,
    out: &Path,
    opts: &AssembleOpts,
) -> ReelResult<BatchReport> {
    Tool::Ffmpeg.require()?;
    if manifest.scenes.iter().any(|s| s.duration.is_none()) {
        Tool::Ffprobe.require()?;
    }

    let dir = scratch_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("create segment directory '{}'", dir.display()))?;
    let mut guard = TempDirGuard(Some(dir.clone()));

    let mut report = BatchReport::new("assemble");
    let mut segments = Vec::new();
    let mut total_secs = 0.0;
    for scene in &manifest.scenes {
        let path = dir.join(format!("{}_video.mp4", scene.id));
        let res = plan_segment(scene, opts, probe_duration).and_then(|seg| {
            tracing::info!(
                id = %scene.id,
                speech = seg.speech_secs,
                gap = seg.gap_secs,
                "encoding segment"
            );
            seg.encode(&path)?;
            Ok(seg.total_secs())
        });
        if let Some(secs) = report.record(&scene.id, res) {
            total_secs += secs;
            segments.push(path);
        }
    }

    if segments.is_empty() {
        report.log_summary();
        return Err(ReelError::process("no scene segment could be encoded"));
    }

    concat_segments(&segments, &dir.join("concat_list.txt"), out)?;
    report.log_summary();

    match probe_video(out) {
        Ok(info) => tracing::info!(
            width = info.width,
            height = info.height,
            frame_rate = %info.frame_rate,
            expected_secs = total_secs,
            "video written"
        ),
        Err(e) => tracing::warn!("could not probe assembled video: {e}"),
    }

    if opts.keep_segments {
        guard.0 = None;
        tracing::info!(dir = %dir.display(), "kept segments");
    }
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/assemble.rs"]
mod tests;
