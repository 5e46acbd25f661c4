use std::path::{Path, PathBuf};

use crate::encode::audio::{SpeechOpts, probe_duration, synthesize_speech, transcode_to_mp3};
use crate::encode::tool::Tool;
use crate::foundation::error::ReelResult;
use crate::pipeline::batch::BatchReport;
use crate::pipeline::manifest::{NarrationItem, NarrationManifest};

/// MP3 bitrate for narration clips.
pub const NARRATION_BITRATE: &str = "128k";

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NarrateOpts {
    pub speech: SpeechOpts,
    /// Keep the intermediate AIFF next to the MP3.
    pub keep_aiff: bool,
}

/// A finished narration clip.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NarrationClip {
    pub id: String,
    pub mp3: PathBuf,
    /// `None` when the clip was written but `ffprobe` could not read it back.
    pub duration: Option<f64>,
}

/// `{out_dir}/{id}_narration.{ext}`.
pub fn clip_path(out_dir: &Path, id: &str, ext: &str) -> PathBuf {
    out_dir.join(format!("{id}_narration.{ext}"))
}

fn narrate_one(
    item: &NarrationItem,
    out_dir: &Path,
    opts: &NarrateOpts,
) -> ReelResult<NarrationClip> {
    let aiff = clip_path(out_dir, &item.id, "aiff");
    let mp3 = clip_path(out_dir, &item.id, "mp3");

    synthesize_speech(&opts.speech, &item.text, &aiff)?;
    let size = std::fs::metadata(&aiff).map(|m| m.len()).unwrap_or(0);
    tracing::debug!(id = %item.id, bytes = size, "speech synthesized");

    transcode_to_mp3(&aiff, &mp3, NARRATION_BITRATE)?;
    if !opts.keep_aiff
        && let Err(e) = std::fs::remove_file(&aiff)
    {
        tracing::warn!(path = %aiff.display(), "could not remove intermediate aiff: {e}");
    }

    let duration = match probe_duration(&mp3) {
        Ok(secs) => Some(secs),
        Err(e) => {
            tracing::warn!(id = %item.id, "unable to get duration: {e}");
            None
        }
    };
    Ok(NarrationClip {
        id: item.id.clone(),
        mp3,
        duration,
    })
}

/// Speak every manifest item to `{id}_narration.mp3` in `out_dir` and probe its length.
///
/// Requires `say`, `ffmpeg` and `ffprobe`; a missing tool fails before any item runs.
#[tracing::instrument(skip_all, fields(items = manifest.items.len(), voice = %opts.speech.voice))]
pub fn narrate(
    manifest: &NarrationManifest,
    out_dir: &Path,
    opts: &NarrateOpts,
) -> ReelResult<(BatchReport, Vec<NarrationClip>)> {
    opts.speech.validate()?;
    for tool in [Tool::Say, Tool::Ffmpeg, Tool::Ffprobe] {
        tool.require()?;
    }

    let mut report = BatchReport::new("narrate");
    let mut clips = Vec::new();
    for item in &manifest.items {
        tracing::info!(id = %item.id, "generating narration");
        if let Some(clip) = report.record(&item.id, narrate_one(item, out_dir, opts)) {
            clips.push(clip);
        }
    }
    report.log_summary();
    Ok((report, clips))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/narrate.rs"]
mod tests;
