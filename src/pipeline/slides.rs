use std::path::Path;

use crate::assets::font::LoadedFont;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::{Fps, FrameIndex, FrameSize};
use crate::foundation::error::{ReelError, ReelResult};
use crate::pipeline::manifest::SlideManifest;
use crate::render::output::load_image;
use crate::render::slide::{PreparedSlide, SlideRenderer};

/// Render every slide of `manifest` into `sink`, frame by frame.
///
/// Returns the number of frames pushed.
#[tracing::instrument(skip_all, fields(slides = manifest.slides.len()))]
pub fn render_slides(
    manifest: &SlideManifest,
    renderer: &mut SlideRenderer,
    fps: Fps,
    sink: &mut dyn FrameSink,
) -> ReelResult<u64> {
    let mut prepared: Vec<(PreparedSlide, u64)> = Vec::with_capacity(manifest.slides.len());
    for (i, def) in manifest.slides.iter().enumerate() {
        let shot = match def.screenshot.as_deref() {
            Some(path) => match load_image(path) {
                Ok(img) => Some(img),
                Err(e) => {
                    tracing::warn!(slide = i, "screenshot skipped: {e}");
                    None
                }
            },
            None => None,
        };
        let slide = renderer.prepare(
            def.kind,
            &def.title,
            &def.subtitle,
            &def.description,
            def.color,
            shot.as_ref(),
        )?;
        let frames = fps.secs_to_frames_round(def.duration);
        if frames == 0 {
            return Err(ReelError::validation(format!(
                "slide #{i} ('{}') is shorter than one frame",
                def.title
            )));
        }
        prepared.push((slide, frames));
    }

    sink.begin(SinkConfig {
        size: renderer.size(),
        fps,
        audio: manifest.audio.clone(),
    })?;

    let mut next = 0u64;
    for (i, (slide, frames)) in prepared.iter().enumerate() {
        tracing::info!(slide = i + 1, frames, "rendering slide");
        for idx in 0..*frames {
            let frame = renderer.render_frame(slide, idx, *frames)?;
            sink.push_frame(FrameIndex(next), &frame)?;
            next += 1;
        }
    }
    sink.end()?;
    Ok(next)
}

/// Render the slideshow to an MP4 at `out` with `ffmpeg`.
pub fn render_slides_to_mp4(
    manifest: &SlideManifest,
    out: &Path,
    size: FrameSize,
    fps: Fps,
    font: LoadedFont,
) -> ReelResult<u64> {
    let mut renderer = SlideRenderer::new(size, font)?;
    let mut sink = FfmpegSink::new(FfmpegSinkOpts::new(out));
    let frames = render_slides(manifest, &mut renderer, fps, &mut sink)?;
    tracing::info!(
        frames,
        secs = frames as f64 / fps.as_f64(),
        path = %out.display(),
        "slideshow written"
    );
    Ok(frames)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/slides.rs"]
mod tests;
