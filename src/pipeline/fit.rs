use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::color::Rgba8;
use crate::foundation::core::FrameSize;
use crate::foundation::error::{ReelError, ReelResult};
use crate::pipeline::batch::BatchReport;
use crate::render::frame::FrameRGBA;
use crate::render::output::{fit_geometry, fit_image, load_image, save_frame};

/// Letterboxing parameters for [`fit_directory`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitOpts {
    pub size: FrameSize,
    pub background: Rgba8,
    /// Fraction of the largest fitting size actually used.
    pub fill: f64,
}

impl Default for FitOpts {
    fn default() -> Self {
        Self {
            size: FrameSize::FULL_HD,
            background: Rgba8::rgb(0x2d, 0x2d, 0x2d),
            fill: 0.9,
        }
    }
}

/// `.png` files directly inside `dir`, sorted by name.
pub fn list_pngs(dir: &Path) -> ReelResult<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("read directory '{}'", dir.display()))?;
    let mut out = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("read directory '{}'", dir.display()))?
            .path();
        if path.is_file() && path.extension().is_some_and(|e| e == "png") {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

/// Letterbox one image file into `out`.
pub fn fit_file(input: &Path, out: &Path, opts: &FitOpts) -> ReelResult<()> {
    let img = load_image(input)?;
    let geo = fit_geometry(img.width(), img.height(), opts.size, opts.fill)?;
    tracing::debug!(
        src_w = img.width(),
        src_h = img.height(),
        w = geo.width,
        h = geo.height,
        x = geo.x,
        y = geo.y,
        scale = geo.scale,
        "fitting image"
    );
    let fitted = fit_image(&img, opts.size, opts.background, opts.fill)?;
    save_frame(&FrameRGBA::from_image(fitted), out, opts.background)
}

/// Fit every `.png` in `in_dir` into a same-named file in `out_dir`.
#[tracing::instrument(skip_all, fields(in_dir = %in_dir.display(), out_dir = %out_dir.display()))]
pub fn fit_directory(in_dir: &Path, out_dir: &Path, opts: &FitOpts) -> ReelResult<BatchReport> {
    if in_dir == out_dir {
        return Err(ReelError::validation(
            "fit input and output directories must differ",
        ));
    }
    let inputs = list_pngs(in_dir)?;
    if inputs.is_empty() {
        tracing::warn!("no .png files found");
    }

    let mut report = BatchReport::new("fit");
    for input in inputs {
        let Some(name) = input.file_name() else {
            continue;
        };
        let id = name.to_string_lossy().into_owned();
        let res = fit_file(&input, &out_dir.join(name), opts);
        if report.record(&id, res).is_some() {
            tracing::info!(file = %id, "fitted");
        }
    }
    report.log_summary();
    Ok(report)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/fit.rs"]
mod tests;
