use std::io::BufWriter;
use std::path::Path;

use anyhow::Context as _;
use image::ImageEncoder as _;

use crate::encode::ffmpeg::ensure_parent_dir;
use crate::foundation::color::Rgba8;
use crate::foundation::core::FrameSize;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;

/// Still-image container, chosen by output file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StillFormat {
    /// PNG with maximum compression.
    Png,
    /// JPEG at quality 100.
    Jpeg,
}

impl StillFormat {
    pub fn from_path(path: &Path) -> ReelResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("jpg" | "jpeg") => Ok(Self::Jpeg),
            _ => Err(ReelError::validation(format!(
                "unsupported image extension for '{}' (expected .png, .jpg or .jpeg)",
                path.display()
            ))),
        }
    }
}

/// Write `frame` at maximum quality, flattening any alpha over `bg`.
pub fn save_frame(frame: &FrameRGBA, path: &Path, bg: Rgba8) -> ReelResult<()> {
    let format = StillFormat::from_path(path)?;
    let rgba = frame.to_opaque_rgba8(bg.to_array())?;

    ensure_parent_dir(path)?;
    let file = std::fs::File::create(path)
        .with_context(|| format!("create image file '{}'", path.display()))?;
    let writer = BufWriter::new(file);

    let res = match format {
        StillFormat::Png => image::codecs::png::PngEncoder::new_with_quality(
            writer,
            image::codecs::png::CompressionType::Best,
            image::codecs::png::FilterType::Adaptive,
        )
        .write_image(&rgba, frame.width, frame.height, image::ExtendedColorType::Rgba8),
        StillFormat::Jpeg => {
            let rgb: Vec<u8> = rgba
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            image::codecs::jpeg::JpegEncoder::new_with_quality(writer, 100).write_image(
                &rgb,
                frame.width,
                frame.height,
                image::ExtendedColorType::Rgb8,
            )
        }
    };
    res.map_err(|e| ReelError::encode(format!("write '{}': {e}", path.display())))
}

/// Decode an image file into straight-alpha RGBA8.
pub fn load_image(path: &Path) -> ReelResult<image::RgbaImage> {
    let img = image::open(path)
        .map_err(|e| ReelError::validation(format!("decode image '{}': {e}", path.display())))?;
    Ok(img.to_rgba8())
}

/// Resample an opaque copy of `frame` to `width`x`height` with a Lanczos3 filter.
pub fn downsample(
    frame: &FrameRGBA,
    width: u32,
    height: u32,
    bg: Rgba8,
) -> ReelResult<FrameRGBA> {
    if width == 0 || height == 0 {
        return Err(ReelError::render("downsample target must be non-empty"));
    }
    let img = frame.to_rgba_image(bg.to_array())?;
    let out = image::imageops::resize(&img, width, height, image::imageops::FilterType::Lanczos3);
    Ok(FrameRGBA::from_image(out))
}

/// Placement of a scaled image inside a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitGeometry {
    pub scale: f64,
    pub width: u32,
    pub height: u32,
    pub x: u32,
    pub y: u32,
}

/// Scale `src_w`x`src_h` to `fill` of the largest size that fits `frame`, centered.
pub fn fit_geometry(
    src_w: u32,
    src_h: u32,
    frame: FrameSize,
    fill: f64,
) -> ReelResult<FitGeometry> {
    if src_w == 0 || src_h == 0 {
        return Err(ReelError::validation("cannot fit an empty image"));
    }
    if !fill.is_finite() || fill <= 0.0 || fill > 1.0 {
        return Err(ReelError::validation("fill ratio must be in (0, 1]"));
    }

    let scale = (f64::from(frame.width) / f64::from(src_w))
        .min(f64::from(frame.height) / f64::from(src_h))
        * fill;
    let width = ((f64::from(src_w) * scale) as u32).clamp(1, frame.width);
    let height = ((f64::from(src_h) * scale) as u32).clamp(1, frame.height);

    Ok(FitGeometry {
        scale,
        width,
        height,
        x: (frame.width - width) / 2,
        y: (frame.height - height) / 2,
    })
}

/// Letterbox `img` into a `frame`-sized canvas filled with `bg`.
pub fn fit_image(
    img: &image::RgbaImage,
    frame: FrameSize,
    bg: Rgba8,
    fill: f64,
) -> ReelResult<image::RgbaImage> {
    let geo = fit_geometry(img.width(), img.height(), frame, fill)?;
    let scaled = image::imageops::resize(
        img,
        geo.width,
        geo.height,
        image::imageops::FilterType::Lanczos3,
    );

    let mut canvas =
        image::RgbaImage::from_pixel(frame.width, frame.height, image::Rgba(bg.to_array()));
    image::imageops::overlay(&mut canvas, &scaled, i64::from(geo.x), i64::from(geo.y));
    Ok(canvas)
}

#[cfg(test)]
#[path = "../../tests/unit/render/output.rs"]
mod tests;
