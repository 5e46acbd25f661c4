use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::flatten_premul_over_bg_to_opaque_rgba8;

/// A rendered frame as RGBA8 pixels.
///
/// Canvas output is premultiplied; resampled and decoded images are straight alpha. The
/// `premultiplied` flag keeps this explicit at API boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
    /// Whether the `data` is premultiplied alpha.
    pub premultiplied: bool,
}

impl FrameRGBA {
    /// Wrap pixel data after checking its length.
    pub fn new(width: u32, height: u32, data: Vec<u8>, premultiplied: bool) -> ReelResult<Self> {
        if data.len() != width as usize * height as usize * 4 {
            return Err(ReelError::validation(format!(
                "frame data length {} does not match {width}x{height} rgba8",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
            premultiplied,
        })
    }

    /// Straight-alpha frame from a decoded image.
    pub fn from_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
            premultiplied: false,
        }
    }

    /// Opaque straight RGBA8 pixels, compositing over `bg_rgba` where the frame is translucent.
    pub fn to_opaque_rgba8(&self, bg_rgba: [u8; 4]) -> ReelResult<Vec<u8>> {
        let mut out = vec![0u8; self.data.len()];
        if self.premultiplied {
            flatten_premul_over_bg_to_opaque_rgba8(&mut out, &self.data, bg_rgba)?;
        } else {
            for (d, s) in out.chunks_exact_mut(4).zip(self.data.chunks_exact(4)) {
                let a = u16::from(s[3]);
                let inv = 255 - a;
                for c in 0..3 {
                    let v = (u16::from(s[c]) * a + u16::from(bg_rgba[c]) * inv + 127) / 255;
                    d[c] = v as u8;
                }
                d[3] = 255;
            }
        }
        Ok(out)
    }

    /// Opaque copy as an `image` buffer.
    pub fn to_rgba_image(&self, bg_rgba: [u8; 4]) -> ReelResult<image::RgbaImage> {
        let data = self.to_opaque_rgba8(bg_rgba)?;
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| ReelError::render("frame buffer does not match its dimensions"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
