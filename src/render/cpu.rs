use std::sync::Arc;

use vello_cpu::kurbo::{Affine, Rect};

use crate::assets::font::{BLOCK_ADVANCE_EM, LoadedFont};
use crate::assets::text::{TextBrushRgba8, TextLayout};
use crate::foundation::color::Rgba8;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::frame::FrameRGBA;

/// Immediate-mode painter over a `vello_cpu` render context.
///
/// Draw calls are recorded in order; [`CpuCanvas::finish`] rasterizes them into a premultiplied
/// frame. A canvas may be a tile of a larger drawing: coordinates passed to draw calls are in the
/// larger drawing's space and shifted by the tile origin.
pub struct CpuCanvas {
    width: u16,
    height: u16,
    origin: Affine,
    ctx: vello_cpu::RenderContext,
}

impl CpuCanvas {
    /// Create a transparent canvas.
    pub fn new(width: u32, height: u32) -> ReelResult<Self> {
        Self::tile(width, height, 0, 0)
    }

    /// Create a transparent `width`x`height` window whose top-left is `(x, y)` of the drawing.
    pub fn tile(width: u32, height: u32, x: u32, y: u32) -> ReelResult<Self> {
        if width == 0 || height == 0 {
            return Err(ReelError::render("canvas width/height must be non-zero"));
        }
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| ReelError::render(format!("canvas width {width} exceeds u16")))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| ReelError::render(format!("canvas height {height} exceeds u16")))?;

        Ok(Self {
            width: width_u16,
            height: height_u16,
            origin: Affine::translate((-f64::from(x), -f64::from(y))),
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
        })
    }

    pub fn width(&self) -> u32 {
        u32::from(self.width)
    }

    pub fn height(&self) -> u32 {
        u32::from(self.height)
    }

    /// Fill an axis-aligned rectangle given by origin and size.
    pub fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba8) {
        if w <= 0.0 || h <= 0.0 || color.a == 0 {
            return;
        }
        self.ctx.set_paint_transform(Affine::IDENTITY);
        self.ctx.set_transform(self.origin);
        self.ctx.set_paint(color.to_cpu());
        self.ctx.fill_rect(&Rect::new(x, y, x + w, y + h));
    }

    /// Fill the whole canvas.
    pub fn clear(&mut self, color: Rgba8) {
        if color.a == 0 {
            return;
        }
        let (w, h) = (f64::from(self.width), f64::from(self.height));
        self.ctx.set_paint_transform(Affine::IDENTITY);
        self.ctx.set_transform(Affine::IDENTITY);
        self.ctx.set_paint(color.to_cpu());
        self.ctx.fill_rect(&Rect::new(0.0, 0.0, w, h));
    }

    /// Draw a laid-out line with its top-left corner at `(x, y)`.
    pub fn draw_text(
        &mut self,
        layout: &TextLayout,
        font: &LoadedFont,
        x: f64,
        y: f64,
    ) -> ReelResult<()> {
        match layout {
            TextLayout::Shaped(layout) => {
                let cpu_font = font.cpu_font().ok_or_else(|| {
                    ReelError::render("shaped text requires an outline font")
                })?;
                self.ctx.set_paint_transform(Affine::IDENTITY);
                self.ctx.set_transform(self.origin * Affine::translate((x, y)));

                for line in layout.lines() {
                    for item in line.items() {
                        let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                            continue;
                        };

                        let brush = run.style().brush;
                        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                            brush.r, brush.g, brush.b, brush.a,
                        ));

                        let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                            id: g.id,
                            x: g.x,
                            y: g.y,
                        });
                        self.ctx
                            .glyph_run(cpu_font)
                            .font_size(run.run().font_size())
                            .fill_glyphs(glyphs);
                    }
                }

                self.ctx.set_transform(Affine::IDENTITY);
            }
            TextLayout::Blocks {
                ink,
                size_px,
                brush,
            } => {
                let size = f64::from(*size_px);
                let advance = size * f64::from(BLOCK_ADVANCE_EM);
                let color = brush_color(*brush);
                for (i, _) in ink.iter().enumerate().filter(|(_, on)| **on) {
                    let left = x + i as f64 * advance + advance * 0.1;
                    self.fill_rect(left, y + size * 0.2, advance * 0.8, size * 0.65, color);
                }
            }
        }
        Ok(())
    }

    /// Draw an image with its top-left corner at `(x, y)`, blended at `opacity`.
    pub fn draw_image(
        &mut self,
        frame: &FrameRGBA,
        x: f64,
        y: f64,
        opacity: f32,
    ) -> ReelResult<()> {
        if opacity <= 0.0 {
            return Ok(());
        }
        let pixmap = frame_to_pixmap(frame)?;
        let (w, h) = (f64::from(frame.width), f64::from(frame.height));
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        self.ctx.set_paint_transform(Affine::IDENTITY);
        self.ctx.set_transform(self.origin * Affine::translate((x, y)));
        self.ctx.set_paint(paint);
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        self.ctx.fill_rect(&Rect::new(0.0, 0.0, w, h));
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
        self.ctx.set_transform(Affine::IDENTITY);
        Ok(())
    }

    /// Rasterize every recorded draw call.
    pub fn finish(mut self) -> FrameRGBA {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);

        FrameRGBA {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
            premultiplied: true,
        }
    }
}

fn brush_color(b: TextBrushRgba8) -> Rgba8 {
    Rgba8::rgba(b.r, b.g, b.b, b.a)
}

fn frame_to_pixmap(frame: &FrameRGBA) -> ReelResult<vello_cpu::Pixmap> {
    let w: u16 = frame
        .width
        .try_into()
        .map_err(|_| ReelError::render("image width exceeds u16"))?;
    let h: u16 = frame
        .height
        .try_into()
        .map_err(|_| ReelError::render("image height exceeds u16"))?;
    if frame.data.len() != frame.width as usize * frame.height as usize * 4 {
        return Err(ReelError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(frame.width as usize * frame.height as usize);
    for px in frame.data.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        let [r, g, b] = if frame.premultiplied {
            [px[0], px[1], px[2]]
        } else {
            [premul(px[0], a), premul(px[1], a), premul(px[2], a)]
        };
        pixels.push(vello_cpu::peniko::color::PremulRgba8 { r, g, b, a });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn premul(c: u8, a: u8) -> u8 {
    crate::foundation::math::mul_div255_u16(u16::from(c), u16::from(a)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
