//! Syntax-highlighted source screenshots.
//!
//! The canvas is drawn at `supersample` times the output size (font size, coordinates and border
//! width all scaled) and resampled down with a Lanczos filter before encoding. Large sources exceed
//! what one `vello_cpu` canvas can hold, so the supersampled image is painted in tiles and stitched
//! before the downsample.

use std::path::Path;

use crate::assets::font::LoadedFont;
use crate::assets::text::TextLayoutEngine;
use crate::foundation::color::Rgba8;
use crate::foundation::error::ReelResult;
use crate::highlight::theme::{Theme, ThemeName};
use crate::highlight::tokenizer::Tokenizer;
use crate::render::cpu::CpuCanvas;
use crate::render::frame::FrameRGBA;
use crate::render::layout::{CodeLayout, CodeStyle};
use crate::render::output::{downsample, save_frame};

/// Steps of the top/left edge shade.
const EDGE_SHADE_STEPS: u32 = 10;

/// Largest side of one supersampled tile.
const MAX_TILE_SIDE: u32 = 8192;

/// Renders tokenized source lines into a themed image.
///
/// One renderer holds one theme, one font and one tokenizer for its whole lifetime.
pub struct CodeImageRenderer {
    theme_name: ThemeName,
    theme: Theme,
    style: CodeStyle,
    tokenizer: Tokenizer,
    engine: TextLayoutEngine,
    tile_side: u32,
}

impl CodeImageRenderer {
    /// Build a renderer for Python sources.
    pub fn new(theme_name: ThemeName, style: CodeStyle, font: LoadedFont) -> ReelResult<Self> {
        style.validate()?;
        let engine = TextLayoutEngine::new(font)?;
        tracing::debug!(
            family = engine.family_name().unwrap_or("<blocks>"),
            origin = engine.font().origin(),
            "code font ready"
        );
        Ok(Self {
            theme_name,
            theme: theme_name.theme(),
            style,
            tokenizer: Tokenizer::python()?,
            engine,
            tile_side: MAX_TILE_SIDE,
        })
    }

    /// Replace the rule chain used to tokenize lines.
    pub fn with_tokenizer(mut self, tokenizer: Tokenizer) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn theme_name(&self) -> ThemeName {
        self.theme_name
    }

    pub fn style(&self) -> &CodeStyle {
        &self.style
    }

    pub fn font(&self) -> &LoadedFont {
        self.engine.font()
    }

    /// Family name of the outline font, `None` for the block face.
    pub fn font_family(&self) -> Option<&str> {
        self.engine.family_name()
    }

    /// Rounded advance of `M` at the output font size, at least one pixel.
    pub fn char_width(&mut self) -> ReelResult<u32> {
        let w = self.engine.measure("M", self.style.font_size as f32)?;
        Ok((w.round() as u32).max(1))
    }

    /// Geometry of the image `code` would produce.
    pub fn layout_for(&mut self, code: &str, has_title: bool) -> ReelResult<CodeLayout> {
        self.layout_for_lines(&source_lines(code), has_title)
    }

    fn layout_for_lines(&mut self, lines: &[&str], has_title: bool) -> ReelResult<CodeLayout> {
        let max_chars = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let char_width = self.char_width()?;
        Ok(CodeLayout::compute(
            &self.style,
            max_chars,
            char_width,
            lines.len(),
            has_title,
        ))
    }

    /// Render `code` with line numbers starting at 1.
    pub fn render(&mut self, code: &str, title: Option<&str>) -> ReelResult<FrameRGBA> {
        self.render_numbered(code, title, 1)
    }

    /// Render `code`, numbering its first line `first_line`.
    ///
    /// The result is opaque, straight-alpha, at output resolution.
    #[tracing::instrument(level = "debug", skip(self, code), fields(theme = %self.theme_name))]
    pub fn render_numbered(
        &mut self,
        code: &str,
        title: Option<&str>,
        first_line: usize,
    ) -> ReelResult<FrameRGBA> {
        let lines = source_lines(code);
        let layout = self.layout_for_lines(&lines, title.is_some())?;
        let k = self.style.supersample;
        let (full_w, full_h) = (layout.width * k, layout.height * k);

        let mut hi = FrameRGBA::new(
            full_w,
            full_h,
            vec![0; full_w as usize * full_h as usize * 4],
            true,
        )?;
        let side = self.tile_side;
        for y in (0..full_h).step_by(side as usize) {
            for x in (0..full_w).step_by(side as usize) {
                let mut canvas =
                    CpuCanvas::tile(side.min(full_w - x), side.min(full_h - y), x, y)?;
                self.paint(&mut canvas, &lines, &layout, title, first_line, y)?;
                draw_frame_decoration(&mut canvas, &self.theme, k, full_w, full_h);
                stitch(&mut hi, &canvas.finish(), x, y);
            }
        }

        let out = downsample(&hi, layout.width, layout.height, self.theme.background)?;
        tracing::debug!(
            width = out.width,
            height = out.height,
            lines = lines.len(),
            "rendered code image"
        );
        Ok(out)
    }

    /// Draw background, title, gutter and the lines visible in a tile starting at row `tile_y`.
    fn paint(
        &mut self,
        canvas: &mut CpuCanvas,
        lines: &[&str],
        layout: &CodeLayout,
        title: Option<&str>,
        first_line: usize,
        tile_y: u32,
    ) -> ReelResult<()> {
        let k = self.style.supersample;
        let kf = f64::from(k);
        let font_px = (self.style.font_size * k) as f32;
        let theme = self.theme;

        canvas.clear(theme.background);

        if let (Some(title), Some(title_y)) = (title, layout.title_y) {
            let text = self
                .engine
                .layout_line(title, font_px, theme.default_text.into())?;
            canvas.draw_text(
                &text,
                self.engine.font(),
                f64::from(self.style.padding) * kf,
                f64::from(title_y) * kf,
            )?;
        }

        let gutter = layout.gutter_rect().scale_from_origin(kf);
        canvas.fill_rect(
            gutter.x0,
            gutter.y0,
            gutter.width(),
            gutter.height(),
            theme.line_number_bg,
        );

        // One line of slack on each side covers glyphs overhanging their row.
        let slack = f64::from(layout.line_height) * kf;
        let visible = f64::from(tile_y) - slack..f64::from(tile_y + canvas.height()) + slack;

        for (i, line) in lines.iter().enumerate() {
            let y = f64::from(layout.line_y(i)) * kf;
            if !visible.contains(&y) {
                continue;
            }

            let number = format!("{:>3}", first_line + i);
            let text = self
                .engine
                .layout_line(&number, font_px, theme.line_number_fg.into())?;
            canvas.draw_text(&text, self.engine.font(), f64::from(layout.number_x) * kf, y)?;

            let mut x = f64::from(layout.text_x) * kf;
            for token in self.tokenizer.tokenize_line(line) {
                if token.text.is_empty() {
                    continue;
                }
                let color = theme.color_for(token.kind);
                let text = self.engine.layout_line(token.text, font_px, color.into())?;
                canvas.draw_text(&text, self.engine.font(), x, y)?;
                x += f64::from(text.advance());
            }
        }
        Ok(())
    }

    /// Render and write to `out`; the format follows the file extension.
    pub fn render_to_file(
        &mut self,
        code: &str,
        title: Option<&str>,
        first_line: usize,
        out: &Path,
    ) -> ReelResult<FrameRGBA> {
        let frame = self.render_numbered(code, title, first_line)?;
        save_frame(&frame, out, self.theme.background)?;
        tracing::info!(path = %out.display(), "image saved");
        Ok(frame)
    }
}

/// Source lines split on `\n`, each without a trailing `\r`.
fn source_lines(code: &str) -> Vec<&str> {
    code.split('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .collect()
}

/// Copy `tile` into `dst` with its top-left at `(x, y)`.
fn stitch(dst: &mut FrameRGBA, tile: &FrameRGBA, x: u32, y: u32) {
    let row_bytes = tile.width as usize * 4;
    for (row, src) in tile.data.chunks_exact(row_bytes).enumerate() {
        let start = ((y as usize + row) * dst.width as usize + x as usize) * 4;
        dst.data[start..start + row_bytes].copy_from_slice(src);
    }
}

fn draw_frame_decoration(canvas: &mut CpuCanvas, theme: &Theme, k: u32, width: u32, height: u32) {
    let (w, h) = (f64::from(width), f64::from(height));
    let t = f64::from(k);

    canvas.fill_rect(0.0, 0.0, w, t, theme.border);
    canvas.fill_rect(0.0, h - t, w, t, theme.border);
    canvas.fill_rect(0.0, t, t, h - 2.0 * t, theme.border);
    canvas.fill_rect(w - t, t, t, h - 2.0 * t, theme.border);

    for i in 0..EDGE_SHADE_STEPS {
        let alpha = (255 - 20 * i) as u8;
        let shade: Rgba8 = theme.edge_shade.with_alpha(alpha);
        let o = f64::from(i);
        canvas.fill_rect(o, o, w - 2.0 * o, 1.0, shade);
        canvas.fill_rect(o, o, 1.0, h - 2.0 * o, shade);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/code_image.rs"]
mod tests;
