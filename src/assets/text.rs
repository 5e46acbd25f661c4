use crate::assets::font::{BLOCK_ADVANCE_EM, FontFace, LoadedFont};
use crate::foundation::color::Rgba8;
use crate::foundation::error::{ReelError, ReelResult};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA brush color used by Parley text layouts.
pub struct TextBrushRgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl From<Rgba8> for TextBrushRgba8 {
    fn from(c: Rgba8) -> Self {
        Self {
            r: c.r,
            g: c.g,
            b: c.b,
            a: c.a,
        }
    }
}

/// A single shaped line of text, ready to draw.
pub enum TextLayout {
    /// Shaped with a real font.
    Shaped(parley::Layout<TextBrushRgba8>),
    /// Laid out with the built-in block face.
    Blocks {
        /// One entry per character: whether it is drawn (non-whitespace).
        ink: Vec<bool>,
        size_px: f32,
        brush: TextBrushRgba8,
    },
}

impl TextLayout {
    /// Horizontal advance of the whole run, trailing whitespace included.
    pub fn advance(&self) -> f32 {
        match self {
            Self::Shaped(layout) => layout
                .lines()
                .map(|line| line.metrics().advance)
                .fold(0.0, f32::max),
            Self::Blocks { ink, size_px, .. } => ink.len() as f32 * size_px * BLOCK_ADVANCE_EM,
        }
    }
}

/// Stateful helper for building Parley text layouts from one registered font.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    font: LoadedFont,
    family_name: Option<String>,
}

impl TextLayoutEngine {
    /// Construct a layout engine and register `font` with it.
    pub fn new(font: LoadedFont) -> ReelResult<Self> {
        let mut font_ctx = parley::FontContext::default();
        let family_name = match font.face() {
            FontFace::Outline { font: data, origin } => {
                let families = font_ctx.collection.register_fonts(
                    parley::fontique::Blob::from(data.data.data().to_vec()),
                    None,
                );
                let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
                    ReelError::font(format!("no font families registered from {origin}"))
                })?;
                let name = font_ctx
                    .collection
                    .family_name(family_id)
                    .ok_or_else(|| ReelError::font("registered font family has no name"))?
                    .to_string();
                Some(name)
            }
            FontFace::Blocks => None,
        };

        Ok(Self {
            font_ctx,
            layout_ctx: parley::LayoutContext::new(),
            font,
            family_name,
        })
    }

    /// Font backing every layout of this engine.
    pub fn font(&self) -> &LoadedFont {
        &self.font
    }

    /// Registered family name, `None` for the block face.
    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    /// Shape one line of text without wrapping.
    pub fn layout_line(
        &mut self,
        text: &str,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> ReelResult<TextLayout> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ReelError::validation(
                "text size_px must be finite and > 0",
            ));
        }

        let Some(family_name) = self.family_name.clone() else {
            return Ok(TextLayout::Blocks {
                ink: text.chars().map(|c| !c.is_whitespace()).collect(),
                size_px,
                brush,
            });
        };

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(TextLayout::Shaped(layout))
    }

    /// Advance of `text` at `size_px`.
    pub fn measure(&mut self, text: &str, size_px: f32) -> ReelResult<f32> {
        Ok(self
            .layout_line(text, size_px, TextBrushRgba8::default())?
            .advance())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/text.rs"]
mod tests;
