use crate::foundation::error::{ReelError, ReelResult};

/// Size constants for a code screenshot, in output pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct CodeStyle {
    pub font_size: u32,
    /// Line height as a multiple of `font_size`; the result is floored to whole pixels.
    pub line_height_ratio: f32,
    pub padding: u32,
    pub gutter_width: u32,
    pub gutter_padding: u32,
    /// Extra space between the title row and the first code line.
    pub title_gap: u32,
    /// Render scale before the final Lanczos downsample.
    pub supersample: u32,
}

impl Default for CodeStyle {
    fn default() -> Self {
        Self {
            font_size: 14,
            line_height_ratio: 1.5,
            padding: 30,
            gutter_width: 50,
            gutter_padding: 15,
            title_gap: 10,
            supersample: 4,
        }
    }
}

impl CodeStyle {
    pub fn validate(&self) -> ReelResult<()> {
        if self.font_size == 0 {
            return Err(ReelError::validation("font_size must be > 0"));
        }
        if !self.line_height_ratio.is_finite() || self.line_height_ratio <= 0.0 {
            return Err(ReelError::validation(
                "line_height_ratio must be finite and > 0",
            ));
        }
        if !(1..=8).contains(&self.supersample) {
            return Err(ReelError::validation("supersample must be in 1..=8"));
        }
        if self.line_height() == 0 {
            return Err(ReelError::validation("line height rounds down to zero"));
        }
        Ok(())
    }

    /// `floor(font_size * line_height_ratio)`.
    pub fn line_height(&self) -> u32 {
        (self.font_size as f32 * self.line_height_ratio).floor() as u32
    }
}

/// Pixel geometry of one code screenshot at output resolution.
///
/// Multiply every field by the supersample factor to get canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CodeLayout {
    pub width: u32,
    pub height: u32,
    pub line_height: u32,
    /// Top of the title row, when there is one.
    pub title_y: Option<u32>,
    /// Top of the first code line.
    pub content_top: u32,
    /// Height of the code block (all lines).
    pub content_height: u32,
    pub gutter_x: u32,
    pub gutter_width: u32,
    /// Left edge of the right-justified line numbers.
    pub number_x: u32,
    /// Left edge of the first token of every line.
    pub text_x: u32,
}

impl CodeLayout {
    /// Size the canvas for `line_count` lines whose longest has `max_line_chars` characters.
    ///
    /// `char_width` is the measured advance of one monospace cell at `style.font_size`.
    pub fn compute(
        style: &CodeStyle,
        max_line_chars: usize,
        char_width: u32,
        line_count: usize,
        has_title: bool,
    ) -> Self {
        let line_height = style.line_height();
        let content_width =
            max_line_chars as u32 * char_width + style.gutter_width + 2 * style.gutter_padding;
        let content_height = line_count as u32 * line_height;

        let width = content_width + 2 * style.padding;
        let mut height = content_height + 2 * style.padding;

        let mut content_top = style.padding;
        let mut title_y = None;
        if has_title {
            height += line_height + style.title_gap;
            title_y = Some(style.padding);
            content_top += line_height + style.title_gap;
        }

        Self {
            width,
            height,
            line_height,
            title_y,
            content_top,
            content_height,
            gutter_x: style.padding,
            gutter_width: style.gutter_width,
            number_x: style.padding + 5,
            text_x: style.padding + style.gutter_width + style.gutter_padding,
        }
    }

    /// Top edge of line `i` (0-based).
    pub fn line_y(&self, i: usize) -> u32 {
        self.content_top + i as u32 * self.line_height
    }

    /// Line-number gutter spanning the full content height.
    pub fn gutter_rect(&self) -> kurbo::Rect {
        kurbo::Rect::from_origin_size(
            (f64::from(self.gutter_x), f64::from(self.content_top)),
            (f64::from(self.gutter_width), f64::from(self.content_height)),
        )
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
