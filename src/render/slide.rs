use crate::assets::font::LoadedFont;
use crate::assets::text::{TextLayout, TextLayoutEngine};
use crate::foundation::color::Rgba8;
use crate::foundation::core::FrameSize;
use crate::foundation::error::{ReelError, ReelResult};
use crate::foundation::math::scale_rgb_in_place;
use crate::render::cpu::CpuCanvas;
use crate::render::frame::FrameRGBA;

const GRADIENT_TOP: Rgba8 = Rgba8::rgb(30, 60, 114);
const GRADIENT_BOTTOM: Rgba8 = Rgba8::rgb(50, 80, 140);
const TEXT_SHADOW: Rgba8 = Rgba8::rgba(0, 0, 0, 128);
const SCREENSHOT_SHADOW: Rgba8 = Rgba8::rgba(0, 0, 0, 128);
const SUBTITLE_COLOR: Rgba8 = Rgba8::WHITE;
const DESCRIPTION_COLOR: Rgba8 = Rgba8::rgb(200, 200, 200);
const PROGRESS_TRACK: Rgba8 = Rgba8::rgb(100, 100, 100);
const PROGRESS_FILL: Rgba8 = Rgba8::rgb(78, 205, 196);

const TITLE_PX: f32 = 84.0;
const SUBTITLE_PX: f32 = 48.0;
const DESCRIPTION_PX: f32 = 36.0;
const TEXT_X: f64 = 50.0;
const TITLE_Y: f64 = 200.0;
const SUBTITLE_Y: f64 = 320.0;
const DESCRIPTION_Y: f64 = 400.0;
const SHADOW_OFFSET: f64 = 3.0;

const PROGRESS_W: f64 = 300.0;
const PROGRESS_H: f64 = 8.0;
const PROGRESS_BOTTOM_MARGIN: f64 = 100.0;

/// Screenshot width as a fraction of the frame width.
const SCREENSHOT_WIDTH_RATIO: f64 = 0.6;
const SCREENSHOT_RIGHT_MARGIN: f64 = 100.0;
/// Frames over which the screenshot brightens from black.
pub const FADE_IN_FRAMES: u64 = 30;

/// Presentation style of a slide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKind {
    /// Opening slide; no progress bar.
    Title,
    #[default]
    Demo,
    Feature,
    /// Call to action.
    Cta,
}

/// Text and imagery of one slide, shaped once and reused for every frame.
pub struct PreparedSlide {
    kind: SlideKind,
    texts: Vec<(TextLayout, TextLayout, f64)>,
    screenshot: Option<FrameRGBA>,
}

impl PreparedSlide {
    pub fn kind(&self) -> SlideKind {
        self.kind
    }
}

/// Composes slideshow frames: gradient, shadowed captions, screenshot, progress bar.
pub struct SlideRenderer {
    size: FrameSize,
    engine: TextLayoutEngine,
    background: FrameRGBA,
}

impl SlideRenderer {
    pub fn new(size: FrameSize, font: LoadedFont) -> ReelResult<Self> {
        Ok(Self {
            size,
            engine: TextLayoutEngine::new(font)?,
            background: gradient(size),
        })
    }

    pub fn size(&self) -> FrameSize {
        self.size
    }

    /// Shape captions and scale the screenshot for one slide.
    pub fn prepare(
        &mut self,
        kind: SlideKind,
        title: &str,
        subtitle: &str,
        description: &str,
        accent: Rgba8,
        screenshot: Option<&image::RgbaImage>,
    ) -> ReelResult<PreparedSlide> {
        let mut texts = Vec::with_capacity(3);
        for (text, px, color, y) in [
            (title, TITLE_PX, accent, TITLE_Y),
            (subtitle, SUBTITLE_PX, SUBTITLE_COLOR, SUBTITLE_Y),
            (description, DESCRIPTION_PX, DESCRIPTION_COLOR, DESCRIPTION_Y),
        ] {
            if text.is_empty() {
                continue;
            }
            let shadow = self.engine.layout_line(text, px, TEXT_SHADOW.into())?;
            let main = self.engine.layout_line(text, px, color.into())?;
            texts.push((shadow, main, y));
        }

        let screenshot = screenshot
            .map(|img| scale_screenshot(img, self.size))
            .transpose()?;

        Ok(PreparedSlide {
            kind,
            texts,
            screenshot,
        })
    }

    /// Render frame `idx` of `total` frames of `slide`.
    pub fn render_frame(
        &self,
        slide: &PreparedSlide,
        idx: u64,
        total: u64,
    ) -> ReelResult<FrameRGBA> {
        if total == 0 || idx >= total {
            return Err(ReelError::validation(format!(
                "slide frame {idx} out of range 0..{total}"
            )));
        }
        let (w, h) = (f64::from(self.size.width), f64::from(self.size.height));
        let mut canvas = CpuCanvas::new(self.size.width, self.size.height)?;
        canvas.draw_image(&self.background, 0.0, 0.0, 1.0)?;

        if let Some(shot) = &slide.screenshot {
            let (sw, sh) = (f64::from(shot.width), f64::from(shot.height));
            let x = (w - sw - SCREENSHOT_RIGHT_MARGIN).max(0.0);
            let y = ((h - sh) / 2.0).floor();
            canvas.fill_rect(x - 10.0, y + 10.0, sw + 20.0, sh + 20.0, SCREENSHOT_SHADOW);

            if idx < FADE_IN_FRAMES {
                let mut faded = shot.clone();
                scale_rgb_in_place(&mut faded.data, idx as f32 / FADE_IN_FRAMES as f32);
                canvas.draw_image(&faded, x, y, 1.0)?;
            } else {
                canvas.draw_image(shot, x, y, 1.0)?;
            }
        }

        for (shadow, main, y) in &slide.texts {
            let font = self.engine.font();
            canvas.draw_text(shadow, font, TEXT_X + SHADOW_OFFSET, y + SHADOW_OFFSET)?;
            canvas.draw_text(main, font, TEXT_X, *y)?;
        }

        if slide.kind != SlideKind::Title {
            let bar_y = h - PROGRESS_BOTTOM_MARGIN;
            canvas.fill_rect(TEXT_X, bar_y, PROGRESS_W, PROGRESS_H, PROGRESS_TRACK);
            let filled = (PROGRESS_W * idx as f64 / total as f64).floor();
            canvas.fill_rect(TEXT_X, bar_y, filled, PROGRESS_H, PROGRESS_FILL);
        }

        Ok(canvas.finish())
    }
}

/// Vertical gradient from the top to the bottom color, one row at a time.
fn gradient(size: FrameSize) -> FrameRGBA {
    let mut data = Vec::with_capacity(size.rgba8_len());
    for y in 0..size.height {
        let t = f64::from(y) / f64::from(size.height);
        let lerp = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t) as u8;
        let row = [
            lerp(GRADIENT_TOP.r, GRADIENT_BOTTOM.r),
            lerp(GRADIENT_TOP.g, GRADIENT_BOTTOM.g),
            lerp(GRADIENT_TOP.b, GRADIENT_BOTTOM.b),
            255,
        ];
        for _ in 0..size.width {
            data.extend_from_slice(&row);
        }
    }
    FrameRGBA {
        width: size.width,
        height: size.height,
        data,
        premultiplied: false,
    }
}

fn scale_screenshot(img: &image::RgbaImage, size: FrameSize) -> ReelResult<FrameRGBA> {
    if img.width() == 0 || img.height() == 0 {
        return Err(ReelError::validation("screenshot is empty"));
    }
    let sw = ((f64::from(size.width) * SCREENSHOT_WIDTH_RATIO) as u32).max(1);
    let sh = ((f64::from(sw) * f64::from(img.height()) / f64::from(img.width())) as u32)
        .clamp(1, size.height);
    let resized = image::imageops::resize(img, sw, sh, image::imageops::FilterType::Lanczos3);
    Ok(FrameRGBA::from_image(resized))
}

#[cfg(test)]
#[path = "../../tests/unit/render/slide.rs"]
mod tests;
