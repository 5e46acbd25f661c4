use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::assets::font::LoadedFont;
use crate::foundation::error::{ReelError, ReelResult};
use crate::highlight::theme::ThemeName;
use crate::render::code_image::CodeImageRenderer;
use crate::render::layout::CodeStyle;

/// Input used when none is given on the command line.
pub const DEFAULT_INPUT: &str = "main.py";

const USAGE: &str = "usage:
  codereel image [FILE]

examples:
  codereel image main.py
  codereel image mycode.py --theme light --out-dir shots";

/// Themes selected by a `--theme` value: `both`, or one theme name (unknown names mean dark).
pub fn parse_theme_selection(value: &str) -> Vec<ThemeName> {
    if value.trim().eq_ignore_ascii_case("both") {
        ThemeName::ALL.to_vec()
    } else {
        vec![ThemeName::parse_lossy(value)]
    }
}

/// `{stem}_{theme}_simple.png`.
pub fn output_file_name(input: &Path, theme: ThemeName) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "code".to_owned());
    format!("{stem}_{theme}_simple.png")
}

/// `{file name} - Dark Theme`.
pub fn image_title(input: &Path, theme: ThemeName) -> String {
    let name = input
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!("{name} - {} Theme", theme.title())
}

/// Render `input` once per theme into `out_dir`, returning the written paths in theme order.
#[tracing::instrument(skip(style, font), fields(input = %input.display()))]
pub fn render_code_images(
    input: &Path,
    out_dir: &Path,
    themes: &[ThemeName],
    style: CodeStyle,
    font: &LoadedFont,
) -> ReelResult<Vec<PathBuf>> {
    if !input.is_file() {
        return Err(ReelError::validation(format!(
            "input file '{}' not found\n\n{USAGE}",
            input.display()
        )));
    }
    let code = std::fs::read_to_string(input)
        .with_context(|| format!("read source '{}'", input.display()))?;

    let mut written = Vec::with_capacity(themes.len());
    for &theme in themes {
        let out = out_dir.join(output_file_name(input, theme));
        let mut renderer = CodeImageRenderer::new(theme, style, font.clone())?;
        renderer.render_to_file(&code, Some(&image_title(input, theme)), 1, &out)?;
        written.push(out);
    }
    Ok(written)
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/code.rs"]
mod tests;
