use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{ReelError, ReelResult};
use crate::pipeline::batch::BatchReport;
use crate::pipeline::manifest::{SceneManifest, SceneSpec};
use crate::render::code_image::CodeImageRenderer;

/// Lines `start..=end` (1-based) of `source`, joined with `\n`.
///
/// `end` is clamped to the last line; a `start` past the end of the file is an error.
pub fn slice_lines(source: &str, start: usize, end: usize) -> ReelResult<String> {
    let lines: Vec<&str> = source.lines().collect();
    if start == 0 || start > end {
        return Err(ReelError::validation(format!(
            "invalid line range {start}-{end}"
        )));
    }
    if start > lines.len() {
        return Err(ReelError::validation(format!(
            "line {start} is past the end of the source ({} lines)",
            lines.len()
        )));
    }
    let end = end.min(lines.len());
    Ok(lines[start - 1..end].join("\n"))
}

/// `{file name} - Lines {start}-{end}`.
pub fn scene_title(source: &Path, scene: &SceneSpec) -> String {
    let name = source
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source.display().to_string());
    format!("{name} - Lines {}-{}", scene.start, scene.end)
}

/// Render one screenshot per scene into `out_dir/{name}.png`.
///
/// Scenes fail independently; the returned report lists the written files' scene names.
#[tracing::instrument(skip_all, fields(source = %source.display(), scenes = manifest.scenes.len()))]
pub fn render_scenes(
    renderer: &mut CodeImageRenderer,
    source: &Path,
    manifest: &SceneManifest,
    out_dir: &Path,
) -> ReelResult<(BatchReport, Vec<PathBuf>)> {
    let text = std::fs::read_to_string(source)
        .with_context(|| format!("read source '{}'", source.display()))?;

    let mut report = BatchReport::new("scenes");
    let mut written = Vec::new();
    for scene in &manifest.scenes {
        let out = out_dir.join(format!("{}.png", scene.name));
        tracing::info!(scene = %scene.name, path = %out.display(), "rendering scene");
        let res = slice_lines(&text, scene.start, scene.end).and_then(|code| {
            let title = scene_title(source, scene);
            renderer.render_to_file(&code, Some(&title), scene.start, &out)
        });
        if report.record(&scene.name, res).is_some() {
            written.push(out);
        }
    }
    report.log_summary();
    Ok((report, written))
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/scenes.rs"]
mod tests;
