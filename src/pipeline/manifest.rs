//! JSON manifests driving the batch jobs.
//!
//! Relative paths inside a manifest are resolved against the directory holding the manifest file,
//! so a manifest and its media can be moved together.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::foundation::color::Rgba8;
use crate::foundation::error::{ReelError, ReelResult};
use crate::render::slide::SlideKind;

/// Behaviour shared by every manifest type.
pub trait Manifest: serde::de::DeserializeOwned {
    /// Human-readable manifest kind used in error messages.
    const KIND: &'static str;

    fn validate(&self) -> ReelResult<()>;

    /// Rewrite relative paths to be relative to `base`.
    fn resolve_paths(&mut self, _base: &Path) {}

    /// Parse, validate and resolve a manifest from a JSON reader.
    fn from_reader<R: std::io::Read>(r: R, base: &Path) -> ReelResult<Self> {
        let mut m: Self = serde_json::from_reader(r)
            .map_err(|e| ReelError::validation(format!("parse {} JSON: {e}", Self::KIND)))?;
        m.validate()?;
        m.resolve_paths(base);
        Ok(m)
    }

    /// Parse a manifest file from disk.
    fn from_path(path: &Path) -> ReelResult<Self> {
        let f = File::open(path).map_err(|e| {
            ReelError::validation(format!("open {} '{}': {e}", Self::KIND, path.display()))
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new("."));
        Self::from_reader(BufReader::new(f), base)
    }
}

fn resolve(base: &Path, p: &mut PathBuf) {
    if p.is_relative() {
        *p = base.join(&*p);
    }
}

/// Ids name output files, so they must be non-empty plain file stems.
fn require_id(kind: &str, idx: usize, id: &str) -> ReelResult<()> {
    if id.trim().is_empty() {
        return Err(ReelError::validation(format!("{kind} #{idx} has an empty id")));
    }
    if id.contains(['/', '\\']) || id == "." || id == ".." {
        return Err(ReelError::validation(format!(
            "{kind} id '{id}' must not contain path separators"
        )));
    }
    Ok(())
}

fn require_unique<'a>(kind: &str, ids: impl Iterator<Item = &'a str>) -> ReelResult<()> {
    let mut seen = std::collections::BTreeSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(ReelError::validation(format!("duplicate {kind} id '{id}'")));
        }
    }
    Ok(())
}

/// A named, 1-based, inclusive line range of a source file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneSpec {
    pub name: String,
    pub start: usize,
    pub end: usize,
}

/// Scenes to screenshot from one source file.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneManifest {
    pub scenes: Vec<SceneSpec>,
}

impl Manifest for SceneManifest {
    const KIND: &'static str = "scene manifest";

    fn validate(&self) -> ReelResult<()> {
        if self.scenes.is_empty() {
            return Err(ReelError::validation("scene manifest lists no scenes"));
        }
        for (i, s) in self.scenes.iter().enumerate() {
            require_id("scene", i, &s.name)?;
            if s.start == 0 {
                return Err(ReelError::validation(format!(
                    "scene '{}': line numbers start at 1",
                    s.name
                )));
            }
            if s.start > s.end {
                return Err(ReelError::validation(format!(
                    "scene '{}': start {} is after end {}",
                    s.name, s.start, s.end
                )));
            }
        }
        require_unique("scene", self.scenes.iter().map(|s| s.name.as_str()))
    }
}

/// One narration clip.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NarrationItem {
    pub id: String,
    pub text: String,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NarrationManifest {
    pub items: Vec<NarrationItem>,
}

impl Manifest for NarrationManifest {
    const KIND: &'static str = "narration manifest";

    fn validate(&self) -> ReelResult<()> {
        if self.items.is_empty() {
            return Err(ReelError::validation("narration manifest lists no items"));
        }
        for (i, item) in self.items.iter().enumerate() {
            require_id("narration", i, &item.id)?;
            if item.text.trim().is_empty() {
                return Err(ReelError::validation(format!(
                    "narration '{}' has no text",
                    item.id
                )));
            }
        }
        require_unique("narration", self.items.iter().map(|s| s.id.as_str()))
    }
}

fn default_gap() -> f64 {
    1.0
}

/// One still-image segment of the assembled video.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VideoScene {
    pub id: String,
    pub image: PathBuf,
    #[serde(default)]
    pub audio: Option<PathBuf>,
    /// Narration length in seconds; probed from `audio` when absent.
    #[serde(default)]
    pub duration: Option<f64>,
    /// Silence after the narration, in seconds.
    #[serde(default = "default_gap")]
    pub gap: f64,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct VideoManifest {
    pub scenes: Vec<VideoScene>,
}

impl Manifest for VideoManifest {
    const KIND: &'static str = "video manifest";

    fn validate(&self) -> ReelResult<()> {
        if self.scenes.is_empty() {
            return Err(ReelError::validation("video manifest lists no scenes"));
        }
        for (i, s) in self.scenes.iter().enumerate() {
            require_id("video scene", i, &s.id)?;
            match s.duration {
                Some(d) if !d.is_finite() || d <= 0.0 => {
                    return Err(ReelError::validation(format!(
                        "video scene '{}': duration must be positive",
                        s.id
                    )));
                }
                None if s.audio.is_none() => {
                    return Err(ReelError::validation(format!(
                        "video scene '{}': needs a duration or an audio file to probe",
                        s.id
                    )));
                }
                _ => {}
            }
            if !s.gap.is_finite() || s.gap < 0.0 {
                return Err(ReelError::validation(format!(
                    "video scene '{}': gap must be >= 0",
                    s.id
                )));
            }
        }
        require_unique("video scene", self.scenes.iter().map(|s| s.id.as_str()))
    }

    fn resolve_paths(&mut self, base: &Path) {
        for s in &mut self.scenes {
            resolve(base, &mut s.image);
            if let Some(audio) = s.audio.as_mut() {
                resolve(base, audio);
            }
        }
    }
}

fn default_accent() -> Rgba8 {
    Rgba8::rgb(255, 107, 107)
}

/// One slide of a slideshow.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlideSpec {
    #[serde(default)]
    pub kind: SlideKind,
    pub title: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    /// Title color.
    #[serde(default = "default_accent")]
    pub color: Rgba8,
    #[serde(default)]
    pub screenshot: Option<PathBuf>,
    /// Seconds on screen.
    pub duration: f64,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SlideManifest {
    pub slides: Vec<SlideSpec>,
    /// Soundtrack muxed under the whole slideshow.
    #[serde(default)]
    pub audio: Option<PathBuf>,
}

impl SlideManifest {
    /// Total frames at `fps`, each slide rounded to whole frames.
    pub fn total_frames(&self, fps: crate::foundation::core::Fps) -> u64 {
        self.slides
            .iter()
            .map(|s| fps.secs_to_frames_round(s.duration))
            .sum()
    }
}

impl Manifest for SlideManifest {
    const KIND: &'static str = "slide manifest";

    fn validate(&self) -> ReelResult<()> {
        if self.slides.is_empty() {
            return Err(ReelError::validation("slide manifest lists no slides"));
        }
        for (i, s) in self.slides.iter().enumerate() {
            if !s.duration.is_finite() || s.duration <= 0.0 {
                return Err(ReelError::validation(format!(
                    "slide #{i} ('{}'): duration must be positive",
                    s.title
                )));
            }
        }
        Ok(())
    }

    fn resolve_paths(&mut self, base: &Path) {
        for s in &mut self.slides {
            if let Some(shot) = s.screenshot.as_mut() {
                resolve(base, shot);
            }
        }
        if let Some(audio) = self.audio.as_mut() {
            resolve(base, audio);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/pipeline/manifest.rs"]
mod tests;
