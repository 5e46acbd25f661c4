//! Font discovery with a fixed fallback chain.
//!
//! Loading never fails: an explicit file is tried first, then a list of well-known host paths, then
//! the system font database, and finally a built-in block face that draws every glyph as a box.

use std::path::{Path, PathBuf};

use sha2::Digest;

use crate::foundation::error::{ReelError, ReelResult};

/// Advance of one block-face glyph, in ems.
pub const BLOCK_ADVANCE_EM: f32 = 0.6;

/// Monospace faces with CJK coverage first, then plain monospace faces.
pub const MONOSPACE_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/ヒラギノ角ゴシック W3.ttc",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    "/System/Library/Fonts/PingFang.ttc",
    "/Library/Fonts/Courier New.ttf",
    "/System/Library/Fonts/Menlo.ttc",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/fonts-japanese-gothic.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationMono-Regular.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSansMono.ttf",
    r"C:\Windows\Fonts\msgothic.ttc",
    r"C:\Windows\Fonts\YuGothM.ttc",
    r"C:\Windows\Fonts\consola.ttf",
    r"C:\Windows\Fonts\cour.ttf",
];

/// Proportional faces used for slide titles.
pub const SANS_CANDIDATES: &[&str] = &[
    "/System/Library/Fonts/Arial.ttc",
    "/System/Library/Fonts/Helvetica.ttc",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    r"C:\Windows\Fonts\arial.ttf",
];

/// Which generic family a font is needed for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontRole {
    /// Source code.
    Monospace,
    /// Slide titles and captions.
    SansSerif,
}

impl FontRole {
    fn candidates(self) -> &'static [&'static str] {
        match self {
            Self::Monospace => MONOSPACE_CANDIDATES,
            Self::SansSerif => SANS_CANDIDATES,
        }
    }

    fn generic(self) -> usvg::fontdb::Family<'static> {
        match self {
            Self::Monospace => usvg::fontdb::Family::Monospace,
            Self::SansSerif => usvg::fontdb::Family::SansSerif,
        }
    }
}

/// A resolved font face.
#[derive(Clone)]
pub enum FontFace {
    /// Real outline font bytes.
    Outline {
        /// Face data, shared with the rasterizer.
        font: vello_cpu::peniko::FontData,
        /// Where the bytes came from (path or system face name).
        origin: String,
    },
    /// Built-in fallback: fixed advance, glyphs drawn as solid boxes.
    Blocks,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline { font, origin } => f
                .debug_struct("Outline")
                .field("origin", origin)
                .field("index", &font.index)
                .field("len", &font.data.data().len())
                .finish(),
            Self::Blocks => f.write_str("Blocks"),
        }
    }
}

/// Font used by a renderer for its whole lifetime.
#[derive(Clone, Debug)]
pub struct LoadedFont {
    face: FontFace,
}

impl LoadedFont {
    /// Resolve a font for `role`, preferring `explicit` when given.
    ///
    /// Every failed step is logged; the block face is the last resort.
    #[tracing::instrument(level = "debug", skip_all, fields(role = ?role))]
    pub fn load(role: FontRole, explicit: Option<&Path>) -> Self {
        if let Some(path) = explicit {
            match Self::from_file(path) {
                Ok(font) => return font,
                Err(e) => tracing::warn!(path = %path.display(), "font file unusable: {e}"),
            }
        }

        for candidate in role.candidates() {
            let path = Path::new(candidate);
            if !path.is_file() {
                continue;
            }
            match Self::from_file(path) {
                Ok(font) => return font,
                Err(e) => tracing::debug!(path = %path.display(), "skipping font candidate: {e}"),
            }
        }

        if let Some(font) = Self::from_system(role) {
            return font;
        }

        tracing::warn!("no usable {role:?} font found, using built-in block glyphs");
        Self::blocks()
    }

    /// Load the first face of a font file.
    pub fn from_file(path: &Path) -> ReelResult<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| ReelError::font(format!("read {}: {e}", path.display())))?;
        Self::from_bytes(bytes, 0, path.display().to_string())
    }

    /// Wrap raw font bytes after checking that they parse as a font.
    pub fn from_bytes(bytes: Vec<u8>, index: u32, origin: impl Into<String>) -> ReelResult<Self> {
        let origin = origin.into();
        let mut db = usvg::fontdb::Database::new();
        db.load_font_data(bytes.clone());
        if db.is_empty() {
            return Err(ReelError::font(format!("{origin}: not a supported font")));
        }
        let font = vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), index);
        Ok(Self {
            face: FontFace::Outline { font, origin },
        })
    }

    /// The built-in block face.
    pub fn blocks() -> Self {
        Self {
            face: FontFace::Blocks,
        }
    }

    fn from_system(role: FontRole) -> Option<Self> {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();

        let families = [role.generic()];
        let query = usvg::fontdb::Query {
            families: &families,
            ..usvg::fontdb::Query::default()
        };
        let id = db.query(&query)?;
        let origin = db
            .face(id)
            .map(|f| f.post_script_name.clone())
            .unwrap_or_else(|| "system font".to_owned());
        let (bytes, index) = db.with_face_data(id, |data, index| (data.to_vec(), index))?;

        match Self::from_bytes(bytes, index, origin) {
            Ok(font) => Some(font),
            Err(e) => {
                tracing::debug!("system font rejected: {e}");
                None
            }
        }
    }

    /// The resolved face.
    pub fn face(&self) -> &FontFace {
        &self.face
    }

    /// Whether this is the built-in block face.
    pub fn is_blocks(&self) -> bool {
        matches!(self.face, FontFace::Blocks)
    }

    /// Human-readable origin for logs and `--dump-fonts`.
    pub fn origin(&self) -> &str {
        match &self.face {
            FontFace::Outline { origin, .. } => origin,
            FontFace::Blocks => "built-in blocks",
        }
    }

    /// Raw face bytes and collection index.
    pub fn bytes(&self) -> Option<(&[u8], u32)> {
        match &self.face {
            FontFace::Outline { font, .. } => Some((font.data.data(), font.index)),
            FontFace::Blocks => None,
        }
    }

    /// SHA-256 of the face bytes, lowercase hex.
    pub fn sha256_hex(&self) -> Option<String> {
        let (bytes, _) = self.bytes()?;
        let digest = sha2::Sha256::digest(bytes);
        let mut out = String::with_capacity(digest.len() * 2);
        for b in digest {
            out.push_str(&format!("{b:02x}"));
        }
        Some(out)
    }

    pub(crate) fn cpu_font(&self) -> Option<&vello_cpu::peniko::FontData> {
        match &self.face {
            FontFace::Outline { font, .. } => Some(font),
            FontFace::Blocks => None,
        }
    }
}

/// Every existing candidate path for `role`, for diagnostics.
pub fn existing_candidates(role: FontRole) -> Vec<PathBuf> {
    role.candidates()
        .iter()
        .map(PathBuf::from)
        .filter(|p| p.is_file())
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/assets/font.rs"]
mod tests;
