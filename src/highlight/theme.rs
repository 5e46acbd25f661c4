use crate::foundation::color::Rgba8;
use crate::highlight::token::TokenKind;

/// Built-in palette names.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeName {
    /// Dark editor palette.
    #[default]
    Dark,
    /// Light editor palette.
    Light,
}

impl ThemeName {
    /// Every built-in theme, in rendering order.
    pub const ALL: [Self; 2] = [Self::Dark, Self::Light];

    /// Parse a theme name, falling back to [`ThemeName::Dark`] for anything unknown.
    pub fn parse_lossy(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "light" => Self::Light,
            "dark" => Self::Dark,
            other => {
                tracing::warn!(theme = other, "unknown theme, using dark");
                Self::Dark
            }
        }
    }

    /// Lowercase name used in file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    /// Capitalized name used in image titles.
    pub fn title(self) -> &'static str {
        match self {
            Self::Dark => "Dark",
            Self::Light => "Light",
        }
    }

    /// Resolve the palette.
    pub fn theme(self) -> Theme {
        match self {
            Self::Dark => Theme::DARK,
            Self::Light => Theme::LIGHT,
        }
    }
}

impl std::fmt::Display for ThemeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable color palette for one rendering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub background: Rgba8,
    pub line_number_bg: Rgba8,
    pub line_number_fg: Rgba8,
    pub default_text: Rgba8,
    pub keyword: Rgba8,
    pub string: Rgba8,
    pub comment: Rgba8,
    pub function: Rgba8,
    pub number: Rgba8,
    pub decorator: Rgba8,
    /// Outline drawn around the whole image.
    pub border: Rgba8,
    /// Base color of the top/left edge shade; its alpha is replaced per step.
    pub edge_shade: Rgba8,
}

impl Theme {
    pub const DARK: Self = Self {
        background: Rgba8::rgb(0x1e, 0x1e, 0x1e),
        line_number_bg: Rgba8::rgb(0x2d, 0x2d, 0x2d),
        line_number_fg: Rgba8::rgb(0x85, 0x85, 0x85),
        default_text: Rgba8::rgb(0xd4, 0xd4, 0xd4),
        keyword: Rgba8::rgb(0x56, 0x9c, 0xd6),
        string: Rgba8::rgb(0xce, 0x91, 0x78),
        comment: Rgba8::rgb(0x6a, 0x99, 0x55),
        function: Rgba8::rgb(0xdc, 0xdc, 0xaa),
        number: Rgba8::rgb(0xb5, 0xce, 0xa8),
        decorator: Rgba8::rgb(0xd7, 0xba, 0x7d),
        border: Rgba8::rgb(0x33, 0x33, 0x33),
        edge_shade: Rgba8::BLACK,
    };

    pub const LIGHT: Self = Self {
        background: Rgba8::rgb(0xff, 0xff, 0xff),
        line_number_bg: Rgba8::rgb(0xf5, 0xf5, 0xf5),
        line_number_fg: Rgba8::rgb(0x99, 0x99, 0x99),
        default_text: Rgba8::rgb(0x33, 0x33, 0x33),
        keyword: Rgba8::rgb(0x00, 0x00, 0xff),
        string: Rgba8::rgb(0xa3, 0x15, 0x15),
        comment: Rgba8::rgb(0x00, 0x80, 0x00),
        function: Rgba8::rgb(0x79, 0x5e, 0x26),
        number: Rgba8::rgb(0x09, 0x86, 0x58),
        decorator: Rgba8::rgb(0xaf, 0x00, 0xdb),
        border: Rgba8::rgb(0xcc, 0xcc, 0xcc),
        edge_shade: Rgba8::rgb(200, 200, 200),
    };

    /// Look up a palette by name; unknown names yield the dark palette.
    pub fn by_name(name: &str) -> Self {
        ThemeName::parse_lossy(name).theme()
    }

    /// Color used to draw a token of the given category.
    pub fn color_for(&self, kind: TokenKind) -> Rgba8 {
        match kind {
            TokenKind::Default => self.default_text,
            TokenKind::Keyword => self.keyword,
            TokenKind::String => self.string,
            TokenKind::Comment => self.comment,
            TokenKind::Function | TokenKind::Builtin => self.function,
            TokenKind::Number => self.number,
            TokenKind::Decorator => self.decorator,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::DARK
    }
}

#[cfg(test)]
#[path = "../../tests/unit/highlight/theme.rs"]
mod tests;
