/// Semantic category of a token, used to pick its theme color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    /// Anything no rule classified.
    Default,
    /// Reserved keyword.
    Keyword,
    /// Quoted string literal.
    String,
    /// Whole-line or trailing comment.
    Comment,
    /// Identifier immediately followed by `(`.
    Function,
    /// Built-in name. Colored like [`TokenKind::Function`].
    Builtin,
    /// Numeric literal.
    Number,
    /// Decorator such as `@property`.
    Decorator,
}

impl TokenKind {
    /// Stable lowercase label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Keyword => "keyword",
            Self::String => "string",
            Self::Comment => "comment",
            Self::Function => "function",
            Self::Builtin => "builtin",
            Self::Number => "number",
            Self::Decorator => "decorator",
        }
    }
}

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A contiguous span of one source line tagged with its category.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token<'a> {
    /// The exact text of the span.
    pub text: &'a str,
    /// Category used for coloring.
    pub kind: TokenKind,
}

impl<'a> Token<'a> {
    /// Construct a token.
    pub fn new(text: &'a str, kind: TokenKind) -> Self {
        Self { text, kind }
    }
}

/// Concatenate token texts back into a line.
pub fn join_tokens(tokens: &[Token<'_>]) -> String {
    let mut out = String::with_capacity(tokens.iter().map(|t| t.text.len()).sum());
    for t in tokens {
        out.push_str(t.text);
    }
    out
}
