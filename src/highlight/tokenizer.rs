//! Ordered-rule, first-match line tokenizer.
//!
//! A [`Tokenizer`] owns a priority-ordered list of [`Rule`]s. Scanning a line tries every rule at
//! the current cursor, in order, and the first rule whose match starts exactly at the cursor wins,
//! regardless of match length. Text that no rule claims is emitted as [`TokenKind::Default`], one
//! token per run of word or non-word characters, so the produced tokens always partition the line.

use regex::Regex;

use crate::foundation::error::{ReelError, ReelResult};
use crate::highlight::token::{Token, TokenKind};

/// Python reserved words (plus `self`, which is highlighted like one).
pub const PYTHON_KEYWORDS: &[&str] = &[
    "False", "None", "True", "and", "as", "assert", "async", "await", "break", "class", "continue",
    "def", "del", "elif", "else", "except", "finally", "for", "from", "global", "if", "import",
    "in", "is", "lambda", "nonlocal", "not", "or", "pass", "raise", "return", "try", "while",
    "with", "yield", "self",
];

/// Python built-in functions and types.
pub const PYTHON_BUILTINS: &[&str] = &[
    "abs",
    "all",
    "any",
    "ascii",
    "bin",
    "bool",
    "bytearray",
    "bytes",
    "callable",
    "chr",
    "classmethod",
    "compile",
    "complex",
    "delattr",
    "dict",
    "dir",
    "divmod",
    "enumerate",
    "eval",
    "exec",
    "filter",
    "float",
    "format",
    "frozenset",
    "getattr",
    "globals",
    "hasattr",
    "hash",
    "help",
    "hex",
    "id",
    "input",
    "int",
    "isinstance",
    "issubclass",
    "iter",
    "len",
    "list",
    "locals",
    "map",
    "max",
    "memoryview",
    "min",
    "next",
    "object",
    "oct",
    "open",
    "ord",
    "pow",
    "print",
    "property",
    "range",
    "repr",
    "reversed",
    "round",
    "set",
    "setattr",
    "slice",
    "sorted",
    "staticmethod",
    "str",
    "sum",
    "super",
    "tuple",
    "type",
    "vars",
    "zip",
];

/// One `(pattern, category)` entry of a tokenizer's rule chain.
#[derive(Clone, Debug)]
pub struct Rule {
    kind: TokenKind,
    regex: Regex,
    group: usize,
}

impl Rule {
    /// Compile a rule whose whole match becomes the token.
    pub fn new(pattern: &str, kind: TokenKind) -> ReelResult<Self> {
        Self::with_group(pattern, kind, 0)
    }

    /// Compile a rule whose capture `group` becomes the token.
    ///
    /// The group must start where the whole match starts. Text matched after the group (for
    /// example a lookahead-style `\s*\(`) is left for the next scan position.
    pub fn with_group(pattern: &str, kind: TokenKind, group: usize) -> ReelResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            ReelError::validation(format!("invalid {kind} rule pattern '{pattern}': {e}"))
        })?;
        if group >= regex.captures_len() {
            return Err(ReelError::validation(format!(
                "{kind} rule pattern '{pattern}' has no capture group {group}"
            )));
        }
        Ok(Self { kind, regex, group })
    }

    /// Word-boundary match against a fixed set of words.
    pub fn word_set(words: &[&str], kind: TokenKind) -> ReelResult<Self> {
        if words.is_empty() {
            return Err(ReelError::validation(format!(
                "{kind} word set must not be empty"
            )));
        }
        let alternation = words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|");
        Self::new(&format!(r"\b(?:{alternation})\b"), kind)
    }

    /// Category assigned to this rule's matches.
    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    /// Return the end of this rule's token when it matches exactly at `pos`.
    ///
    /// `line` is the full line so word boundaries see the characters before `pos`.
    fn match_at(&self, line: &str, pos: usize) -> Option<usize> {
        if self.group == 0 {
            let m = self.regex.find_at(line, pos)?;
            return (m.start() == pos && m.end() > pos).then_some(m.end());
        }

        let caps = self.regex.captures_at(line, pos)?;
        let whole = caps.get(0)?;
        let m = caps.get(self.group)?;
        (whole.start() == pos && m.start() == pos && m.end() > pos).then_some(m.end())
    }
}

/// Line tokenizer driven by a priority-ordered rule chain.
#[derive(Clone, Debug)]
pub struct Tokenizer {
    comment_marker: String,
    rules: Vec<Rule>,
}

impl Tokenizer {
    /// Build a tokenizer from a whole-line comment marker and an ordered rule chain.
    pub fn new(comment_marker: impl Into<String>, rules: Vec<Rule>) -> ReelResult<Self> {
        let comment_marker = comment_marker.into();
        if comment_marker.is_empty() {
            return Err(ReelError::validation("comment marker must be non-empty"));
        }
        Ok(Self {
            comment_marker,
            rules,
        })
    }

    /// Rule chain for Python source, in priority order: trailing comment, decorator,
    /// triple-quoted string, quoted string, number, keyword, builtin, call heuristic.
    pub fn python() -> ReelResult<Self> {
        let rules = vec![
            Rule::new(r"#.*$", TokenKind::Comment)?,
            Rule::new(r"@\w+", TokenKind::Decorator)?,
            Rule::new(r#"""".*?"""|'''.*?'''"#, TokenKind::String)?,
            Rule::new(r#""[^"]*"|'[^']*'"#, TokenKind::String)?,
            Rule::new(r"\b\d+\.?\d*\b", TokenKind::Number)?,
            Rule::word_set(PYTHON_KEYWORDS, TokenKind::Keyword)?,
            Rule::word_set(PYTHON_BUILTINS, TokenKind::Builtin)?,
            Rule::with_group(r"\b(\w+)\s*\(", TokenKind::Function, 1)?,
        ];
        Self::new("#", rules)
    }

    /// The rule chain in priority order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Split one line into categorized spans covering the whole line.
    ///
    /// Blank lines become a single default token; lines whose trimmed form starts with the
    /// comment marker become a single comment token.
    pub fn tokenize_line<'a>(&self, line: &'a str) -> Vec<Token<'a>> {
        if line.trim().is_empty() {
            return vec![Token::new(line, TokenKind::Default)];
        }
        if line.trim().starts_with(self.comment_marker.as_str()) {
            return vec![Token::new(line, TokenKind::Comment)];
        }

        let mut tokens = Vec::new();
        let mut pending: Option<Pending> = None;
        let mut pos = 0usize;

        while pos < line.len() {
            if let Some((end, kind)) = self.first_match_at(line, pos) {
                flush_default(line, &mut pending, pos, &mut tokens);
                tokens.push(Token::new(&line[pos..end], kind));
                pos = end;
                continue;
            }

            // Unclaimed characters coalesce into one default token per word/non-word run.
            let Some(c) = line[pos..].chars().next() else {
                break;
            };
            let word = is_word_char(c);
            if pending.is_some_and(|p| p.word != word) {
                flush_default(line, &mut pending, pos, &mut tokens);
            }
            pending.get_or_insert(Pending { start: pos, word });
            pos += c.len_utf8();
        }
        flush_default(line, &mut pending, pos, &mut tokens);

        tokens
    }

    fn first_match_at(&self, line: &str, pos: usize) -> Option<(usize, TokenKind)> {
        self.rules
            .iter()
            .find_map(|rule| rule.match_at(line, pos).map(|end| (end, rule.kind)))
    }
}

/// Start of a run of unclaimed characters.
#[derive(Clone, Copy)]
struct Pending {
    start: usize,
    word: bool,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn flush_default<'a>(
    line: &'a str,
    pending: &mut Option<Pending>,
    end: usize,
    tokens: &mut Vec<Token<'a>>,
) {
    if let Some(p) = pending.take()
        && p.start < end
    {
        tokens.push(Token::new(&line[p.start..end], TokenKind::Default));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/highlight/tokenizer.rs"]
mod tests;
