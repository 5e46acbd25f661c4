use super::*;
use crate::highlight::token::join_tokens;

fn py() -> Tokenizer {
    Tokenizer::python().unwrap()
}

fn spans(line: &str) -> Vec<(String, TokenKind)> {
    py().tokenize_line(line)
        .into_iter()
        .map(|t| (t.text.to_string(), t.kind))
        .collect()
}

fn s(text: &str, kind: TokenKind) -> (String, TokenKind) {
    (text.to_string(), kind)
}

#[test]
fn trailing_comment_line_splits_in_order() {
    assert_eq!(
        spans("x = 5  # comment"),
        vec![
            s("x", TokenKind::Default),
            s(" = ", TokenKind::Default),
            s("5", TokenKind::Number),
            s("  ", TokenKind::Default),
            s("# comment", TokenKind::Comment),
        ]
    );
}

#[test]
fn blank_lines_are_one_default_token() {
    for line in ["", " ", "\t  \t"] {
        let toks = py().tokenize_line(line);
        assert_eq!(toks, vec![Token::new(line, TokenKind::Default)]);
    }
}

#[test]
fn whole_line_comments_short_circuit() {
    let line = "    # x = 'not a string' print(1)";
    assert_eq!(
        py().tokenize_line(line),
        vec![Token::new(line, TokenKind::Comment)]
    );
}

#[test]
fn keyword_wins_over_builtin_rule() {
    let tk = Tokenizer::new(
        "#",
        vec![
            Rule::word_set(&["print"], TokenKind::Keyword).unwrap(),
            Rule::word_set(&["print"], TokenKind::Builtin).unwrap(),
        ],
    )
    .unwrap();
    let toks = tk.tokenize_line("print");
    assert_eq!(toks, vec![Token::new("print", TokenKind::Keyword)]);

    // `self` is in the keyword set and never reaches the call heuristic.
    assert_eq!(spans("self()")[0], s("self", TokenKind::Keyword));
}

#[test]
fn builtin_used_as_call_stays_builtin() {
    assert_eq!(
        spans("print(len(xs))"),
        vec![
            s("print", TokenKind::Builtin),
            s("(", TokenKind::Default),
            s("len", TokenKind::Builtin),
            s("(", TokenKind::Default),
            s("xs", TokenKind::Default),
            s("))", TokenKind::Default),
        ]
    );
}

#[test]
fn call_heuristic_claims_identifier_only() {
    assert_eq!(
        spans("resize_image (img)"),
        vec![
            s("resize_image", TokenKind::Function),
            s(" (", TokenKind::Default),
            s("img", TokenKind::Default),
            s(")", TokenKind::Default),
        ]
    );
}

#[test]
fn def_line_mixes_keyword_function_and_identifiers() {
    assert_eq!(
        spans("def resize(img, width):"),
        vec![
            s("def", TokenKind::Keyword),
            s(" ", TokenKind::Default),
            s("resize", TokenKind::Function),
            s("(", TokenKind::Default),
            s("img", TokenKind::Default),
            s(", ", TokenKind::Default),
            s("width", TokenKind::Default),
            s("):", TokenKind::Default),
        ]
    );
}

#[test]
fn decorators_strings_and_numbers() {
    assert_eq!(spans("@property"), vec![s("@property", TokenKind::Decorator)]);
    assert_eq!(
        spans("a = \"x # y\" + 'z'"),
        vec![
            s("a", TokenKind::Default),
            s(" = ", TokenKind::Default),
            s("\"x # y\"", TokenKind::String),
            s(" + ", TokenKind::Default),
            s("'z'", TokenKind::String),
        ]
    );
    assert_eq!(
        spans("r = 3.14"),
        vec![
            s("r", TokenKind::Default),
            s(" = ", TokenKind::Default),
            s("3.14", TokenKind::Number),
        ]
    );
}

#[test]
fn triple_quoted_string_on_one_line() {
    assert_eq!(
        spans(r#"doc = """hi""""#),
        vec![
            s("doc", TokenKind::Default),
            s(" = ", TokenKind::Default),
            s(r#""""hi""""#, TokenKind::String),
        ]
    );
}

#[test]
fn digits_inside_identifiers_are_not_numbers() {
    assert_eq!(
        spans("img2 = x1"),
        vec![
            s("img2", TokenKind::Default),
            s(" = ", TokenKind::Default),
            s("x1", TokenKind::Default),
        ]
    );
}

#[test]
fn unterminated_string_falls_through_as_default() {
    let line = "msg = 'unterminated text";
    let toks = py().tokenize_line(line);
    assert!(toks.iter().all(|t| t.kind != TokenKind::String));
    assert_eq!(join_tokens(&toks), line);
}

#[test]
fn tokens_partition_unicode_lines() {
    let line = "print(f\"処理中: {filename} ({img.size[0]}×{img.size[1]})\")";
    let toks = py().tokenize_line(line);
    assert_eq!(join_tokens(&toks), line);
    assert_eq!(toks[0], Token::new("print", TokenKind::Builtin));
}

#[test]
fn invalid_rules_are_rejected() {
    assert!(Rule::new("(", TokenKind::String).is_err());
    assert!(Rule::with_group(r"\w+", TokenKind::Function, 1).is_err());
    assert!(Rule::word_set(&[], TokenKind::Keyword).is_err());
    assert!(Tokenizer::new("", vec![]).is_err());
}

#[test]
fn python_rule_chain_priority_order() {
    let kinds: Vec<TokenKind> = py().rules().iter().map(Rule::kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Comment,
            TokenKind::Decorator,
            TokenKind::String,
            TokenKind::String,
            TokenKind::Number,
            TokenKind::Keyword,
            TokenKind::Builtin,
            TokenKind::Function,
        ]
    );
}

#[test]
fn custom_rules_are_tried_inside_words() {
    let tk = Tokenizer::new("#", vec![Rule::new(r"\d+", TokenKind::Number).unwrap()]).unwrap();
    assert_eq!(
        tk.tokenize_line("x12 = y3z"),
        vec![
            Token::new("x", TokenKind::Default),
            Token::new("12", TokenKind::Number),
            Token::new(" = ", TokenKind::Default),
            Token::new("y", TokenKind::Default),
            Token::new("3", TokenKind::Number),
            Token::new("z", TokenKind::Default),
        ]
    );
}

#[test]
fn unclaimed_runs_split_between_word_and_punctuation() {
    let tk = Tokenizer::new("#", vec![]).unwrap();
    assert_eq!(
        tk.tokenize_line("a_b.c()"),
        vec![
            Token::new("a_b", TokenKind::Default),
            Token::new(".", TokenKind::Default),
            Token::new("c", TokenKind::Default),
            Token::new("()", TokenKind::Default),
        ]
    );
}
