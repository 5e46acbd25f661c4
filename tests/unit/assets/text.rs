use super::*;

fn blocks_engine() -> TextLayoutEngine {
    TextLayoutEngine::new(LoadedFont::blocks()).unwrap()
}

#[test]
fn block_advance_is_fixed_per_char() {
    let mut engine = blocks_engine();
    assert!(engine.family_name().is_none());
    let w = engine.measure("abcd", 10.0).unwrap();
    assert!((w - 4.0 * 10.0 * BLOCK_ADVANCE_EM).abs() < 1e-4);
    assert_eq!(engine.measure("", 10.0).unwrap(), 0.0);
}

#[test]
fn block_layout_marks_whitespace_without_ink() {
    let mut engine = blocks_engine();
    let layout = engine
        .layout_line("a b", 12.0, Rgba8::WHITE.into())
        .unwrap();
    let TextLayout::Blocks { ink, brush, .. } = &layout else {
        panic!("expected block layout");
    };
    assert_eq!(ink, &vec![true, false, true]);
    assert_eq!(brush.a, 255);
}

#[test]
fn rejects_non_positive_sizes() {
    let mut engine = blocks_engine();
    assert!(engine.measure("x", 0.0).is_err());
    assert!(engine.measure("x", f32::NAN).is_err());
}

#[test]
fn advance_grows_with_text_for_any_resolved_font() {
    let font = LoadedFont::load(crate::assets::font::FontRole::Monospace, None);
    let mut engine = TextLayoutEngine::new(font).unwrap();
    let short = engine.measure("MM", 14.0).unwrap();
    let long = engine.measure("MMMM", 14.0).unwrap();
    assert!(short > 0.0);
    assert!(long > short);
}
