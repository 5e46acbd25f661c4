use super::*;

#[test]
fn default_constants() {
    let s = CodeStyle::default();
    assert_eq!(s.line_height(), 21);
    s.validate().unwrap();
}

#[test]
fn dimensions_follow_the_formula() {
    let s = CodeStyle::default();
    let l = CodeLayout::compute(&s, 10, 8, 3, false);
    assert_eq!(l.width, 10 * 8 + 50 + 2 * 15 + 2 * 30);
    assert_eq!(l.height, 3 * 21 + 2 * 30);
    assert_eq!(l.title_y, None);
    assert_eq!(l.content_top, 30);
    assert_eq!(l.number_x, 35);
    assert_eq!(l.text_x, 95);
    assert_eq!(l.line_y(2), 30 + 42);
}

#[test]
fn title_adds_one_row_and_gap() {
    let s = CodeStyle::default();
    let plain = CodeLayout::compute(&s, 4, 8, 2, false);
    let titled = CodeLayout::compute(&s, 4, 8, 2, true);
    assert_eq!(titled.height, plain.height + 21 + 10);
    assert_eq!(titled.title_y, Some(30));
    assert_eq!(titled.content_top, 30 + 31);
    assert_eq!(titled.width, plain.width);
}

#[test]
fn width_is_monotonic_and_height_linear() {
    let s = CodeStyle::default();
    let mut last = 0;
    for chars in 0..50 {
        let w = CodeLayout::compute(&s, chars, 8, 1, false).width;
        assert!(w >= last);
        last = w;
    }
    let h1 = CodeLayout::compute(&s, 1, 8, 1, false).height;
    let h2 = CodeLayout::compute(&s, 1, 8, 2, false).height;
    let h7 = CodeLayout::compute(&s, 1, 8, 7, false).height;
    assert_eq!(h7 - h1, 6 * (h2 - h1));
}

#[test]
fn invalid_styles_are_rejected() {
    let bad = [
        CodeStyle {
            font_size: 0,
            ..CodeStyle::default()
        },
        CodeStyle {
            line_height_ratio: f32::NAN,
            ..CodeStyle::default()
        },
        CodeStyle {
            supersample: 0,
            ..CodeStyle::default()
        },
        CodeStyle {
            font_size: 1,
            line_height_ratio: 0.5,
            ..CodeStyle::default()
        },
    ];
    for s in bad {
        assert!(s.validate().is_err(), "{s:?}");
    }
}

#[test]
fn style_json_fills_missing_fields() {
    let s: CodeStyle = serde_json::from_str(r#"{"font_size": 16}"#).unwrap();
    assert_eq!(s.font_size, 16);
    assert_eq!(s.padding, 30);
    assert_eq!(s.line_height(), 24);
}

#[test]
fn gutter_spans_content_below_title() {
    let style = CodeStyle::default();
    let l = CodeLayout::compute(&style, 10, 8, 4, true);
    let g = l.gutter_rect();
    assert_eq!((g.x0, g.y0), (30.0, 30.0 + 21.0 + 10.0));
    assert_eq!((g.width(), g.height()), (50.0, 4.0 * 21.0));
}
