use super::*;

fn px(frame: &FrameRGBA, x: u32, y: u32) -> [u8; 4] {
    let i = ((y * frame.width + x) * 4) as usize;
    [
        frame.data[i],
        frame.data[i + 1],
        frame.data[i + 2],
        frame.data[i + 3],
    ]
}

fn renderer() -> SlideRenderer {
    SlideRenderer::new(FrameSize::new(640, 480).unwrap(), LoadedFont::blocks()).unwrap()
}

fn red_shot() -> image::RgbaImage {
    image::RgbaImage::from_pixel(100, 50, image::Rgba([220, 30, 30, 255]))
}

#[test]
fn gradient_runs_top_to_bottom() {
    let g = gradient(FrameSize::new(4, 100).unwrap());
    assert_eq!(px(&g, 0, 0), [30, 60, 114, 255]);
    assert_eq!(px(&g, 3, 50), [40, 70, 127, 255]);
    assert_eq!(px(&g, 0, 99), [49, 79, 139, 255]);
}

#[test]
fn frame_index_must_be_in_range() {
    let mut r = renderer();
    let slide = r
        .prepare(SlideKind::Demo, "T", "", "", Rgba8::WHITE, None)
        .unwrap();
    assert!(r.render_frame(&slide, 5, 5).is_err());
    assert!(r.render_frame(&slide, 0, 0).is_err());
    let f = r.render_frame(&slide, 0, 5).unwrap();
    assert_eq!((f.width, f.height), (640, 480));
}

#[test]
fn progress_bar_skipped_on_title_slides() {
    let mut r = renderer();
    let demo = r
        .prepare(SlideKind::Demo, "T", "", "", Rgba8::WHITE, None)
        .unwrap();
    let title = r
        .prepare(SlideKind::Title, "T", "", "", Rgba8::WHITE, None)
        .unwrap();
    let probe = (60, 480 - 96);
    let d = r.render_frame(&demo, 50, 100).unwrap();
    let t = r.render_frame(&title, 50, 100).unwrap();
    assert_eq!(px(&d, probe.0, probe.1), [78, 205, 196, 255]);
    assert_ne!(px(&t, probe.0, probe.1), [78, 205, 196, 255]);
    // Past the filled half of the bar only the track shows.
    assert_eq!(px(&d, 340, probe.1), [100, 100, 100, 255]);
}

#[test]
fn screenshot_fades_in_from_black() {
    let mut r = renderer();
    let shot = red_shot();
    let slide = r
        .prepare(SlideKind::Feature, "T", "", "", Rgba8::WHITE, Some(&shot))
        .unwrap();
    let first = r.render_frame(&slide, 0, 90).unwrap();
    let later = r.render_frame(&slide, 45, 90).unwrap();
    assert_eq!(px(&first, 356, 244), [0, 0, 0, 255]);
    assert_eq!(px(&later, 356, 244), [220, 30, 30, 255]);
}
