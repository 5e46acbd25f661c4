use super::*;

use crate::encode::sink::InMemorySink;
use crate::foundation::color::Rgba8;
use crate::pipeline::manifest::SlideSpec;
use crate::render::slide::SlideKind;

fn slide(kind: SlideKind, title: &str, duration: f64) -> SlideSpec {
    SlideSpec {
        kind,
        title: title.to_owned(),
        subtitle: String::new(),
        description: String::new(),
        color: Rgba8::rgb(255, 107, 107),
        screenshot: None,
        duration,
    }
}

fn renderer() -> SlideRenderer {
    SlideRenderer::new(FrameSize::new(160, 90).unwrap(), LoadedFont::blocks()).unwrap()
}

#[test]
fn frames_are_numbered_across_slides() {
    let manifest = SlideManifest {
        slides: vec![
            slide(SlideKind::Title, "Intro", 0.2),
            slide(SlideKind::Feature, "More", 0.1),
        ],
        audio: None,
    };
    let fps = Fps::whole(10).unwrap();
    let mut sink = InMemorySink::new();
    let n = render_slides(&manifest, &mut renderer(), fps, &mut sink).unwrap();

    assert_eq!(n, 3);
    assert!(sink.is_ended());
    let cfg = sink.config().unwrap();
    assert_eq!((cfg.size.width, cfg.size.height), (160, 90));
    assert_eq!(cfg.fps, fps);
    let idx: Vec<u64> = sink.frames().iter().map(|(i, _)| i.0).collect();
    assert_eq!(idx, vec![0, 1, 2]);
}

#[test]
fn slide_shorter_than_a_frame_is_rejected() {
    let manifest = SlideManifest {
        slides: vec![slide(SlideKind::Demo, "Blink", 0.01)],
        audio: None,
    };
    let mut sink = InMemorySink::new();
    let err = render_slides(&manifest, &mut renderer(), Fps::whole(10).unwrap(), &mut sink);
    assert!(err.is_err());
    assert!(sink.config().is_none());
}

#[test]
fn unreadable_screenshot_is_skipped() {
    let mut s = slide(SlideKind::Demo, "Shot", 0.1);
    s.screenshot = Some("target/unit-output/slides/missing.png".into());
    let manifest = SlideManifest {
        slides: vec![s],
        audio: None,
    };
    let mut sink = InMemorySink::new();
    let n = render_slides(&manifest, &mut renderer(), Fps::whole(10).unwrap(), &mut sink).unwrap();
    assert_eq!(n, 1);
}
