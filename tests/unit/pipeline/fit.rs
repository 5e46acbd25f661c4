use super::*;

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target/unit-output/fit")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn defaults_match_video_frame() {
    let opts = FitOpts::default();
    assert_eq!(opts.size, FrameSize::FULL_HD);
    assert_eq!(opts.background.to_hex(), "#2d2d2d");
    assert_eq!(opts.fill, 0.9);
}

#[test]
fn lists_only_png_files_sorted() {
    let dir = scratch("list");
    for name in ["b.png", "a.png", "notes.txt", "c.jpg"] {
        std::fs::write(dir.join(name), b"x").unwrap();
    }
    std::fs::create_dir_all(dir.join("sub.png")).unwrap();
    let found = list_pngs(&dir).unwrap();
    assert_eq!(found, vec![dir.join("a.png"), dir.join("b.png")]);
}

#[test]
fn fits_directory_and_keeps_going_after_bad_files() {
    let root = scratch("dir");
    let in_dir = root.join("in");
    let out_dir = root.join("out");
    std::fs::create_dir_all(&in_dir).unwrap();

    let red = image::RgbaImage::from_pixel(100, 50, image::Rgba([255, 0, 0, 255]));
    red.save(in_dir.join("wide.png")).unwrap();
    std::fs::write(in_dir.join("broken.png"), b"not a png").unwrap();

    let opts = FitOpts {
        size: FrameSize::new(200, 200).unwrap(),
        background: Rgba8::rgb(0, 0, 255),
        fill: 0.5,
    };
    let report = fit_directory(&in_dir, &out_dir, &opts).unwrap();
    assert_eq!(report.succeeded(), ["wide.png"]);
    assert_eq!(report.failed()[0].0, "broken.png");

    let out = image::open(out_dir.join("wide.png")).unwrap().to_rgba8();
    assert_eq!(out.dimensions(), (200, 200));
    // 100x50 scaled by 2 * 0.5 stays 100x50, centered at (50, 75).
    assert_eq!(out.get_pixel(100, 100).0, [255, 0, 0, 255]);
    assert_eq!(out.get_pixel(10, 10).0, [0, 0, 255, 255]);
    assert_eq!(out.get_pixel(100, 60).0, [0, 0, 255, 255]);
}

#[test]
fn same_directory_is_rejected() {
    let dir = scratch("same");
    assert!(fit_directory(&dir, &dir, &FitOpts::default()).is_err());
}
