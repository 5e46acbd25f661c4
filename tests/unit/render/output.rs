use super::*;

fn tmp_dir(name: &str) -> std::path::PathBuf {
    let dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("target")
        .join("unit-output")
        .join(name);
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn format_follows_extension() {
    assert_eq!(
        StillFormat::from_path(Path::new("a/b.PNG")).unwrap(),
        StillFormat::Png
    );
    assert_eq!(
        StillFormat::from_path(Path::new("x.jpeg")).unwrap(),
        StillFormat::Jpeg
    );
    assert!(StillFormat::from_path(Path::new("x.gif")).is_err());
    assert!(StillFormat::from_path(Path::new("noext")).is_err());
}

#[test]
fn fit_geometry_centers_within_fill() {
    let frame = FrameSize::FULL_HD;
    let g = fit_geometry(960, 540, frame, 0.5).unwrap();
    assert_eq!((g.width, g.height), (960, 540));
    assert_eq!((g.x, g.y), (480, 270));

    let wide = fit_geometry(3840, 270, frame, 0.5).unwrap();
    assert_eq!((wide.width, wide.height), (960, 67));
    assert_eq!((wide.x, wide.y), (480, 506));

    let g = fit_geometry(1000, 1000, frame, 0.9).unwrap();
    assert!(g.height <= 972 && g.height >= 971);
    assert_eq!(g.width, g.height);
    assert_eq!(g.x, (1920 - g.width) / 2);
}

#[test]
fn fit_geometry_rejects_bad_inputs() {
    assert!(fit_geometry(0, 10, FrameSize::FULL_HD, 0.9).is_err());
    assert!(fit_geometry(10, 10, FrameSize::FULL_HD, 0.0).is_err());
    assert!(fit_geometry(10, 10, FrameSize::FULL_HD, 1.5).is_err());
}

#[test]
fn fit_image_fills_background_around_content() {
    let img = image::RgbaImage::from_pixel(10, 10, image::Rgba([255, 0, 0, 255]));
    let frame = FrameSize::new(40, 20).unwrap();
    let out = fit_image(&img, frame, Rgba8::rgb(0x2d, 0x2d, 0x2d), 0.5).unwrap();
    assert_eq!(out.dimensions(), (40, 20));
    assert_eq!(out.get_pixel(0, 0).0, [0x2d, 0x2d, 0x2d, 255]);
    assert_eq!(out.get_pixel(20, 10).0, [255, 0, 0, 255]);
}

#[test]
fn downsample_produces_target_size() {
    let f = FrameRGBA::new(8, 8, vec![255; 8 * 8 * 4], true).unwrap();
    let d = downsample(&f, 2, 2, Rgba8::BLACK).unwrap();
    assert_eq!((d.width, d.height, d.data.len()), (2, 2, 16));
    assert!(!d.premultiplied);
    assert!(downsample(&f, 0, 2, Rgba8::BLACK).is_err());
}

#[test]
fn png_and_jpeg_files_decode_back() {
    let dir = tmp_dir("save");
    let f = FrameRGBA::new(4, 2, [10, 20, 30, 255].repeat(8), false).unwrap();

    let png = dir.join("out.png");
    save_frame(&f, &png, Rgba8::BLACK).unwrap();
    let back = load_image(&png).unwrap();
    assert_eq!(back.dimensions(), (4, 2));
    assert_eq!(back.get_pixel(3, 1).0, [10, 20, 30, 255]);

    let jpg = dir.join("nested/out.jpg");
    save_frame(&f, &jpg, Rgba8::BLACK).unwrap();
    assert_eq!(load_image(&jpg).unwrap().dimensions(), (4, 2));
}
