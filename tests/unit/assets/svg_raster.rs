use super::*;

const RED_SQUARE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="4" height="3">
  <rect x="0" y="0" width="4" height="3" fill="#ff0000"/>
</svg>"##;

#[test]
fn rasterize_uses_svg_size() {
    let drawing = Drawing::from_svg_str(RED_SQUARE).unwrap();
    let frame = drawing.rasterize().unwrap();
    assert_eq!(frame.width(), 4);
    assert_eq!(frame.height(), 3);
    assert_eq!(frame.channels(), 4);
    assert_eq!(frame.pixel(0, 0), Some(&[255u8, 0, 0, 255][..]));
    assert_eq!(frame.pixel(3, 2), Some(&[255u8, 0, 0, 255][..]));
}

#[test]
fn scale_multiplies_raster_extent() {
    let drawing = Drawing::from_svg_str(RED_SQUARE)
        .unwrap()
        .with_scale(2.5)
        .unwrap();
    assert_eq!(
        drawing.raster_extent().unwrap(),
        Extent {
            width: 10,
            height: 8
        }
    );
    assert!(
        Drawing::from_svg_str(RED_SQUARE)
            .unwrap()
            .with_scale(0.0)
            .is_err()
    );
}

#[test]
fn transparent_areas_stay_transparent() {
    let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="1">
      <rect x="0" y="0" width="1" height="1" fill="blue"/>
    </svg>"#;
    let frame = Drawing::from_svg_str(svg).unwrap().rasterize().unwrap();
    assert_eq!(frame.pixel(0, 0), Some(&[0u8, 0, 255, 255][..]));
    assert_eq!(frame.pixel(1, 0).unwrap()[3], 0);
}

#[test]
fn rasterize_png_has_png_signature() {
    let png = Drawing::from_svg_str(RED_SQUARE)
        .unwrap()
        .rasterize_png()
        .unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
}

#[test]
fn malformed_svg_is_a_decode_error() {
    let err = Drawing::from_svg_data(b"<svg").unwrap_err();
    assert!(matches!(err, ReelError::Decode(_)));
}

#[test]
fn drawings_share_one_font_database() {
    let a = Drawing::from_svg_str(RED_SQUARE).unwrap();
    let b = Drawing::from_svg_str(RED_SQUARE).unwrap();
    assert!(Arc::ptr_eq(a.tree().fontdb(), b.tree().fontdb()));

    let plain = PathBuf::from("target").join("svg_raster_unit").join("plain");
    std::fs::create_dir_all(&plain).unwrap();
    std::fs::write(plain.join("0.svg"), RED_SQUARE).unwrap();
    let c = Drawing::open(&plain.join("0.svg")).unwrap();
    assert!(Arc::ptr_eq(a.tree().fontdb(), c.tree().fontdb()));
}

#[test]
fn directory_fonts_are_loaded_once_per_directory() {
    let dir = PathBuf::from("target").join("svg_raster_unit").join("with_fonts");
    std::fs::create_dir_all(dir.join("fonts")).unwrap();
    std::fs::write(dir.join("fonts").join("broken.ttf"), b"not a font").unwrap();
    std::fs::write(dir.join("0.svg"), RED_SQUARE).unwrap();
    std::fs::write(dir.join("1.svg"), RED_SQUARE).unwrap();

    let first = Drawing::open(&dir.join("0.svg")).unwrap();
    let second = Drawing::open(&dir.join("1.svg")).unwrap();
    assert!(Arc::ptr_eq(first.tree().fontdb(), second.tree().fontdb()));

    let system = Drawing::from_svg_str(RED_SQUARE).unwrap();
    assert!(!Arc::ptr_eq(first.tree().fontdb(), system.tree().fontdb()));
}
