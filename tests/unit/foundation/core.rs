use super::*;

#[test]
fn u16_samples_widen_and_narrow() {
    assert_eq!(<u16 as Sample>::from_u8(0), 0);
    assert_eq!(<u16 as Sample>::from_u8(255), u16::MAX);
    assert_eq!(<u16 as Sample>::from_u8(128), 128 * 257);
    assert_eq!(u16::MAX.to_u8(), 255);
    assert_eq!((128u16 * 257).to_u8(), 128);
    assert_eq!(0u16.to_u8(), 0);
}

#[test]
fn background_default_is_opaque_white() {
    let bg = Background::default();
    assert_eq!(bg.samples(), &[255, 255, 255, 255]);
    assert_eq!(bg.channels(), 4);
}

#[test]
fn background_truncates_to_frame_channels() {
    let bg = Background::rgba(10, 20, 30, 40);
    assert_eq!(bg.truncated::<u8>(1).unwrap(), vec![10]);
    assert_eq!(bg.truncated::<u8>(3).unwrap(), vec![10, 20, 30]);
    assert_eq!(
        bg.truncated::<u16>(2).unwrap(),
        vec![10 * 257, 20 * 257]
    );
}

#[test]
fn background_with_too_few_channels_fails() {
    let bg = Background::new(&[0, 0, 0]).unwrap();
    let err = bg.truncated::<u8>(4).unwrap_err();
    assert!(matches!(err, ReelError::Configuration(_)));
}

#[test]
fn background_rejects_bad_channel_counts() {
    assert!(Background::new(&[]).is_err());
    assert!(Background::new(&[1, 2, 3, 4, 5]).is_err());
}

#[test]
fn background_parses_hex_and_lists() {
    assert_eq!(
        "#ff0080".parse::<Background>().unwrap().samples(),
        &[255, 0, 128, 255]
    );
    assert_eq!(
        "#01020304".parse::<Background>().unwrap().samples(),
        &[1, 2, 3, 4]
    );
    assert_eq!(
        "#f00".parse::<Background>().unwrap().samples(),
        &[255, 0, 0, 255]
    );
    assert_eq!(
        "0, 128".parse::<Background>().unwrap().samples(),
        &[0, 128]
    );
    assert!("#12345".parse::<Background>().is_err());
    assert!("300,0,0".parse::<Background>().is_err());
}

#[test]
fn background_serde_accepts_hex_and_arrays() {
    let bg: Background = serde_json::from_str("\"#000000\"").unwrap();
    assert_eq!(bg.samples(), &[0, 0, 0, 255]);

    let bg: Background = serde_json::from_str("[7, 8, 9]").unwrap();
    assert_eq!(bg.samples(), &[7, 8, 9]);
    assert_eq!(serde_json::to_string(&bg).unwrap(), "[7,8,9]");

    assert!(serde_json::from_str::<Background>("[]").is_err());
}
