use super::*;

#[test]
fn new_validates_sample_count() {
    assert!(Frame::<u8>::new(2, 2, 3, vec![0; 12]).is_ok());
    assert!(Frame::<u8>::new(2, 2, 3, vec![0; 11]).is_err());
    assert!(Frame::<u8>::new(2, 2, 0, vec![]).is_err());
    assert!(Frame::<u8>::new(1, 1, 5, vec![0; 5]).is_err());
}

#[test]
fn filled_repeats_fill_per_pixel() {
    let f = Frame::<u8>::filled(3, 2, &[1, 2]).unwrap();
    assert_eq!(f.channels(), 2);
    assert_eq!(f.data().len(), 12);
    assert_eq!(f.pixel(2, 1), Some(&[1u8, 2][..]));
    assert_eq!(f.pixel(3, 0), None);
}

#[test]
fn rows_and_pixels_are_row_major() {
    let data: Vec<u8> = (0..6).collect();
    let f = Frame::new(3, 2, 1, data).unwrap();
    assert_eq!(f.row(1), &[3, 4, 5]);
    assert_eq!(f.pixel(1, 1), Some(&[4u8][..]));
}

#[test]
fn to_rgba8_expands_each_layout() {
    let gray = Frame::new(1, 1, 1, vec![9u8]).unwrap();
    assert_eq!(gray.to_rgba8(), vec![9, 9, 9, 255]);

    let gray_alpha = Frame::new(1, 1, 2, vec![9u8, 7]).unwrap();
    assert_eq!(gray_alpha.to_rgba8(), vec![9, 9, 9, 7]);

    let rgb = Frame::new(1, 1, 3, vec![1u8, 2, 3]).unwrap();
    assert_eq!(rgb.to_rgba8(), vec![1, 2, 3, 255]);

    let rgba = Frame::new(1, 1, 4, vec![1u8, 2, 3, 4]).unwrap();
    assert_eq!(rgba.to_rgba8(), vec![1, 2, 3, 4]);
}

#[test]
fn u16_frames_narrow_to_u8() {
    let f = Frame::<u16>::new(2, 1, 1, vec![0, u16::MAX]).unwrap();
    let narrow = f.to_u8();
    assert_eq!(narrow.data(), &[0, 255]);
    assert_eq!(narrow.extent(), f.extent());
}
