use super::*;

fn solid(width: u32, height: u32, px: &[u8]) -> Frame<u8> {
    Frame::filled(width, height, px).unwrap()
}

fn ext(width: u32, height: u32) -> Extent {
    Extent { width, height }
}

#[test]
fn max_extent_takes_axes_independently() {
    let frames = vec![solid(20, 10, &[0]), solid(5, 15, &[0])];
    assert_eq!(max_extent(&frames).unwrap(), ext(20, 15));
}

#[test]
fn empty_input_is_rejected() {
    let frames: Vec<Frame<u8>> = Vec::new();
    let err = pad_frames(&frames, &Background::default(), Alignment::default()).unwrap_err();
    assert!(matches!(err, ReelError::EmptyInput(_)));
}

#[test]
fn every_output_has_the_max_extent() {
    let frames = vec![
        solid(3, 7, &[1, 1, 1]),
        solid(9, 2, &[2, 2, 2]),
        solid(4, 4, &[3, 3, 3]),
    ];
    let out = pad_frames(&frames, &Background::default(), Alignment::default()).unwrap();
    assert_eq!(out.len(), 3);
    for f in &out {
        assert_eq!(f.extent(), ext(9, 7));
    }
    assert_eq!(out[2].pixel(0, 0), Some(&[3u8, 3, 3][..]));
}

#[test]
fn two_frames_scenario_pads_bottom_rows_with_white() {
    let black = [0u8, 0, 0, 255];
    let frames = vec![solid(20, 10, &black), solid(20, 15, &black)];
    let out = pad_frames(&frames, &Background::white(), Alignment::default()).unwrap();

    assert_eq!(out[0].extent(), ext(20, 15));
    assert_eq!(out[1].extent(), ext(20, 15));
    for y in 0..10 {
        for x in 0..20 {
            assert_eq!(out[0].pixel(x, y), Some(&black[..]));
        }
    }
    for y in 10..15 {
        for x in 0..20 {
            assert_eq!(out[0].pixel(x, y), Some(&[255u8, 255, 255, 255][..]));
        }
    }
    assert_eq!(out[1], frames[1]);
}

#[test]
fn same_size_frames_are_returned_unchanged() {
    let frames = vec![
        Frame::new(2, 2, 1, vec![1u8, 2, 3, 4]).unwrap(),
        Frame::new(2, 2, 1, vec![5u8, 6, 7, 8]).unwrap(),
    ];
    let out = pad_frames(&frames, &Background::default(), Alignment::default()).unwrap();
    assert_eq!(out, frames);
}

#[test]
fn single_frame_is_unchanged() {
    let frame = solid(5, 5, &[9, 8, 7]);
    let out = pad_frames(
        std::slice::from_ref(&frame),
        &Background::default(),
        Alignment::default(),
    )
    .unwrap();
    assert_eq!(out, vec![frame]);
}

#[test]
fn alignment_offsets_cover_all_corners() {
    let f = ext(2, 3);
    let c = ext(10, 8);
    assert_eq!(Alignment::TOP_LEFT.offsets(f, c), (0, 0));
    assert_eq!(
        Alignment {
            bottom: true,
            right: false
        }
        .offsets(f, c),
        (0, 5)
    );
    assert_eq!(
        Alignment {
            bottom: false,
            right: true
        }
        .offsets(f, c),
        (8, 0)
    );
    assert_eq!(
        Alignment {
            bottom: true,
            right: true
        }
        .offsets(f, c),
        (8, 5)
    );
}

#[test]
fn oversized_axis_gets_zero_offset() {
    let align = Alignment {
        bottom: true,
        right: true,
    };
    assert_eq!(align.offsets(ext(2, 5), ext(2, 3)), (0, 0));
    assert_eq!(align.offsets(ext(4, 1), ext(2, 3)), (0, 2));
}

#[test]
fn bottom_right_alignment_places_frame_in_last_rows_and_columns() {
    let small = Frame::new(2, 2, 1, vec![1u8, 2, 3, 4]).unwrap();
    let big = solid(4, 3, &[0]);
    let align = Alignment {
        bottom: true,
        right: true,
    };
    let out = pad_frames(&[small, big], &Background::new(&[200]).unwrap(), align).unwrap();
    let padded = &out[0];

    assert_eq!(padded.row(0), &[200, 200, 200, 200]);
    assert_eq!(padded.row(1), &[200, 200, 1, 2]);
    assert_eq!(padded.row(2), &[200, 200, 3, 4]);
}

#[test]
fn uncovered_pixels_equal_truncated_background() {
    let frames = vec![solid(1, 1, &[0, 0, 0]), solid(3, 3, &[0, 0, 0])];
    let bg = Background::rgba(10, 20, 30, 40);
    let out = pad_frames(&frames, &bg, Alignment::default()).unwrap();
    for y in 0..3 {
        for x in 0..3 {
            let expected: &[u8] = if (x, y) == (0, 0) { &[0, 0, 0] } else { &[10, 20, 30] };
            assert_eq!(out[0].pixel(x, y), Some(expected));
        }
    }
}

#[test]
fn background_with_too_few_channels_fails_fast() {
    let frames = vec![solid(1, 1, &[0, 0, 0, 0]), solid(2, 2, &[0, 0, 0, 0])];
    let bg = Background::new(&[255, 255, 255]).unwrap();
    let err = pad_frames(&frames, &bg, Alignment::default()).unwrap_err();
    assert!(matches!(err, ReelError::Configuration(_)));
}

#[test]
fn mixed_channel_counts_keep_their_own_channels() {
    let frames = vec![solid(1, 1, &[7]), solid(2, 1, &[1, 2, 3, 4])];
    let out = pad_frames(&frames, &Background::default(), Alignment::default()).unwrap();
    assert_eq!(out[0].channels(), 1);
    assert_eq!(out[0].data(), &[7, 255]);
    assert_eq!(out[1].channels(), 4);
}

#[test]
fn sixteen_bit_frames_keep_sample_type() {
    let frames = vec![
        Frame::<u16>::new(1, 1, 1, vec![1000]).unwrap(),
        Frame::<u16>::new(1, 2, 1, vec![1, 2]).unwrap(),
    ];
    let out = pad_frames(&frames, &Background::new(&[255]).unwrap(), Alignment::default())
        .unwrap();
    assert_eq!(out[0].data(), &[1000, u16::MAX]);
}

#[test]
fn pad_frame_rejects_canvas_smaller_than_frame() {
    let frame = solid(4, 4, &[0]);
    assert!(pad_frame(&frame, ext(3, 4), &Background::default(), Alignment::default()).is_err());
}
