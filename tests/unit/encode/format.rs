use super::*;

#[test]
fn extension_selects_format() {
    assert_eq!(
        OutputFormat::from_path(Path::new("out/anim.gif")).unwrap(),
        OutputFormat::Gif
    );
    assert_eq!(
        OutputFormat::from_path(Path::new("clip.MP4")).unwrap(),
        OutputFormat::Video(VideoContainer::Mp4)
    );
    assert_eq!(
        OutputFormat::from_extension("webm").unwrap(),
        OutputFormat::Video(VideoContainer::Webm)
    );
}

#[test]
fn unknown_or_missing_extension_is_an_encode_error() {
    let err = OutputFormat::from_path(Path::new("anim.bmp")).unwrap_err();
    assert!(matches!(err, ReelError::Encode(_)));
    let err = OutputFormat::from_path(Path::new("anim")).unwrap_err();
    assert!(matches!(err, ReelError::Encode(_)));
}

#[test]
fn only_gif_is_timed_by_duration() {
    assert!(OutputFormat::Gif.uses_frame_duration());
    assert!(!OutputFormat::Video(VideoContainer::Mkv).uses_frame_duration());
}

#[test]
fn containers_know_muxer_and_codec() {
    assert_eq!(VideoContainer::Mkv.muxer(), "matroska");
    assert_eq!(VideoContainer::Mp4.default_codec(), "libx264");
    assert_eq!(VideoContainer::Webm.default_codec(), "libvpx-vp9");
}

#[test]
fn stream_target_reports_its_format() {
    let mut buf = Vec::new();
    let target = OutputTarget::Stream {
        writer: &mut buf,
        format: OutputFormat::Gif,
    };
    assert_eq!(target.format().unwrap(), OutputFormat::Gif);
    assert!(format!("{target:?}").contains("Gif"));
}
