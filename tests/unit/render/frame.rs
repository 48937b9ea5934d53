use super::*;

fn frame(data: Vec<u8>, premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data,
        premultiplied,
    }
}

#[test]
fn straight_conversion_divides_by_alpha() {
    let f = frame(vec![128, 0, 64, 128, 10, 20, 30, 255], true);
    assert_eq!(f.to_straight(), vec![255, 0, 128, 128, 10, 20, 30, 255]);
}

#[test]
fn transparent_and_straight_frames_pass_through() {
    let f = frame(vec![0, 0, 0, 0, 1, 2, 3, 4], true);
    assert_eq!(f.to_straight(), vec![0, 0, 0, 0, 64, 128, 191, 4]);
    let s = frame(vec![9, 9, 9, 9, 1, 2, 3, 4], false);
    assert_eq!(s.to_straight(), s.data);
}

#[test]
fn pixel_lookup_is_bounds_checked() {
    let f = frame(vec![1, 2, 3, 4, 5, 6, 7, 8], false);
    assert_eq!(f.pixel(1, 0), Some([5, 6, 7, 8]));
    assert_eq!(f.pixel(2, 0), None);
    assert_eq!(f.pixel(0, 1), None);
}

#[test]
fn png_round_trips_through_the_image_crate() {
    let path = std::env::temp_dir().join(format!("cardcast-frame-{}.png", std::process::id()));
    let f = frame(vec![255, 0, 0, 255, 0, 0, 255, 255], true);
    f.save_png(&path).unwrap();
    let decoded = image::open(&path).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 255, 255]);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn unwritable_path_is_a_write_error() {
    let path = std::env::temp_dir()
        .join(format!("cardcast-missing-{}", std::process::id()))
        .join("nested")
        .join("x.png");
    let err = frame(vec![0; 8], true).save_png(&path).unwrap_err();
    assert!(matches!(err, CarouselError::Write { .. }), "{err}");
}

#[cfg(unix)]
#[test]
fn small_frame_on_a_full_device_is_a_write_error() {
    // A 4x4 PNG fits entirely in the write buffer, so the error only shows up on flush.
    let f = FrameRGBA {
        width: 4,
        height: 4,
        data: [10, 20, 30, 255].repeat(16),
        premultiplied: true,
    };
    let err = f.save_png(Path::new("/dev/full")).unwrap_err();
    assert!(matches!(err, CarouselError::Write { .. }), "{err}");
}
