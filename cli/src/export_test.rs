use canvas::framebuffer::Color;

use super::*;

#[test]
fn rows_are_flipped_and_swizzled() {
    let mut fb = Framebuffer::new(2, 2).unwrap();
    fb.put_pixel(0, 0, Color::rgba(1, 2, 3, 0));
    fb.put_pixel(1, 1, Color::rgba(4, 5, 6, 7));

    let rgba = to_rgba(&fb);
    assert_eq!(rgba.len(), 16);
    // Top-left of the image is framebuffer (0, 1).
    assert_eq!(&rgba[0..4], &[0, 0, 0, 255]);
    assert_eq!(&rgba[4..8], &[4, 5, 6, 255]);
    // Bottom-left is framebuffer (0, 0).
    assert_eq!(&rgba[8..12], &[1, 2, 3, 255]);
}

#[test]
fn row_padding_is_dropped() {
    let fb = Framebuffer::with_pitch(3, 2, 20).unwrap();
    assert_eq!(to_rgba(&fb).len(), 3 * 2 * 4);
}

#[test]
fn empty_framebuffer_is_refused() {
    let fb = Framebuffer::new(0, 4).unwrap();
    let err = write_png(&fb, Path::new("unused.png")).unwrap_err();
    assert!(matches!(err, ExportError::Empty { width: 0, height: 4 }));
}

#[test]
fn png_round_trips_through_disk() {
    let mut fb = Framebuffer::new(3, 2).unwrap();
    fb.put_pixel(2, 1, Color::rgb(9, 8, 7));
    let path = std::env::temp_dir().join(format!("caveman-export-{}.png", std::process::id()));

    write_png(&fb, &path).unwrap();
    let decoded = image::open(&path).unwrap().to_rgba8();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(decoded.dimensions(), (3, 2));
    assert_eq!(decoded.get_pixel(2, 0).0, [9, 8, 7, 255]);
}
