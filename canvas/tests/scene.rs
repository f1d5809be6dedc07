//! End-to-end: author a scene, drive the session through a few ticks of input,
//! and check the pixels that come out.

use canvas::config::SessionConfig;
use canvas::engine::{Action, Session};
use canvas::framebuffer::{Color, Framebuffer};
use canvas::input::InteractionMode;
use canvas::viewport::{Line, Point, Rect};

const RED: Color = Color::rgb(255, 0, 0);
const GREEN: Color = Color::rgb(0, 255, 0);

fn count(fb: &Framebuffer, color: Color) -> usize {
    let bgra = color.to_bgra();
    (0..fb.height()).map(|y| fb.row(y).chunks_exact(4).filter(|px| **px == bgra).count()).sum()
}

#[test]
fn rectangle_lands_on_expected_pixels() {
    let mut session = Session::new(SessionConfig { show_status: false, ..SessionConfig::default() }).unwrap();
    session.add_rectangle(Rect::new(-0.5, -0.5, 0.4, 0.4), RED).unwrap();

    let mut fb = Framebuffer::new(100, 100).unwrap();
    assert!(session.tick(&mut fb, Point::default()));

    for y in 0..100 {
        for x in 0..100 {
            let inside = (25..45).contains(&x) && (25..45).contains(&y);
            let expected = if inside { RED } else { Color::BLACK };
            assert_eq!(fb.pixel(x, y), Some(expected), "pixel ({x}, {y})");
        }
    }
}

#[test]
fn pick_pan_zoom_session() {
    let mut session = Session::new(SessionConfig::default()).unwrap();
    session.add_rectangle(Rect::new(-0.5, -0.5, 0.4, 0.4), RED).unwrap();
    session.add_line(Line::new(Point::new(-1.0, 0.5), Point::new(1.0, 0.5)), GREEN).unwrap();

    let mut fb = Framebuffer::with_pitch(160, 100, 160 * 4 + 16).unwrap();
    assert!(session.tick(&mut fb, Point::default()));
    let green_before = count(&fb, GREEN);
    assert!(green_before > 0);

    // Select the line: 3 px above it, inside the pick radius.
    session.request_pick();
    let actions = session.update(160, 100, Point::new(80.0, 78.0));
    assert!(actions.contains(&Action::SelectionChanged(Some(1))));
    assert!(session.tick(&mut fb, Point::new(80.0, 78.0)));

    // Drag the scene up 30 px: the line (row 75) leaves the window.
    session.begin_pan(Point::new(80.0, 50.0));
    assert!(session.tick(&mut fb, Point::new(80.0, 80.0)));
    session.end_interaction();
    assert_eq!(session.mode(), InteractionMode::Default);
    assert!(session.tick(&mut fb, Point::new(80.0, 80.0)));
    assert_eq!(count(&fb, GREEN), 0);

    // Zoom out until the line is visible again.
    session.begin_zoom(Point::new(0.0, 50.0));
    session.tick(&mut fb, Point::new(0.0, 0.0));
    session.end_interaction();
    session.tick(&mut fb, Point::new(0.0, 0.0));
    assert!(session.viewport().size > 2.0);
    assert!(count(&fb, GREEN) > 0);

    // Selection survives the viewport changes.
    assert_eq!(session.selection(), Some(1));
}
