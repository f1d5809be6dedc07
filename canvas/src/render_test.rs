use super::*;

const RED: Color = Color::rgb(255, 0, 0);

struct Fixture {
    store: ShapeStore,
    viewport: Viewport,
    ui: UiState,
    mode: InteractionMode,
    font: Font,
    config: SessionConfig,
}

impl Fixture {
    fn new() -> Self {
        Self {
            store: ShapeStore::new(16),
            viewport: Viewport::default(),
            ui: UiState::default(),
            mode: InteractionMode::Default,
            font: Font::builtin().unwrap(),
            config: SessionConfig { show_status: false, ..SessionConfig::default() },
        }
    }

    fn scene(&self) -> Scene<'_> {
        Scene {
            store: &self.store,
            viewport: &self.viewport,
            ui: &self.ui,
            mode: &self.mode,
            font: &self.font,
            config: &self.config,
        }
    }

    fn draw(&self, width: u32, height: u32) -> Framebuffer {
        let mut fb = Framebuffer::new(width, height).unwrap();
        draw(&mut fb, &self.scene());
        fb
    }
}

// =============================================================
// Shapes
// =============================================================

#[test]
fn background_fills_every_pixel() {
    let mut f = Fixture::new();
    f.config.background = Color::rgb(10, 20, 30);
    let fb = f.draw(8, 6);
    assert!(fb.as_bytes().chunks_exact(4).all(|px| px == [30, 20, 10, 255]));
}

#[test]
fn rectangle_maps_through_viewport() {
    let mut f = Fixture::new();
    f.store.add_rectangle(Rect::new(-0.5, -0.5, 0.4, 0.4), RED).unwrap();
    let fb = f.draw(100, 100);

    assert_eq!(fb.pixel(25, 25), Some(RED));
    assert_eq!(fb.pixel(44, 44), Some(RED));
    assert_eq!(fb.pixel(45, 45), Some(Color::BLACK));
    assert_eq!(fb.pixel(24, 30), Some(Color::BLACK));
    let filled = (0..100)
        .flat_map(|y| (0..100).map(move |x| (x, y)))
        .filter(|&(x, y)| fb.pixel(x, y) == Some(RED))
        .count();
    assert_eq!(filled, 400);
}

#[test]
fn line_maps_through_viewport() {
    let mut f = Fixture::new();
    f.store.add_line(Line::new(Point::new(-1.0, 0.0), Point::new(1.0, 0.0)), RED).unwrap();
    let fb = f.draw(100, 100);
    assert_eq!(fb.pixel(0, 50), Some(RED));
    assert_eq!(fb.pixel(99, 50), Some(RED));
    assert_eq!(fb.pixel(50, 49), Some(Color::BLACK));
}

#[test]
fn later_shapes_draw_over_earlier_ones() {
    let mut f = Fixture::new();
    f.store.add_rectangle(Rect::new(-1.0, -1.0, 2.0, 2.0), RED).unwrap();
    f.store.add_rectangle(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE).unwrap();
    let fb = f.draw(10, 10);
    assert_eq!(fb.pixel(2, 2), Some(RED));
    assert_eq!(fb.pixel(7, 7), Some(Color::WHITE));
}

#[test]
fn shapes_off_screen_are_clipped_away() {
    let mut f = Fixture::new();
    f.store.add_rectangle(Rect::new(5.0, 5.0, 1.0, 1.0), RED).unwrap();
    f.store.add_line(Line::new(Point::new(-9.0, 3.0), Point::new(9.0, 3.0)), RED).unwrap();
    let fb = f.draw(20, 20);
    assert!(fb.as_bytes().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn empty_framebuffer_is_left_alone() {
    let mut f = Fixture::new();
    f.store.add_rectangle(Rect::new(-1.0, -1.0, 2.0, 2.0), RED).unwrap();
    f.config.show_status = true;
    let mut fb = Framebuffer::default();
    draw(&mut fb, &f.scene());
    assert!(fb.as_bytes().is_empty());
}

// =============================================================
// Selection
// =============================================================

#[test]
fn selected_rectangle_gets_outline_and_corner_markers() {
    let mut f = Fixture::new();
    f.store.add_rectangle(Rect::new(-0.5, -0.5, 0.4, 0.4), RED).unwrap();
    f.ui.selected = Some(0);
    let fb = f.draw(100, 100);
    let sel = Some(f.config.selection_color);

    assert_eq!(fb.pixel(35, 25), sel);
    assert_eq!(fb.pixel(45, 35), sel);
    assert_eq!(fb.pixel(46, 46), sel);
    assert_eq!(fb.pixel(35, 35), Some(RED));
}

#[test]
fn selected_line_gets_endpoint_markers() {
    let mut f = Fixture::new();
    f.store.add_line(Line::new(Point::new(-1.0, -1.0), Point::new(1.0, 1.0)), RED).unwrap();
    f.ui.selected = Some(0);
    let fb = f.draw(100, 100);
    let sel = Some(f.config.selection_color);

    assert_eq!(fb.pixel(1, 0), sel);
    assert_eq!(fb.pixel(98, 98), sel);
    assert_eq!(fb.pixel(3, 0), Some(Color::BLACK));
    assert_eq!(fb.pixel(50, 50), Some(RED));
}

#[test]
fn stale_selection_index_draws_nothing_extra() {
    let mut f = Fixture::new();
    f.ui.selected = Some(3);
    let fb = f.draw(10, 10);
    assert!(fb.as_bytes().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}

// =============================================================
// Status text
// =============================================================

#[test]
fn status_lines_describe_mode_selection_and_view() {
    let mut f = Fixture::new();
    assert_eq!(
        status_lines(&f.scene()),
        ["DEFAULT  shapes: 0  selected: none".to_owned(), "view x:-1.000 y:-1.000 size:2.000".to_owned()]
    );

    f.store.add_line(Line::default(), RED).unwrap();
    f.ui.selected = Some(0);
    f.mode = InteractionMode::Zooming { last_y: 0.0 };
    f.viewport = Viewport::new(Point::new(0.5, -2.25), 4.0);
    assert_eq!(
        status_lines(&f.scene()),
        ["ZOOM  shapes: 1  selected: #0".to_owned(), "view x:0.500 y:-2.250 size:4.000".to_owned()]
    );
}

#[test]
fn status_text_lands_near_the_top() {
    let mut f = Fixture::new();
    f.config.show_status = true;
    let fb = f.draw(200, 100);

    let lit = |rows: std::ops::Range<u32>| {
        rows.flat_map(|y| (0..200).map(move |x| (x, y)))
            .any(|(x, y)| fb.pixel(x, y).is_some_and(|c| c.r > 200))
    };
    assert!(lit(76..94));
    assert!(!lit(0..76));
}

#[test]
fn hidden_status_draws_no_text() {
    let f = Fixture::new();
    let fb = f.draw(200, 100);
    assert!(fb.as_bytes().chunks_exact(4).all(|px| px == [0, 0, 0, 255]));
}
