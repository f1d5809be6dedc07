mod export;
mod pattern;


use std::path::{Path, PathBuf};

use canvas::config::{ConfigError, SessionConfig};
use canvas::engine::{Session, SessionError};
use canvas::framebuffer::{Color, Framebuffer, FramebufferError};
use canvas::glyph::{Font, FontError};
use canvas::scene::{Geometry, Shape, StoreError};
use canvas::viewport::{Line, Point, Rect};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid shapes file: {0}")]
    Shapes(#[from] serde_json::Error),
    #[error("shape {index}: rectangle extent {width}x{height} must be non-negative")]
    NegativeExtent { index: usize, width: f64, height: f64 },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Font(#[from] FontError),
    #[error(transparent)]
    Framebuffer(#[from] FramebufferError),
    #[error(transparent)]
    Export(#[from] export::ExportError),
}

#[derive(Parser, Debug)]
#[command(name = "caveman", about = "Headless driver for the caveman 2D rasterizer")]
struct Cli {
    /// JSON session config; `CAVEMAN_*` environment variables apply on top.
    #[arg(long, env = "CAVEMAN_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a scene, replay gestures through the session, and save the final frame.
    Scene(SceneArgs),
    /// Draw the primitive exercise pattern straight into a framebuffer.
    TestPattern(CanvasArgs),
}

#[derive(Args, Debug)]
struct CanvasArgs {
    #[arg(long, default_value_t = 640)]
    width: u32,
    #[arg(long, default_value_t = 480)]
    height: u32,
    #[arg(long, default_value = "caveman.png")]
    out: PathBuf,
}

#[derive(Args, Debug)]
struct SceneArgs {
    #[command(flatten)]
    canvas: CanvasArgs,

    /// JSON array of shapes to author instead of the demo scene.
    #[arg(long)]
    shapes: Option<PathBuf>,

    /// Drag by `DX,DY` pixels in pan mode. Applied first, in order.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pan: Vec<Point>,

    /// Drag vertically by `DY` pixels in zoom mode. Applied after pans.
    #[arg(long, allow_hyphen_values = true)]
    zoom: Vec<f64>,

    /// Pick at pixel `X,Y` (origin bottom-left). Applied last.
    #[arg(long, value_parser = parse_point, allow_hyphen_values = true)]
    pick: Vec<Point>,
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Scene(args) => run_scene(config, args),
        Command::TestPattern(args) => run_test_pattern(args),
    }
}

fn load_config(path: Option<&Path>) -> Result<SessionConfig, CliError> {
    let Some(path) = path else {
        return Ok(SessionConfig::from_env()?);
    };
    let json = read_file(path)?;
    Ok(SessionConfig::from_json_str(&json)?.with_env_overrides()?)
}

fn read_file(path: &Path) -> Result<String, CliError> {
    std::fs::read_to_string(path).map_err(|source| CliError::Read { path: path.to_path_buf(), source })
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s.split_once(',').ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Point::new(x, y))
}

// =============================================================
// scene
// =============================================================

fn run_scene(config: SessionConfig, args: SceneArgs) -> Result<(), CliError> {
    let mut session = Session::new(config)?;
    let shapes = match &args.shapes {
        Some(path) => parse_shapes(&read_file(path)?)?,
        None => demo_scene(),
    };
    for shape in shapes {
        match shape.geometry {
            Geometry::Rect(rect) => session.add_rectangle(rect, shape.color)?,
            Geometry::Line(line) => session.add_line(line, shape.color)?,
        };
    }

    let mut fb = Framebuffer::new(args.canvas.width, args.canvas.height)?;
    let centre = Point::new(f64::from(fb.width()) * 0.5, f64::from(fb.height()) * 0.5);
    let mut frames = usize::from(session.tick(&mut fb, centre));

    for delta in &args.pan {
        session.begin_pan(centre);
        frames += usize::from(session.tick(&mut fb, centre + *delta));
        session.end_interaction();
        frames += usize::from(session.tick(&mut fb, centre));
    }
    for dy in &args.zoom {
        session.begin_zoom(centre);
        frames += usize::from(session.tick(&mut fb, centre + Point::new(0.0, *dy)));
        session.end_interaction();
        frames += usize::from(session.tick(&mut fb, centre));
    }
    for at in &args.pick {
        session.request_pick();
        frames += usize::from(session.tick(&mut fb, *at));
    }
    // Last frame reflects the final state even when nothing above redrew.
    session.render(&mut fb);

    let viewport = session.viewport();
    tracing::info!(
        frames,
        shapes = session.shapes().len(),
        selected = ?session.selection(),
        view_x = viewport.min.x,
        view_y = viewport.min.y,
        view_size = viewport.size,
        "scene replayed"
    );
    export::write_png(&fb, &args.canvas.out)?;
    println!("{}", args.canvas.out.display());
    Ok(())
}

/// Shapes from a JSON array, rejecting rectangles the store would refuse to draw.
fn parse_shapes(json: &str) -> Result<Vec<Shape>, CliError> {
    let shapes: Vec<Shape> = serde_json::from_str(json)?;
    for (index, shape) in shapes.iter().enumerate() {
        if let Geometry::Rect(rect) = shape.geometry {
            let bad = |v: f64| v.is_nan() || v < 0.0;
            if bad(rect.width) || bad(rect.height) {
                return Err(CliError::NegativeExtent { index, width: rect.width, height: rect.height });
            }
        }
    }
    Ok(shapes)
}

/// A few overlapping rectangles and lines around the default viewport.
fn demo_scene() -> Vec<Shape> {
    let rect = |x, y, w, h, color| Shape { geometry: Geometry::Rect(Rect::new(x, y, w, h)), color };
    let line = |x1, y1, x2, y2, color| Shape {
        geometry: Geometry::Line(Line::new(Point::new(x1, y1), Point::new(x2, y2))),
        color,
    };
    vec![
        rect(-0.9, -0.9, 0.8, 0.6, Color::rgb(200, 40, 40)),
        rect(-0.5, -0.5, 0.4, 0.4, Color::rgb(40, 160, 60)),
        rect(0.1, 0.2, 0.7, 0.5, Color::rgb(50, 90, 210)),
        line(-1.0, 0.0, 1.0, 0.0, Color::rgb(120, 120, 120)),
        line(0.0, -1.0, 0.0, 1.0, Color::rgb(120, 120, 120)),
        line(-0.8, 0.8, 0.6, -0.7, Color::rgb(230, 160, 30)),
    ]
}

// =============================================================
// test-pattern
// =============================================================

fn run_test_pattern(args: CanvasArgs) -> Result<(), CliError> {
    let font = Font::builtin()?;
    let mut fb = Framebuffer::new(args.width, args.height)?;
    pattern::draw(&mut fb, &font);
    export::write_png(&fb, &args.out)?;
    println!("{}", args.out.display());
    Ok(())
}
