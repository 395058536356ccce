//! Drawing surface
//!
//! The canvas-like seam every chart renders through. Charts build paths in
//! device coordinates and hand them to a [`DrawingSurface`]; the backend
//! decides what a fill or stroke becomes.

use super::geometry::Point;
use thiserror::Error;

/// RGBA color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const GRAY_900: Color = Color::rgb(0x11, 0x18, 0x27);
    pub const GRAY_500: Color = Color::rgb(0x6b, 0x72, 0x80);
    pub const GRAY_100: Color = Color::rgb(0xf3, 0xf4, 0xf6);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// `#rrggbb`, alpha dropped
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as an opacity in `[0, 1]`
    pub fn opacity(&self) -> f64 {
        f64::from(self.a) / 255.0
    }
}

/// One segment of a path
#[derive(Debug, Clone, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    /// Elliptical arc to `to`, following SVG arc flag semantics
    Arc {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

/// A path in device coordinates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, p: Point) -> Self {
        self.commands.push(PathCommand::MoveTo(p));
        self
    }

    pub fn line_to(mut self, p: Point) -> Self {
        self.commands.push(PathCommand::LineTo(p));
        self
    }

    pub fn arc_to(mut self, radius: f64, large_arc: bool, sweep: bool, to: Point) -> Self {
        self.commands.push(PathCommand::Arc {
            radius,
            large_arc,
            sweep,
            to,
        });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// Polyline through `points`, starting with a move
    pub fn polyline(points: &[Point]) -> Self {
        let mut path = Self::new();
        for (i, p) in points.iter().enumerate() {
            path = if i == 0 { path.move_to(*p) } else { path.line_to(*p) };
        }
        path
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// SVG path data (`d` attribute)
    pub fn to_svg_data(&self) -> String {
        self.commands
            .iter()
            .map(|cmd| match cmd {
                PathCommand::MoveTo(p) => format!("M {} {}", num(p.x), num(p.y)),
                PathCommand::LineTo(p) => format!("L {} {}", num(p.x), num(p.y)),
                PathCommand::Arc {
                    radius,
                    large_arc,
                    sweep,
                    to,
                } => format!(
                    "A {r} {r} 0 {} {} {} {}",
                    u8::from(*large_arc),
                    u8::from(*sweep),
                    num(to.x),
                    num(to.y),
                    r = num(*radius),
                ),
                PathCommand::Close => "Z".to_string(),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// How a shape is filled
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    Solid(Color),
    /// Linear gradient from `top` at `y0` to `bottom` at `y1`
    VerticalGradient {
        top: Color,
        bottom: Color,
        y0: f64,
        y1: f64,
    },
}

/// Line cap and join style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineStyle {
    #[default]
    Butt,
    Round,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub style: LineStyle,
    /// Dash pattern, solid when empty
    pub dash: Vec<f64>,
}

impl Stroke {
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            style: LineStyle::Butt,
            dash: Vec::new(),
        }
    }

    pub fn round(mut self) -> Self {
        self.style = LineStyle::Round;
        self
    }

    pub fn dashed(mut self, pattern: &[f64]) -> Self {
        self.dash = pattern.to_vec();
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub color: Color,
    pub size: f64,
    pub bold: bool,
    pub anchor: TextAnchor,
}

impl TextStyle {
    pub fn new(color: Color, size: f64) -> Self {
        Self {
            color,
            size,
            bold: false,
            anchor: TextAnchor::Middle,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn anchor(mut self, anchor: TextAnchor) -> Self {
        self.anchor = anchor;
        self
    }
}

/// Canvas-like target for chart rendering
pub trait DrawingSurface {
    /// Surface size in device pixels
    fn size(&self) -> (f64, f64);

    /// Erase everything drawn so far
    fn clear(&mut self);

    fn fill_path(&mut self, path: &Path, paint: &Paint);

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke);

    /// Filled circle with an optional border
    fn circle(&mut self, center: Point, radius: f64, fill: &Paint, border: Option<&Stroke>);

    /// Axis-aligned rectangle with corner radius on the top edge only
    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, top_radius: f64, fill: &Paint);

    fn text(&mut self, at: Point, text: &str, style: &TextStyle);
}

/// A recorded drawing operation
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillPath(Path, Paint),
    StrokePath(Path, Stroke),
    Circle {
        center: Point,
        radius: f64,
        fill: Paint,
        border: Option<Stroke>,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Paint,
    },
    Text {
        at: Point,
        text: String,
    },
}

/// Headless surface that records every operation since the last clear
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    commands: Vec<DrawCommand>,
    clears: usize,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
            clears: 0,
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// How many times the surface was cleared (one per rendered frame)
    pub fn clear_count(&self) -> usize {
        self.clears
    }

    pub fn circles(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Circle { .. }))
            .count()
    }

    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.commands.clear();
        self.clears += 1;
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        self.commands
            .push(DrawCommand::FillPath(path.clone(), paint.clone()));
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) {
        self.commands
            .push(DrawCommand::StrokePath(path.clone(), stroke.clone()));
    }

    fn circle(&mut self, center: Point, radius: f64, fill: &Paint, border: Option<&Stroke>) {
        self.commands.push(DrawCommand::Circle {
            center,
            radius,
            fill: fill.clone(),
            border: border.cloned(),
        });
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, _top_radius: f64, fill: &Paint) {
        self.commands.push(DrawCommand::Rect {
            x,
            y,
            width,
            height,
            fill: fill.clone(),
        });
    }

    fn text(&mut self, at: Point, text: &str, _style: &TextStyle) {
        self.commands.push(DrawCommand::Text {
            at,
            text: text.to_string(),
        });
    }
}

/// Rendering errors
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Format a coordinate with at most three decimals, trimming zeros
pub(crate) fn num(value: f64) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" || s.is_empty() {
        "0".to_string()
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_and_opacity() {
        let c = Color::rgb(0x3b, 0x82, 0xf6);
        assert_eq!(c.to_hex(), "#3b82f6");
        assert_eq!(c.with_alpha(0x20).to_hex(), "#3b82f6");
        assert_eq!(c.opacity(), 1.0);
        assert_eq!(Color::WHITE.with_alpha(0).opacity(), 0.0);
    }

    #[test]
    fn test_path_svg_data() {
        let path = Path::new()
            .move_to(Point::new(100.0, 100.0))
            .line_to(Point::new(100.0, 20.0))
            .arc_to(80.0, true, true, Point::new(20.5, 100.0))
            .close();
        assert_eq!(
            path.to_svg_data(),
            "M 100 100 L 100 20 A 80 80 0 1 1 20.5 100 Z"
        );
    }

    #[test]
    fn test_recording_surface_resets_on_clear() {
        let mut surface = RecordingSurface::new(10.0, 10.0);
        surface.text(Point::new(0.0, 0.0), "a", &TextStyle::new(Color::WHITE, 12.0));
        surface.clear();
        assert_eq!(surface.commands(), &[DrawCommand::Clear]);
        assert_eq!(surface.clear_count(), 1);
    }

    #[test]
    fn test_num_trims() {
        assert_eq!(num(20.0), "20");
        assert_eq!(num(1.23456), "1.235");
        assert_eq!(num(-0.0001), "0");
    }
}
