//! SVG drawing surface
//!
//! Serialises drawing operations into a standalone SVG document. Gradients
//! are collected into a `<defs>` block when the document is finished.

use super::geometry::Point;
use super::surface::{
    num, Color, DrawingSurface, LineStyle, Paint, Path, RenderError, Stroke, TextAnchor,
    TextStyle,
};
use std::path::Path as FsPath;
use std::sync::atomic::{AtomicUsize, Ordering};

static NEXT_SURFACE_ID: AtomicUsize = AtomicUsize::new(0);

pub struct SvgSurface {
    id: usize,
    width: f64,
    height: f64,
    defs: Vec<String>,
    body: Vec<String>,
    next_gradient: usize,
}

impl SvgSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            id: NEXT_SURFACE_ID.fetch_add(1, Ordering::Relaxed),
            width,
            height,
            defs: Vec::new(),
            body: Vec::new(),
            next_gradient: 0,
        }
    }

    /// Render the complete document
    pub fn finish(&self) -> String {
        let mut out = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">\n",
            w = num(self.width),
            h = num(self.height),
        );
        if !self.defs.is_empty() {
            out.push_str("<defs>\n");
            for def in &self.defs {
                out.push_str(def);
                out.push('\n');
            }
            out.push_str("</defs>\n");
        }
        for element in &self.body {
            out.push_str(element);
            out.push('\n');
        }
        out.push_str("</svg>\n");
        out
    }

    /// Write the document to `path`
    pub fn write_to(&self, path: &FsPath) -> Result<(), RenderError> {
        std::fs::write(path, self.finish())?;
        tracing::debug!(path = %path.display(), "Wrote SVG");
        Ok(())
    }

    /// Embed another finished surface at an offset
    pub fn embed(&mut self, other: &SvgSurface, x: f64, y: f64) {
        self.defs.extend(other.defs.iter().cloned());
        self.body
            .push(format!("<g transform=\"translate({} {})\">", num(x), num(y)));
        self.body.extend(other.body.iter().cloned());
        self.body.push("</g>".to_string());
    }

    fn paint_attr(&mut self, paint: &Paint) -> String {
        match paint {
            Paint::Solid(color) => fill_attrs(color),
            Paint::VerticalGradient { top, bottom, y0, y1 } => {
                // Surfaces get embedded into one document, ids must stay unique
                let id = format!("grad-{}-{}", self.id, self.next_gradient);
                self.next_gradient += 1;
                self.defs.push(format!(
                    "<linearGradient id=\"{id}\" gradientUnits=\"userSpaceOnUse\" x1=\"0\" y1=\"{}\" x2=\"0\" y2=\"{}\">\
<stop offset=\"0\" stop-color=\"{}\" stop-opacity=\"{}\"/>\
<stop offset=\"1\" stop-color=\"{}\" stop-opacity=\"{}\"/></linearGradient>",
                    num(*y0),
                    num(*y1),
                    top.to_hex(),
                    num(top.opacity()),
                    bottom.to_hex(),
                    num(bottom.opacity()),
                ));
                format!("fill=\"url(#{id})\"")
            }
        }
    }
}

fn fill_attrs(color: &Color) -> String {
    if color.a == 0xff {
        format!("fill=\"{}\"", color.to_hex())
    } else {
        format!(
            "fill=\"{}\" fill-opacity=\"{}\"",
            color.to_hex(),
            num(color.opacity())
        )
    }
}

fn stroke_attrs(stroke: &Stroke) -> String {
    let mut attrs = format!(
        "stroke=\"{}\" stroke-width=\"{}\"",
        stroke.color.to_hex(),
        num(stroke.width)
    );
    if stroke.color.a != 0xff {
        attrs.push_str(&format!(" stroke-opacity=\"{}\"", num(stroke.color.opacity())));
    }
    if stroke.style == LineStyle::Round {
        attrs.push_str(" stroke-linecap=\"round\" stroke-linejoin=\"round\"");
    }
    if !stroke.dash.is_empty() {
        let dash: Vec<String> = stroke.dash.iter().map(|d| num(*d)).collect();
        attrs.push_str(&format!(" stroke-dasharray=\"{}\"", dash.join(",")));
    }
    attrs
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl DrawingSurface for SvgSurface {
    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }

    fn clear(&mut self) {
        self.defs.clear();
        self.body.clear();
    }

    fn fill_path(&mut self, path: &Path, paint: &Paint) {
        if path.is_empty() {
            return;
        }
        let fill = self.paint_attr(paint);
        self.body
            .push(format!("<path d=\"{}\" {}/>", path.to_svg_data(), fill));
    }

    fn stroke_path(&mut self, path: &Path, stroke: &Stroke) {
        if path.is_empty() {
            return;
        }
        self.body.push(format!(
            "<path d=\"{}\" fill=\"none\" {}/>",
            path.to_svg_data(),
            stroke_attrs(stroke)
        ));
    }

    fn circle(&mut self, center: Point, radius: f64, fill: &Paint, border: Option<&Stroke>) {
        let fill = self.paint_attr(fill);
        let border = border.map(|s| format!(" {}", stroke_attrs(s))).unwrap_or_default();
        self.body.push(format!(
            "<circle cx=\"{}\" cy=\"{}\" r=\"{}\" {}{}/>",
            num(center.x),
            num(center.y),
            num(radius),
            fill,
            border
        ));
    }

    fn rect(&mut self, x: f64, y: f64, width: f64, height: f64, top_radius: f64, fill: &Paint) {
        let fill = self.paint_attr(fill);
        let r = top_radius.min(width / 2.0).min(height).max(0.0);
        if r == 0.0 {
            self.body.push(format!(
                "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" {}/>",
                num(x),
                num(y),
                num(width),
                num(height),
                fill
            ));
            return;
        }

        // Rounded top corners, square bottom
        let path = Path::new()
            .move_to(Point::new(x, y + height))
            .line_to(Point::new(x, y + r))
            .arc_to(r, false, true, Point::new(x + r, y))
            .line_to(Point::new(x + width - r, y))
            .arc_to(r, false, true, Point::new(x + width, y + r))
            .line_to(Point::new(x + width, y + height))
            .close();
        self.body
            .push(format!("<path d=\"{}\" {}/>", path.to_svg_data(), fill));
    }

    fn text(&mut self, at: Point, text: &str, style: &TextStyle) {
        let anchor = match style.anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        };
        let weight = if style.bold { " font-weight=\"bold\"" } else { "" };
        self.body.push(format!(
            "<text x=\"{}\" y=\"{}\" font-family=\"sans-serif\" font-size=\"{}\" text-anchor=\"{}\" {}{}>{}</text>",
            num(at.x),
            num(at.y),
            num(style.size),
            anchor,
            fill_attrs(&style.color),
            weight,
            escape(text)
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document() {
        let svg = SvgSurface::new(200.0, 100.0).finish();
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\""));
        assert!(svg.contains("width=\"200\" height=\"100\""));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(!svg.contains("<defs>"));
    }

    #[test]
    fn test_gradient_goes_into_defs() {
        let mut svg = SvgSurface::new(100.0, 100.0);
        let blue = Color::rgb(0x3b, 0x82, 0xf6);
        let path = Path::polyline(&[Point::new(0.0, 0.0), Point::new(10.0, 10.0)]).close();
        svg.fill_path(
            &path,
            &Paint::VerticalGradient {
                top: blue.with_alpha(0x20),
                bottom: blue.with_alpha(0x05),
                y0: 20.0,
                y1: 80.0,
            },
        );
        let doc = svg.finish();
        assert!(doc.contains("<linearGradient"));
        assert!(doc.contains("fill=\"url(#grad-"));
        assert!(doc.contains("-0)\""));
    }

    #[test]
    fn test_dashed_round_stroke() {
        let mut svg = SvgSurface::new(100.0, 100.0);
        let stroke = Stroke::new(Color::WHITE, 2.0).round().dashed(&[4.0, 4.0]);
        svg.stroke_path(
            &Path::polyline(&[Point::new(0.0, 0.0), Point::new(5.0, 5.0)]),
            &stroke,
        );
        let doc = svg.finish();
        assert!(doc.contains("stroke-dasharray=\"4,4\""));
        assert!(doc.contains("stroke-linecap=\"round\""));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut svg = SvgSurface::new(100.0, 100.0);
        svg.text(
            Point::new(1.0, 2.0),
            "R&D <ops>",
            &TextStyle::new(Color::GRAY_900, 12.0),
        );
        assert!(svg.finish().contains("R&amp;D &lt;ops&gt;"));
    }

    #[test]
    fn test_clear_drops_elements() {
        let mut svg = SvgSurface::new(10.0, 10.0);
        svg.circle(Point::new(5.0, 5.0), 2.0, &Paint::Solid(Color::WHITE), None);
        svg.clear();
        assert!(!svg.finish().contains("<circle"));
    }
}
