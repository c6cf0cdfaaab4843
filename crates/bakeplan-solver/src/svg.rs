use std::io::Write;

use crate::error::Result;
use crate::render::{Figure, PlotSurface};

const MARGIN_LEFT: f64 = 70.0;
const MARGIN_RIGHT: f64 = 20.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 55.0;

/// Line colors, cycled per constraint
const PALETTE: [&str; 6] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#9467bd", "#8c564b", "#e377c2"];

/// Writes a figure as a standalone SVG document
pub struct SvgSurface<W: Write> {
    writer: W,
    width: f64,
    height: f64,
}

impl<W: Write> SvgSurface<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            width: 640.0,
            height: 480.0,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Maps data coordinates to pixels inside the plot area
struct Frame {
    x_range: (f64, f64),
    y_range: (f64, f64),
    left: f64,
    top: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn px(&self, x: f64) -> f64 {
        self.left + (x - self.x_range.0) / (self.x_range.1 - self.x_range.0) * self.width
    }

    fn py(&self, y: f64) -> f64 {
        self.top + self.height - (y - self.y_range.0) / (self.y_range.1 - self.y_range.0) * self.height
    }

    fn points(&self, xs: &[f64], ys: &[f64]) -> String {
        xs.iter()
            .zip(ys)
            .map(|(&x, &y)| format!("{:.2},{:.2}", self.px(x), self.py(y)))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl<W: Write> PlotSurface for SvgSurface<W> {
    fn draw(&mut self, figure: &Figure) -> Result<()> {
        let frame = Frame {
            x_range: figure.x_range,
            y_range: figure.y_range,
            left: MARGIN_LEFT,
            top: MARGIN_TOP,
            width: self.width - MARGIN_LEFT - MARGIN_RIGHT,
            height: self.height - MARGIN_TOP - MARGIN_BOTTOM,
        };
        let w = &mut self.writer;

        writeln!(
            w,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{0}" height="{1}" viewBox="0 0 {0} {1}" font-family="sans-serif" font-size="12">"#,
            self.width, self.height
        )?;
        writeln!(w, r#"<rect width="100%" height="100%" fill="white"/>"#)?;
        writeln!(
            w,
            r#"<defs><clipPath id="plot-area"><rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}"/></clipPath></defs>"#,
            frame.left, frame.top, frame.width, frame.height
        )?;

        for tick in ticks(figure.x_range) {
            let x = frame.px(tick);
            if figure.grid {
                writeln!(
                    w,
                    r##"<line x1="{x:.2}" y1="{:.2}" x2="{x:.2}" y2="{:.2}" stroke="#b0b0b0" stroke-width="0.8"/>"##,
                    frame.top,
                    frame.top + frame.height
                )?;
            }
            writeln!(
                w,
                r#"<text x="{x:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
                frame.top + frame.height + 16.0,
                tick
            )?;
        }
        for tick in ticks(figure.y_range) {
            let y = frame.py(tick);
            if figure.grid {
                writeln!(
                    w,
                    r##"<line x1="{:.2}" y1="{y:.2}" x2="{:.2}" y2="{y:.2}" stroke="#b0b0b0" stroke-width="0.8"/>"##,
                    frame.left,
                    frame.left + frame.width
                )?;
            }
            writeln!(
                w,
                r#"<text x="{:.2}" y="{:.2}" text-anchor="end">{}</text>"#,
                frame.left - 6.0,
                y + 4.0,
                tick
            )?;
        }

        writeln!(w, r#"<g clip-path="url(#plot-area)">"#)?;

        let fill = &figure.fill;
        let mut outline = frame.points(&fill.xs, &fill.upper);
        let lower: Vec<(f64, f64)> = fill.xs.iter().copied().zip(fill.lower.iter().copied()).rev().collect();
        for (x, y) in lower {
            outline.push_str(&format!(" {:.2},{:.2}", frame.px(x), frame.py(y)));
        }
        writeln!(
            w,
            r#"<polygon points="{}" fill="lightblue" fill-opacity="0.5" stroke="none"/>"#,
            outline
        )?;

        for (line, color) in figure.lines.iter().zip(PALETTE.iter().cycle()) {
            writeln!(
                w,
                r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="1.5"/>"#,
                frame.points(&line.xs, &line.ys),
                color
            )?;
        }

        if let Some(marker) = &figure.marker {
            writeln!(
                w,
                r#"<circle cx="{:.2}" cy="{:.2}" r="5" fill="red"/>"#,
                frame.px(marker.x),
                frame.py(marker.y)
            )?;
        }
        writeln!(w, "</g>")?;

        writeln!(
            w,
            r#"<rect x="{:.2}" y="{:.2}" width="{:.2}" height="{:.2}" fill="none" stroke="black"/>"#,
            frame.left, frame.top, frame.width, frame.height
        )?;
        writeln!(
            w,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle" font-size="14">{}</text>"#,
            frame.left + frame.width / 2.0,
            MARGIN_TOP - 14.0,
            escape(&figure.title)
        )?;
        writeln!(
            w,
            r#"<text x="{:.2}" y="{:.2}" text-anchor="middle">{}</text>"#,
            frame.left + frame.width / 2.0,
            self.height - 12.0,
            escape(&figure.x_label)
        )?;
        writeln!(
            w,
            r#"<text transform="translate(18 {:.2}) rotate(-90)" text-anchor="middle">{}</text>"#,
            frame.top + frame.height / 2.0,
            escape(&figure.y_label)
        )?;

        if figure.legend {
            let mut entries: Vec<(String, &str, bool)> = figure
                .lines
                .iter()
                .zip(PALETTE.iter().cycle())
                .map(|(l, c)| (l.label.clone(), *c, false))
                .collect();
            if let Some(marker) = &figure.marker {
                entries.push((marker.label.clone(), "red", true));
            }

            let x0 = frame.left + frame.width - 190.0;
            let y0 = frame.top + 10.0;
            writeln!(
                w,
                r##"<rect x="{:.2}" y="{:.2}" width="180" height="{}" fill="white" fill-opacity="0.8" stroke="#cccccc"/>"##,
                x0,
                y0,
                entries.len() * 20 + 8
            )?;
            for (k, (label, color, is_marker)) in entries.iter().enumerate() {
                let y = y0 + 16.0 + k as f64 * 20.0;
                if *is_marker {
                    writeln!(w, r#"<circle cx="{:.2}" cy="{:.2}" r="4" fill="{}"/>"#, x0 + 18.0, y - 4.0, color)?;
                } else {
                    writeln!(
                        w,
                        r#"<line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1.5"/>"#,
                        x0 + 8.0,
                        y - 4.0,
                        x0 + 28.0,
                        y - 4.0,
                        color
                    )?;
                }
                writeln!(w, r#"<text x="{:.2}" y="{:.2}">{}</text>"#, x0 + 36.0, y, escape(label))?;
            }
        }

        writeln!(w, "</svg>")?;
        w.flush()?;
        Ok(())
    }
}

/// Round tick positions, aiming for about ten per axis
fn ticks(range: (f64, f64)) -> Vec<f64> {
    let span = range.1 - range.0;
    if !(span > 0.0) || !span.is_finite() {
        return Vec::new();
    }
    let raw = span / 10.0;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw * (1.0 - 1e-9))
        .unwrap_or(10.0 * magnitude);

    let first = (range.0 / step - 1e-9).ceil() as i64;
    let last = (range.1 / step + 1e-9).floor() as i64;
    // Round away representation noise such as 0.30000000000000004
    (first..=last).map(|k| (k as f64 * step * 1e6).round() / 1e6).collect()
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::LinearProgram;
    use crate::render::Renderer;
    use crate::simplex::Solver;

    fn bakery_svg() -> String {
        let mut problem = LinearProgram::new(vec!["Panes integrales".to_string(), "Panes blancos".to_string()]);
        problem.maximize(vec![40.0, 50.0]);
        problem.add_constraint("Amasado", vec![3.0, 2.0], 120.0);
        problem.add_constraint("Horneado", vec![2.0, 4.0], 160.0);
        let solution = Solver::new().solve(&problem).unwrap();

        let mut surface = SvgSurface::new(Vec::new());
        Renderer::new()
            .with_optimum_label("Óptimo")
            .render_to(&problem, &solution, &mut surface)
            .unwrap();
        String::from_utf8(surface.into_inner()).unwrap()
    }

    #[test]
    fn test_ticks() {
        assert_eq!(ticks((0.0, 50.0)), vec![0.0, 5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0]);
        assert_eq!(ticks((0.0, 1.0)).len(), 11);
        assert!(ticks((1.0, 1.0)).is_empty());
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("3x + 2y <= 120"), "3x + 2y &lt;= 120");
        assert_eq!(escape("a & \"b\""), "a &amp; &quot;b&quot;");
    }

    #[test]
    fn test_svg_document() {
        let svg = bakery_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert_eq!(svg.matches("<polygon").count(), 1);
        assert!(svg.contains("3x + 2y &lt;= 120"));
        assert!(svg.contains("2x + 4y &lt;= 160"));
        assert!(svg.contains("Óptimo (20, 30)"));
        assert!(svg.contains("Panes integrales (x)"));
        // optimum at (20, 30) on the default 640x480 canvas
        assert!(svg.contains(r#"<circle cx="290.00" cy="194.00" r="5" fill="red"/>"#));
    }

    #[test]
    fn test_svg_is_repeatable() {
        assert_eq!(bakery_svg(), bakery_svg());
    }
}
