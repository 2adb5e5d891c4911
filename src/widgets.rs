//! Drawing helpers shared by the chart generators

use std::iter::{once, Once};

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::element::{Drawable, PointCollection};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_backend::{BackendCoord, DrawingErrorKind};

use crate::style::{self, Scale, LIME, PANEL};

/// Error type of fallible drawing on backend `DB`
pub type DrawResult<DB> = Result<(), DrawingAreaErrorKind<<DB as DrawingBackend>::ErrorType>>;

/// Draw a bold lime title in a bordered box centred on `area`
pub fn draw_banner<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scale: Scale,
    title: &str,
) -> DrawResult<DB> {
    let text_style = style::font(scale, 60.0, FontStyle::Bold, &LIME);
    let (text_w, text_h) = area.estimate_text_size(title, &text_style)?;
    let (width, height) = area.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);

    let pad_x = scale.px(60.0);
    let pad_y = scale.px(30.0);
    let half_w = text_w as i32 / 2 + pad_x;
    let half_h = text_h as i32 / 2 + pad_y;
    let corners = [
        (center.0 - half_w, center.1 - half_h),
        (center.0 + half_w, center.1 + half_h),
    ];

    area.draw(&Rectangle::new(corners, PANEL.filled()))?;
    area.draw(&Rectangle::new(corners, CYAN.stroke_width(scale.stroke(4.0))))?;
    area.draw_text(
        title,
        &text_style.pos(Pos::new(HPos::Center, VPos::Center)),
        center,
    )?;
    Ok(())
}

/// Draw one line of text centred on `area`
pub fn draw_centered_text<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    text: &str,
    text_style: &TextStyle,
) -> DrawResult<DB> {
    let (width, height) = area.dim_in_pixel();
    area.draw_text(
        text,
        &text_style.pos(Pos::new(HPos::Center, VPos::Center)),
        ((width / 2) as i32, (height / 2) as i32),
    )
}

/// Draw a block of monospace lines inside a filled, bordered box centred on `area`
///
/// The padding around the text is twice the font size on every side.
pub fn draw_text_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    scale: Scale,
    lines: &[&str],
    points: f64,
    text_color: &RGBColor,
    border_color: &RGBColor,
) -> DrawResult<DB> {
    let text_style = style::mono(scale, points, text_color);
    let line_height = (scale.pt(points) * 1.2).round().max(1.0) as i32;

    let mut block_w = 0i32;
    for line in lines {
        let (w, _) = area.estimate_text_size(line, &text_style)?;
        block_w = block_w.max(w as i32);
    }
    let block_h = line_height * lines.len() as i32;

    let (width, height) = area.dim_in_pixel();
    let center = ((width / 2) as i32, (height / 2) as i32);
    let pad = (2.0 * scale.pt(points)).round() as i32;
    let corners = [
        (center.0 - block_w / 2 - pad, center.1 - block_h / 2 - pad),
        (center.0 + block_w / 2 + pad, center.1 + block_h / 2 + pad),
    ];

    area.draw(&Rectangle::new(corners, PANEL.filled()))?;
    area.draw(&Rectangle::new(
        corners,
        border_color.stroke_width(scale.stroke(4.0)),
    ))?;

    let left = center.0 - block_w / 2;
    let top = center.1 - block_h / 2;
    let anchored = text_style.pos(Pos::new(HPos::Left, VPos::Top));
    for (i, line) in lines.iter().enumerate() {
        area.draw_text(line, &anchored, (left, top + i as i32 * line_height))?;
    }
    Ok(())
}

/// Vertices of a five-pointed star of outer `radius`, centred on the origin, tip up
pub fn star_outline(radius: i32) -> Vec<(i32, i32)> {
    let outer = radius as f64;
    let inner = outer * 0.4;
    (0..10)
        .map(|i| {
            let r = if i % 2 == 0 { outer } else { inner };
            let angle = std::f64::consts::PI / 5.0 * i as f64;
            ((r * angle.sin()).round() as i32, (-r * angle.cos()).round() as i32)
        })
        .collect()
}

/// Closed version of a polygon outline, for stroking with a path
pub fn closed(mut outline: Vec<(i32, i32)>) -> Vec<(i32, i32)> {
    if let Some(&first) = outline.first() {
        outline.push(first);
    }
    outline
}

/// Stroke pattern of a reference line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinePattern {
    /// Long dashes (`--`)
    Dashed,
    /// Short dots (`:`)
    Dotted,
}

impl LinePattern {
    /// Dash and gap lengths as fractions of the whole line
    fn lengths(self) -> (f64, f64) {
        match self {
            LinePattern::Dashed => (0.03, 0.015),
            LinePattern::Dotted => (0.006, 0.012),
        }
    }

    /// Dash and gap lengths as fractions of a legend swatch
    fn swatch_lengths(self) -> (f64, f64) {
        match self {
            LinePattern::Dashed => (0.35, 0.15),
            LinePattern::Dotted => (0.1, 0.15),
        }
    }

    /// Split the line `from`-`to` into the visible segments of this pattern
    ///
    /// Segments never extend past `to`; the last one is shortened if needed.
    pub fn segments(self, from: (f64, f64), to: (f64, f64)) -> Vec<[(f64, f64); 2]> {
        let (dash, gap) = self.lengths();
        split_line(from, to, dash, gap)
    }

    /// Segments of this pattern over a short legend swatch
    pub fn swatch_segments(self, from: (f64, f64), to: (f64, f64)) -> Vec<[(f64, f64); 2]> {
        let (dash, gap) = self.swatch_lengths();
        split_line(from, to, dash, gap)
    }
}

fn split_line(from: (f64, f64), to: (f64, f64), dash: f64, gap: f64) -> Vec<[(f64, f64); 2]> {
    let lerp = |t: f64| (from.0 + (to.0 - from.0) * t, from.1 + (to.1 - from.1) * t);

    let mut segments = Vec::new();
    let mut t = 0.0f64;
    while t < 1.0 {
        let end = (t + dash).min(1.0);
        segments.push([lerp(t), lerp(end)]);
        t = end + gap;
    }
    segments
}

/// Horizontal legend swatch stroked in a [`LinePattern`]
///
/// Anchored at its left end; drawn in backend pixels.
pub struct PatternSwatch {
    start: BackendCoord,
    length: i32,
    pattern: LinePattern,
    style: ShapeStyle,
}

impl PatternSwatch {
    pub fn new(start: BackendCoord, length: i32, pattern: LinePattern, style: ShapeStyle) -> Self {
        Self {
            start,
            length,
            pattern,
            style,
        }
    }

    /// Visible segments in pixels relative to the anchor
    fn segments(&self) -> Vec<[BackendCoord; 2]> {
        let round = |(x, y): (f64, f64)| (x.round() as i32, y.round() as i32);
        self.pattern
            .swatch_segments((0.0, 0.0), (self.length as f64, 0.0))
            .into_iter()
            .map(|[a, b]| [round(a), round(b)])
            .collect()
    }
}

impl<'a> PointCollection<'a, BackendCoord> for &'a PatternSwatch {
    type Point = &'a BackendCoord;
    type IntoIter = Once<&'a BackendCoord>;

    fn point_iter(self) -> Self::IntoIter {
        once(&self.start)
    }
}

impl<DB: DrawingBackend> Drawable<DB> for PatternSwatch {
    fn draw<I: Iterator<Item = BackendCoord>>(
        &self,
        mut pos: I,
        backend: &mut DB,
        _: (u32, u32),
    ) -> Result<(), DrawingErrorKind<DB::ErrorType>> {
        let Some((x, y)) = pos.next() else {
            return Ok(());
        };
        for [a, b] in self.segments() {
            backend.draw_line((x + a.0, y + a.1), (x + b.0, y + b.1), &self.style)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_outline_shape() {
        let star = star_outline(100);
        assert_eq!(star.len(), 10);
        // First vertex is the top tip
        assert_eq!(star[0], (0, -100));
        // Inner vertices sit at 40% of the radius
        let (x, y) = star[1];
        let r = ((x * x + y * y) as f64).sqrt();
        assert!((r - 40.0).abs() < 1.0);
    }

    #[test]
    fn test_closed_repeats_first_point() {
        let path = closed(vec![(0, 0), (1, 0), (1, 1)]);
        assert_eq!(path.len(), 4);
        assert_eq!(path[3], (0, 0));
        assert!(closed(Vec::new()).is_empty());
    }

    #[test]
    fn test_dashed_segments_stay_on_line() {
        let segments = LinePattern::Dashed.segments((3500.0, 0.0), (3500.0, 1.1));
        assert!(segments.len() > 10);
        for [a, b] in &segments {
            assert_eq!(a.0, 3500.0);
            assert_eq!(b.0, 3500.0);
            assert!(a.1 >= 0.0 && b.1 <= 1.1 + 1e-12);
            assert!(b.1 > a.1);
        }
    }

    #[test]
    fn test_dotted_has_more_segments_than_dashed() {
        let from = (-5000.0, 5000.0);
        let to = (5000.0, 5000.0);
        let dotted = LinePattern::Dotted.segments(from, to);
        let dashed = LinePattern::Dashed.segments(from, to);
        assert!(dotted.len() > dashed.len());
        assert_eq!(dotted[0][0], from);
    }

    #[test]
    fn test_swatch_segments_follow_pattern() {
        let dashed = PatternSwatch::new((0, 0), 60, LinePattern::Dashed, RED.into()).segments();
        let dotted = PatternSwatch::new((0, 0), 60, LinePattern::Dotted, RED.into()).segments();

        // A swatch is broken up, not one solid stroke
        assert_eq!(dashed.len(), 2);
        assert!(dotted.len() > dashed.len());
        assert_eq!(dashed[0], [(0, 0), (21, 0)]);
        for [a, b] in dashed.iter().chain(&dotted) {
            assert!(a.0 < b.0 && b.0 <= 60);
            assert_eq!((a.1, b.1), (0, 0));
        }
    }

    #[test]
    fn test_swatch_draws_gaps() {
        const SIZE: (u32, u32) = (100, 20);
        let mut buffer = vec![0u8; (SIZE.0 * SIZE.1 * 3) as usize];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, SIZE).into_drawing_area();
            root.draw(&PatternSwatch::new((10, 10), 60, LinePattern::Dashed, WHITE.into()))
                .unwrap();
            root.present().unwrap();
        }
        let lit = |x: usize| buffer[(10 * SIZE.0 as usize + x) * 3] != 0;

        assert!(lit(15));
        // Gap between the first and second dash
        assert!(!lit(35));
        assert!(lit(50));
        assert!(!lit(75));
    }
}
