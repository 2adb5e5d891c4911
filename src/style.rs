//! Shared look of every chart
//!
//! Sizes in this module follow the point-based conventions of print plotting:
//! fonts and stroke widths are given in points at [`DPI`](crate::canvas::DPI)
//! and layout offsets in pixels of the 4000 px reference figure. [`Scale`]
//! maps both onto the canvas actually being drawn.

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::canvas::{DPI, REFERENCE_EDGE_PX};

/// Figure and axes background
pub const BACKGROUND: RGBColor = RGBColor(0x0a, 0x0e, 0x27);
/// Fill of banners, legends and text panels
pub const PANEL: RGBColor = RGBColor(0x1a, 0x1f, 0x3a);
pub const LIME: RGBColor = RGBColor(0x00, 0xff, 0x00);
pub const ORANGE: RGBColor = RGBColor(0xff, 0xa5, 0x00);

const POINTS_PER_INCH: f64 = 72.0;

/// Conversion from reference-figure units to pixels of the current canvas
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale(f64);

impl Scale {
    /// Scale for a root drawing area, relative to the 4000 px reference edge
    pub fn of<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>) -> Self {
        let (width, height) = root.dim_in_pixel();
        Self::for_edge(width.min(height))
    }

    pub fn for_edge(edge_px: u32) -> Self {
        Self(edge_px as f64 / REFERENCE_EDGE_PX as f64)
    }

    pub fn factor(self) -> f64 {
        self.0
    }

    /// Point size to pixels on this canvas
    pub fn pt(self, points: f64) -> f64 {
        points * DPI as f64 / POINTS_PER_INCH * self.0
    }

    /// Reference pixels to pixels on this canvas
    pub fn px(self, pixels: f64) -> i32 {
        (pixels * self.0).round() as i32
    }

    /// Unsigned variant of [`Scale::px`], for sizes and split offsets
    pub fn upx(self, pixels: f64) -> u32 {
        self.px(pixels).max(0) as u32
    }

    /// Line width in points to a stroke width of at least one pixel
    pub fn stroke(self, points: f64) -> u32 {
        self.pt(points).round().max(1.0) as u32
    }

    /// Marker area in square points (scatter `s`) to a radius in pixels
    pub fn marker_radius(self, area_pt2: f64) -> i32 {
        self.pt((area_pt2 / std::f64::consts::PI).sqrt())
            .round()
            .max(1.0) as i32
    }
}

/// Proportional text style
pub fn font(scale: Scale, points: f64, style: FontStyle, color: &RGBColor) -> TextStyle<'static> {
    (FontFamily::SansSerif, scale.pt(points), style)
        .into_font()
        .color(color)
}

/// Monospace text style, used by the box-drawn text panels
pub fn mono(scale: Scale, points: f64, color: &RGBColor) -> TextStyle<'static> {
    (FontFamily::Monospace, scale.pt(points), FontStyle::Bold)
        .into_font()
        .color(color)
}

/// Bold panel title, lime
pub fn title_font(scale: Scale) -> TextStyle<'static> {
    font(scale, 50.0, FontStyle::Bold, &LIME)
}

/// Bold axis description, cyan
pub fn axis_desc_font(scale: Scale) -> TextStyle<'static> {
    font(scale, 45.0, FontStyle::Bold, &CYAN)
}

/// Tick label text, cyan
pub fn tick_font(scale: Scale) -> TextStyle<'static> {
    font(scale, 35.0, FontStyle::Normal, &CYAN)
}

/// Legend entry text
pub fn legend_font(scale: Scale, color: &RGBColor) -> TextStyle<'static> {
    font(scale, 35.0, FontStyle::Normal, color)
}

/// Left and bottom axis lines
pub fn axis_style(scale: Scale) -> ShapeStyle {
    CYAN.stroke_width(scale.stroke(3.0))
}

/// Major grid lines
pub fn grid_style(scale: Scale) -> ShapeStyle {
    CYAN.mix(0.2).stroke_width(scale.stroke(2.0))
}

const PLASMA_STOPS: [(f64, (u8, u8, u8)); 5] = [
    (0.00, (13, 8, 135)),
    (0.25, (126, 3, 168)),
    (0.50, (204, 71, 120)),
    (0.75, (248, 149, 64)),
    (1.00, (240, 249, 33)),
];

/// Plasma colormap, sampled at `t` in [0, 1] (clamped)
pub fn plasma(t: f64) -> RGBColor {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

    for pair in PLASMA_STOPS.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let frac = (t - t0) / (t1 - t0);
            let lerp = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
            return RGBColor(lerp(c0.0, c1.0), lerp(c0.1, c1.1), lerp(c0.2, c1.2));
        }
    }

    let (_, last) = PLASMA_STOPS[PLASMA_STOPS.len() - 1];
    RGBColor(last.0, last.1, last.2)
}
