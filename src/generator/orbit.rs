//! Azimuth/elevation polar plot of one satellite pass

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::ChartGenerator;
use crate::style::{self, plasma, Scale, BACKGROUND};
use crate::widgets::{draw_banner, draw_centered_text, DrawResult};

const TITLE: &str = "SATELLITE ORBITAL TRAJECTORY";
const FOOTER: &str = "Ground Station: 40° N, 105° W | Elevation: 1600 m | LEO Satellite Pass";

/// One look angle sample of the pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassSample {
    pub time_min: f64,
    pub azimuth_deg: f64,
    pub elevation_deg: f64,
}

const fn sample(time_min: f64, azimuth_deg: f64, elevation_deg: f64) -> PassSample {
    PassSample {
        time_min,
        azimuth_deg,
        elevation_deg,
    }
}

/// Look angles recorded during the session, three minutes apart
pub const PASS: [PassSample; 6] = [
    sample(0.0, 54.1, -88.0),
    sample(3.0, 52.6, -88.6),
    sample(6.0, 47.8, -89.4),
    sample(9.0, 271.5, -89.8),
    sample(12.0, 242.3, -89.1),
    sample(15.0, 239.4, -88.4),
];

/// Radial grid rings, with their (literal) tick labels
const RADIAL_TICKS: [(f64, &str); 4] = [(0.25, "75°"), (0.5, "45°"), (0.75, "15°"), (1.0, "-90°")];

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

/// Elevation in degrees mapped onto the [0, 1] display radius
pub fn normalized_elevation(elevation_deg: f64) -> f64 {
    (elevation_deg + 90.0) / 90.0
}

/// Polar (azimuth, radius) to plane coordinates, north up and azimuth clockwise
pub fn polar_to_plane(azimuth_deg: f64, radius: f64) -> (f64, f64) {
    let theta = azimuth_deg.to_radians();
    (radius * theta.sin(), radius * theta.cos())
}

/// Renders `orbital_trajectory.png`
#[derive(Debug, Default, Clone, Copy)]
pub struct OrbitGenerator;

impl OrbitGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Plane positions of the pass, in sample order
    pub fn trajectory(&self) -> Vec<(f64, f64)> {
        PASS.iter()
            .map(|s| polar_to_plane(s.azimuth_deg, normalized_elevation(s.elevation_deg)))
            .collect()
    }

    fn time_span(&self) -> (f64, f64) {
        let first = PASS[0].time_min;
        PASS.iter().fold((first, first), |(lo, hi), s| {
            (lo.min(s.time_min), hi.max(s.time_min))
        })
    }

    fn draw_polar<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        scale: Scale,
    ) -> DrawResult<DB> {
        // Keep the polar axes circular on a non-square area
        let (width, height) = area.dim_in_pixel();
        let side = width.min(height);
        let (pad_x, pad_y) = ((width - side) / 2, (height - side) / 2);
        let square = area.margin(pad_y, pad_y, pad_x, pad_x);

        let mut chart = ChartBuilder::on(&square)
            .margin(scale.px(150.0))
            .build_cartesian_2d(-1.2f64..1.2f64, -1.2f64..1.2f64)?;

        let grid = CYAN.mix(0.3).stroke_width(scale.stroke(2.0));
        let spine = CYAN.stroke_width(scale.stroke(3.0));

        for (radius, _) in RADIAL_TICKS {
            let ring_style = if radius >= 1.0 { spine } else { grid };
            chart.draw_series(LineSeries::new(
                (0..=360).map(|deg| polar_to_plane(deg as f64, radius)),
                ring_style,
            ))?;
        }

        chart.draw_series((0..COMPASS.len()).map(|i| {
            let azimuth = 45.0 * i as f64;
            PathElement::new(vec![(0.0, 0.0), polar_to_plane(azimuth, 1.0)], grid)
        }))?;

        let compass_font = style::font(scale, 40.0, FontStyle::Bold, &CYAN)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart.draw_series(COMPASS.iter().enumerate().map(|(i, label)| {
            Text::new(
                *label,
                polar_to_plane(45.0 * i as f64, 1.1),
                compass_font.clone(),
            )
        }))?;

        let radial_font = style::font(scale, 40.0, FontStyle::Normal, &CYAN)
            .pos(Pos::new(HPos::Left, VPos::Bottom));
        chart.draw_series(RADIAL_TICKS.iter().map(|(radius, label)| {
            Text::new(*label, polar_to_plane(22.5, *radius), radial_font.clone())
        }))?;

        let points = self.trajectory();
        let path_style = CYAN.mix(0.6).stroke_width(scale.stroke(4.0));
        chart.draw_series(
            points
                .windows(2)
                .map(|pair| PathElement::new(vec![pair[0], pair[1]], path_style)),
        )?;

        let (t_min, t_max) = self.time_span();
        let radius = scale.marker_radius(5000.0);
        let edge = CYAN.stroke_width(scale.stroke(3.0));
        chart.draw_series(PASS.iter().zip(points.iter()).map(|(s, &point)| {
            let fill = plasma((s.time_min - t_min) / (t_max - t_min)).mix(0.9).filled();
            EmptyElement::at(point)
                + Circle::new((0, 0), radius, fill)
                + Circle::new((0, 0), radius, edge)
        }))?;

        Ok(())
    }

    fn draw_colorbar<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        scale: Scale,
    ) -> DrawResult<DB> {
        let (t_min, t_max) = self.time_span();
        let (_, height) = area.dim_in_pixel();
        let shrink = height / 10;
        let bar_area = area.margin(shrink, shrink, 0, 0);

        let mut chart = ChartBuilder::on(&bar_area)
            .margin_left(scale.px(40.0))
            .set_label_area_size(LabelAreaPosition::Right, scale.px(300.0))
            .build_cartesian_2d(0f64..1f64, t_min..t_max)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .disable_y_mesh()
            .disable_x_axis()
            .y_labels(8)
            .y_label_formatter(&|t| format!("{:.0}", t))
            .y_desc("Time (minutes)")
            .label_style(style::font(scale, 40.0, FontStyle::Normal, &CYAN))
            .axis_desc_style(style::font(scale, 50.0, FontStyle::Bold, &CYAN))
            .axis_style(style::axis_style(scale))
            .draw()?;

        const STEPS: usize = 200;
        let step = (t_max - t_min) / STEPS as f64;
        chart.draw_series((0..STEPS).map(|i| {
            let t = t_min + step * i as f64;
            Rectangle::new(
                [(0.0, t), (1.0, t + step)],
                plasma(i as f64 / (STEPS - 1) as f64).filled(),
            )
        }))?;

        chart.draw_series(std::iter::once(Rectangle::new(
            [(0.0, t_min), (1.0, t_max)],
            CYAN.stroke_width(scale.stroke(2.0)),
        )))?;

        Ok(())
    }
}

impl ChartGenerator for OrbitGenerator {
    fn file_name(&self) -> &'static str {
        "orbital_trajectory.png"
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        let scale = Scale::of(root);
        root.fill(&BACKGROUND)?;

        let (width, height) = root.dim_in_pixel();
        let (header, rest) = root.split_vertically(scale.upx(240.0));
        let (body, footer) = rest.split_vertically(height - scale.upx(240.0) - scale.upx(200.0));
        let (polar, colorbar) = body.split_horizontally(width - scale.upx(700.0));

        draw_banner(&header, scale, TITLE)?;
        self.draw_polar(&polar, scale)?;
        self.draw_colorbar(&colorbar, scale)?;
        draw_centered_text(
            &footer,
            FOOTER,
            &style::font(scale, 45.0, FontStyle::Italic, &CYAN),
        )?;

        Ok(())
    }
}
