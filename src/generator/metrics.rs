//! Signal processing metrics: a 2x2 grid of charts and a summary panel

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{frequency_sweep, ChartGenerator};
use crate::style::{self, Scale, BACKGROUND, LIME, ORANGE, PANEL};
use crate::widgets::{
    closed, draw_banner, draw_text_panel, star_outline, DrawResult, LinePattern, PatternSwatch,
};

const TITLE: &str = "SIGNAL PROCESSING METRICS";

/// Detected (frequency offset Hz, SNR dB) marked on the response curve
pub const DETECTED_PEAK: (f64, f64) = (-900.0, 7.2);

/// Signal power at each processing stage, before and after processing
pub const POWER_BEFORE: [f64; 6] = [0.8, 0.9, 1.1, 1.2, 1.3, 1.32];
pub const POWER_AFTER: [f64; 6] = [0.85, 1.0, 1.15, 1.25, 1.30, 1.32];

/// Carrier frequency estimate (Hz) after each pipeline stage, with its bar colour
pub const CARRIER_STAGES: [(&str, f64, RGBColor); 4] = [
    ("Input", 5005.58, ORANGE),
    ("Doppler Compensated", 5005.50, YELLOW),
    ("Filtered", 5005.55, LIME),
    ("QPSK Demodulated", 5005.58, CYAN),
];

/// Nominal carrier the tracking loop should converge to
pub const TRUE_CARRIER_HZ: f64 = 5000.0;

const SUMMARY: [&str; 14] = [
    "╔════════════════════════════════════════╗",
    "║     SIGNAL PROCESSING SUMMARY          ║",
    "╠════════════════════════════════════════╣",
    "║  SNR (Input):           8.02 dB       ║",
    "║  SNR (Output):          8.02 dB       ║",
    "║  Signal Power:          1.32 W        ║",
    "║  Lock Status:           LOCKED ✓      ║",
    "║  Doppler Compensation:  5.0 kHz       ║",
    "║  Filter Taps:           64            ║",
    "║  Bits Recovered:        1000          ║",
    "║  Peak Amplitude:        2.33 V        ║",
    "║  Mean Amplitude:        1.09 V        ║",
    "║  Processing Latency:    64 µs         ║",
    "╚════════════════════════════════════════╝",
];

/// SNR in dB of the analytic frequency response: 2 dB Gaussian bump over an 8 dB floor
pub fn snr_response(freq_hz: f64) -> f64 {
    const SIGMA_HZ: f64 = 2000.0;
    8.0 + 2.0 * (-(freq_hz * freq_hz) / (2.0 * SIGMA_HZ * SIGMA_HZ)).exp()
}

/// Label for integer positions of a categorical axis, blank elsewhere
fn integer_label(value: f64, name: impl Fn(usize) -> Option<String>) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 || rounded < 0.0 {
        return String::new();
    }
    name(rounded as usize).unwrap_or_default()
}

/// Renders `signal_metrics.png`
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsGenerator;

impl MetricsGenerator {
    pub fn new() -> Self {
        Self
    }

    fn draw_frequency_response<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        scale: Scale,
    ) -> DrawResult<DB> {
        let curve: Vec<(f64, f64)> = frequency_sweep().map(|f| (f, snr_response(f))).collect();

        let mut chart = ChartBuilder::on(area)
            .caption("Frequency Response", style::title_font(scale))
            .margin(scale.px(60.0))
            .x_label_area_size(scale.px(180.0))
            .y_label_area_size(scale.px(220.0))
            .build_cartesian_2d(-5500f64..5500f64, 0f64..10.6f64)?;

        chart
            .configure_mesh()
            .x_desc("Frequency Offset (Hz)")
            .y_desc("SNR (dB)")
            .x_labels(6)
            .x_label_formatter(&|f| format!("{:.0}", f))
            .axis_desc_style(style::axis_desc_font(scale))
            .label_style(style::tick_font(scale))
            .axis_style(style::axis_style(scale))
            .bold_line_style(style::grid_style(scale))
            .light_line_style(TRANSPARENT)
            .set_all_tick_mark_size(scale.px(8.0))
            .draw()?;

        chart.draw_series(AreaSeries::new(
            curve.iter().copied(),
            0.0,
            LIME.mix(0.3).filled(),
        ))?;
        chart.draw_series(LineSeries::new(
            curve.iter().copied(),
            LIME.stroke_width(scale.stroke(5.0)),
        ))?;

        let star = star_outline(scale.marker_radius(2000.0));
        let legend_star = star_outline(scale.px(30.0));
        let edge = YELLOW.stroke_width(scale.stroke(3.0));
        let legend_offset = scale.px(20.0);
        chart
            .draw_series(std::iter::once(
                EmptyElement::at(DETECTED_PEAK)
                    + Polygon::new(star.clone(), RED.filled())
                    + PathElement::new(closed(star), edge),
            ))?
            .label("Detected Peak")
            .legend(move |(x, y)| {
                EmptyElement::at((x + legend_offset, y))
                    + Polygon::new(legend_star.clone(), RED.filled())
                    + PathElement::new(closed(legend_star.clone()), edge)
            });

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .margin(scale.px(20.0))
            .legend_area_size(scale.px(80.0))
            .label_font(style::legend_font(scale, &LIME))
            .background_style(PANEL.filled())
            .border_style(CYAN.stroke_width(scale.stroke(1.5)))
            .draw()?;

        Ok(())
    }

    fn draw_power_evolution<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        scale: Scale,
    ) -> DrawResult<DB> {
        let before: Vec<(f64, f64)> = POWER_BEFORE.iter().enumerate().map(|(i, &p)| (i as f64, p)).collect();
        let after: Vec<(f64, f64)> = POWER_AFTER.iter().enumerate().map(|(i, &p)| (i as f64, p)).collect();

        let mut chart = ChartBuilder::on(area)
            .caption("Signal Power Evolution", style::title_font(scale))
            .margin(scale.px(60.0))
            .x_label_area_size(scale.px(180.0))
            .y_label_area_size(scale.px(220.0))
            .build_cartesian_2d(-0.25f64..5.25f64, 0.75f64..1.37f64)?;

        chart
            .configure_mesh()
            .x_desc("Processing Stage")
            .y_desc("Signal Power")
            .x_labels(12)
            .x_label_formatter(&|x| integer_label(*x, |i| (i < POWER_BEFORE.len()).then(|| i.to_string())))
            .y_label_formatter(&|y| format!("{:.2}", y))
            .axis_desc_style(style::axis_desc_font(scale))
            .label_style(style::tick_font(scale))
            .axis_style(style::axis_style(scale))
            .bold_line_style(style::grid_style(scale))
            .light_line_style(TRANSPARENT)
            .set_all_tick_mark_size(scale.px(8.0))
            .draw()?;

        let line_width = scale.stroke(5.0);
        let marker = scale.pt(7.5).round().max(1.0) as i32;
        let marker_edge = scale.stroke(2.0);
        let legend_len = scale.px(60.0);

        chart
            .draw_series(LineSeries::new(before.iter().copied(), ORANGE.stroke_width(line_width)))?
            .label("Before Processing")
            .legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + PathElement::new(vec![(0, 0), (legend_len, 0)], ORANGE.stroke_width(line_width))
                    + Circle::new((legend_len / 2, 0), marker, ORANGE.filled())
            });
        chart.draw_series(PointSeries::of_element(
            before.iter().copied(),
            marker,
            ORANGE.filled(),
            &|c, s, st| {
                EmptyElement::at(c)
                    + Circle::new((0, 0), s, st)
                    + Circle::new((0, 0), s, YELLOW.stroke_width(marker_edge))
            },
        ))?;

        chart
            .draw_series(LineSeries::new(after.iter().copied(), LIME.stroke_width(line_width)))?
            .label("After Processing")
            .legend(move |(x, y)| {
                EmptyElement::at((x, y))
                    + PathElement::new(vec![(0, 0), (legend_len, 0)], LIME.stroke_width(line_width))
                    + Rectangle::new(
                        [
                            (legend_len / 2 - marker, -marker),
                            (legend_len / 2 + marker, marker),
                        ],
                        LIME.filled(),
                    )
            });
        chart.draw_series(PointSeries::of_element(
            after.iter().copied(),
            marker,
            LIME.filled(),
            &|c, s, st| {
                EmptyElement::at(c)
                    + Rectangle::new([(-s, -s), (s, s)], st)
                    + Rectangle::new([(-s, -s), (s, s)], CYAN.stroke_width(marker_edge))
            },
        ))?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .margin(scale.px(20.0))
            .legend_area_size(scale.px(90.0))
            .label_font(style::legend_font(scale, &WHITE))
            .background_style(PANEL.filled())
            .border_style(CYAN.stroke_width(scale.stroke(1.5)))
            .draw()?;

        Ok(())
    }

    fn draw_carrier_tracking<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        scale: Scale,
    ) -> DrawResult<DB> {
        let mut chart = ChartBuilder::on(area)
            .caption("Carrier Tracking Throughout Pipeline", style::title_font(scale))
            .margin(scale.px(60.0))
            .x_label_area_size(scale.px(180.0))
            .y_label_area_size(scale.px(260.0))
            .build_cartesian_2d(-0.5f64..3.5f64, TRUE_CARRIER_HZ..5010f64)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .y_desc("Carrier Frequency (Hz)")
            .x_labels(9)
            .x_label_formatter(&|x| {
                integer_label(*x, |i| CARRIER_STAGES.get(i).map(|stage| stage.0.to_string()))
            })
            .y_label_formatter(&|y| format!("{:.0}", y))
            .axis_desc_style(style::axis_desc_font(scale))
            .label_style(style::tick_font(scale))
            .axis_style(style::axis_style(scale))
            .bold_line_style(style::grid_style(scale))
            .light_line_style(TRANSPARENT)
            .set_all_tick_mark_size(scale.px(8.0))
            .draw()?;

        const BAR_HALF_WIDTH: f64 = 0.4;
        let outline = WHITE.stroke_width(scale.stroke(4.0));
        chart.draw_series(CARRIER_STAGES.iter().enumerate().flat_map(|(i, &(_, freq, color))| {
            let corners = [
                (i as f64 - BAR_HALF_WIDTH, TRUE_CARRIER_HZ),
                (i as f64 + BAR_HALF_WIDTH, freq),
            ];
            [
                Rectangle::new(corners, color.mix(0.7).filled()),
                Rectangle::new(corners, outline),
            ]
        }))?;

        let value_font = style::font(scale, 35.0, FontStyle::Bold, &WHITE)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart.draw_series(CARRIER_STAGES.iter().enumerate().map(|(i, &(_, freq, _))| {
            Text::new(format!("{:.2}", freq), (i as f64, freq + 1.5), value_font.clone())
        }))?;

        let reference = RED.mix(0.7).stroke_width(scale.stroke(4.0));
        let legend_len = scale.px(60.0);
        chart
            .draw_series(
                LinePattern::Dashed
                    .segments((-0.5, TRUE_CARRIER_HZ), (3.5, TRUE_CARRIER_HZ))
                    .into_iter()
                    .map(|[a, b]| PathElement::new(vec![a, b], reference)),
            )?
            .label("True Carrier (5 kHz)")
            .legend(move |start| {
                PatternSwatch::new(start, legend_len, LinePattern::Dashed, reference)
            });

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .margin(scale.px(20.0))
            .legend_area_size(scale.px(80.0))
            .label_font(style::legend_font(scale, &WHITE))
            .background_style(PANEL.filled())
            .border_style(CYAN.stroke_width(scale.stroke(1.5)))
            .draw()?;

        Ok(())
    }
}

impl ChartGenerator for MetricsGenerator {
    fn file_name(&self) -> &'static str {
        "signal_metrics.png"
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        let scale = Scale::of(root);
        root.fill(&BACKGROUND)?;

        let (header, body) = root.split_vertically(scale.upx(240.0));
        draw_banner(&header, scale, TITLE)?;

        let panels = body.split_evenly((2, 2));
        self.draw_frequency_response(&panels[0], scale)?;
        self.draw_power_evolution(&panels[1], scale)?;
        self.draw_carrier_tracking(&panels[2], scale)?;
        draw_text_panel(&panels[3], scale, &SUMMARY, 38.0, &LIME, &CYAN)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::Canvas;
    use crate::generator::test_util::png_dimensions;
    use std::fs;

    #[test]
    fn test_snr_response_shape() {
        assert!((snr_response(0.0) - 10.0).abs() < 1e-12);
        // One sigma out the bump is down to exp(-1/2)
        let expected = 8.0 + 2.0 * (-0.5f64).exp();
        assert!((snr_response(2000.0) - expected).abs() < 1e-12);
        assert_eq!(snr_response(-3000.0), snr_response(3000.0));
        assert!(snr_response(5000.0) > 8.0);
    }

    #[test]
    fn test_series_lengths_match() {
        assert_eq!(POWER_BEFORE.len(), POWER_AFTER.len());
        assert_eq!(frequency_sweep().count(), 101);
        // Both power series end at the same converged value
        assert_eq!(POWER_BEFORE[5], POWER_AFTER[5]);
    }

    #[test]
    fn test_carrier_bars_fit_axis() {
        for (_, freq, _) in CARRIER_STAGES.iter() {
            assert!(*freq > TRUE_CARRIER_HZ);
            assert!(freq + 1.5 < 5010.0);
        }
    }

    #[test]
    fn test_integer_label() {
        let name = |i: usize| CARRIER_STAGES.get(i).map(|s| s.0.to_string());
        assert_eq!(integer_label(0.0, name), "Input");
        assert_eq!(integer_label(3.0000000001, name), "QPSK Demodulated");
        assert_eq!(integer_label(0.5, name), "");
        assert_eq!(integer_label(-1.0, name), "");
        assert_eq!(integer_label(4.0, name), "");
    }

    #[test]
    fn test_summary_panel_is_boxed() {
        assert!(SUMMARY[0].starts_with('╔'));
        assert!(SUMMARY[SUMMARY.len() - 1].starts_with('╚'));
        assert!(SUMMARY.iter().any(|l| l.contains("LOCKED ✓")));
    }

    #[test]
    fn test_render_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let first_dir = dir.path().join("first");
        let second_dir = dir.path().join("second");
        fs::create_dir(&first_dir).unwrap();
        fs::create_dir(&second_dir).unwrap();

        let canvas = Canvas::square(400);
        let first = MetricsGenerator::new().generate(&first_dir, canvas).unwrap();
        let second = MetricsGenerator::new().generate(&second_dir, canvas).unwrap();

        assert_eq!(png_dimensions(&first), (400, 400));
        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn test_svg_contains_panels() {
        let svg = MetricsGenerator::new()
            .render_svg(Canvas::square(800))
            .unwrap();
        for text in [
            TITLE,
            "Frequency Response",
            "Signal Power Evolution",
            "Carrier Tracking Throughout Pipeline",
            "Detected Peak",
            "True Carrier (5 kHz)",
            "5005.58",
        ] {
            assert!(svg.contains(text), "missing {:?}", text);
        }
    }
}
