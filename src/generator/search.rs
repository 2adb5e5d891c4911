//! Blind frequency search: correlation against frequency offset, plus a results panel

use plotters::coord::Shift;
use plotters::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use tracing::debug;

use super::{frequency_sweep, ChartGenerator};
use crate::error::Result;
use crate::style::{self, Scale, BACKGROUND, LIME, ORANGE, PANEL};
use crate::widgets::{
    closed, draw_banner, draw_centered_text, draw_text_panel, star_outline, DrawResult,
    LinePattern, PatternSwatch,
};

const TITLE: &str = "FREQUENCY SEARCH & ACQUISITION";
const FOOTER: &str = "Blind frequency search across ±5000 Hz range with 100 Hz resolution";

/// Doppler offset the signal was actually transmitted with
pub const TRUE_DOPPLER_HZ: f64 = 3500.0;
/// Doppler offset the search reported
pub const DETECTED_DOPPLER_HZ: f64 = -900.0;

const CORRELATION_WIDTH_HZ: f64 = 1000.0;
const NOISE_STD_DEV: f64 = 0.05;

// The peak line is kept as recorded, even though the plotted peak is near 1.0.
const RESULTS: [&str; 19] = [
    "╔═══════════════════════════════════════════╗",
    "║    FREQUENCY SEARCH RESULTS               ║",
    "╠═══════════════════════════════════════════╣",
    "║                                           ║",
    "║  Search Parameters:                       ║",
    "║  ├─ True Doppler:      3500.0 Hz         ║",
    "║  ├─ Search Range:      ±5000.0 Hz        ║",
    "║  └─ Step Size:         100.0 Hz          ║",
    "║                                           ║",
    "║  Detection Results:                       ║",
    "║  ├─ Estimated:         -900.0 Hz         ║",
    "║  ├─ Frequency Error:   -4400.0 Hz        ║",
    "║  ├─ Correlation Peak:  0.0 (No lock)    ║",
    "║  └─ Accuracy:          -25.7%            ║",
    "║                                           ║",
    "║  Status:  ⚠ NEEDS TUNING                 ║",
    "║  Signal too weak or outside search range ║",
    "║                                           ║",
    "╚═══════════════════════════════════════════╝",
];

/// Noise-free correlation: unit Gaussian peak centred on the true Doppler offset
pub fn ideal_correlation(freq_hz: f64) -> f64 {
    let offset = freq_hz - TRUE_DOPPLER_HZ;
    (-(offset * offset) / (2.0 * CORRELATION_WIDTH_HZ * CORRELATION_WIDTH_HZ)).exp()
}

/// Sample the search sweep, adding Gaussian noise and clamping into [0, 1]
pub fn correlation_curve<R: Rng + ?Sized>(rng: &mut R) -> Result<Vec<(f64, f64)>> {
    let noise = Normal::new(0.0, NOISE_STD_DEV)?;
    Ok(frequency_sweep()
        .map(|f| {
            let value = ideal_correlation(f) + noise.sample(&mut *rng);
            (f, value.clamp(0.0, 1.0))
        })
        .collect())
}

/// Vertical line marking a frequency of interest on the correlation chart
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceMarker {
    pub label: String,
    pub frequency_hz: f64,
    pub color: RGBColor,
    pub pattern: LinePattern,
}

/// The true and detected Doppler markers, in drawing order
pub fn reference_markers() -> [ReferenceMarker; 2] {
    [
        ReferenceMarker {
            label: format!("True Doppler ({:.0} Hz)", TRUE_DOPPLER_HZ),
            frequency_hz: TRUE_DOPPLER_HZ,
            color: LIME,
            pattern: LinePattern::Dashed,
        },
        ReferenceMarker {
            label: format!("Detected ({:.0} Hz)", DETECTED_DOPPLER_HZ),
            frequency_hz: DETECTED_DOPPLER_HZ,
            color: RED,
            pattern: LinePattern::Dotted,
        },
    ]
}

/// Renders `frequency_search.png`
///
/// The correlation noise is drawn once, when the generator is built.
#[derive(Debug, Clone)]
pub struct SearchGenerator {
    curve: Vec<(f64, f64)>,
}

impl SearchGenerator {
    /// Generator with noise seeded from the operating system
    pub fn new() -> Result<Self> {
        Self::from_rng(&mut StdRng::from_entropy())
    }

    /// Generator with reproducible noise
    ///
    /// # Example
    /// ```
    /// use satviz::generator::SearchGenerator;
    ///
    /// let a = SearchGenerator::with_seed(7).unwrap();
    /// let b = SearchGenerator::with_seed(7).unwrap();
    /// assert_eq!(a.curve(), b.curve());
    /// ```
    pub fn with_seed(seed: u64) -> Result<Self> {
        Self::from_rng(&mut StdRng::seed_from_u64(seed))
    }

    fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Result<Self> {
        let curve = correlation_curve(rng)?;
        let generator = Self { curve };
        debug!(peak = generator.peak(), "correlation curve sampled");
        Ok(generator)
    }

    /// (frequency offset Hz, correlation) pairs over the search sweep
    pub fn curve(&self) -> &[(f64, f64)] {
        &self.curve
    }

    /// Largest correlation value on the curve
    pub fn peak(&self) -> f64 {
        self.curve.iter().fold(0.0f64, |peak, &(_, c)| peak.max(c))
    }

    fn draw_correlation<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        scale: Scale,
    ) -> DrawResult<DB> {
        const Y_MAX: f64 = 1.1;

        let mut chart = ChartBuilder::on(area)
            .caption("Frequency Search Correlation", style::title_font(scale))
            .margin(scale.px(60.0))
            .x_label_area_size(scale.px(180.0))
            .y_label_area_size(scale.px(220.0))
            .build_cartesian_2d(-5500f64..5500f64, 0f64..Y_MAX)?;

        chart
            .configure_mesh()
            .x_desc("Frequency Offset (Hz)")
            .y_desc("Correlation Metric")
            .x_labels(6)
            .x_label_formatter(&|f| format!("{:.0}", f))
            .y_label_formatter(&|c| format!("{:.1}", c))
            .axis_desc_style(style::axis_desc_font(scale))
            .label_style(style::tick_font(scale))
            .axis_style(style::axis_style(scale))
            .bold_line_style(style::grid_style(scale))
            .light_line_style(TRANSPARENT)
            .set_all_tick_mark_size(scale.px(8.0))
            .draw()?;

        let legend_len = scale.px(60.0);

        chart.draw_series(AreaSeries::new(
            self.curve.iter().copied(),
            0.0,
            MAGENTA.mix(0.4).filled(),
        ))?;
        let curve_style = MAGENTA.stroke_width(scale.stroke(6.0));
        chart
            .draw_series(LineSeries::new(self.curve.iter().copied(), curve_style))?
            .label("Correlation")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + legend_len, y)], curve_style));

        for marker in reference_markers() {
            let line_style = marker.color.mix(0.8).stroke_width(scale.stroke(5.0));
            let pattern = marker.pattern;
            let segments =
                pattern.segments((marker.frequency_hz, 0.0), (marker.frequency_hz, Y_MAX));
            chart
                .draw_series(
                    segments
                        .into_iter()
                        .map(|[a, b]| PathElement::new(vec![a, b], line_style)),
                )?
                .label(marker.label)
                .legend(move |start| {
                    PatternSwatch::new(start, legend_len, pattern, line_style)
                });
        }

        let star = star_outline(scale.marker_radius(3000.0));
        chart.draw_series(std::iter::once(
            EmptyElement::at((TRUE_DOPPLER_HZ, self.peak()))
                + Polygon::new(star.clone(), LIME.filled())
                + PathElement::new(closed(star), WHITE.stroke_width(scale.stroke(3.0))),
        ))?;

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .margin(scale.px(20.0))
            .legend_area_size(scale.px(80.0))
            .label_font(style::legend_font(scale, &WHITE))
            .background_style(PANEL.filled())
            .border_style(CYAN.stroke_width(scale.stroke(1.5)))
            .draw()?;

        Ok(())
    }
}

impl ChartGenerator for SearchGenerator {
    fn file_name(&self) -> &'static str {
        "frequency_search.png"
    }

    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB> {
        let scale = Scale::of(root);
        root.fill(&BACKGROUND)?;

        let (width, height) = root.dim_in_pixel();
        let (header, rest) = root.split_vertically(scale.upx(240.0));
        let (body, footer) = rest.split_vertically(height - scale.upx(240.0) - scale.upx(200.0));
        let (chart_area, panel_area) = body.split_horizontally(width / 2);

        draw_banner(&header, scale, TITLE)?;
        self.draw_correlation(&chart_area, scale)?;
        draw_text_panel(&panel_area, scale, &RESULTS, 36.0, &YELLOW, &ORANGE)?;
        draw_centered_text(
            &footer,
            FOOTER,
            &style::font(scale, 40.0, FontStyle::Italic, &CYAN),
        )?;

        Ok(())
    }
}
