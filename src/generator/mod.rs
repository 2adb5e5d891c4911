pub mod metrics;
pub mod orbit;
pub mod search;

pub use metrics::MetricsGenerator;
pub use orbit::OrbitGenerator;
pub use search::SearchGenerator;

use std::fs;
use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters_svg::SVGBackend;
use tracing::{debug, info};

use crate::canvas::Canvas;
use crate::error::{Result, VizError};
use crate::widgets::DrawResult;

/// Evenly spaced frequency offsets used by the response and search charts
///
/// 101 points over [-5000, 5000] Hz, i.e. a 100 Hz step.
pub fn frequency_sweep() -> impl Iterator<Item = f64> {
    const POINTS: usize = 101;
    const LOW_HZ: f64 = -5000.0;
    const HIGH_HZ: f64 = 5000.0;
    (0..POINTS).map(|i| LOW_HZ + (HIGH_HZ - LOW_HZ) * i as f64 / (POINTS - 1) as f64)
}

/// Core trait for all chart generators
///
/// A generator owns its literal data and knows how to lay it out on a
/// drawing area. Each call to [`ChartGenerator::generate`] creates a fresh
/// figure, writes it, and releases it before returning.
pub trait ChartGenerator {
    /// Fixed output file name, relative to the output directory
    fn file_name(&self) -> &'static str;

    /// Draw the complete figure on `root`
    ///
    /// Layout sizes are derived from the pixel size of `root`, so any
    /// canvas produces the same picture at a different resolution.
    fn draw<DB: DrawingBackend>(&self, root: &DrawingArea<DB, Shift>) -> DrawResult<DB>;

    /// Render the figure as a PNG into `dir`, overwriting any existing file
    ///
    /// # Returns
    /// The path of the written image. The file is checked to exist and be non-empty.
    fn generate(&self, dir: &Path, canvas: Canvas) -> Result<PathBuf> {
        let path = dir.join(self.file_name());
        info!(file = %path.display(), size = %canvas, "rendering chart");

        {
            let root = BitMapBackend::new(&path, canvas.dimensions()).into_drawing_area();
            self.draw(&root)
                .map_err(|e| VizError::render(self.file_name(), e))?;
            root.present().map_err(|e| VizError::save(&path, e))?;
        }

        let bytes = fs::metadata(&path)
            .map_err(|source| VizError::Io {
                path: path.clone(),
                source,
            })?
            .len();
        if bytes == 0 {
            return Err(VizError::EmptyOutput(path));
        }
        debug!(file = %path.display(), bytes, "chart written");

        Ok(path)
    }

    /// Render the figure into an in-memory SVG document
    fn render_svg(&self, canvas: Canvas) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, canvas.dimensions()).into_drawing_area();
            self.draw(&root)
                .map_err(|e| VizError::render(self.file_name(), e))?;
            root.present()
                .map_err(|e| VizError::save(self.file_name(), e))?;
        }
        Ok(svg)
    }
}

#[cfg(test)]
pub(crate) mod test_util {
    use std::fs;
    use std::path::Path;

    /// Read width and height from the IHDR chunk of a PNG file
    pub fn png_dimensions(path: &Path) -> (u32, u32) {
        let data = fs::read(path).unwrap();
        assert_eq!(&data[1..4], b"PNG");
        let width = u32::from_be_bytes([data[16], data[17], data[18], data[19]]);
        let height = u32::from_be_bytes([data[20], data[21], data[22], data[23]]);
        (width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frequency_sweep() {
        let sweep: Vec<f64> = frequency_sweep().collect();
        assert_eq!(sweep.len(), 101);
        assert_eq!(sweep[0], -5000.0);
        assert_eq!(sweep[50], 0.0);
        assert_eq!(sweep[100], 5000.0);
        // 100 Hz resolution
        assert!((sweep[1] - sweep[0] - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_generate_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let result = OrbitGenerator::new().generate(&missing, Canvas::square(400));
        assert!(result.is_err());
        assert!(!missing.join("orbital_trajectory.png").exists());
    }
}
