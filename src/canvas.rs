//! Figure geometry
//!
//! Every chart is authored against a 40 inch square figure at 100 DPI.
//! Smaller canvases keep the same layout, scaled down.

use std::fmt;

/// Dots per inch used to convert the figure size to pixels
pub const DPI: u32 = 100;

/// Edge length of the square figure in inches
pub const FIGURE_INCHES: u32 = 40;

/// Edge length in pixels that all layout constants are expressed in
pub const REFERENCE_EDGE_PX: u32 = DPI * FIGURE_INCHES;

/// Pixel dimensions of one output image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    /// Create a square canvas
    ///
    /// # Example
    /// ```
    /// use satviz::Canvas;
    ///
    /// let preview = Canvas::square(800);
    /// assert_eq!(preview.dimensions(), (800, 800));
    /// ```
    pub const fn square(edge: u32) -> Self {
        Self {
            width: edge,
            height: edge,
        }
    }

    /// Canvas for a square figure of `inches` rendered at `dpi`
    pub const fn from_figure(inches: u32, dpi: u32) -> Self {
        Self::square(inches * dpi)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::from_figure(FIGURE_INCHES, DPI)
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_4000_square() {
        let canvas = Canvas::default();
        assert_eq!(canvas.dimensions(), (4000, 4000));
        assert_eq!(canvas.width, REFERENCE_EDGE_PX);
        assert_eq!(canvas.to_string(), "4000x4000");
    }

    #[test]
    fn test_from_figure() {
        assert_eq!(Canvas::from_figure(8, 50), Canvas::square(400));
    }
}
