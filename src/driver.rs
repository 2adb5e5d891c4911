//! Top-level run: banner, the three generators in order, success summary

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::error;

use crate::canvas::Canvas;
use crate::error::Result;
use crate::generator::{ChartGenerator, MetricsGenerator, OrbitGenerator, SearchGenerator};

const RULE_WIDTH: usize = 70;

/// Render every chart into `dir`, writing progress text to `out`
///
/// Generators run strictly one after another. The first failure aborts the
/// run: no confirmation is printed for the failing image, the success banner
/// is skipped, and images already written are left in place.
///
/// # Returns
/// Paths of the written images, in generation order.
pub fn run<W: Write>(dir: &Path, canvas: Canvas, out: &mut W) -> Result<Vec<PathBuf>> {
    let rule = "=".repeat(RULE_WIDTH);

    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "  SATELLITE SIGNAL PROCESSING - VISUALIZATION GENERATOR")?;
    writeln!(out, "  Creating 3 × {} pixel PNG images...", canvas)?;
    writeln!(out, "{}", rule)?;
    writeln!(out)?;

    let written = vec![
        emit(&OrbitGenerator::new(), dir, canvas, out)?,
        emit(&MetricsGenerator::new(), dir, canvas, out)?,
        emit(&SearchGenerator::new()?, dir, canvas, out)?,
    ];

    writeln!(out)?;
    writeln!(out, "{}", rule)?;
    writeln!(out, "  ✓ ALL VISUALIZATIONS GENERATED SUCCESSFULLY!")?;
    writeln!(out, "{}", rule)?;
    writeln!(out)?;
    writeln!(out, "Output files:")?;
    for path in &written {
        let name = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
        writeln!(out, "  • {}", name)?;
    }
    writeln!(out)?;

    Ok(written)
}

fn emit<G: ChartGenerator, W: Write>(
    generator: &G,
    dir: &Path,
    canvas: Canvas,
    out: &mut W,
) -> Result<PathBuf> {
    let path = generator.generate(dir, canvas).map_err(|e| {
        error!(file = generator.file_name(), error = %e, "chart generation failed");
        e
    })?;
    writeln!(out, "✓ Generated: {} ({})", generator.file_name(), canvas)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_reports_each_image() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();

        let written = run(dir.path(), Canvas::square(400), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let names: Vec<String> = written
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(
            names,
            ["orbital_trajectory.png", "signal_metrics.png", "frequency_search.png"]
        );
        assert_eq!(text.matches("✓ Generated: ").count(), 3);
        assert!(text.contains("✓ Generated: signal_metrics.png (400x400)"));
        assert!(text.contains("Creating 3 × 400x400 pixel PNG images..."));
        assert!(text.contains("ALL VISUALIZATIONS GENERATED SUCCESSFULLY!"));
        assert!(text.contains("  • frequency_search.png"));
    }

    #[test]
    fn test_failure_skips_success_banner() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let mut out = Vec::new();

        assert!(run(&missing, Canvas::square(400), &mut out).is_err());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("VISUALIZATION GENERATOR"));
        assert!(!text.contains("✓ Generated"));
        assert!(!text.contains("SUCCESSFULLY"));
    }
}
