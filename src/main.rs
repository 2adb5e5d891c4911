use std::io;
use std::path::Path;

use satviz::{driver, Canvas};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Diagnostics go to stderr so stdout carries only the progress banner
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(io::stderr)
        .init();

    let stdout = io::stdout();
    driver::run(Path::new("."), Canvas::default(), &mut stdout.lock())?;

    Ok(())
}
