//! Error types for chart rendering

use std::io;
use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Result type for rendering operations
pub type Result<T> = std::result::Result<T, VizError>;

/// Errors that can occur while rendering and saving charts
#[derive(Error, Debug)]
pub enum VizError {
    /// A plotters drawing call failed
    #[error("Failed to render {file}: {message}")]
    Render { file: String, message: String },

    /// The backend could not write the finished image
    #[error("Failed to save {}: {message}", .path.display())]
    Save { path: PathBuf, message: String },

    /// The written image could not be inspected
    #[error("Failed to inspect {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The backend reported success but left an empty file
    #[error("Output file is empty: {}", .0.display())]
    EmptyOutput(PathBuf),

    /// Correlation noise distribution rejected its parameters
    #[error("Invalid noise distribution: {0}")]
    Noise(#[from] rand_distr::NormalError),

    /// Progress output could not be written
    #[error("Failed to write console output: {0}")]
    Console(#[from] io::Error),
}

impl VizError {
    pub(crate) fn render<E>(file: &str, err: DrawingAreaErrorKind<E>) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        VizError::Render {
            file: file.to_string(),
            message: err.to_string(),
        }
    }

    pub(crate) fn save<E>(path: impl Into<PathBuf>, err: DrawingAreaErrorKind<E>) -> Self
    where
        E: std::error::Error + Send + Sync,
    {
        VizError::Save {
            path: path.into(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_file() {
        let err = VizError::Render {
            file: "signal_metrics.png".into(),
            message: "bad style".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to render signal_metrics.png: bad style"
        );

        let err = VizError::EmptyOutput(PathBuf::from("/tmp/orbital_trajectory.png"));
        assert!(err.to_string().contains("/tmp/orbital_trajectory.png"));
    }

    #[test]
    fn test_console_error_converts() {
        fn write_banner() -> Result<()> {
            Err::<(), _>(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))?;
            Ok(())
        }
        assert!(matches!(write_banner(), Err(VizError::Console(_))));
    }
}
