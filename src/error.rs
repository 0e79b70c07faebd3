use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while rendering plots or network diagrams.
///
/// A missing rendering dependency is not an error: the guards in
/// [`crate::plot::check_plotting`] and [`crate::net::check_graphviz`] warn
/// and the operation returns `Ok(None)`.
#[derive(Debug, Error)]
pub enum VisualizeError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Plot backend error: {0}")]
    Plot(String),

    #[error("dot exited with {status}: {stderr}")]
    GraphvizFailed { status: String, stderr: String },

    #[error("Failed to open viewer for {}: {source}", path.display())]
    Viewer {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[cfg(feature = "plot")]
impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for VisualizeError
where
    E: std::error::Error + Send + Sync,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        Self::Plot(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, VisualizeError>;
