//! Error type shared by the raster, the view and the persistence helpers.

use thiserror::Error;

/// Top-level error type for the waterfall public API.
#[derive(Debug, Error)]
pub enum WaterfallError {
    /// A raster cannot exist with zero rows or zero columns.
    #[error("invalid raster dimensions: {history_extent} rows x {layer_points} points")]
    InvalidDimensions {
        history_extent: usize,
        layer_points: usize,
    },
    /// A row was offered whose length differs from the layer width.
    #[error("row length mismatch: expected {expected} points, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    /// A coordinate lies outside the raster envelope.
    #[error("coordinate ({x}, {y}) is outside the raster")]
    OutOfBounds { x: f64, y: f64 },
    /// The view has no raster yet (`set_dimensions` was never called).
    #[error("waterfall has no dimensions yet")]
    Uninitialized,
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Convenience alias so callers can write `Result<T>` instead of `Result<T, WaterfallError>`.
pub type Result<T> = std::result::Result<T, WaterfallError>;
