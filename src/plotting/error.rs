//! Error types for the plotting library.

use std::io;

use thiserror::Error;

/// Errors raised by figure construction, plotting primitives and export.
#[derive(Debug, Error)]
pub enum PlotError {
    /// Error while writing an exported figure
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Data that a primitive cannot plot (mismatched lengths, non-finite bars, ...)
    #[error("Invalid data: {0}")]
    InvalidData(String),
    /// Invalid configuration or parameters
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    /// Empty data provided where non-empty data is required
    #[error("Empty data provided")]
    EmptyData,
}

/// Result type alias for plotting operations.
pub type PlotResult<T> = Result<T, PlotError>;
