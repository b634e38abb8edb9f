//! Errors raised while translating a figure description.

use thiserror::Error;

use crate::plotting::PlotError;

/// Result type for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;

/// Why a figure description could not be rendered.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// The description is structurally invalid. Always raised before any
    /// plotting call.
    #[error("configuration error at {location}: {message}")]
    Configuration { location: String, message: String },

    #[error("unsupported plot kind '{kind}' at {location}")]
    UnsupportedKind { kind: String, location: String },

    #[error(transparent)]
    Plot(#[from] PlotError),
}

impl LayoutError {
    pub(crate) fn config(location: impl Into<String>, message: impl Into<String>) -> Self {
        LayoutError::Configuration {
            location: location.into(),
            message: message.into(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, LayoutError::Configuration { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_location() {
        let err = LayoutError::config("row 1, column 2", "no left axis group");
        assert_eq!(err.to_string(), "configuration error at row 1, column 2: no left axis group");

        let err = LayoutError::UnsupportedKind {
            kind: "violin".into(),
            location: "row 1, column 1, axis group 1, series 1".into(),
        };
        assert!(err.to_string().contains("'violin'"));
    }

    #[test]
    fn test_plot_error_passes_through() {
        let err: LayoutError = PlotError::InvalidData("x and y differ".into()).into();
        assert_eq!(err.to_string(), "Invalid data: x and y differ");
        assert!(!err.is_configuration());
    }
}
