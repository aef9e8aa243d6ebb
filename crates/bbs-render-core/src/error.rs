//! Error types for the rendering engine.

use thiserror::Error;

use crate::ValidationResult;

/// Main error type for bbs-render operations.
#[derive(Debug, Error)]
pub enum Error {
    /// A content line is wider than the frame interior
    #[error("Content too wide: line {line_index} is {width} columns (max: {max})")]
    ContentTooWide {
        /// Index of the offending content line
        line_index: usize,
        /// Visual width of the line
        width: usize,
        /// Interior width of the frame
        max: usize,
    },

    /// A title does not fit inside the top border
    #[error("Title too wide: {width} columns (max: {max})")]
    TitleTooWide {
        /// Visual width of the decorated title
        width: usize,
        /// Room available inside the top border
        max: usize,
    },

    /// Frame width too small to hold borders and padding
    #[error("Invalid frame width: {0} (min: {})", crate::MIN_FRAME_WIDTH)]
    InvalidWidth(usize),

    /// Color name not recognized by the colorizer
    #[error("Unknown color: {0}")]
    UnknownColor(String),

    /// Template placeholder without a value
    #[error("Missing template variable: {0}")]
    MissingVariable(String),

    /// Template id not present in the registry
    #[error("Unknown template: {0}")]
    UnknownTemplate(String),

    /// A rendered line is wider than the output target
    #[error("Width exceeded: line {line_index} is {width} columns (max: {max})")]
    WidthExceeded {
        /// Index of the offending line
        line_index: usize,
        /// Visual width of the line
        width: usize,
        /// Width of the render context
        max: usize,
    },

    /// Final validation rejected the rendered frame
    #[error("Render validation failed: {}", .0.summary())]
    RenderValidation(ValidationResult),

    /// Frame builder produced a line of the wrong width
    #[error("Frame invariant violated: {}", .0.summary())]
    FrameInvariantViolation(ValidationResult),

    /// Invalid input or parameters (generic)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error signals a defect in the engine rather than bad input.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(
            self,
            Error::FrameInvariantViolation(_) | Error::RenderValidation(_)
        )
    }
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ValidationError;

    #[test]
    fn test_content_too_wide_error() {
        let err = Error::ContentTooWide {
            line_index: 2,
            width: 12,
            max: 7,
        };
        assert_eq!(
            err.to_string(),
            "Content too wide: line 2 is 12 columns (max: 7)"
        );
    }

    #[test]
    fn test_invalid_width_error() {
        let err = Error::InvalidWidth(3);
        assert_eq!(err.to_string(), "Invalid frame width: 3 (min: 4)");
    }

    #[test]
    fn test_unknown_color_error() {
        let err = Error::UnknownColor("chartreuse".to_string());
        assert_eq!(err.to_string(), "Unknown color: chartreuse");
    }

    #[test]
    fn test_missing_variable_error() {
        let err = Error::MissingVariable("user".to_string());
        assert_eq!(err.to_string(), "Missing template variable: user");
    }

    #[test]
    fn test_width_exceeded_error() {
        let err = Error::WidthExceeded {
            line_index: 0,
            width: 81,
            max: 80,
        };
        assert_eq!(
            err.to_string(),
            "Width exceeded: line 0 is 81 columns (max: 80)"
        );
    }

    #[test]
    fn test_render_validation_carries_all_errors() {
        let result = ValidationResult::from_errors(vec![
            ValidationError::width_mismatch(1, 10, 9),
            ValidationError::width_mismatch(3, 10, 11),
        ]);
        let err = Error::RenderValidation(result);
        assert!(err.is_invariant_violation());
        assert_eq!(err.to_string(), "Render validation failed: 2 error(s)");

        if let Error::RenderValidation(result) = err {
            assert_eq!(result.errors.len(), 2);
            assert_eq!(result.errors[1].line_index, 3);
        }
    }

    #[test]
    fn test_caller_errors_are_not_invariant_violations() {
        assert!(!Error::UnknownColor("x".to_string()).is_invariant_violation());
        assert!(!Error::InvalidWidth(1).is_invariant_violation());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }
}
