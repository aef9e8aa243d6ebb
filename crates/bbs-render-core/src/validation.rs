//! Validation result types shared by the validator and the error type.

use serde::{Deserialize, Serialize};

/// A single mismatch found while inspecting a set of rendered lines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Index of the offending line (0-based)
    pub line_index: usize,
    /// Width the line should have
    pub expected_width: usize,
    /// Width the line actually has
    pub actual_width: usize,
    /// Human-readable description of the defect
    pub detail: String,
}

impl ValidationError {
    /// Create a width mismatch error with a generated detail message.
    pub fn width_mismatch(line_index: usize, expected_width: usize, actual_width: usize) -> Self {
        Self {
            line_index,
            expected_width,
            actual_width,
            detail: format!("expected width {expected_width}, found {actual_width}"),
        }
    }
}

/// Outcome of a validation pass. Never an `Err`; callers decide what to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when no errors were collected
    pub valid: bool,
    /// Every mismatch, in line order
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// A passing result.
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Build a result from collected errors; valid iff the list is empty.
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    /// Short summary used in error messages.
    pub fn summary(&self) -> String {
        if self.valid {
            "ok".to_string()
        } else {
            format!("{} error(s)", self.errors.len())
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}
