//! Validation error types

/// Why a draft value failed its column's validation rule.
///
/// Validation errors block the commit and leave the stored value
/// untouched; they are recoverable by further local edits.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// A `required` rule rejected a null or empty value.
    #[error("a value is required")]
    Required,

    /// A numeric value fell below the configured minimum.
    #[error("value {actual} is below the minimum {min}")]
    BelowMin { min: f64, actual: f64 },

    /// A numeric value exceeded the configured maximum.
    #[error("value {actual} exceeds the maximum {max}")]
    AboveMax { max: f64, actual: f64 },

    /// Text was shorter than the configured minimum length.
    #[error("text length {actual} is below the minimum {min}")]
    TooShort { min: usize, actual: usize },

    /// Text was longer than the configured maximum length.
    #[error("text length {actual} exceeds the maximum {max}")]
    TooLong { max: usize, actual: usize },

    /// Text did not match the configured pattern.
    #[error("value does not match pattern `{pattern}`")]
    Pattern { pattern: String },

    /// The configured pattern itself failed to compile.
    #[error("invalid validation pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },

    /// A custom rule rejected the value with a message.
    #[error("{0}")]
    Custom(String),
}
