//! Draft value validation
//!
//! Pure evaluation of a column's [`ValidationRule`] against a draft value.
//! Used by the edit lifecycle controller before a commit; a failed rule
//! blocks the store write and the draft is discarded.

use std::fmt;
use std::sync::Arc;

use regex::Regex;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ValidationError;
use crate::model::CellValue;

/// A custom validation predicate. Returns an error message to reject the
/// value, or `None` to accept it.
pub type CustomRule = Arc<dyn Fn(&CellValue) -> Option<String> + Send + Sync>;

/// Validation applied to a draft value when a cell edit commits.
///
/// `min`/`max` bound numeric values, and text length for text values.
/// `pattern` is a regular expression matched against text values. The
/// `custom` predicate is host-supplied and excluded from serialization
/// and equality.
///
/// # Example
///
/// ```
/// use datagrid_lib::validation::{validate_value, ValidationRule};
/// use datagrid_lib::model::CellValue;
///
/// let rule = ValidationRule::new().required().min(1.0);
/// assert!(validate_value(&rule, &CellValue::Null).is_err());
/// assert!(validate_value(&rule, &CellValue::from(3.0)).is_ok());
/// ```
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct ValidationRule {
    /// Rejects null and empty-equivalent values.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    /// Minimum numeric value, or minimum text length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum numeric value, or maximum text length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Regular expression matched against text values.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    /// Host-supplied predicate; not serialized, ignored by equality.
    #[serde(skip)]
    pub custom: Option<CustomRule>,
}

impl ValidationRule {
    /// Creates an empty rule that accepts everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires a non-empty value.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the minimum bound.
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Sets the maximum bound.
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    /// Sets the text pattern.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Sets the custom predicate.
    pub fn custom(mut self, rule: impl Fn(&CellValue) -> Option<String> + Send + Sync + 'static) -> Self {
        self.custom = Some(Arc::new(rule));
        self
    }
}

impl fmt::Debug for ValidationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationRule")
            .field("required", &self.required)
            .field("min", &self.min)
            .field("max", &self.max)
            .field("pattern", &self.pattern)
            .field("custom", &self.custom.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

impl PartialEq for ValidationRule {
    fn eq(&self, other: &Self) -> bool {
        self.required == other.required
            && self.min == other.min
            && self.max == other.max
            && self.pattern == other.pattern
    }
}

/// Evaluates a rule against a draft value.
///
/// Null values only ever fail the `required` check: bounds and patterns
/// apply to present values, so optional columns stay optional.
pub fn validate_value(rule: &ValidationRule, value: &CellValue) -> Result<(), ValidationError> {
    if rule.required && value.is_empty() {
        return Err(ValidationError::Required);
    }
    if value.is_null() {
        return Ok(());
    }

    if let CellValue::Number(n) = value {
        if let Some(min) = rule.min {
            if *n < min {
                return Err(ValidationError::BelowMin { min, actual: *n });
            }
        }
        if let Some(max) = rule.max {
            if *n > max {
                return Err(ValidationError::AboveMax { max, actual: *n });
            }
        }
    }

    if let CellValue::Text(text) = value {
        let len = text.chars().count();
        if let Some(min) = rule.min {
            let min = min.max(0.0) as usize;
            if len < min {
                return Err(ValidationError::TooShort { min, actual: len });
            }
        }
        if let Some(max) = rule.max {
            let max = max.max(0.0) as usize;
            if len > max {
                return Err(ValidationError::TooLong { max, actual: len });
            }
        }
        if let Some(pattern) = &rule.pattern {
            let re = Regex::new(pattern).map_err(|err| ValidationError::InvalidPattern {
                pattern: pattern.clone(),
                reason: err.to_string(),
            })?;
            if !re.is_match(text) {
                return Err(ValidationError::Pattern {
                    pattern: pattern.clone(),
                });
            }
        }
    }

    if let Some(custom) = &rule.custom {
        if let Some(message) = custom(value) {
            return Err(ValidationError::Custom(message));
        }
    }

    Ok(())
}
