//! Progress value type

use serde::Deserialize;
use serde::Serialize;

/// A progress cell value: a current amount against a target.
///
/// # Example
///
/// ```
/// use datagrid_lib::model::types::ProgressValue;
///
/// let p = ProgressValue::new(30.0, 100.0);
/// assert_eq!(p.percent(), 30.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProgressValue {
    /// The current amount.
    pub current: f64,
    /// The target amount. Non-positive targets are normalized to 100 on save.
    pub target: f64,
}

impl ProgressValue {
    /// Creates a new progress value.
    pub fn new(current: f64, target: f64) -> Self {
        Self { current, target }
    }

    /// Returns completion as a percentage, clamped to `[0, 100]`.
    pub fn percent(&self) -> f64 {
        if self.target <= 0.0 {
            return 0.0;
        }
        (self.current / self.target * 100.0).clamp(0.0, 100.0)
    }
}

impl From<f64> for ProgressValue {
    fn from(current: f64) -> Self {
        Self {
            current,
            target: 100.0,
        }
    }
}
