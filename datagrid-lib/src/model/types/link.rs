//! Link value type

use serde::Deserialize;
use serde::Serialize;

/// A link cell value: a URL plus a display title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LinkValue {
    /// The target URL.
    pub url: String,
    /// Display title; defaults to the URL when the user supplies none.
    pub title: String,
}

impl LinkValue {
    /// Creates a new link value.
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }

    /// Creates a link whose title is the URL itself.
    pub fn from_url(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            title: url.clone(),
            url,
        }
    }
}
