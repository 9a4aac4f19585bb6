//! Harvest parameters and the validation gate that runs before any request.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire format requested from the feed service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    #[default]
    Json,
    Xml,
}

impl FeedFormat {
    /// Trailing path segment the feed service uses to select this format.
    #[must_use]
    pub fn suffix(self) -> &'static str {
        match self {
            FeedFormat::Json => "json",
            FeedFormat::Xml => "xml",
        }
    }
}

impl fmt::Display for FeedFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

impl FromStr for FeedFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(FeedFormat::Json),
            "xml" => Ok(FeedFormat::Xml),
            other => Err(format!("unknown feed format \"{other}\" (expected json or xml)")),
        }
    }
}

/// Everything one harvest call needs. Constructed once per call and never
/// mutated after [`validate`] accepts it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarvestParameters {
    pub store_id: String,
    pub countries_code: Vec<String>,
    #[serde(default)]
    pub format: FeedFormat,
    /// Minimum gap between two successive feed requests, in milliseconds.
    #[serde(default, alias = "delay")]
    pub delay_ms: u64,
}

impl HarvestParameters {
    #[must_use]
    pub fn new(store_id: impl Into<String>, countries_code: Vec<String>) -> Self {
        Self {
            store_id: store_id.into(),
            countries_code,
            format: FeedFormat::default(),
            delay_ms: 0,
        }
    }

    #[must_use]
    pub fn with_format(mut self, format: FeedFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    /// Runs [`validate`] and turns a non-empty violation list into an error.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidParameters`] carrying every violation found.
    pub fn into_validated(self) -> Result<Self, InvalidParameters> {
        let violations = validate(&self);
        if violations.is_empty() {
            Ok(self)
        } else {
            Err(InvalidParameters::new(violations))
        }
    }
}

/// One rule broken by a [`HarvestParameters`] value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Field path, e.g. `store_id` or `countries_code[1]`.
    pub path: String,
    pub reason: String,
}

impl Violation {
    fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.reason)
    }
}

/// Parameters rejected by the validation gate. Carries the full violation
/// list, not just the first.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} ({})", format_violations(.violations))]
pub struct InvalidParameters {
    pub message: String,
    pub violations: Vec<Violation>,
}

impl InvalidParameters {
    #[must_use]
    pub fn new(violations: Vec<Violation>) -> Self {
        Self {
            message: "Please enter all required parameters.".to_owned(),
            violations,
        }
    }
}

fn format_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Checks `params` against the harvest parameter rules. Pure; returns every
/// violation in field order, or an empty list when the parameters are usable.
#[must_use]
pub fn validate(params: &HarvestParameters) -> Vec<Violation> {
    let mut violations = Vec::new();

    if params.store_id.trim().is_empty() {
        violations.push(Violation::new("store_id", "must be a non-empty identifier"));
    }

    if params.countries_code.is_empty() {
        violations.push(Violation::new(
            "countries_code",
            "must contain at least one country code",
        ));
    }

    for (idx, code) in params.countries_code.iter().enumerate() {
        let is_two_letters = code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic());
        if !is_two_letters {
            violations.push(Violation::new(
                format!("countries_code[{idx}]"),
                format!("\"{code}\" is not a two-letter country code"),
            ));
        }
    }

    violations
}

#[cfg(test)]
#[path = "params_test.rs"]
mod tests;
