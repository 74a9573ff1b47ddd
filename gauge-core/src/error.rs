//! Conversion errors and their structured form for hosts
//!
//! The engine reports failures as `ConversionError` values. Hosts turn them
//! into `GaugeError`, which carries a machine-readable code and a suggestion
//! suitable for showing to a user or an LLM client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for conversion requests
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    /// Unknown category, or a unit that is not part of the category
    #[error("Invalid selection in '{category}': {detail}")]
    InvalidSelection { category: String, detail: String },

    /// Temperature scale pair with no conversion rule
    #[error("Unsupported temperature conversion: {from} to {to}")]
    UnsupportedTemperaturePair { from: String, to: String },
}

impl ConversionError {
    pub fn unknown_category(category: &str) -> Self {
        ConversionError::InvalidSelection {
            category: category.to_string(),
            detail: "unknown category".to_string(),
        }
    }

    pub fn unknown_unit(category: &str, unit: &str) -> Self {
        ConversionError::InvalidSelection {
            category: category.to_string(),
            detail: format!("unknown unit '{}'", unit),
        }
    }

    pub fn unsupported_temperature_pair(from: &str, to: &str) -> Self {
        ConversionError::UnsupportedTemperaturePair {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

/// Standard error codes (machine-readable)
pub mod codes {
    pub const INVALID_SELECTION: &str = "INVALID_SELECTION";
    pub const UNSUPPORTED_PAIR: &str = "UNSUPPORTED_PAIR";
    pub const ARG_MISSING: &str = "ARG_MISSING";
    pub const ARG_TYPE: &str = "ARG_TYPE";
}

/// Structured error returned to hosts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GaugeError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Underlying detail, when the message is a generic one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl GaugeError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            detail: None,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: add detail
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    // ========== Common Error Constructors ==========

    pub fn arg_missing(tool: &str, arg: &str) -> Self {
        Self::new(codes::ARG_MISSING, format!("{}: missing argument '{}'", tool, arg))
            .with_suggestion("Use tools/list to see the input schema")
    }

    pub fn arg_type(tool: &str, arg: &str, expected: &str) -> Self {
        Self::new(codes::ARG_TYPE, format!("{}: argument '{}' must be {}", tool, arg, expected))
    }
}

impl std::fmt::Display for GaugeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for GaugeError {}

impl From<ConversionError> for GaugeError {
    fn from(err: ConversionError) -> Self {
        let detail = err.to_string();
        match err {
            ConversionError::InvalidSelection { .. } => {
                Self::new(codes::INVALID_SELECTION, "Invalid conversion. Please check your selection.")
                    .with_suggestion("Use list_categories and list_units to pick valid names")
                    .with_detail(detail)
            }
            ConversionError::UnsupportedTemperaturePair { .. } => {
                Self::new(codes::UNSUPPORTED_PAIR, "Invalid temperature conversion")
                    .with_suggestion("Use Celsius, Fahrenheit or Kelvin")
                    .with_detail(detail)
            }
        }
    }
}
