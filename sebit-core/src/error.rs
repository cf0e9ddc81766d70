//! Error types for SEBIT summary aggregation.

use std::{error::Error, fmt};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A single field that failed shape validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct FieldIssue {
    /// Field path, e.g. `quarterly_adjustments[1].quarter_index`.
    pub field: String,
    /// What was wrong with the value.
    pub problem: String,
}

impl FieldIssue {
    /// Create an issue for a field path.
    pub fn new(field: impl Into<String>, problem: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            problem: problem.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.field, self.problem)
    }
}

/// Error type for report resolution.
///
/// Every variant is a caller input error. None of them are retryable.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryError {
    /// A raw model output names a model that is not registered.
    UnknownModel {
        /// The unregistered identifier.
        model: String,
    },
    /// A raw payload does not satisfy its model's detail shape.
    InvalidDetailPayload {
        /// Model whose shape was violated.
        model: String,
        /// Every offending field.
        issues: Vec<FieldIssue>,
    },
    /// The headline field is absent or null.
    MissingHeadlineField {
        /// Model whose payload was checked.
        model: String,
        /// Name of the headline field.
        field: String,
    },
    /// The headline field holds something that is not a finite number.
    InvalidHeadlineValue {
        /// Model whose payload was checked.
        model: String,
        /// Name of the headline field.
        field: String,
        /// The offending value, as JSON.
        value: String,
    },
    /// Neither `entries` nor `modelOutputs` carried anything.
    EmptySourceList,
    /// A pre-built entry failed its own shape validation.
    MalformedEntry {
        /// Zero-based position of the entry in the request.
        index: usize,
        /// Model named by the entry.
        model: String,
        /// Summary of the failure.
        reason: String,
        /// Offending detail fields, if any.
        issues: Vec<FieldIssue>,
    },
}

impl SummaryError {
    /// Stable machine-readable identifier for the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownModel { .. } => "unknown_model",
            Self::InvalidDetailPayload { .. } => "invalid_detail_payload",
            Self::MissingHeadlineField { .. } => "missing_headline_field",
            Self::InvalidHeadlineValue { .. } => "invalid_headline_value",
            Self::EmptySourceList => "empty_source_list",
            Self::MalformedEntry { .. } => "malformed_entry",
        }
    }

    /// Model the error refers to, when there is one.
    pub fn model(&self) -> Option<&str> {
        match self {
            Self::UnknownModel { model }
            | Self::InvalidDetailPayload { model, .. }
            | Self::MissingHeadlineField { model, .. }
            | Self::InvalidHeadlineValue { model, .. }
            | Self::MalformedEntry { model, .. } => Some(model),
            Self::EmptySourceList => None,
        }
    }

    /// Offending field paths, when the error points at specific fields.
    pub fn fields(&self) -> Vec<String> {
        match self {
            Self::InvalidDetailPayload { issues, .. } | Self::MalformedEntry { issues, .. } => {
                issues.iter().map(|issue| issue.field.clone()).collect()
            }
            Self::MissingHeadlineField { field, .. } | Self::InvalidHeadlineValue { field, .. } => {
                vec![field.clone()]
            }
            Self::UnknownModel { .. } | Self::EmptySourceList => Vec::new(),
        }
    }
}

impl fmt::Display for SummaryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownModel { model } => {
                write!(f, "model '{model}' is not registered for summary aggregation")
            }
            Self::InvalidDetailPayload { model, issues } => {
                write!(f, "invalid details for model '{model}': ")?;
                write_issues(f, issues)
            }
            Self::MissingHeadlineField { model, field } => {
                write!(f, "model '{model}' output missing headline field '{field}'")
            }
            Self::InvalidHeadlineValue {
                model,
                field,
                value,
            } => write!(
                f,
                "model '{model}' headline field '{field}' is not numeric: {value}"
            ),
            Self::EmptySourceList => {
                write!(f, "either 'entries' or 'modelOutputs' must be provided")
            }
            Self::MalformedEntry {
                index,
                model,
                reason,
                issues,
            } => {
                write!(f, "entry #{index} (model '{model}') is malformed: {reason}")?;
                if issues.is_empty() {
                    return Ok(());
                }
                write!(f, ": ")?;
                write_issues(f, issues)
            }
        }
    }
}

impl Error for SummaryError {}

fn write_issues(f: &mut fmt::Formatter<'_>, issues: &[FieldIssue]) -> fmt::Result {
    for (position, issue) in issues.iter().enumerate() {
        if position > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{issue}")?;
    }
    Ok(())
}

/// Convenience result type for SEBIT core.
pub type Result<T> = std::result::Result<T, SummaryError>;
