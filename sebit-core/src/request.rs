//! Report request payloads.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Label used when a request does not name its report.
pub const DEFAULT_REPORT_LABEL: &str = "SEBIT Summary Report";

/// Timestamp the reported figures were captured at.
///
/// The value is checked to be an ISO 8601 date-time and then carried verbatim,
/// so a report echoes exactly what the caller sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, format = DateTime)]
pub struct AsOf(String);

impl AsOf {
    /// Validate and wrap a timestamp.
    pub fn parse(raw: &str) -> Result<Self, String> {
        let trimmed = raw.trim();
        let valid = DateTime::parse_from_rfc3339(trimmed).is_ok()
            || DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f%z").is_ok()
            || DateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M%z").is_ok()
            || NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
            || NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M").is_ok()
            || NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f").is_ok()
            || NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok();
        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(format!("'{raw}' is not an ISO 8601 timestamp"))
        }
    }

    /// The timestamp exactly as received.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for AsOf {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<AsOf> for String {
    fn from(value: AsOf) -> Self {
        value.0
    }
}

impl fmt::Display for AsOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How strictly pre-built entry details are checked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DetailMode {
    /// Details must satisfy the registered shape of the entry's model.
    #[default]
    Strict,
    /// Details may be any string-to-number map.
    Permissive,
}

impl FromStr for DetailMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "strict" => Ok(Self::Strict),
            "permissive" => Ok(Self::Permissive),
            other => Err(format!(
                "unknown detail mode '{other}' (expected strict or permissive)"
            )),
        }
    }
}

impl fmt::Display for DetailMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strict => f.write_str("strict"),
            Self::Permissive => f.write_str("permissive"),
        }
    }
}

/// A caller-built summary entry.
///
/// Fields are held as raw JSON so a wrong or missing value surfaces as a
/// malformed entry at its index instead of a request-level parse failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryInput {
    /// Series label.
    #[serde(default)]
    #[schema(value_type = String)]
    pub series: Value,
    /// Model identifier.
    #[serde(default)]
    #[schema(value_type = String)]
    pub model: Value,
    /// Headline figure. Numeric strings are accepted.
    #[serde(default, alias = "headline_amount")]
    #[schema(value_type = f64)]
    pub headline_amount: Value,
    /// Currency label.
    #[serde(default)]
    pub currency: Option<String>,
    /// Detail payload.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub details: Value,
}

/// A raw model output to be validated against the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ModelOutput {
    /// Registered model identifier, e.g. `SEBIT-DDA`.
    #[serde(alias = "model_name")]
    pub model_name: String,
    /// Raw output returned by the model.
    #[schema(value_type = Object)]
    pub payload: Map<String, Value>,
    /// Optional currency label for the headline.
    #[serde(default)]
    pub currency: Option<String>,
}

/// Request to build a summary report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReportRequest {
    /// Friendly label for the report.
    #[serde(default, alias = "report_label", skip_serializing_if = "Option::is_none")]
    pub report_label: Option<String>,
    /// When the figures were captured.
    #[serde(default, alias = "as_of", skip_serializing_if = "Option::is_none")]
    pub as_of: Option<AsOf>,
    /// Pre-built entries. Takes precedence over `modelOutputs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<EntryInput>>,
    /// Raw model outputs converted into entries.
    #[serde(default, alias = "model_outputs", skip_serializing_if = "Option::is_none")]
    pub model_outputs: Option<Vec<ModelOutput>>,
}

impl SummaryReportRequest {
    /// The label to report under, falling back to [`DEFAULT_REPORT_LABEL`].
    pub fn label(&self) -> &str {
        self.report_label
            .as_deref()
            .filter(|label| !label.is_empty())
            .unwrap_or(DEFAULT_REPORT_LABEL)
    }
}
