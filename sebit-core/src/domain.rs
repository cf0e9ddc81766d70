//! Domain entities for SEBIT summaries.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::details::ModelDetails;

/// Details carried by a validated entry.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryDetails {
    /// Strictly validated, model-specific payload.
    Model(ModelDetails),
    /// Permissive string-to-number map with no per-model schema.
    Metrics(BTreeMap<String, f64>),
}

impl EntryDetails {
    /// Reduce the details to a plain field-to-value mapping.
    pub fn to_map(&self) -> Map<String, Value> {
        match self {
            Self::Model(details) => match serde_json::to_value(details) {
                Ok(Value::Object(map)) => map,
                _ => Map::new(),
            },
            Self::Metrics(metrics) => metrics
                .iter()
                .map(|(name, value)| (name.clone(), Value::from(*value)))
                .collect(),
        }
    }
}

/// One validated contribution to a report.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryEntry {
    /// Series the entry aggregates under.
    pub series: String,
    /// Model identifier.
    pub model: String,
    /// Headline figure aggregated across entries.
    pub headline_amount: f64,
    /// Currency label. Informational only.
    pub currency: Option<String>,
    /// Validated details.
    pub details: EntryDetails,
}
