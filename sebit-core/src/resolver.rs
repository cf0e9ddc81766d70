//! Turns report requests into uniform, validated entry lists.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::domain::{EntryDetails, SummaryEntry};
use crate::error::{FieldIssue, Result, SummaryError};
use crate::registry::{ModelCatalog, StaticCatalog};
use crate::request::{DetailMode, EntryInput, ModelOutput, SummaryReportRequest};
use crate::validator::{DetailValidator, coerce_decimal, validate_details};

/// Resolves the entry source of a request.
///
/// Resolution is all-or-nothing: the first invalid entry aborts the request
/// and nothing is aggregated.
#[derive(Debug, Clone, Default)]
pub struct EntryResolver<C = StaticCatalog> {
    validator: DetailValidator<C>,
    mode: DetailMode,
}

impl EntryResolver<StaticCatalog> {
    /// Create a resolver over the static registry.
    pub fn new(mode: DetailMode) -> Self {
        Self {
            validator: DetailValidator::new(),
            mode,
        }
    }
}

impl<C: ModelCatalog> EntryResolver<C> {
    /// Create a resolver over a custom catalogue.
    pub fn with_catalog(catalog: C, mode: DetailMode) -> Self {
        Self {
            validator: DetailValidator::with_catalog(catalog),
            mode,
        }
    }

    /// Validation mode applied to pre-built entries.
    pub fn mode(&self) -> DetailMode {
        self.mode
    }

    /// Produce the validated entries of a request, in input order.
    ///
    /// Pre-built `entries` win over `modelOutputs` when both are non-empty.
    /// A `modelOutputs` list that is present but empty is rejected outright.
    pub fn resolve(&self, request: &SummaryReportRequest) -> Result<Vec<SummaryEntry>> {
        if request.model_outputs.as_ref().is_some_and(Vec::is_empty) {
            return Err(SummaryError::EmptySourceList);
        }
        let entries = request.entries.as_deref().unwrap_or_default();
        let outputs = request.model_outputs.as_deref().unwrap_or_default();

        if !entries.is_empty() {
            if !outputs.is_empty() {
                log::debug!(
                    "request carries both sources; ignoring {} model outputs",
                    outputs.len()
                );
            }
            log::debug!(
                "resolving {} pre-built entries in {} mode",
                entries.len(),
                self.mode
            );
            return entries
                .iter()
                .enumerate()
                .map(|(index, input)| self.resolve_entry(index, input))
                .collect();
        }

        if !outputs.is_empty() {
            log::debug!("resolving {} raw model outputs", outputs.len());
            return outputs
                .iter()
                .map(|output| self.resolve_output(output))
                .collect();
        }

        Err(SummaryError::EmptySourceList)
    }

    fn resolve_output(&self, output: &ModelOutput) -> Result<SummaryEntry> {
        self.validator
            .validate(&output.model_name, &output.payload, output.currency.clone())
    }

    fn resolve_entry(&self, index: usize, input: &EntryInput) -> Result<SummaryEntry> {
        let model_label = match &input.model {
            Value::String(model) => model.clone(),
            Value::Null => String::new(),
            other => other.to_string(),
        };
        let malformed = |reason: &str, issues: Vec<FieldIssue>| SummaryError::MalformedEntry {
            index,
            model: model_label.clone(),
            reason: reason.to_string(),
            issues,
        };

        let Some(series) = non_blank(&input.series) else {
            return Err(malformed("series must be a non-blank string", Vec::new()));
        };
        let Some(model) = non_blank(&input.model) else {
            return Err(malformed("model must be a non-blank string", Vec::new()));
        };
        let headline_amount = match &input.headline_amount {
            Value::Null => return Err(malformed("headline amount is required", Vec::new())),
            value => coerce_decimal(value)
                .ok_or_else(|| malformed("headline amount must be a finite number", Vec::new()))?,
        };
        let empty = Map::new();
        let raw_details = match &input.details {
            Value::Object(details) => details,
            Value::Null => &empty,
            _ => return Err(malformed("details must be an object", Vec::new())),
        };

        let details = match self.mode {
            DetailMode::Strict => {
                let Some(registered) = self.validator.catalog().lookup(model) else {
                    return Err(malformed("model is not registered", Vec::new()));
                };
                let details = validate_details(&registered, raw_details)
                    .map_err(|issues| malformed("details do not match the model shape", issues))?;
                EntryDetails::Model(details)
            }
            DetailMode::Permissive => {
                let mut metrics = BTreeMap::new();
                let mut issues = Vec::new();
                for (name, value) in raw_details {
                    match coerce_decimal(value) {
                        Some(number) => {
                            metrics.insert(name.clone(), number);
                        }
                        None => issues.push(FieldIssue::new(name, "expected a finite number")),
                    }
                }
                if !issues.is_empty() {
                    return Err(malformed("details must map names to numbers", issues));
                }
                EntryDetails::Metrics(metrics)
            }
        };

        Ok(SummaryEntry {
            series: series.to_string(),
            model: model.to_string(),
            headline_amount,
            currency: input.currency.clone(),
            details,
        })
    }
}

fn non_blank(value: &Value) -> Option<&str> {
    value.as_str().filter(|text| !text.trim().is_empty())
}
