//! Shape validation for raw model payloads.

use serde_json::{Map, Value};

use crate::details::ModelDetails;
use crate::domain::{EntryDetails, SummaryEntry};
use crate::error::{FieldIssue, Result, SummaryError};
use crate::registry::{FieldKind, FieldSpec, ModelCatalog, ModelRegistryEntry, StaticCatalog};

/// Validates raw model outputs against the detail shapes of a catalogue.
#[derive(Debug, Clone, Default)]
pub struct DetailValidator<C = StaticCatalog> {
    catalog: C,
}

impl DetailValidator<StaticCatalog> {
    /// Create a validator over the static registry.
    pub fn new() -> Self {
        Self {
            catalog: StaticCatalog,
        }
    }
}

impl<C: ModelCatalog> DetailValidator<C> {
    /// Create a validator over a custom catalogue.
    pub fn with_catalog(catalog: C) -> Self {
        Self { catalog }
    }

    /// The catalogue models are looked up in.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Turn a raw `(model, payload, currency)` triple into a validated entry.
    ///
    /// The headline is read from the raw payload before the shape check, so a
    /// payload without its headline field reports that field specifically.
    pub fn validate(
        &self,
        model: &str,
        payload: &Map<String, Value>,
        currency: Option<String>,
    ) -> Result<SummaryEntry> {
        let entry = self
            .catalog
            .lookup(model)
            .ok_or_else(|| SummaryError::UnknownModel {
                model: model.to_string(),
            })?;

        let headline_amount = extract_headline(&entry, payload)?;
        let details = validate_details(&entry, payload).map_err(|issues| {
            SummaryError::InvalidDetailPayload {
                model: entry.model.to_string(),
                issues,
            }
        })?;

        Ok(SummaryEntry {
            series: entry.series.to_string(),
            model: entry.model.to_string(),
            headline_amount,
            currency,
            details: EntryDetails::Model(details),
        })
    }
}

/// Read and coerce the headline value of a raw payload.
pub fn extract_headline(entry: &ModelRegistryEntry, payload: &Map<String, Value>) -> Result<f64> {
    let value = match payload.get(entry.headline_field) {
        None | Some(Value::Null) => {
            return Err(SummaryError::MissingHeadlineField {
                model: entry.model.to_string(),
                field: entry.headline_field.to_string(),
            });
        }
        Some(value) => value,
    };
    coerce_decimal(value).ok_or_else(|| SummaryError::InvalidHeadlineValue {
        model: entry.model.to_string(),
        field: entry.headline_field.to_string(),
        value: value.to_string(),
    })
}

/// Check a payload against a model's shape and build its typed details.
///
/// Every offending field is reported, not only the first.
pub fn validate_details(
    entry: &ModelRegistryEntry,
    payload: &Map<String, Value>,
) -> std::result::Result<ModelDetails, Vec<FieldIssue>> {
    let mut issues = Vec::new();
    let normalized = check_shape(entry.detail_shape, payload, "", &mut issues);
    if !issues.is_empty() {
        return Err(issues);
    }
    ModelDetails::from_value(entry.detail_kind, Value::Object(normalized))
        .map_err(|err| vec![FieldIssue::new("details", err.to_string())])
}

/// Coerce a value to a finite decimal: JSON numbers and numeric strings.
pub fn coerce_decimal(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    number.is_finite().then_some(number)
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().and_then(integral_f64)),
        Value::String(text) => {
            let text = text.trim();
            text.parse::<i64>()
                .ok()
                .or_else(|| text.parse::<f64>().ok().and_then(integral_f64))
        }
        _ => None,
    }
}

fn integral_f64(number: f64) -> Option<i64> {
    let in_range = number >= i64::MIN as f64 && number < i64::MAX as f64;
    (number.is_finite() && number.fract() == 0.0 && in_range).then_some(number as i64)
}

fn coerce_flag(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(flag) => Some(*flag),
        Value::Number(number) => match number.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        Value::String(text) => match text.trim().to_lowercase().as_str() {
            "true" | "yes" | "on" | "1" => Some(true),
            "false" | "no" | "off" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

fn check_shape(
    shape: &[FieldSpec],
    payload: &Map<String, Value>,
    prefix: &str,
    issues: &mut Vec<FieldIssue>,
) -> Map<String, Value> {
    let mut normalized = Map::new();
    for spec in shape {
        let path = format!("{prefix}{}", spec.name);
        if let Some(value) = check_field(spec.kind, payload.get(spec.name), &path, issues) {
            normalized.insert(spec.name.to_string(), value);
        }
    }
    normalized
}

fn check_field(
    kind: FieldKind,
    value: Option<&Value>,
    path: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<Value> {
    let Some(value) = value else {
        if let FieldKind::Records(_) = kind {
            return Some(Value::Array(Vec::new()));
        }
        issues.push(FieldIssue::new(path, "field required"));
        return None;
    };

    let checked = match kind {
        FieldKind::Text => match value {
            Value::String(_) => Ok(value.clone()),
            _ => Err("expected a string"),
        },
        FieldKind::Decimal => coerce_decimal(value)
            .map(Value::from)
            .ok_or("expected a finite number"),
        FieldKind::NullableDecimal => match value {
            Value::Null => Ok(Value::Null),
            _ => coerce_decimal(value)
                .map(Value::from)
                .ok_or("expected a finite number or null"),
        },
        FieldKind::Integer => coerce_integer(value)
            .map(Value::from)
            .ok_or("expected an integer"),
        FieldKind::NullableInteger => match value {
            Value::Null => Ok(Value::Null),
            _ => coerce_integer(value)
                .map(Value::from)
                .ok_or("expected an integer or null"),
        },
        FieldKind::Flag => coerce_flag(value)
            .map(Value::Bool)
            .ok_or("expected a boolean"),
        FieldKind::Records(shape) => {
            return check_records(shape, value, path, issues);
        }
    };

    match checked {
        Ok(normalized) => Some(normalized),
        Err(problem) => {
            issues.push(FieldIssue::new(path, problem));
            None
        }
    }
}

fn check_records(
    shape: Option<&'static [FieldSpec]>,
    value: &Value,
    path: &str,
    issues: &mut Vec<FieldIssue>,
) -> Option<Value> {
    let Value::Array(items) = value else {
        issues.push(FieldIssue::new(path, "expected a list"));
        return None;
    };

    let before = issues.len();
    let mut records = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let item_path = format!("{path}[{index}]");
        let Value::Object(record) = item else {
            issues.push(FieldIssue::new(item_path, "expected an object"));
            continue;
        };
        match shape {
            Some(shape) => {
                let nested = check_shape(shape, record, &format!("{item_path}."), issues);
                records.push(Value::Object(nested));
            }
            None => records.push(item.clone()),
        }
    }
    (issues.len() == before).then_some(Value::Array(records))
}
