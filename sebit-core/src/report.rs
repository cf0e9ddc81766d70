//! Summary report types and renderers.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::request::AsOf;

/// The best or worst performer of a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SeriesHighlight {
    /// Model identifier.
    pub model: String,
    /// Headline amount, rounded to 2 places.
    pub headline_amount: f64,
}

/// Statistics for one series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummarySeriesAggregate {
    /// Series label.
    pub series: String,
    /// Number of entries in the series.
    pub model_count: usize,
    /// Sum of headline amounts.
    pub headline_total: f64,
    /// Mean headline amount.
    pub headline_average: f64,
    /// Smallest headline amount.
    pub headline_min: f64,
    /// Largest headline amount.
    pub headline_max: f64,
    /// Entry with the largest headline amount.
    pub top_model: SeriesHighlight,
    /// Entry with the smallest headline amount.
    pub bottom_model: SeriesHighlight,
}

/// One entry as echoed in a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryEntryResult {
    /// Series label.
    pub series: String,
    /// Model identifier.
    pub model: String,
    /// Headline amount, rounded to 2 places.
    pub headline_amount: f64,
    /// Currency label.
    pub currency: Option<String>,
    /// Details as a plain mapping.
    #[schema(value_type = Object)]
    pub details: Map<String, Value>,
}

/// Consolidated report for one request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    /// Report label.
    pub report_label: String,
    /// Capture timestamp, as received.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<AsOf>,
    /// Number of entries across all series.
    pub total_models: usize,
    /// Sum of every headline amount.
    pub overall_headline_total: f64,
    /// Per-series statistics, in first-seen order.
    pub series_summary: Vec<SummarySeriesAggregate>,
    /// Entries, in input order.
    pub entries: Vec<SummaryEntryResult>,
}

/// Render a report as Markdown.
pub fn render_markdown(report: &SummaryReport) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# {}\n", report.report_label);
    if let Some(as_of) = &report.as_of {
        let _ = writeln!(output, "- As of: {as_of}");
    }
    let _ = writeln!(output, "- Models: {}", report.total_models);
    let _ = writeln!(
        output,
        "- Overall headline total: {:.2}\n",
        report.overall_headline_total
    );
    append_series_table(&mut output, &report.series_summary);
    append_entry_table(&mut output, &report.entries);
    output
}

/// Render any serializable report payload as JSON.
pub fn render_json<T: Serialize + ?Sized>(payload: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(payload)
}

fn append_series_table(output: &mut String, series: &[SummarySeriesAggregate]) {
    if series.is_empty() {
        let _ = writeln!(output, "## Series\nNo series reported.\n");
        return;
    }
    let _ = writeln!(output, "## Series\n");
    let _ = writeln!(
        output,
        "| Series | Models | Total | Average | Min | Max | Top | Bottom |"
    );
    let _ = writeln!(output, "|---|---:|---:|---:|---:|---:|---|---|");
    for aggregate in series {
        let _ = writeln!(
            output,
            "| {} | {} | {:.2} | {:.2} | {:.2} | {:.2} | {} ({:.2}) | {} ({:.2}) |",
            aggregate.series,
            aggregate.model_count,
            aggregate.headline_total,
            aggregate.headline_average,
            aggregate.headline_min,
            aggregate.headline_max,
            aggregate.top_model.model,
            aggregate.top_model.headline_amount,
            aggregate.bottom_model.model,
            aggregate.bottom_model.headline_amount,
        );
    }
    let _ = writeln!(output);
}

fn append_entry_table(output: &mut String, entries: &[SummaryEntryResult]) {
    if entries.is_empty() {
        let _ = writeln!(output, "## Entries\nNo entries reported.\n");
        return;
    }
    let _ = writeln!(output, "## Entries\n");
    let _ = writeln!(output, "| Series | Model | Headline | Currency |");
    let _ = writeln!(output, "|---|---|---:|---|");
    for entry in entries {
        let _ = writeln!(
            output,
            "| {} | {} | {:.2} | {} |",
            entry.series,
            entry.model,
            entry.headline_amount,
            entry.currency.as_deref().unwrap_or("-"),
        );
    }
    let _ = writeln!(output);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_report() -> SummaryReport {
        SummaryReport {
            report_label: "October Portfolio Update".to_string(),
            as_of: Some(AsOf::parse("2025-10-30T09:40:15.788Z").expect("as of")),
            total_models: 1,
            overall_headline_total: 5400.25,
            series_summary: vec![SummarySeriesAggregate {
                series: "Asset & Depreciation".to_string(),
                model_count: 1,
                headline_total: 5400.25,
                headline_average: 5400.25,
                headline_min: 5400.25,
                headline_max: 5400.25,
                top_model: SeriesHighlight {
                    model: "SEBIT-DDA".to_string(),
                    headline_amount: 5400.25,
                },
                bottom_model: SeriesHighlight {
                    model: "SEBIT-DDA".to_string(),
                    headline_amount: 5400.25,
                },
            }],
            entries: vec![SummaryEntryResult {
                series: "Asset & Depreciation".to_string(),
                model: "SEBIT-DDA".to_string(),
                headline_amount: 5400.25,
                currency: Some("KRW".to_string()),
                details: Map::new(),
            }],
        }
    }

    #[test]
    fn renders_markdown_tables() {
        let output = render_markdown(&sample_report());
        assert!(output.starts_with("# October Portfolio Update"));
        assert!(output.contains("- As of: 2025-10-30T09:40:15.788Z"));
        assert!(output.contains("Overall headline total: 5400.25"));
        assert!(output.contains("| Asset & Depreciation | 1 | 5400.25"));
        assert!(output.contains("SEBIT-DDA (5400.25)"));
        assert!(output.contains("| SEBIT-DDA | 5400.25 | KRW |"));
    }

    #[test]
    fn renders_markdown_for_empty_report() {
        let mut report = sample_report();
        report.as_of = None;
        report.series_summary.clear();
        report.entries.clear();
        let output = render_markdown(&report);
        assert!(!output.contains("As of"));
        assert!(output.contains("No series reported."));
        assert!(output.contains("No entries reported."));
    }

    #[test]
    fn renders_json_payload() {
        let json = render_json(&sample_report()).expect("json");
        let parsed: serde_json::Value = serde_json::from_str(&json).expect("parse");
        assert_eq!(parsed["reportLabel"], "October Portfolio Update");
        assert_eq!(parsed["asOf"], "2025-10-30T09:40:15.788Z");
        assert_eq!(parsed["seriesSummary"][0]["topModel"]["model"], "SEBIT-DDA");
        assert_eq!(parsed["entries"][0]["headlineAmount"], 5400.25);
    }

    #[test]
    fn absent_as_of_is_omitted() {
        let mut report = sample_report();
        report.as_of = None;
        let parsed = serde_json::to_value(&report).expect("value");
        assert!(parsed.get("asOf").is_none());
        let back: SummaryReport = serde_json::from_value(parsed).expect("deserialize");
        assert_eq!(back, report);
    }
}
