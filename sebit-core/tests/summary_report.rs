//! End-to-end report building through the public API.

use sebit_core::{
    DetailMode, SummaryError, SummaryReport, SummaryReportRequest, build_summary_report,
};
use serde_json::{Value, json};

fn request(value: Value) -> SummaryReportRequest {
    serde_json::from_value(value).expect("valid request json")
}

fn october_request() -> SummaryReportRequest {
    request(json!({
        "reportLabel": "October Portfolio Update",
        "asOf": "2025-10-30T09:40:15.788Z",
        "modelOutputs": [
            {
                "modelName": "SEBIT-DDA",
                "payload": {
                    "asset_label": "facility-line-1",
                    "schedule": [],
                    "total_depreciation": 233449.88,
                    "total_revaluation_gain_loss": 5400.25,
                    "total_unrecognised_revaluation": 250.0
                },
                "currency": "KRW"
            },
            {
                "modelName": "SEBIT-PSRAS",
                "payload": {
                    "portfolio_label": "insurance-cohort-1",
                    "assumed_revenue_recognition_rate": 0.4125,
                    "new_subscriber_average_payment": 263500.0,
                    "existing_subscriber_average_payment": 185200.0,
                    "payment_comparison_index": -0.0451,
                    "payment_index_baseline_amount": 512480000.0,
                    "pure_performance_break_even": 18250000.0,
                    "final_recognised_revenue": 6154364210.48
                },
                "currency": "KRW"
            }
        ]
    }))
}

#[test]
fn raw_outputs_produce_consolidated_report() {
    let report = build_summary_report(&october_request(), DetailMode::Strict).expect("report");

    assert_eq!(report.report_label, "October Portfolio Update");
    assert_eq!(
        report.as_of.as_ref().map(|as_of| as_of.as_str()),
        Some("2025-10-30T09:40:15.788Z")
    );
    assert_eq!(report.total_models, 2);
    assert_eq!(report.overall_headline_total, 6154369610.73);
    assert_eq!(report.series_summary.len(), 2);
    assert_eq!(report.series_summary[0].series, "Asset & Depreciation");
    assert_eq!(report.series_summary[0].model_count, 1);
    assert_eq!(report.series_summary[0].top_model.model, "SEBIT-DDA");
    assert_eq!(report.series_summary[1].series, "Insurance & Service Revenue");
    assert_eq!(report.series_summary[1].headline_total, 6154364210.48);

    let details = &report.entries[0].details;
    assert_eq!(details["asset_label"], "facility-line-1");
    assert_eq!(details["total_depreciation"], 233449.88);
    assert_eq!(report.entries[1].currency.as_deref(), Some("KRW"));
}

#[test]
fn permissive_entries_match_legacy_payloads() {
    let legacy = request(json!({
        "report_label": "Quarterly Consolidated",
        "entries": [
            {
                "series": "Asset & Depreciation",
                "model": "SEBIT-DDA",
                "headline_amount": 24726.78,
                "currency": "KRW",
                "details": { "total_depreciation": 233449.88 }
            },
            {
                "series": "Expense & Profit",
                "model": "SEBIT-PSRAS",
                "headline_amount": 6154364210.48,
                "currency": "KRW",
                "details": { "recognition_rate": 520.431561 }
            }
        ]
    }));

    let report = build_summary_report(&legacy, DetailMode::Permissive).expect("report");
    assert_eq!(report.report_label, "Quarterly Consolidated");
    assert_eq!(report.total_models, 2);
    assert_eq!(report.overall_headline_total, 6154388937.26);

    let strict = build_summary_report(&legacy, DetailMode::Strict).expect_err("strict rejects");
    assert_eq!(strict.kind(), "malformed_entry");
}

#[test]
fn report_entries_feed_back_into_an_identical_report() {
    let first = build_summary_report(&october_request(), DetailMode::Strict).expect("first");
    let echoed = serde_json::to_value(&first.entries).expect("entries json");
    let second = build_summary_report(
        &request(json!({ "entries": echoed })),
        DetailMode::Strict,
    )
    .expect("second");

    assert_eq!(second.overall_headline_total, first.overall_headline_total);
    assert_eq!(second.series_summary, first.series_summary);
    assert_eq!(second.entries, first.entries);
}

#[test]
fn missing_headline_field_fails_the_request() {
    let error = build_summary_report(
        &request(json!({
            "modelOutputs": [{
                "modelName": "SEBIT-LSMRV",
                "payload": {
                    "evaluation_label": "scenario-a",
                    "probability_distribution_a": 0.6,
                    "probability_distribution_b": 0.4,
                    "growth_correction_value": 1.2,
                    "cumulative_adjustment_value": 10.0,
                    "expected_adjustment_value": 12.5
                }
            }]
        })),
        DetailMode::Strict,
    )
    .expect_err("missing headline");

    assert_eq!(
        error,
        SummaryError::MissingHeadlineField {
            model: "SEBIT-LSMRV".to_string(),
            field: "final_adjustment_amount".to_string(),
        }
    );
}

#[test]
fn unregistered_model_fails_the_request() {
    let error = build_summary_report(
        &request(json!({
            "modelOutputs": [{ "modelName": "SEBIT-QUANTUM", "payload": { "value": 1.0 } }]
        })),
        DetailMode::Strict,
    )
    .expect_err("unknown model");

    assert_eq!(error.kind(), "unknown_model");
    assert_eq!(error.model(), Some("SEBIT-QUANTUM"));
}

#[test]
fn request_without_sources_fails() {
    let error = build_summary_report(&request(json!({ "reportLabel": "Nothing" })), DetailMode::Strict)
        .expect_err("no sources");
    assert_eq!(error, SummaryError::EmptySourceList);
}

#[test]
fn report_serializes_with_camel_case_fields() {
    let report = build_summary_report(&october_request(), DetailMode::Strict).expect("report");
    let value = serde_json::to_value(&report).expect("json");

    assert_eq!(value["totalModels"], 2);
    assert_eq!(value["overallHeadlineTotal"], 6154369610.73);
    assert_eq!(value["seriesSummary"][1]["bottomModel"]["model"], "SEBIT-PSRAS");
    assert_eq!(value["asOf"], "2025-10-30T09:40:15.788Z");

    let back: SummaryReport = serde_json::from_value(value).expect("deserialize report");
    assert_eq!(back, report);
}
