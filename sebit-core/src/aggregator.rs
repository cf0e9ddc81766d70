//! Series aggregation.

use std::collections::HashMap;

use crate::domain::SummaryEntry;
use crate::report::{SeriesHighlight, SummaryEntryResult, SummaryReport, SummarySeriesAggregate};
use crate::request::{AsOf, DEFAULT_REPORT_LABEL};

/// Round to 2 decimal places.
///
/// Rounds the exact binary value rather than a rescaled copy, so `2.675`
/// (stored as `2.67499…`) becomes `2.67`. Non-finite values pass through.
pub fn round2(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{value:.2}").parse().unwrap_or(value)
}

/// Compensated (Neumaier) sum, so totals do not drift with input order.
fn sum_amounts(amounts: impl IntoIterator<Item = f64>) -> f64 {
    let mut sum = 0.0_f64;
    let mut compensation = 0.0_f64;
    for amount in amounts {
        let next = sum + amount;
        if sum.abs() >= amount.abs() {
            compensation += (sum - next) + amount;
        } else {
            compensation += (amount - next) + sum;
        }
        sum = next;
    }
    sum + compensation
}

/// Build a report from validated entries.
///
/// Never fails. An empty entry list produces an empty report with a zero total.
pub fn aggregate(
    entries: &[SummaryEntry],
    report_label: Option<&str>,
    as_of: Option<AsOf>,
) -> SummaryReport {
    let report_label = report_label
        .filter(|label| !label.is_empty())
        .unwrap_or(DEFAULT_REPORT_LABEL)
        .to_string();

    let overall = sum_amounts(entries.iter().map(|entry| entry.headline_amount));

    SummaryReport {
        report_label,
        as_of,
        total_models: entries.len(),
        overall_headline_total: round2(overall),
        series_summary: group_by_series(entries)
            .into_iter()
            .map(|(series, members)| summarize_series(series, &members))
            .collect(),
        entries: entries.iter().map(entry_result).collect(),
    }
}

/// Group entries by series, keeping the order series first appear in.
fn group_by_series(entries: &[SummaryEntry]) -> Vec<(&str, Vec<&SummaryEntry>)> {
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Vec<&SummaryEntry>)> = Vec::new();
    for entry in entries {
        let series = entry.series.as_str();
        match positions.get(series) {
            Some(&position) => groups[position].1.push(entry),
            None => {
                positions.insert(series, groups.len());
                groups.push((series, vec![entry]));
            }
        }
    }
    groups
}

fn summarize_series(series: &str, members: &[&SummaryEntry]) -> SummarySeriesAggregate {
    let model_count = members.len();
    let total = sum_amounts(members.iter().map(|entry| entry.headline_amount));
    let average = if model_count == 0 {
        0.0
    } else {
        total / model_count as f64
    };

    // Strict comparisons keep the earliest entry on ties.
    let mut top = members.first().copied();
    let mut bottom = members.first().copied();
    for entry in members.iter().copied().skip(1) {
        if top.is_some_and(|current| entry.headline_amount > current.headline_amount) {
            top = Some(entry);
        }
        if bottom.is_some_and(|current| entry.headline_amount < current.headline_amount) {
            bottom = Some(entry);
        }
    }

    SummarySeriesAggregate {
        series: series.to_string(),
        model_count,
        headline_total: round2(total),
        headline_average: round2(average),
        headline_min: round2(bottom.map_or(0.0, |entry| entry.headline_amount)),
        headline_max: round2(top.map_or(0.0, |entry| entry.headline_amount)),
        top_model: highlight(top),
        bottom_model: highlight(bottom),
    }
}

fn highlight(entry: Option<&SummaryEntry>) -> SeriesHighlight {
    match entry {
        Some(entry) => SeriesHighlight {
            model: entry.model.clone(),
            headline_amount: round2(entry.headline_amount),
        },
        None => SeriesHighlight {
            model: String::new(),
            headline_amount: 0.0,
        },
    }
}

fn entry_result(entry: &SummaryEntry) -> SummaryEntryResult {
    SummaryEntryResult {
        series: entry.series.clone(),
        model: entry.model.clone(),
        headline_amount: round2(entry.headline_amount),
        currency: entry.currency.clone(),
        details: entry.details.to_map(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EntryDetails;
    use std::collections::BTreeMap;

    fn entry(series: &str, model: &str, amount: f64) -> SummaryEntry {
        SummaryEntry {
            series: series.to_string(),
            model: model.to_string(),
            headline_amount: amount,
            currency: Some("KRW".to_string()),
            details: EntryDetails::Metrics(BTreeMap::new()),
        }
    }

    #[test]
    fn rounds_the_stored_value_at_two_places() {
        assert_eq!(round2(5400.25), 5400.25);
        assert_eq!(round2(2.675), 2.67);
        assert_eq!(round2(12.345), 12.35);
        assert_eq!(round2(-1.005), -1.0);
        assert_eq!(round2(-7.891), -7.89);
        assert_eq!(round2(1.0 / 3.0), 0.33);
        assert!(round2(f64::NAN).is_nan());
    }

    #[test]
    fn two_series_scenario() {
        let entries = vec![
            entry("Asset & Depreciation", "SEBIT-DDA", 5400.25),
            entry("Insurance & Service Revenue", "SEBIT-PSRAS", 6154364210.48),
        ];
        let report = aggregate(&entries, None, None);
        assert_eq!(report.report_label, DEFAULT_REPORT_LABEL);
        assert_eq!(report.total_models, 2);
        assert_eq!(report.overall_headline_total, 6154369610.73);
        assert_eq!(report.series_summary.len(), 2);
        assert!(report.series_summary.iter().all(|series| series.model_count == 1));
        assert_eq!(report.series_summary[0].series, "Asset & Depreciation");
        assert_eq!(report.series_summary[1].series, "Insurance & Service Revenue");
    }

    #[test]
    fn single_series_statistics() {
        let entries = vec![
            entry("X", "SEBIT-A", 100.0),
            entry("X", "SEBIT-B", 300.0),
            entry("X", "SEBIT-C", 200.0),
        ];
        let report = aggregate(&entries, Some("Quarterly"), None);
        let series = &report.series_summary[0];
        assert_eq!(report.report_label, "Quarterly");
        assert_eq!(series.model_count, 3);
        assert_eq!(series.headline_total, 600.0);
        assert_eq!(series.headline_average, 200.0);
        assert_eq!(series.headline_min, 100.0);
        assert_eq!(series.headline_max, 300.0);
        assert_eq!(series.top_model.model, "SEBIT-B");
        assert_eq!(series.bottom_model.model, "SEBIT-A");
    }

    #[test]
    fn ties_resolve_to_the_earliest_entry() {
        let entries = vec![
            entry("X", "SEBIT-FIRST", 50.0),
            entry("X", "SEBIT-SECOND", 50.0),
            entry("Y", "SEBIT-LOW-1", -5.0),
            entry("Y", "SEBIT-HIGH", 9.0),
            entry("Y", "SEBIT-LOW-2", -5.0),
            entry("Y", "SEBIT-HIGH-2", 9.0),
        ];
        for _ in 0..3 {
            let report = aggregate(&entries, None, None);
            let x = &report.series_summary[0];
            assert_eq!(x.top_model.model, "SEBIT-FIRST");
            assert_eq!(x.bottom_model.model, "SEBIT-FIRST");
            let y = &report.series_summary[1];
            assert_eq!(y.top_model.model, "SEBIT-HIGH");
            assert_eq!(y.bottom_model.model, "SEBIT-LOW-1");
        }
    }

    #[test]
    fn series_keep_first_seen_order() {
        let entries = vec![
            entry("Zeta", "SEBIT-1", 1.0),
            entry("Alpha", "SEBIT-2", 2.0),
            entry("Zeta", "SEBIT-3", 3.0),
            entry("Mid", "SEBIT-4", 4.0),
        ];
        let report = aggregate(&entries, None, None);
        let order: Vec<&str> = report
            .series_summary
            .iter()
            .map(|series| series.series.as_str())
            .collect();
        assert_eq!(order, vec!["Zeta", "Alpha", "Mid"]);
        let models: Vec<&str> = report.entries.iter().map(|entry| entry.model.as_str()).collect();
        assert_eq!(models, vec!["SEBIT-1", "SEBIT-2", "SEBIT-3", "SEBIT-4"]);
    }

    #[test]
    fn average_uses_the_unrounded_total() {
        let entries = vec![
            entry("X", "SEBIT-A", 0.004),
            entry("X", "SEBIT-B", 0.004),
            entry("X", "SEBIT-C", 0.004),
        ];
        let series = &aggregate(&entries, None, None).series_summary[0];
        assert_eq!(series.headline_total, 0.01);
        assert_eq!(series.headline_average, 0.0);
    }

    #[test]
    fn empty_input_produces_empty_report() {
        let report = aggregate(&[], Some(""), None);
        assert_eq!(report.report_label, DEFAULT_REPORT_LABEL);
        assert_eq!(report.total_models, 0);
        assert_eq!(report.overall_headline_total, 0.0);
        assert!(report.series_summary.is_empty());
        assert!(report.entries.is_empty());
    }

    #[test]
    fn total_is_independent_of_order() {
        let amounts = [0.1, 1e9, 0.2, -3.3, 1234.567, 0.3, -1e9, 99.99];
        let forward: Vec<SummaryEntry> = amounts
            .iter()
            .enumerate()
            .map(|(i, amount)| entry("S", &format!("SEBIT-{i}"), *amount))
            .collect();
        let mut backward = forward.clone();
        backward.reverse();
        let mut shuffled = forward.clone();
        shuffled.swap(0, 5);
        shuffled.swap(2, 7);

        let expected = aggregate(&forward, None, None).overall_headline_total;
        assert_eq!(aggregate(&backward, None, None).overall_headline_total, expected);
        assert_eq!(aggregate(&shuffled, None, None).overall_headline_total, expected);
        assert_eq!(expected, 1331.86);
    }

    #[test]
    fn highlights_match_min_and_max() {
        let entries = vec![
            entry("S", "SEBIT-A", 12.345),
            entry("S", "SEBIT-B", -7.891),
            entry("S", "SEBIT-C", 3.14159),
        ];
        let series = &aggregate(&entries, None, None).series_summary[0];
        assert_eq!(series.top_model.headline_amount, series.headline_max);
        assert_eq!(series.bottom_model.headline_amount, series.headline_min);
        assert!(series.headline_min <= series.headline_average);
        assert!(series.headline_average <= series.headline_max);
    }

    #[test]
    fn entry_results_round_headlines_and_keep_currency() {
        let entries = vec![entry("S", "SEBIT-A", 10.005_1)];
        let report = aggregate(&entries, None, None);
        assert_eq!(report.entries[0].headline_amount, 10.01);
        assert_eq!(report.entries[0].currency.as_deref(), Some("KRW"));
        assert!(report.entries[0].details.is_empty());
    }
}
