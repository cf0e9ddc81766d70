#![deny(missing_docs)]
//! SEBIT summary core library.
//!
//! Validates SEBIT model outputs against a static registry of detail shapes
//! and aggregates them into series-level summary reports.

pub mod aggregator;
pub mod details;
pub mod domain;
pub mod error;
pub mod registry;
pub mod report;
pub mod request;
pub mod resolver;
pub mod validator;

pub use aggregator::{aggregate, round2};
pub use details::ModelDetails;
pub use domain::{EntryDetails, SummaryEntry};
pub use error::{FieldIssue, Result, SummaryError};
pub use registry::{
    DetailKind, FieldDescriptor, FieldKind, FieldSpec, MODEL_REGISTRY, ModelCatalog,
    ModelDescriptor, ModelRegistryEntry, StaticCatalog, describe_catalog, lookup, series_labels,
};
pub use report::{
    SeriesHighlight, SummaryEntryResult, SummaryReport, SummarySeriesAggregate, render_json,
    render_markdown,
};
pub use request::{
    AsOf, DEFAULT_REPORT_LABEL, DetailMode, EntryInput, ModelOutput, SummaryReportRequest,
};
pub use resolver::EntryResolver;
pub use validator::DetailValidator;

/// Resolve a request against the static registry and aggregate it.
pub fn build_summary_report(
    request: &SummaryReportRequest,
    mode: DetailMode,
) -> Result<SummaryReport> {
    let resolver = EntryResolver::new(mode);
    let entries = resolver.resolve(request)?;
    log::debug!(
        "aggregating {} {} entries for '{}'",
        entries.len(),
        resolver.mode(),
        request.label()
    );
    Ok(aggregate(
        &entries,
        Some(request.label()),
        request.as_of.clone(),
    ))
}
