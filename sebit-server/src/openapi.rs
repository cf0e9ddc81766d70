//! OpenAPI specification for the SEBIT summary server.

use utoipa::OpenApi;

use sebit_core::{
    AsOf, DetailMode, EntryInput, FieldDescriptor, ModelDescriptor, ModelOutput, SeriesHighlight,
    SummaryEntryResult, SummaryReport, SummaryReportRequest, SummarySeriesAggregate,
};

use crate::routes::{ErrorResponse, HealthResponse, ModelCatalogResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::summary_report,
        crate::routes::summary_models,
        crate::routes::health,
        crate::routes::openapi_json
    ),
    components(
        schemas(
            SummaryReportRequest,
            EntryInput,
            ModelOutput,
            AsOf,
            DetailMode,
            SummaryReport,
            SummarySeriesAggregate,
            SeriesHighlight,
            SummaryEntryResult,
            ModelCatalogResponse,
            ModelDescriptor,
            FieldDescriptor,
            HealthResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "summary", description = "SEBIT summary reports"),
        (name = "system", description = "System endpoints")
    )
)]
/// OpenAPI specification for the SEBIT summary server.
pub struct ApiDoc;
