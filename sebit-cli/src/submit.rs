//! Report submission to a running SEBIT summary server.

use crate::{CliResult, InputArgs, OutputArgs};
use clap::Args;
use reqwest::Client;
use sebit_core::{SummaryReport, SummaryReportRequest};
use serde::Deserialize;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8080";

/// CLI arguments for the submit command.
#[derive(Args, Clone, Debug)]
pub(crate) struct SubmitArgs {
    #[command(flatten)]
    pub input: InputArgs,
    /// Base URL of the SEBIT summary server.
    #[arg(long = "server", env = "SEBIT_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    pub server_url: String,
    #[command(flatten)]
    pub report: OutputArgs,
}

/// Error body returned by the server.
#[derive(Debug, Deserialize)]
struct ServerError {
    kind: String,
    message: String,
}

/// Post a request to the server and return its report.
pub async fn submit_report(
    client: &Client,
    server_url: &str,
    request: &SummaryReportRequest,
) -> CliResult<SummaryReport> {
    let server_url = normalize_server_url(server_url)?;
    let response = client
        .post(format!("{server_url}/summary/report"))
        .json(request)
        .send()
        .await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<SummaryReport>().await?);
    }
    let body = response.text().await.unwrap_or_default();
    let detail = match serde_json::from_str::<ServerError>(&body) {
        Ok(error) => format!("{} [{}]", error.message, error.kind),
        Err(_) => body,
    };
    Err(format!("server rejected the report ({status}): {detail}").into())
}

/// Build the HTTP client used for submissions.
#[cfg_attr(test, allow(dead_code))]
pub fn build_client() -> CliResult<Client> {
    Ok(Client::builder().user_agent("sebit-cli").build()?)
}

fn normalize_server_url(server_url: &str) -> CliResult<String> {
    let trimmed = server_url.trim();
    if trimmed.is_empty() {
        return Err("server url is required".into());
    }
    Ok(trimmed.trim_end_matches('/').to_string())
}
