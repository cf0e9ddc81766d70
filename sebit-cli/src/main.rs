#![deny(missing_docs)]
//! SEBIT command-line interface.
//!
//! Builds consolidated summary reports from SEBIT model outputs, locally or
//! through a running summary server.

mod submit;

use clap::{Args, Parser, Subcommand, ValueEnum};
use sebit_core::{
    DetailMode, ModelDescriptor, StaticCatalog, SummaryReport, SummaryReportRequest,
    build_summary_report, describe_catalog, render_json, render_markdown,
};
use std::fmt::Write;
use std::path::{Path, PathBuf};
use submit::SubmitArgs;
use tokio::io::AsyncReadExt;

pub(crate) type CliResult<T> = Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Input path that reads from stdin.
const STDIN_MARKER: &str = "-";

#[derive(Parser)]
#[command(name = "sebit", version, about = "SEBIT summary report CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Clone, Debug)]
pub(crate) struct InputArgs {
    /// JSON request file, or `-` for stdin.
    #[arg(short, long)]
    input: PathBuf,
}

#[derive(Args, Clone, Debug)]
pub(crate) struct OutputArgs {
    /// Output format for report data.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Write the report to a file instead of stdout.
    #[arg(long = "report-output")]
    report_output: Option<PathBuf>,
}

#[derive(ValueEnum, Copy, Clone, Debug, Eq, PartialEq)]
enum OutputFormat {
    Text,
    Json,
    Markdown,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a summary report locally from a request file.
    Report {
        #[command(flatten)]
        input: InputArgs,
        /// How strictly pre-built entry details are checked.
        #[arg(long, env = "SEBIT_DETAIL_MODE", default_value_t = DetailMode::Strict)]
        detail_mode: DetailMode,
        #[command(flatten)]
        report: OutputArgs,
    },
    /// Send a request file to a summary server and render its report.
    Submit(SubmitArgs),
    /// List the registered models.
    Models {
        #[command(flatten)]
        report: OutputArgs,
    },
}

#[cfg(not(test))]
#[tokio::main]
async fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Report {
            input,
            detail_mode,
            report,
        } => run_report(&input, detail_mode, &report).await?,
        Commands::Submit(args) => {
            let client = submit::build_client()?;
            let request = load_request(&args.input.input).await?;
            let summary = submit::submit_report(&client, &args.server_url, &request).await?;
            emit_summary_report(&summary, &args.report).await?
        }
        Commands::Models { report } => {
            emit_models(&describe_catalog(&StaticCatalog), &report).await?
        }
    }

    Ok(())
}

#[cfg(test)]
fn main() {}

async fn run_report(input: &InputArgs, mode: DetailMode, output: &OutputArgs) -> CliResult<()> {
    let request = load_request(&input.input).await?;
    let report = build_summary_report(&request, mode)?;
    emit_summary_report(&report, output).await
}

async fn load_request(path: &Path) -> CliResult<SummaryReportRequest> {
    let (source, contents) = if path.as_os_str() == STDIN_MARKER {
        let mut contents = String::new();
        tokio::io::stdin().read_to_string(&mut contents).await?;
        ("stdin".to_string(), contents)
    } else {
        let contents = tokio::fs::read_to_string(path)
            .await
            .map_err(|err| format!("failed to read {}: {err}", path.display()))?;
        (path.display().to_string(), contents)
    };
    parse_request(&source, &contents)
}

fn parse_request(source: &str, contents: &str) -> CliResult<SummaryReportRequest> {
    serde_json::from_str(contents)
        .map_err(|err| format!("invalid summary request in {source}: {err}").into())
}

async fn emit_summary_report(report: &SummaryReport, output: &OutputArgs) -> CliResult<()> {
    let contents = match output.format {
        OutputFormat::Text => render_report_text(report),
        OutputFormat::Markdown => render_markdown(report),
        OutputFormat::Json => render_json(report)?,
    };
    emit_output(output, contents).await
}

async fn emit_models(models: &[ModelDescriptor], output: &OutputArgs) -> CliResult<()> {
    let contents = match output.format {
        OutputFormat::Text => render_models_text(models),
        OutputFormat::Markdown => render_models_markdown(models),
        OutputFormat::Json => render_json(models)?,
    };
    emit_output(output, contents).await
}

async fn emit_output(output: &OutputArgs, contents: String) -> CliResult<()> {
    if let Some(path) = &output.report_output {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, contents).await?;
    } else {
        print!("{contents}");
    }
    Ok(())
}

fn render_report_text(report: &SummaryReport) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Report: {}", report.report_label);
    if let Some(as_of) = &report.as_of {
        let _ = writeln!(output, "As of: {as_of}");
    }
    let _ = writeln!(output, "Models: {}", report.total_models);
    let _ = writeln!(
        output,
        "Overall headline total: {:.2}",
        report.overall_headline_total
    );
    let _ = writeln!(output);

    for series in &report.series_summary {
        let _ = writeln!(output, "Series: {}", series.series);
        let _ = writeln!(output, "- Models: {}", series.model_count);
        let _ = writeln!(output, "- Total: {:.2}", series.headline_total);
        let _ = writeln!(output, "- Average: {:.2}", series.headline_average);
        let _ = writeln!(
            output,
            "- Range: {:.2} .. {:.2}",
            series.headline_min, series.headline_max
        );
        let _ = writeln!(
            output,
            "- Top: {} ({:.2})",
            series.top_model.model, series.top_model.headline_amount
        );
        let _ = writeln!(
            output,
            "- Bottom: {} ({:.2})",
            series.bottom_model.model, series.bottom_model.headline_amount
        );
        let _ = writeln!(output);
    }

    if report.entries.is_empty() {
        let _ = writeln!(output, "Entries: none");
    } else {
        let _ = writeln!(output, "Entries:");
        for entry in &report.entries {
            match &entry.currency {
                Some(currency) => {
                    let _ = writeln!(
                        output,
                        "- [{}] {}: {:.2} {currency}",
                        entry.series, entry.model, entry.headline_amount
                    );
                }
                None => {
                    let _ = writeln!(
                        output,
                        "- [{}] {}: {:.2}",
                        entry.series, entry.model, entry.headline_amount
                    );
                }
            }
        }
    }
    output
}

fn render_models_text(models: &[ModelDescriptor]) -> String {
    let mut output = String::new();
    for model in models {
        let _ = writeln!(output, "{} ({})", model.model, model.series);
        let _ = writeln!(output, "- Headline: {}", model.headline_field);
        let fields: Vec<String> = model
            .fields
            .iter()
            .map(|field| format!("{}: {}", field.name, field.kind))
            .collect();
        let _ = writeln!(output, "- Fields: {}", fields.join(", "));
        let _ = writeln!(output);
    }
    output
}

fn render_models_markdown(models: &[ModelDescriptor]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "# Registered models\n");
    let _ = writeln!(output, "| Model | Series | Headline | Fields |");
    let _ = writeln!(output, "|---|---|---|---:|");
    for model in models {
        let _ = writeln!(
            output,
            "| {} | {} | {} | {} |",
            model.model,
            model.series,
            model.headline_field,
            model.fields.len()
        );
    }
    output
}
