//! Replay collection and reporting for faintlog.
//!
//! Reads a list of replays, fetches Showdown logs or OCRs battle videos,
//! interprets each one with `faintlog-replay` and writes the aggregated
//! kill/death report.

pub mod config;
pub mod fetch;
pub mod ocr;
pub mod runner;
pub mod source;

use std::path::Path;

use anyhow::{Context, Result};
use faintlog_replay::AggregateRecord;

pub use config::{Config, ReportFormat};
pub use fetch::{FetchError, LogSource, ShowdownFetcher};
pub use ocr::{FfmpegOcr, FrameReader, MediaError, OcrSettings};
pub use runner::{FailurePolicy, ReplayTally, RunSummary, Runner};
pub use source::ReplaySource;

/// Run the whole pipeline described by `config`
pub async fn run(config: &Config) -> Result<RunSummary> {
    let list = tokio::fs::read_to_string(&config.input)
        .await
        .with_context(|| format!("Failed to read input list {}", config.input.display()))?;

    let sources = ReplaySource::parse_list(&list);
    tracing::info!(
        input = %config.input.display(),
        replays = sources.len(),
        "input list loaded"
    );

    let fetcher = ShowdownFetcher::new(config.fetch_timeout(), &config.user_agent)?;
    let ocr = FfmpegOcr::new(config.ocr_settings());

    let runner = Runner::new(fetcher, ocr)
        .with_log_dialect(config.log_dialect())
        .with_options(config.ledger_options())
        .with_policy(config.failure_policy());

    let (record, summary) = runner.run(&sources).await?;

    write_report(&record, config.format, &config.output).await?;
    tracing::info!(
        output = %config.output.display(),
        identities = record.len(),
        "report written"
    );

    Ok(summary)
}

/// Render the report in `format`
pub fn render_report(record: &AggregateRecord, format: ReportFormat) -> Result<String> {
    match format {
        ReportFormat::Text => {
            let mut out = Vec::new();
            record.write_text(&mut out)?;
            Ok(String::from_utf8(out)?)
        }
        ReportFormat::Json => {
            let mut json = serde_json::to_string_pretty(record)?;
            json.push('\n');
            Ok(json)
        }
    }
}

async fn write_report(record: &AggregateRecord, format: ReportFormat, path: &Path) -> Result<()> {
    let report = render_report(record, format)?;
    tokio::fs::write(path, report)
        .await
        .with_context(|| format!("Failed to write report {}", path.display()))
}
