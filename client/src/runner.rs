//! Sequential replay processing

use std::path::PathBuf;

use anyhow::{Context, Result};
use faintlog_protocol::{DisplayName, LogDialect, Species, VideoDialect};
use faintlog_replay::{AggregateRecord, LedgerOptions, Tally, VideoInterpreter, interpret_log};
use tracing::Instrument;

use crate::fetch::LogSource;
use crate::ocr::{FrameReader, MediaError};
use crate::source::ReplaySource;

/// What to do when one replay fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log a warning and leave the replay out of the report
    #[default]
    SkipAndContinue,
    /// Abort the run on the first failure
    FailFast,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
}

/// A successfully interpreted replay
#[derive(Debug, Clone)]
pub enum ReplayTally {
    Log(Tally<Species>),
    Video(Tally<DisplayName>),
}

impl ReplayTally {
    pub fn merge_into(self, record: &mut AggregateRecord) {
        match self {
            ReplayTally::Log(tally) => record.merge(tally),
            ReplayTally::Video(tally) => record.merge(tally),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ReplayTally::Log(tally) => tally.len(),
            ReplayTally::Video(tally) => tally.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Processes replays one at a time and folds them into an [`AggregateRecord`]
pub struct Runner<L, F> {
    logs: L,
    frames: F,
    log_dialect: LogDialect,
    video_dialect: VideoDialect,
    options: LedgerOptions,
    policy: FailurePolicy,
}

impl<L, F> Runner<L, F>
where
    L: LogSource,
    F: FrameReader + Clone + Send + 'static,
{
    pub fn new(logs: L, frames: F) -> Self {
        Self {
            logs,
            frames,
            log_dialect: LogDialect::default(),
            video_dialect: VideoDialect::default(),
            options: LedgerOptions::default(),
            policy: FailurePolicy::default(),
        }
    }

    pub fn with_log_dialect(mut self, dialect: LogDialect) -> Self {
        self.log_dialect = dialect;
        self
    }

    pub fn with_options(mut self, options: LedgerOptions) -> Self {
        self.options = options;
        self
    }

    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Process every source in order
    ///
    /// A replay's tally is merged only after it has been fully interpreted,
    /// so a failed replay never leaves a partial contribution.
    pub async fn run(&self, sources: &[ReplaySource]) -> Result<(AggregateRecord, RunSummary)> {
        let mut record = AggregateRecord::new();
        let mut summary = RunSummary::default();

        for source in sources {
            let span = tracing::info_span!("replay", source = %source);

            match self.process(source).instrument(span).await {
                Ok(tally) => {
                    tracing::info!(source = %source, identities = tally.len(), "replay processed");
                    tally.merge_into(&mut record);
                    summary.processed += 1;
                }
                Err(e) if self.policy == FailurePolicy::SkipAndContinue => {
                    tracing::warn!(source = %source, error = %format!("{:#}", e), "skipping replay");
                    summary.skipped += 1;
                }
                Err(e) => {
                    return Err(e.context(format!("Failed to process {}", source)));
                }
            }
        }

        tracing::info!(
            processed = summary.processed,
            skipped = summary.skipped,
            "all replays processed"
        );
        Ok((record, summary))
    }

    /// Interpret a single replay
    pub async fn process(&self, source: &ReplaySource) -> Result<ReplayTally> {
        match source {
            ReplaySource::Log(url) => self.process_log(url).await,
            ReplaySource::Video(path) => self.process_video(path.clone()).await,
        }
    }

    async fn process_log(&self, url: &str) -> Result<ReplayTally> {
        let text = self.logs.fetch_log(url).await?;

        let replay = interpret_log(text.lines(), &self.log_dialect, self.options);
        tracing::debug!(
            switches = replay.switches.len(),
            nicknames = replay.tally.len(),
            "log interpreted"
        );

        let tally = replay.resolve()?;
        Ok(ReplayTally::Log(tally))
    }

    async fn process_video(&self, path: PathBuf) -> Result<ReplayTally> {
        let reader = self.frames.clone();
        let dialect = self.video_dialect;
        let options = self.options;
        let span = tracing::Span::current();

        let tally = tokio::task::spawn_blocking(move || -> Result<Tally<DisplayName>, MediaError> {
            let _entered = span.enter();
            let mut interpreter = VideoInterpreter::new(dialect, options);
            for frame in reader.open(&path)? {
                interpreter.feed(&frame?);
            }
            Ok(interpreter.finish())
        })
        .await
        .context("OCR task panicked")??;

        Ok(ReplayTally::Video(tally))
    }
}
