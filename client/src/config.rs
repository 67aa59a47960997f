//! Command line configuration
//!
//! Every option can also be set through a `FAINTLOG_*` environment variable.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, ValueEnum};
use faintlog_protocol::LogDialect;
use faintlog_protocol::log::DEFAULT_LEVEL;
use faintlog_replay::LedgerOptions;

use crate::fetch::USER_AGENT;
use crate::ocr::{CropRegion, OcrSettings};
use crate::runner::FailurePolicy;

/// Report file format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// `IDENTITY: kills=K, deaths=D, appearances=A`, one per line
    #[default]
    Text,
    /// JSON object keyed by identity
    Json,
}

/// Kill/death statistics from Pokemon Showdown replays and battle videos
#[derive(Parser, Debug, Clone)]
#[command(name = "faintlog", version, about)]
pub struct Config {
    /// File listing one replay URL or video path per line
    #[arg(short, long, env = "FAINTLOG_INPUT", default_value = "input.txt")]
    pub input: PathBuf,

    /// Report file to write
    #[arg(short, long, env = "FAINTLOG_OUTPUT", default_value = "output.txt")]
    pub output: PathBuf,

    #[arg(long, env = "FAINTLOG_FORMAT", value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Append diagnostics to this file instead of stderr
    #[arg(long, env = "FAINTLOG_TRACE_FILE")]
    pub trace_file: Option<PathBuf>,

    /// Abort on the first replay that cannot be processed
    #[arg(long, env = "FAINTLOG_FAIL_FAST")]
    pub fail_fast: bool,

    /// Level switch lines must carry to be used for nickname resolution
    #[arg(long, env = "FAINTLOG_LEVEL", default_value_t = DEFAULT_LEVEL)]
    pub level: u8,

    /// Accept switch lines at any level
    #[arg(long, env = "FAINTLOG_ANY_LEVEL")]
    pub any_level: bool,

    /// Count faints with no known attacker as deaths
    #[arg(long, env = "FAINTLOG_COUNT_UNATTRIBUTED_DEATHS")]
    pub count_unattributed_deaths: bool,

    /// Replay log request timeout
    #[arg(long, env = "FAINTLOG_FETCH_TIMEOUT", value_name = "SECS", default_value_t = 30)]
    pub fetch_timeout: u64,

    #[arg(long, env = "FAINTLOG_USER_AGENT", default_value = USER_AGENT)]
    pub user_agent: String,

    #[command(flatten)]
    pub ocr: OcrArgs,
}

#[derive(Args, Debug, Clone)]
pub struct OcrArgs {
    /// ffmpeg binary used to sample videos
    #[arg(long, env = "FAINTLOG_FFMPEG", default_value = "ffmpeg")]
    pub ffmpeg: PathBuf,

    /// tesseract binary used to read sampled frames
    #[arg(long, env = "FAINTLOG_TESSERACT", default_value = "tesseract")]
    pub tesseract: PathBuf,

    /// Read one frame out of every N
    #[arg(long, env = "FAINTLOG_SAMPLE_EVERY", value_name = "N", default_value_t = 20)]
    pub sample_every: u32,

    /// Message box geometry as WIDTHxHEIGHT+X+Y
    #[arg(long, env = "FAINTLOG_CROP", default_value = "800x100+200+500")]
    pub crop: CropRegion,

    /// Luma threshold below which pixels are blanked
    #[arg(long, env = "FAINTLOG_THRESHOLD", default_value_t = 200)]
    pub threshold: u8,
}

impl Config {
    pub fn log_dialect(&self) -> LogDialect {
        if self.any_level {
            LogDialect::with_level(None)
        } else {
            LogDialect::with_level(Some(self.level))
        }
    }

    pub fn ledger_options(&self) -> LedgerOptions {
        LedgerOptions {
            count_unattributed_deaths: self.count_unattributed_deaths,
        }
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        if self.fail_fast {
            FailurePolicy::FailFast
        } else {
            FailurePolicy::SkipAndContinue
        }
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }

    pub fn ocr_settings(&self) -> OcrSettings {
        OcrSettings {
            ffmpeg: self.ocr.ffmpeg.clone(),
            tesseract: self.ocr.tesseract.clone(),
            sample_every: self.ocr.sample_every,
            crop: self.ocr.crop,
            threshold: self.ocr.threshold,
        }
    }
}
