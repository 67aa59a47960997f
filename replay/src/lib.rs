//! Kill/death interpretation for Pokemon Showdown replays.
//!
//! `faintlog-replay` sits between `faintlog-protocol` (line classification) and
//! the collaborators that fetch logs and read videos:
//!
//! ```text
//! faintlog-protocol (Event per line)
//!        │
//!        ▼
//! faintlog-replay (Ledger fold → Tally → SpeciesMap → AggregateRecord)
//!        │
//!        └─> faintlog-client (fetch, OCR, report)
//! ```
//!
//! # Main Types
//!
//! - [`Tally`] - per-replay kills/deaths keyed by one identity namespace
//! - [`Ledger`] - the kill/death state machine shared by both dialects
//! - [`OcrDedup`] - collapses repeated OCR detections before the ledger
//! - [`LogInterpreter`], [`VideoInterpreter`] - line-fed interpreters per dialect
//! - [`SpeciesMap`] - nickname to species resolution for log replays
//! - [`AggregateRecord`] - cross-replay summary written to the report
//!
//! # Example Usage
//!
//! ```
//! use faintlog_protocol::LogDialect;
//! use faintlog_replay::{AggregateRecord, LedgerOptions, interpret_log};
//!
//! let lines = [
//!     "|switch|p1a: Sparky|Pikachu, L50, M|100/100",
//!     "|switch|p2a: Rocky|Geodude, L50|100/100",
//!     "|move|p1a: Sparky|Thunderbolt|p2a: Rocky",
//!     "|-damage|p2a: Rocky|0 fnt",
//! ];
//!
//! let replay = interpret_log(lines, &LogDialect::new(), LedgerOptions::default());
//! let tally = replay.resolve().unwrap();
//!
//! let mut record = AggregateRecord::new();
//! record.merge(tally);
//!
//! let report: Vec<String> = record.lines().collect();
//! assert_eq!(report[0], "Geodude: kills=0, deaths=1, appearances=1");
//! assert_eq!(report[1], "Pikachu: kills=1, deaths=0, appearances=1");
//! ```

pub mod aggregate;
pub mod error;
pub mod interpret;
pub mod resolve;
pub mod tally;

pub use aggregate::{AggregateRecord, StatLine};
pub use error::ReplayError;
pub use interpret::{
    Ledger, LedgerOptions, LogInterpreter, LogReplay, OcrDedup, Outcome, VideoInterpreter,
    interpret_log, interpret_video,
};
pub use resolve::{SpeciesMap, resolve};
pub use tally::{KillDeath, Tally};
