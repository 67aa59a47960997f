//! Cross-replay aggregation and report rendering

use std::collections::BTreeMap;
use std::io;

use faintlog_protocol::{Identity, ResolvedIdentity};

use crate::tally::Tally;

/// Summed statistics for one identity across replays
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatLine {
    pub kills: u32,
    pub deaths: u32,
    /// Number of replays the identity scored or fainted in
    pub appearances: u32,
}

impl StatLine {
    pub fn new(kills: u32, deaths: u32, appearances: u32) -> Self {
        Self {
            kills,
            deaths,
            appearances,
        }
    }
}

/// Summary of every processed replay, keyed by resolved identity
///
/// Species (from log replays) and display names (from videos) share one
/// namespace here. Iteration is in ascending lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(transparent))]
pub struct AggregateRecord {
    entries: BTreeMap<String, StatLine>,
}

impl AggregateRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one replay's resolved tally into the record
    pub fn merge<I: ResolvedIdentity>(&mut self, tally: Tally<I>) {
        for (id, kd) in tally {
            let line = self.entries.entry(id.into_inner()).or_default();
            line.kills += kd.kills;
            line.deaths += kd.deaths;
            line.appearances += 1;
        }
    }

    pub fn get(&self, identity: &str) -> Option<StatLine> {
        self.entries.get(identity).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, StatLine)> {
        self.entries.iter().map(|(id, line)| (id.as_str(), *line))
    }

    /// Report lines: `IDENTITY: kills=K, deaths=D, appearances=A`
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.iter().map(|(id, line)| {
            format!(
                "{}: kills={}, deaths={}, appearances={}",
                id, line.kills, line.deaths, line.appearances
            )
        })
    }

    /// Write the report, one line per identity
    pub fn write_text<W: io::Write>(&self, mut out: W) -> io::Result<()> {
        for line in self.lines() {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }
}
