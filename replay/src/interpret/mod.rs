//! Replay interpretation
//!
//! Both dialects share one kill/death state machine, the [`Ledger`]. A faint
//! credits the most recent attacker with a kill and the fainted participant
//! with a death. The log dialect feeds the ledger directly. The video dialect
//! first runs events through [`OcrDedup`], because the same on-screen message
//! is read again on every sampled frame it stays visible for.

#[cfg(test)]
mod tests;

use faintlog_protocol::{
    Dialect, DisplayName, Event, Identity, LogDialect, Nickname, Species, VideoDialect,
};

use crate::error::ReplayError;
use crate::resolve::SpeciesMap;
use crate::tally::Tally;

/// Behaviour switches for the [`Ledger`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LedgerOptions {
    /// Record a death even when no attacker is known (hazards, weather before
    /// any move). Off by default: such deaths are dropped with the kill.
    pub count_unattributed_deaths: bool,
}

/// What a single ledger step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A move was seen; its user is now the pending attacker
    AttackerSet,
    /// A kill and a death were credited
    Kill,
    /// The pending attacker fainted itself; nothing was credited
    SelfKnockout,
    /// A faint with no known attacker
    Unattributed { death_recorded: bool },
    /// The event does not affect the ledger
    Ignored,
}

/// Kill/death fold state for one replay
#[derive(Debug, Clone)]
pub struct Ledger<I: Identity> {
    last_attacker: Option<I>,
    tally: Tally<I>,
    options: LedgerOptions,
}

impl<I: Identity> Ledger<I> {
    pub fn new(options: LedgerOptions) -> Self {
        Self {
            last_attacker: None,
            tally: Tally::new(),
            options,
        }
    }

    /// The participant that will be credited for the next faint
    pub fn last_attacker(&self) -> Option<&I> {
        self.last_attacker.as_ref()
    }

    pub fn tally(&self) -> &Tally<I> {
        &self.tally
    }

    /// Apply one event
    ///
    /// A faint does not clear the attacker: a second faint without an
    /// intervening move is credited to the same attacker.
    pub fn step(&mut self, event: Event<I>) -> Outcome {
        match event {
            Event::MoveUsed { actor, .. } => {
                self.last_attacker = Some(actor);
                Outcome::AttackerSet
            }

            Event::Fainted { actor } => match &self.last_attacker {
                None => {
                    let death_recorded = self.options.count_unattributed_deaths;
                    if death_recorded {
                        self.tally.credit_death(actor.clone());
                    }
                    tracing::debug!(victim = %actor, death_recorded, "faint with no known attacker");
                    Outcome::Unattributed { death_recorded }
                }
                Some(attacker) if *attacker == actor => {
                    tracing::debug!(victim = %actor, "self knockout, not credited");
                    Outcome::SelfKnockout
                }
                Some(attacker) => {
                    tracing::debug!(attacker = %attacker, victim = %actor, "kill credited");
                    self.tally.credit_kill(attacker.clone());
                    self.tally.credit_death(actor);
                    Outcome::Kill
                }
            },

            Event::SwitchIn { .. } => Outcome::Ignored,
        }
    }

    pub fn finish(self) -> Tally<I> {
        self.tally
    }
}

/// Deduplication of repeated OCR detections
///
/// A message stays on screen across several sampled frames, so the same
/// "X used Y!" is read many times in a row. A move only passes when its user
/// differs from the pending attacker. A faint always ends the pending action.
/// It only passes when the fainted name differs from the last one seen.
#[derive(Debug, Clone, Default)]
pub struct OcrDedup {
    last_attacker: Option<DisplayName>,
    last_move: Option<String>,
    last_victim: Option<DisplayName>,
}

impl OcrDedup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending_attacker(&self) -> Option<&DisplayName> {
        self.last_attacker.as_ref()
    }

    pub fn pending_move(&self) -> Option<&str> {
        self.last_move.as_deref()
    }

    pub fn last_victim(&self) -> Option<&DisplayName> {
        self.last_victim.as_ref()
    }

    /// Pass `event` through if it is new information
    pub fn filter(&mut self, event: Event<DisplayName>) -> Option<Event<DisplayName>> {
        match event {
            Event::MoveUsed { actor, move_name } => {
                if self.last_attacker.as_ref() == Some(&actor) {
                    return None;
                }
                self.last_attacker = Some(actor.clone());
                self.last_move = Some(move_name.clone());
                Some(Event::MoveUsed { actor, move_name })
            }

            Event::Fainted { actor } => {
                self.last_attacker = None;
                self.last_move = None;
                if self.last_victim.as_ref() == Some(&actor) {
                    return None;
                }
                self.last_victim = Some(actor.clone());
                Some(Event::Fainted { actor })
            }

            event @ Event::SwitchIn { .. } => Some(event),
        }
    }
}

/// Result of interpreting a log replay, before nickname resolution
#[derive(Debug, Clone)]
pub struct LogReplay {
    /// Kills and deaths keyed by nickname
    pub tally: Tally<Nickname>,
    /// Every switch seen, in log order
    pub switches: Vec<(Nickname, Species)>,
}

impl LogReplay {
    /// Re-key the tally by species
    pub fn resolve(self) -> Result<Tally<Species>, ReplayError> {
        SpeciesMap::from_switches(self.switches).resolve(self.tally)
    }
}

/// Line-fed interpreter for the log dialect
#[derive(Debug, Clone)]
pub struct LogInterpreter {
    dialect: LogDialect,
    ledger: Ledger<Nickname>,
    switches: Vec<(Nickname, Species)>,
}

impl LogInterpreter {
    pub fn new(dialect: LogDialect, options: LedgerOptions) -> Self {
        Self {
            dialect,
            ledger: Ledger::new(options),
            switches: Vec::new(),
        }
    }

    pub fn feed(&mut self, line: &str) {
        match self.dialect.classify(line) {
            Some(Event::SwitchIn { nickname, species }) => {
                self.switches.push((nickname, species));
            }
            Some(event) => {
                self.ledger.step(event);
            }
            None => {}
        }
    }

    pub fn finish(self) -> LogReplay {
        LogReplay {
            tally: self.ledger.finish(),
            switches: self.switches,
        }
    }
}

/// Frame-fed interpreter for the video dialect
#[derive(Debug, Clone)]
pub struct VideoInterpreter {
    dialect: VideoDialect,
    dedup: OcrDedup,
    ledger: Ledger<DisplayName>,
}

impl VideoInterpreter {
    pub fn new(dialect: VideoDialect, options: LedgerOptions) -> Self {
        Self {
            dialect,
            dedup: OcrDedup::new(),
            ledger: Ledger::new(options),
        }
    }

    /// Feed the OCR text of one sampled frame
    pub fn feed(&mut self, text: &str) {
        for event in self.dialect.classify_block(text) {
            if let Some(event) = self.dedup.filter(event) {
                tracing::trace!(?event, "ocr event accepted");
                self.ledger.step(event);
            }
        }
    }

    pub fn finish(self) -> Tally<DisplayName> {
        self.ledger.finish()
    }
}

/// Interpret a complete log replay
pub fn interpret_log<L>(lines: L, dialect: &LogDialect, options: LedgerOptions) -> LogReplay
where
    L: IntoIterator,
    L::Item: AsRef<str>,
{
    let mut interpreter = LogInterpreter::new(*dialect, options);
    for line in lines {
        interpreter.feed(line.as_ref());
    }
    interpreter.finish()
}

/// Interpret the OCR text of a complete video replay
pub fn interpret_video<L>(
    frames: L,
    dialect: &VideoDialect,
    options: LedgerOptions,
) -> Tally<DisplayName>
where
    L: IntoIterator,
    L::Item: AsRef<str>,
{
    let mut interpreter = VideoInterpreter::new(*dialect, options);
    for text in frames {
        interpreter.feed(text.as_ref());
    }
    interpreter.finish()
}
