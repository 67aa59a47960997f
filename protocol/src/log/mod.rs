//! Showdown replay log dialect
//!
//! A replay log is the raw protocol stream the server sent during the battle,
//! one message per line. Only three shapes matter for kill/death tracking:
//!
//! ```text
//! |move|p1a: Sparky|Thunderbolt|p2a: Rocky
//! |-damage|p2a: Rocky|0 fnt
//! |switch|p1a: Sparky|Pikachu, L50, M|100/100
//! ```
//!
//! Actors are named by nickname here. Switch lines are the only place the
//! nickname is tied to a species.

mod parse;
#[cfg(test)]
mod tests;

use crate::Dialect;
use crate::event::Event;
use crate::identity::Nickname;

/// Level required in switch details unless configured otherwise
pub const DEFAULT_LEVEL: u8 = 50;

/// Classifier for replay log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogDialect {
    level: Option<u8>,
}

impl LogDialect {
    /// Log dialect accepting switch lines at [`DEFAULT_LEVEL`]
    pub fn new() -> Self {
        Self::with_level(Some(DEFAULT_LEVEL))
    }

    /// Log dialect accepting switch lines at `level`, or at any level for `None`
    pub fn with_level(level: Option<u8>) -> Self {
        Self { level }
    }

    pub fn level(&self) -> Option<u8> {
        self.level
    }
}

impl Default for LogDialect {
    fn default() -> Self {
        Self::new()
    }
}

impl Dialect for LogDialect {
    type Id = Nickname;

    fn classify(&self, line: &str) -> Option<Event<Nickname>> {
        parse::parse_move(line)
            .or_else(|| parse::parse_faint(line))
            .or_else(|| parse::parse_switch(line, self.level))
    }
}
