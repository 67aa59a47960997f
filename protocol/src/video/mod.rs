//! OCR'd battle message dialect
//!
//! Text recognised from the message box of a recorded battle. Each sampled
//! frame yields one block of text, often garbled or empty. Two messages are
//! recognised:
//!
//! ```text
//! The opposing Rocky used Earthquake!
//! Sparky fainted!
//! ```
//!
//! The message box holds two lines, so one block can carry a move and the
//! faint it caused; [`VideoDialect::classify_block`] reports both.
//!
//! Without the "The opposing " qualifier the name must start the block
//! (leading spaces are tolerated), which keeps stray OCR fragments from being
//! read as actors.

use std::sync::LazyLock;

use regex::Regex;

use crate::Dialect;
use crate::event::Event;
use crate::identity::DisplayName;

static USED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:The opposing |^ *)(.+?) used (.+?)!").expect("used pattern is valid")
});

static FAINTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:The opposing |^ *)(.+?) fainted!").expect("fainted pattern is valid")
});

/// Classifier for OCR text blocks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VideoDialect;

impl VideoDialect {
    pub fn new() -> Self {
        Self
    }

    /// Every event in one OCR block: the move first, then the faint
    pub fn classify_block(&self, text: &str) -> impl Iterator<Item = Event<DisplayName>> {
        let used = USED.captures(text).map(|captures| Event::MoveUsed {
            actor: DisplayName::new(&captures[1]),
            move_name: captures[2].to_string(),
        });
        let fainted = FAINTED.captures(text).map(|captures| Event::Fainted {
            actor: DisplayName::new(&captures[1]),
        });

        used.into_iter().chain(fainted)
    }
}

impl Dialect for VideoDialect {
    type Id = DisplayName;

    /// First event in the block; see [`VideoDialect::classify_block`]
    fn classify(&self, text: &str) -> Option<Event<DisplayName>> {
        self.classify_block(text).next()
    }
}
