//! Line classification for Pokemon Showdown battle text.
//!
//! Two dialects are understood:
//!
//! - [`LogDialect`]: the authoritative replay log served by Showdown
//!   (`|move|p1a: Sparky|Thunderbolt|p2a: Rocky`)
//! - [`VideoDialect`]: battle messages read off a recorded video by OCR
//!   (`The opposing Rocky fainted!`)
//!
//! Each dialect turns a single raw line into zero or one [`Event`]. Lines that
//! match nothing are expected (OCR noise, chat, unrelated protocol messages)
//! and simply produce `None`. An OCR block can hold two messages, so
//! [`VideoDialect::classify_block`] yields every event in it.

pub mod event;
pub mod identity;
pub mod log;
pub mod video;

pub use event::Event;
pub use identity::{DisplayName, Identity, Nickname, ResolvedIdentity, Species};
pub use log::LogDialect;
pub use video::VideoDialect;

/// A text dialect that can be classified line by line
pub trait Dialect {
    /// Namespace of the actor names this dialect produces
    type Id: Identity;

    /// Classify one raw line, returning `None` when it matches no known shape
    fn classify(&self, line: &str) -> Option<Event<Self::Id>>;
}
