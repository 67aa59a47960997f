//! Events recognised in battle text

use crate::identity::{Nickname, Species};

/// A battle event classified from one line
///
/// `I` is the identity namespace of the dialect that produced the event.
/// `SwitchIn` only ever comes from the log dialect and always carries a
/// nickname/species pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event<I> {
    /// `|move|p1a: Sparky|Thunderbolt|` or `Sparky used Thunderbolt!`
    MoveUsed { actor: I, move_name: String },

    /// `|-damage|p2a: Rocky|0 fnt` or `The opposing Rocky fainted!`
    Fainted { actor: I },

    /// `|switch|p1a: Sparky|Pikachu, L50|...`
    SwitchIn { nickname: Nickname, species: Species },
}
