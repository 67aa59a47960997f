//! Message parsers for the log dialect

use std::sync::LazyLock;

use regex::Regex;

use crate::event::Event;
use crate::identity::{Nickname, Species};

/// `: VICTIM|0 fnt` anywhere in the line (`|-damage|`, `|-sethp|`, ...)
static FAINT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r": (.+?)\|0 fnt").expect("faint pattern is valid"));

/// Parse |move|POKEMON|MOVE|TARGET
pub fn parse_move(line: &str) -> Option<Event<Nickname>> {
    let rest = line.strip_prefix("|move|")?;
    let parts: Vec<&str> = rest.split('|').collect();

    // POKEMON, MOVE and at least the separator before TARGET
    if parts.len() < 3 {
        return None;
    }

    let actor = actor_name(parts[0])?;
    let move_name = parts[1];
    if move_name.is_empty() {
        return None;
    }

    Some(Event::MoveUsed {
        actor: Nickname::new(actor),
        move_name: move_name.to_string(),
    })
}

/// Parse any line reporting `POKEMON|0 fnt`
pub fn parse_faint(line: &str) -> Option<Event<Nickname>> {
    let captures = FAINT.captures(line)?;
    let victim = captures.get(1)?.as_str();

    Some(Event::Fainted {
        actor: Nickname::new(victim),
    })
}

/// Parse |switch|, |drag| or |replace| with POKEMON|DETAILS
///
/// `level` filters on the level token of DETAILS; `None` accepts any.
pub fn parse_switch(line: &str, level: Option<u8>) -> Option<Event<Nickname>> {
    let parts: Vec<&str> = line.split('|').collect();

    if parts.len() < 4 || !parts[0].is_empty() {
        return None;
    }

    if !matches!(parts[1], "switch" | "drag" | "replace") {
        return None;
    }

    let nickname = actor_name(parts[2])?;
    let details = Details::parse(parts[3])?;

    if let Some(required) = level
        && details.level != Some(required)
    {
        return None;
    }

    Some(Event::SwitchIn {
        nickname: Nickname::new(nickname),
        species: Species::new(details.species),
    })
}

/// Name part of a pokemon ID like "p1a: Sparky"
fn actor_name(field: &str) -> Option<&str> {
    let (position, name) = field.split_once(": ")?;
    if position.is_empty() || name.is_empty() {
        return None;
    }
    Some(name)
}

/// The part of a details string ("Pikachu, L50, M, shiny") we care about
struct Details<'a> {
    species: &'a str,
    level: Option<u8>,
}

impl<'a> Details<'a> {
    fn parse(s: &'a str) -> Option<Self> {
        let mut parts = s.split(',').map(str::trim);

        let species = parts.next().filter(|s| !s.is_empty())?;
        let level = parts
            .find_map(|part| part.strip_prefix('L'))
            .and_then(|l| l.parse().ok());

        Some(Details { species, level })
    }
}
