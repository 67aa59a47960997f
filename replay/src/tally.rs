//! Per-replay kill/death counters

use std::collections::BTreeMap;
use std::collections::btree_map;

use faintlog_protocol::Identity;

/// Kills and deaths for one participant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct KillDeath {
    pub kills: u32,
    pub deaths: u32,
}

impl KillDeath {
    pub fn new(kills: u32, deaths: u32) -> Self {
        Self { kills, deaths }
    }
}

impl std::ops::AddAssign for KillDeath {
    fn add_assign(&mut self, other: Self) {
        self.kills += other.kills;
        self.deaths += other.deaths;
    }
}

/// Kill/death counters for one replay, keyed by identity
///
/// An entry only exists once its participant has been credited with a kill or
/// a death, so every entry is non-zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<I: Identity> {
    entries: BTreeMap<I, KillDeath>,
}

impl<I: Identity> Tally<I> {
    pub fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    pub fn credit_kill(&mut self, id: I) {
        self.entries.entry(id).or_default().kills += 1;
    }

    pub fn credit_death(&mut self, id: I) {
        self.entries.entry(id).or_default().deaths += 1;
    }

    /// Add `kd` to the counters of `id`, creating the entry if needed
    pub fn add(&mut self, id: I, kd: KillDeath) {
        *self.entries.entry(id).or_default() += kd;
    }

    pub fn get(&self, id: &I) -> Option<KillDeath> {
        self.entries.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in ascending identity order
    pub fn iter(&self) -> impl Iterator<Item = (&I, KillDeath)> {
        self.entries.iter().map(|(id, kd)| (id, *kd))
    }
}

impl<I: Identity> Default for Tally<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I: Identity> IntoIterator for Tally<I> {
    type Item = (I, KillDeath);
    type IntoIter = btree_map::IntoIter<I, KillDeath>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Collects entries, summing any repeated identity
impl<I: Identity> FromIterator<(I, KillDeath)> for Tally<I> {
    fn from_iter<T: IntoIterator<Item = (I, KillDeath)>>(iter: T) -> Self {
        let mut tally = Tally::new();
        for (id, kd) in iter {
            tally.add(id, kd);
        }
        tally
    }
}
