//! Nickname to species resolution for log replays

use std::collections::HashMap;

use faintlog_protocol::{Nickname, Species};

use crate::error::ReplayError;
use crate::tally::Tally;

/// Nickname to species mapping for one replay
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeciesMap {
    species: HashMap<Nickname, Species>,
}

impl SpeciesMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the map from switches in log order; later switches win
    pub fn from_switches<S>(switches: S) -> Self
    where
        S: IntoIterator<Item = (Nickname, Species)>,
    {
        let mut map = Self::new();
        for (nickname, species) in switches {
            map.insert(nickname, species);
        }
        map
    }

    pub fn insert(&mut self, nickname: Nickname, species: Species) {
        self.species.insert(nickname, species);
    }

    pub fn get(&self, nickname: &Nickname) -> Option<&Species> {
        self.species.get(nickname)
    }

    pub fn len(&self) -> usize {
        self.species.len()
    }

    pub fn is_empty(&self) -> bool {
        self.species.is_empty()
    }

    /// Re-key a nickname tally by species
    ///
    /// Nicknames that resolve to the same species are summed. Fails on the
    /// first nickname that has no switch.
    pub fn resolve(&self, tally: Tally<Nickname>) -> Result<Tally<Species>, ReplayError> {
        tally
            .into_iter()
            .map(|(nickname, kd)| match self.get(&nickname) {
                Some(species) => Ok((species.clone(), kd)),
                None => Err(ReplayError::UnresolvedNickname(nickname)),
            })
            .collect()
    }
}

/// Resolve `tally` against the switches of the same replay
pub fn resolve<S>(tally: Tally<Nickname>, switches: S) -> Result<Tally<Species>, ReplayError>
where
    S: IntoIterator<Item = (Nickname, Species)>,
{
    SpeciesMap::from_switches(switches).resolve(tally)
}
