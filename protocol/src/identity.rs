//! Participant identities
//!
//! The same creature is named differently depending on where the text came
//! from: the replay log uses the trainer's nickname, switch lines reveal the
//! species, and the video shows whatever name the client printed. Each
//! namespace gets its own type so a nickname is never compared with a species
//! without going through resolution first.

use std::fmt;
use std::hash::Hash;

/// A name in one of the identity namespaces
pub trait Identity: Clone + Eq + Ord + Hash + fmt::Debug + fmt::Display {
    fn as_str(&self) -> &str;

    fn into_inner(self) -> String;
}

/// An identity that is stable across replays and may be aggregated
pub trait ResolvedIdentity: Identity {}

macro_rules! identity {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(name: impl Into<String>) -> Self {
                Self(name.into())
            }
        }

        impl Identity for $name {
            fn as_str(&self) -> &str {
                &self.0
            }

            fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(name: &str) -> Self {
                Self::new(name)
            }
        }
    };
}

identity! {
    /// Name after the position prefix in a log line (`p1a: Sparky` -> `Sparky`)
    Nickname
}

identity! {
    /// Species from a switch details field (`Pikachu, L50, M` -> `Pikachu`)
    Species
}

identity! {
    /// Name as printed in the on-screen battle message
    DisplayName
}

impl ResolvedIdentity for Species {}
impl ResolvedIdentity for DisplayName {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_display() {
        let nick = Nickname::new("Sparky");
        assert_eq!(nick.to_string(), "Sparky");
        assert_eq!(nick.as_str(), "Sparky");
    }

    #[test]
    fn test_identity_ordering_is_lexicographic() {
        let mut names = vec![
            Species::from("Zapdos"),
            Species::from("Abra"),
            Species::from("Mew"),
        ];
        names.sort();

        let names: Vec<&str> = names.iter().map(|s| s.as_str()).collect();
        assert_eq!(names, vec!["Abra", "Mew", "Zapdos"]);
    }
}
