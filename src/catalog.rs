use crate::orbs::{Orb, MAX_ORBS};
use itertools::Itertools;
use rand::seq::SliceRandom;
use rand::Rng;

/// A named spell and the orbs that invoke it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Combination {
    pub name: &'static str,
    pub orbs: [Orb; MAX_ORBS],
}

impl Combination {
    /// Build from a `"QWE"`-style key string. Returns `None` unless the string
    /// holds exactly three orb characters.
    pub fn new(name: &'static str, keys: &str) -> Option<Self> {
        let mut orbs = [Orb::Quas; MAX_ORBS];
        let mut chars = keys.chars();
        for slot in orbs.iter_mut() {
            *slot = Orb::from_char(chars.next()?)?;
        }
        if chars.next().is_some() {
            return None;
        }
        Some(Self { name, orbs })
    }

    pub fn len(&self) -> usize {
        self.orbs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbs.is_empty()
    }

    pub fn keys(&self) -> String {
        self.orbs.iter().join("")
    }
}

const STANDARD: [(&str, [Orb; MAX_ORBS]); 10] = {
    use Orb::{Exort as E, Quas as Q, Wex as W};
    [
        ("Sunstrike", [E, E, E]),
        ("Ghostwalk", [Q, Q, W]),
        ("Chaos Meteor", [E, E, W]),
        ("Forge Spirit", [Q, E, E]),
        ("Ice Wall", [Q, Q, E]),
        ("Alacrity", [W, W, E]),
        ("EMP", [W, W, W]),
        ("Tornado", [W, W, Q]),
        ("Cold Snap", [Q, Q, Q]),
        ("Deafening Blast", [Q, W, E]),
    ]
};

/// The full set of combinations a session can draw from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    combinations: Vec<Combination>,
}

impl Catalog {
    pub fn new(combinations: Vec<Combination>) -> Self {
        Self { combinations }
    }

    pub fn standard() -> Self {
        Self::new(
            STANDARD
                .iter()
                .map(|&(name, orbs)| Combination { name, orbs })
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    pub fn combinations(&self) -> &[Combination] {
        &self.combinations
    }

    /// Shuffle a copy of the catalog and keep the first `count` entries.
    pub fn practice_list<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> PracticeList {
        let mut shuffled = self.combinations.clone();
        shuffled.shuffle(rng);
        shuffled.truncate(count);
        PracticeList(shuffled)
    }
}

/// Ordered, immutable sequence of combinations for one session
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PracticeList(Vec<Combination>);

impl PracticeList {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Combination> {
        self.0.iter()
    }
}

impl From<Vec<Combination>> for PracticeList {
    fn from(combinations: Vec<Combination>) -> Self {
        Self(combinations)
    }
}
