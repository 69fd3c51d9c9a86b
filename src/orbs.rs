use std::fmt;

/// Longest combination the queue can hold
pub const MAX_ORBS: usize = 3;

/// One of the three invocable elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, strum_macros::Display)]
pub enum Orb {
    #[strum(to_string = "Q")]
    Quas,
    #[strum(to_string = "W")]
    Wex,
    #[strum(to_string = "E")]
    Exort,
}

impl Orb {
    pub const ALL: [Orb; 3] = [Orb::Quas, Orb::Wex, Orb::Exort];

    /// Case-insensitive: `q`/`Q` is Quas, `w`/`W` is Wex, `e`/`E` is Exort.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'Q' => Some(Orb::Quas),
            'W' => Some(Orb::Wex),
            'E' => Some(Orb::Exort),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            Orb::Quas => 0,
            Orb::Wex => 1,
            Orb::Exort => 2,
        }
    }
}

/// Per-orb frequency counts of a sequence
fn counts(orbs: &[Orb]) -> [usize; 3] {
    orbs.iter().fold([0; 3], |mut acc, orb| {
        acc[orb.index()] += 1;
        acc
    })
}

/// True when `entered` is a rearrangement of `target` (multiset equality).
pub fn is_invocation_of(entered: &[Orb], target: &[Orb]) -> bool {
    entered.len() == target.len() && counts(entered) == counts(target)
}

/// Rolling window of the most recently entered orbs.
///
/// Backed by a fixed array; `capacity` is the length of the combination being
/// attempted. Pushing into a full queue drops the oldest orb.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrbQueue {
    slots: [Orb; MAX_ORBS],
    len: usize,
    capacity: usize,
}

impl OrbQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: [Orb::Quas; MAX_ORBS],
            len: 0,
            capacity: capacity.min(MAX_ORBS),
        }
    }

    pub fn push(&mut self, orb: Orb) {
        if self.capacity == 0 {
            return;
        }
        if self.len == self.capacity {
            self.slots.copy_within(1..self.capacity, 0);
            self.len -= 1;
        }
        self.slots[self.len] = orb;
        self.len += 1;
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    pub fn as_slice(&self) -> &[Orb] {
        &self.slots[..self.len]
    }
}

impl fmt::Display for OrbQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_slice()
            .iter()
            .try_for_each(|orb| write!(f, "{orb}"))
    }
}
