use std::collections::BTreeSet;

/// What the user has picked for one question.
///
/// Multi-answer picks are kept in a `BTreeSet`, so they are always unique
/// and iterate in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection {
    #[default]
    Unset,
    Single(usize),
    Multiple(BTreeSet<usize>),
}

impl Selection {
    /// True when the pick is enough to move on: a single index, or at
    /// least one index of a multi-answer set.
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Unset => false,
            Self::Single(_) => true,
            Self::Multiple(set) => !set.is_empty(),
        }
    }

    pub fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    pub fn contains(&self, choice: usize) -> bool {
        match self {
            Self::Unset => false,
            Self::Single(index) => *index == choice,
            Self::Multiple(set) => set.contains(&choice),
        }
    }

    /// Flips membership of `choice` in a multi-answer pick. A pick of any
    /// other shape is discarded first.
    pub fn toggle(&mut self, choice: usize) {
        match self {
            Self::Multiple(set) => {
                if !set.remove(&choice) {
                    set.insert(choice);
                }
            }
            _ => *self = Self::Multiple(BTreeSet::from([choice])),
        }
    }
}
