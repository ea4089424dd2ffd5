use std::fmt;

use super::{InheritanceState, StateError};

/// Inheritance state of one founder and both children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum TrioState {
    /// Mendelian inheritance error within the trio.
    Mie,
    /// Transmission from this founder is undetermined.
    Unknown,
    /// Children received different haplotypes from this founder.
    NonIdentical,
    /// Children received the same haplotype from this founder.
    Identical,
    /// Site carries no information about this founder's transmission.
    NotInformative,
}

impl TrioState {
    /// All states in score order.
    pub const ALL: [TrioState; 5] = [
        TrioState::Mie,
        TrioState::Unknown,
        TrioState::NonIdentical,
        TrioState::Identical,
        TrioState::NotInformative,
    ];

    /// States that take part in the composite cross-trios score.
    pub const KNOWN: [TrioState; 3] = [
        TrioState::Unknown,
        TrioState::NonIdentical,
        TrioState::Identical,
    ];

    /// Fixed serialisation score.
    pub fn score(self) -> i32 {
        match self {
            TrioState::Mie => -1,
            TrioState::Unknown => 0,
            TrioState::NonIdentical => 1,
            TrioState::Identical => 2,
            TrioState::NotInformative => 3,
        }
    }

    /// State for a score, if any.
    pub fn from_score(score: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.score() == score)
    }

    /// `Identical` or `Unknown`.
    pub fn allows_identical(self) -> bool {
        matches!(self, TrioState::Identical | TrioState::Unknown)
    }

    /// `NonIdentical` or `Unknown`.
    pub fn allows_non_identical(self) -> bool {
        matches!(self, TrioState::NonIdentical | TrioState::Unknown)
    }
}

impl InheritanceState for TrioState {
    const KIND: &'static str = "trio";

    fn encode(&self) -> Result<i32, StateError> {
        Ok(self.score())
    }

    fn decode(score: i32) -> Result<Self, StateError> {
        Self::from_score(score).ok_or(StateError::UnknownScore {
            kind: Self::KIND,
            score,
        })
    }

    fn is_partial(&self) -> bool {
        *self == TrioState::Unknown
    }
}

impl fmt::Display for TrioState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrioState::Mie => "MIE",
            TrioState::Unknown => "UNKNOWN",
            TrioState::NonIdentical => "NON_IDENTICAL",
            TrioState::Identical => "IDENTICAL",
            TrioState::NotInformative => "NOT_INFORMATIVE",
        };
        f.write_str(name)
    }
}
