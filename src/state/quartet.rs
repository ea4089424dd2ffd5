use std::fmt;

use super::{BlockState, InheritanceState, StateError};

/// Inheritance state of a full quartet.
///
/// `Paternal` means the children share their paternal haplotype but not
/// their maternal one; `Maternal` is the mirror.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum QuartetState {
    /// Mendelian inheritance error.
    Mie,
    /// Only one founder's transmission is known.
    Partial,
    /// Children share neither parental haplotype.
    NonIdentical,
    /// Children share only the paternal haplotype.
    Paternal,
    /// Children share only the maternal haplotype.
    Maternal,
    /// Children share both parental haplotypes.
    Identical,
    /// Site carries no information about transmission.
    NotInformative,
}

impl QuartetState {
    /// All states in score order.
    pub const ALL: [QuartetState; 7] = [
        QuartetState::Mie,
        QuartetState::Partial,
        QuartetState::NonIdentical,
        QuartetState::Paternal,
        QuartetState::Maternal,
        QuartetState::Identical,
        QuartetState::NotInformative,
    ];

    /// Fixed serialisation score.
    pub fn score(self) -> i32 {
        match self {
            QuartetState::Mie => -1,
            QuartetState::Partial => 0,
            QuartetState::NonIdentical => 1,
            QuartetState::Paternal => 2,
            QuartetState::Maternal => 3,
            QuartetState::Identical => 4,
            QuartetState::NotInformative => 5,
        }
    }

    /// State for a score, if any.
    pub fn from_score(score: i32) -> Option<Self> {
        Self::ALL.into_iter().find(|state| state.score() == score)
    }
}

impl InheritanceState for QuartetState {
    const KIND: &'static str = "quartet";

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
        *self == QuartetState::Partial
    }
}

impl BlockState for QuartetState {
    fn accepts(&self, candidate: QuartetState) -> bool {
        *self == candidate
    }
}

impl fmt::Display for QuartetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            QuartetState::Mie => "MIE",
            QuartetState::Partial => "PARTIAL",
            QuartetState::NonIdentical => "NON_IDENTICAL",
            QuartetState::Paternal => "PATERNAL",
            QuartetState::Maternal => "MATERNAL",
            QuartetState::Identical => "IDENTICAL",
            QuartetState::NotInformative => "NOT_INFORMATIVE",
        };
        f.write_str(name)
    }
}
