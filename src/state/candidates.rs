use std::fmt;

use super::QuartetState;

/// One or two quartet states that explain a site equally well.
///
/// Membership tests use "any-of" semantics: a site is an MIE if any
/// candidate is `Mie`, and consistent with a block if any candidate is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CandidateStates {
    primary: QuartetState,
    secondary: Option<QuartetState>,
}

impl CandidateStates {
    /// A single candidate.
    pub const fn one(state: QuartetState) -> Self {
        Self {
            primary: state,
            secondary: None,
        }
    }

    /// Two candidates.
    pub const fn two(primary: QuartetState, secondary: QuartetState) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    /// First candidate.
    pub fn primary(&self) -> QuartetState {
        self.primary
    }

    /// Second candidate, if the site is ambiguous.
    pub fn secondary(&self) -> Option<QuartetState> {
        self.secondary
    }

    /// Iterate the candidates.
    pub fn iter(&self) -> impl Iterator<Item = QuartetState> {
        std::iter::once(self.primary).chain(self.secondary)
    }

    /// Whether any candidate equals `state`.
    pub fn contains(&self, state: QuartetState) -> bool {
        self.any(|candidate| candidate == state)
    }

    /// Whether any candidate satisfies `predicate`.
    pub fn any(&self, mut predicate: impl FnMut(QuartetState) -> bool) -> bool {
        predicate(self.primary) || self.secondary.is_some_and(predicate)
    }

    /// Number of candidates (1 or 2).
    pub fn len(&self) -> usize {
        1 + usize::from(self.secondary.is_some())
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Whether the site is a Mendelian inheritance error.
    pub fn is_mie(&self) -> bool {
        self.contains(QuartetState::Mie)
    }

    /// Whether the site carries no inheritance information.
    pub fn is_not_informative(&self) -> bool {
        self.contains(QuartetState::NotInformative)
    }
}

impl fmt::Display for CandidateStates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.secondary {
            Some(secondary) => write!(f, "{},{}", self.primary, secondary),
            None => write!(f, "{}", self.primary),
        }
    }
}
