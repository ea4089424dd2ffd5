//! Inheritance states assigned to sites and genomic blocks.
//!
//! A quartet site is explained by a [`QuartetState`]. When a family is
//! analysed as two founder trios (father + children, mother + children)
//! each trio carries a [`TrioState`] and the pair forms a
//! [`CrossTriosState`].
//!
//! Every state has an integer score used by bedgraph-style interchange:
//!
//! | score | quartet           | trio              |
//! |-------|-------------------|-------------------|
//! | -1    | `Mie`             | `Mie`             |
//! | 0     | `Partial`         | `Unknown`         |
//! | 1     | `NonIdentical`    | `NonIdentical`    |
//! | 2     | `Paternal`        | `Identical`       |
//! | 3     | `Maternal`        | `NotInformative`  |
//! | 4     | `Identical`       |                   |
//! | 5     | `NotInformative`  |                   |

mod candidates;
mod cross_trios;
mod quartet;
mod trio;

pub use candidates::CandidateStates;
pub use cross_trios::CrossTriosState;
pub use quartet::QuartetState;
pub use trio::TrioState;

use std::fmt;

use thiserror::Error;

/// Errors raised while converting states to and from scores.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StateError {
    /// Score does not name any state of the requested kind.
    #[error("score {score} is not a valid {kind} state")]
    UnknownScore {
        /// State family being decoded.
        kind: &'static str,
        /// Offending score.
        score: i32,
    },

    /// Composite score outside the 3x3 known trio domain.
    #[error("cross-trios score {0} is outside 0..=8")]
    OutOfDomain(i32),

    /// Trio pair contains a state with no composite score.
    #[error("cross-trios state {0} has no composite score")]
    Unencodable(CrossTriosState),
}

/// Common behaviour of every state family: a stable integer score.
pub trait InheritanceState: Copy + PartialEq + fmt::Debug + fmt::Display {
    /// Short name of the state family, used in error messages.
    const KIND: &'static str;

    /// Score written for blocks with no assigned state.
    const PARTIAL_SCORE: i32 = 0;

    /// Serialisation score of this state.
    fn encode(&self) -> Result<i32, StateError>;

    /// Inverse of [`InheritanceState::encode`].
    fn decode(score: i32) -> Result<Self, StateError>;

    /// Whether the state only partially determines inheritance. Blocks
    /// carrying a partial state never report state-consistency errors.
    fn is_partial(&self) -> bool;
}

/// A state that can be assigned to a genomic block and judge the
/// quartet-level candidates of the sites inside it.
pub trait BlockState: InheritanceState {
    /// Whether `candidate` agrees with this block state.
    fn accepts(&self, candidate: QuartetState) -> bool;
}
