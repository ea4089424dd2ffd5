//! Canonical genotype patterns and their candidate inheritance states.
//!
//! A quartet's four genotypes are reduced to a pattern string such as
//! `ab/ab;aa/bb`: founders before the `;`, children after. `a` is the
//! most frequent allele among the founders. `/` joins a pair whose order
//! is irrelevant, `+` joins a `father+mother` pair whose order matters.

mod classifier;
mod derive;

pub use classifier::{classify, classify_str, PatternClassifier};
pub use derive::{most_frequent_allele, GenotypePattern, MemberPattern, PairLink, PairPattern};

use thiserror::Error;

/// Errors raised by pattern parsing and classification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatternError {
    /// Text is not of the form `xx?yy;xx/yy`.
    #[error("malformed genotype pattern '{0}'")]
    Malformed(String),

    /// Well-formed pattern with no entry in the classification table.
    #[error("unrecognized genotype pattern '{0}'")]
    Unrecognized(String),
}
