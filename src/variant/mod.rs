//! Quartet variant sites and the VCF/BCF record decoder that produces them.

mod record;
mod site;
#[cfg(test)]
pub(crate) mod test_util;

pub use record::{FilterPolicy, RecordDecoder, RecordError};
pub use site::VariantSite;
