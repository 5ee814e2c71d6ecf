/*! Single-shot classification modes.

Everything here is sequential plumbing around an [crate::identifiers::Identifier]:
batch classification of whole files named on the request stream, and the
document/line/interactive stdin modes. !*/
mod batch;
mod stream;

pub use batch::{classify_paths, NO_FILE};
pub use stream::{classify_document, classify_lines, interactive};
