/*! Language identification models

Holds an [Identifier] trait for implementing other ones.

The current identifier used is [fasttext](https://fasttext.cc) !*/
mod fasttext;
mod identifier;

pub use fasttext::FastText;
pub use identifier::{code_of, Identification, Identifier};

/// Code emitted/compared when the model yields no prediction at all.
pub const UNKNOWN: &str = "und";
