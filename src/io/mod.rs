/*! Line-oriented readers and writers.

[FullLines] yields lines with their terminators so that filtered text can be
re-emitted verbatim, while [LabelWriter]/[LabelReader] persist one language
code per line. !*/
mod labels;
mod lines;

pub use labels::{LabelReader, LabelWriter};
pub use lines::{trim_terminator, FullLines};
