/*! Identifier trait

All identifiers should implement [Identifier] to be useable in modes and pipelines.
!*/
use crate::error::Error;

use super::UNKNOWN;

/// A single language identification: a language code and the model's confidence.
#[derive(Debug, Clone, PartialEq)]
pub struct Identification {
    label: String,
    prob: f32,
}

impl Identification {
    pub fn new(label: String, prob: f32) -> Self {
        Self { label, prob }
    }

    /// Get a reference to the identification's label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Get a reference to the identification's prob.
    pub fn prob(&self) -> &f32 {
        &self.prob
    }
}

pub trait Identifier {
    /// returns a language identification for the provided sentence,
    /// or `None` if the model can't produce one.
    fn identify(&self, sentence: &str) -> Result<Option<Identification>, Error>;
}

/// Language code of an optional identification, falling back on [UNKNOWN].
pub fn code_of(identification: Option<Identification>) -> String {
    identification.map_or_else(|| UNKNOWN.to_string(), |i| i.label)
}
