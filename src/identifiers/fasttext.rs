//! Fasttext identifier
use std::path::Path;

use fasttext::{FastText as FastTextLib, Prediction};

use crate::error::Error;

use super::{identifier, Identification};

/// Clean the prediction label field from `__label__xx` into `xx`.
///
/// Be aware that the function only skips 9 chars without doing any parsing,
/// so it may silently fail if `prediction.label.chars().count() > 9`
/// but not of a `__label__xx` form.
///
/// # Errors
/// Returns an error if provided prediction is too short to be cleaned.
fn clean_prediction(prediction: &Prediction) -> Result<Prediction, String> {
    if prediction.label.chars().count() < 9 {
        return Err(format!(
            "Label is too short to be cleaned: {}",
            prediction.label
        ));
    }
    Ok(Prediction {
        prob: prediction.prob,
        label: prediction.label.chars().skip(9).collect(),
    })
}

/// Holds a [fasttext::FastText] instance and its prediction threshold.
///
/// [fasttext::FastText::predict] takes `&self`, so a single loaded model can be
/// shared read-only by concurrent classification tasks.
pub struct FastText {
    predictor: FastTextLib,
    pub threshold: f32,
}

impl FastText {
    /// Create a new fasttext classifier allowing to identify
    /// language of strings.
    ///
    /// [Self::threshold] is set to 0: this tool wants a label for every
    /// line, however unsure the model is.
    ///
    /// **Having `lid.176.bin` at `.` is mandatory**
    ///
    /// # Errors
    /// Propagates [fasttext::FastText] errors.
    pub fn new_lid() -> Result<Self, Error> {
        Self::new(Path::new("lid.176.bin"), 0.0)
    }

    /// Create a new fasttext classifier.
    ///
    /// filename has to be a path to a `bin` file.
    ///
    /// See [fasttext::FastText::predict] for the threshold explanation
    pub fn new(filename: &Path, threshold: f32) -> Result<Self, Error> {
        let mut predictor = FastTextLib::new();
        let filename_str = filename.to_str();
        match filename_str {
            None => Err(Error::Custom(format!(
                "invalid filepath for lid: {:?}",
                filename
            ))),
            Some(filename) => {
                predictor.load_model(filename)?;
                Ok(Self {
                    predictor,
                    threshold,
                })
            }
        }
    }
}

impl identifier::Identifier for FastText {
    fn identify(&self, sentence: &str) -> Result<Option<Identification>, Error> {
        // filter out unicode null chars, which crash the underlying C++ code
        let sentence = sentence.replace(char::from(0), "");
        let predictions = self
            .predictor
            .predict(&sentence, 1, self.threshold)
            .map_err(Error::FastText)?;

        match predictions.into_iter().next() {
            Some(prediction) => {
                let prediction = clean_prediction(&prediction).map_err(Error::FastText)?;
                Ok(Some(Identification::new(prediction.label, prediction.prob)))
            }
            None => Ok(None),
        }
    }
}
