use thiserror::Error;

/// Message shown when a request carries no text
pub const EMPTY_INPUT_MESSAGE: &str = "Please enter some text to refine.";

#[derive(Error, Debug)]
pub enum PolishError {
    #[error("{}", EMPTY_INPUT_MESSAGE)]
    EmptyInput,

    #[error("Preset error: {0}")]
    UnknownPreset(#[from] crate::PresetError),

    #[error("Correction failed: {0}")]
    Correction(#[from] rccr_corrector::CorrectorError),
}
