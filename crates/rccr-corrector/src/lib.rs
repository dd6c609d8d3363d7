//! # rccr-corrector
//!
//! Spelling correction backends used by the text refiner.
//!
//! ## Key Types
//!
//! - [`TextCorrector`] - The correction capability injected into the refiner
//! - [`DictionaryCorrector`] - Edit-distance correction over a word frequency list
//! - [`CommandCorrector`] - Pipes text through an external program
//! - [`PassthroughCorrector`] - Leaves text untouched

mod command;
mod dictionary;
mod passthrough;
mod traits;

pub use command::CommandCorrector;
pub use dictionary::{Dictionary, DictionaryCorrector};
pub use passthrough::PassthroughCorrector;
pub use traits::{CorrectorError, CorrectorSettings, CorrectorType, TextCorrector};

/// Create a corrector from settings
pub fn create_corrector(
    settings: &CorrectorSettings,
) -> Result<Box<dyn TextCorrector>, CorrectorError> {
    match settings.corrector_type {
        CorrectorType::Dictionary => match &settings.dictionary {
            Some(path) => Ok(Box::new(DictionaryCorrector::from_file(path)?)),
            None => Ok(Box::new(DictionaryCorrector::new())),
        },
        CorrectorType::Command => {
            let command = settings.command.clone().ok_or_else(|| {
                CorrectorError::ConfigError(
                    "the command corrector requires a command to run".to_string(),
                )
            })?;
            let mut corrector = CommandCorrector::new(command).with_args(settings.args.clone());
            if let Some(timeout) = settings.timeout {
                corrector = corrector.with_timeout(timeout);
            }
            Ok(Box::new(corrector))
        }
        CorrectorType::Passthrough => Ok(Box::new(PassthroughCorrector::new())),
    }
}
