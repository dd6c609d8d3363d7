use crate::{CorrectorError, CorrectorType, TextCorrector};

/// Corrector that leaves text untouched
#[derive(Debug, Default, Clone, Copy)]
pub struct PassthroughCorrector;

impl PassthroughCorrector {
    pub fn new() -> Self {
        Self
    }
}

impl TextCorrector for PassthroughCorrector {
    fn name(&self) -> &str {
        "passthrough"
    }

    fn corrector_type(&self) -> CorrectorType {
        CorrectorType::Passthrough
    }

    fn correct(&self, text: &str) -> Result<String, CorrectorError> {
        Ok(text.to_string())
    }
}
