use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use rccr_critic::{CritiqueEngine, CritiqueInput};
use rccr_logging::{LogEvent, Logger};

use crate::error::PolishError;
use crate::outcome::PolishOutcome;
use crate::presets::TaskPreset;
use crate::refiner::TextRefiner;

const PREVIEW_CHARS: usize = 80;

/// One polish request: the raw text plus the task context it was written for
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolishRequest {
    pub raw_text: String,
    pub role: String,
    pub constraints: String,
    /// Name of the preset role and constraints came from
    pub preset: Option<String>,
}

impl PolishRequest {
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            ..Default::default()
        }
    }

    /// Request pre-filled with a preset's role and constraints
    pub fn from_preset(preset: &TaskPreset, raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            role: preset.role.clone(),
            constraints: preset.constraints.clone(),
            preset: Some(preset.name.clone()),
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_constraints(mut self, constraints: impl Into<String>) -> Self {
        self.constraints = constraints.into();
        self
    }

    fn preview(&self) -> String {
        self.raw_text
            .trim()
            .chars()
            .take(PREVIEW_CHARS)
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .collect()
    }
}

/// Runs critique and refinement for a single request
pub struct Polisher<'a> {
    refiner: &'a TextRefiner,
    critic: &'a CritiqueEngine,
    logger: Arc<Logger>,
}

impl<'a> Polisher<'a> {
    pub fn new(refiner: &'a TextRefiner, critic: &'a CritiqueEngine, logger: Arc<Logger>) -> Self {
        Self {
            refiner,
            critic,
            logger,
        }
    }

    /// Critique and refine the request's raw text.
    ///
    /// Whitespace-only text is rejected before either step runs. A corrector
    /// failure fails the whole request; there is no partial result.
    pub fn polish(&self, request: &PolishRequest) -> Result<PolishOutcome, PolishError> {
        if request.raw_text.trim().is_empty() {
            debug!("Rejecting empty polish request");
            return Err(PolishError::EmptyInput);
        }

        let start = Instant::now();
        self.logger.log(&LogEvent::PolishStarted {
            preset: request.preset.clone(),
            text_preview: request.preview(),
            word_count: request.raw_text.split_whitespace().count(),
        });

        let critique = self.critic.evaluate(CritiqueInput {
            raw_text: &request.raw_text,
            role: &request.role,
            constraints: &request.constraints,
        });
        self.logger.log(&LogEvent::CritiqueCompleted {
            issues: critique.rules().len(),
            summary: critique.short_description(),
        });

        self.logger.log(&LogEvent::CorrectionStarted {
            corrector: self.refiner.corrector().name().to_string(),
        });
        let refine_start = Instant::now();
        let refined = match self.refiner.refine(&request.raw_text) {
            Ok(refined) => refined,
            Err(e) => {
                warn!(error = %e, "Refinement failed");
                let error = PolishError::from(e);
                self.logger.log(&LogEvent::ErrorEncountered {
                    error: error.to_string(),
                });
                return Err(error);
            }
        };
        self.logger.log(&LogEvent::RefineCompleted {
            input_chars: request.raw_text.chars().count(),
            output_chars: refined.chars().count(),
            duration_secs: refine_start.elapsed().as_secs_f64(),
        });

        let duration = start.elapsed();
        info!(
            issues = critique.rules().len(),
            duration_ms = duration.as_millis(),
            "Polish completed"
        );
        self.logger.log(&LogEvent::PolishCompleted {
            duration_secs: duration.as_secs_f64(),
        });

        Ok(PolishOutcome::new(
            request.preset.clone(),
            critique,
            refined,
            duration,
        ))
    }
}
