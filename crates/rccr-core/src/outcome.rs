use serde::{Deserialize, Serialize};
use std::time::Duration;

use rccr_critic::Critique;

/// Result of polishing one piece of text
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolishOutcome {
    /// Preset the request was built from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preset: Option<String>,
    pub critique: Critique,
    pub refined: String,
    pub total_duration_secs: f64,
}

impl PolishOutcome {
    pub fn new(
        preset: Option<String>,
        critique: Critique,
        refined: String,
        duration: Duration,
    ) -> Self {
        Self {
            preset,
            critique,
            refined,
            total_duration_secs: duration.as_secs_f64(),
        }
    }

    pub fn looks_good(&self) -> bool {
        self.critique.looks_good()
    }
}
