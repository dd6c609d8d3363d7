use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while correcting text
#[derive(Error, Debug)]
pub enum CorrectorError {
    #[error("Failed to spawn corrector process: {0}")]
    SpawnFailed(#[from] std::io::Error),

    #[error("Corrector timed out after {0:?}")]
    Timeout(Duration),

    #[error("Failed to load dictionary: {0}")]
    DictionaryLoad(String),

    #[error("Corrector configuration error: {0}")]
    ConfigError(String),

    #[error("Corrector execution failed: {0}")]
    ExecutionFailed(String),
}

/// Settings used to build a corrector
#[derive(Debug, Clone, Default)]
pub struct CorrectorSettings {
    pub corrector_type: CorrectorType,
    /// Frequency list replacing the built-in dictionary
    pub dictionary: Option<PathBuf>,
    /// Program run by the command corrector
    pub command: Option<PathBuf>,
    pub args: Vec<String>,
    /// Optional timeout for the command corrector (None = no limit)
    pub timeout: Option<Duration>,
}

impl CorrectorSettings {
    pub fn new(corrector_type: CorrectorType) -> Self {
        Self {
            corrector_type,
            ..Default::default()
        }
    }

    pub fn with_dictionary(mut self, path: PathBuf) -> Self {
        self.dictionary = Some(path);
        self
    }

    pub fn with_command(mut self, command: PathBuf, args: Vec<String>) -> Self {
        self.command = Some(command);
        self.args = args;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Supported corrector backends
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CorrectorType {
    #[default]
    Dictionary,
    Command,
    Passthrough,
}

impl std::fmt::Display for CorrectorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CorrectorType::Dictionary => write!(f, "dictionary"),
            CorrectorType::Command => write!(f, "command"),
            CorrectorType::Passthrough => write!(f, "none"),
        }
    }
}

impl std::str::FromStr for CorrectorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dictionary" | "dict" => Ok(CorrectorType::Dictionary),
            "command" | "cmd" => Ok(CorrectorType::Command),
            "none" | "passthrough" | "off" => Ok(CorrectorType::Passthrough),
            _ => Err(format!("Unknown corrector type: {}", s)),
        }
    }
}

/// Best-effort spelling and grammar correction of a block of text
pub trait TextCorrector: Send + Sync {
    /// Human-readable name of the corrector
    fn name(&self) -> &str;

    fn corrector_type(&self) -> CorrectorType;

    /// Correct the given text
    fn correct(&self, text: &str) -> Result<String, CorrectorError>;

    /// Check whether the corrector can run on this system
    fn is_available(&self) -> bool {
        true
    }
}
