use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// Structured log events for a polish request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum LogEvent {
    PolishStarted {
        preset: Option<String>,
        text_preview: String,
        word_count: usize,
    },
    CritiqueCompleted {
        issues: usize,
        summary: String,
    },
    CorrectionStarted {
        corrector: String,
    },
    RefineCompleted {
        input_chars: usize,
        output_chars: usize,
        duration_secs: f64,
    },
    PolishCompleted {
        duration_secs: f64,
    },
    ErrorEncountered {
        error: String,
    },
}

impl LogEvent {
    /// Add a timestamp to serialize with the event
    fn with_timestamp(&self) -> serde_json::Value {
        let mut value = serde_json::to_value(self).unwrap_or_default();
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "timestamp".to_string(),
                serde_json::Value::String(chrono::Utc::now().to_rfc3339()),
            );
        }
        value
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable format with colors
    #[default]
    Pretty,
    /// JSON lines format for machine consumption
    Json,
    /// Compact single-line format
    Compact,
}

impl std::str::FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            "compact" => Ok(LogFormat::Compact),
            _ => Err(format!("Unknown log format: {}", s)),
        }
    }
}

/// Logger for rccr events - handles both console output and file logging
pub struct Logger {
    format: LogFormat,
    quiet: bool,
    file_writer: Option<Mutex<File>>,
}

impl Logger {
    pub fn new(format: LogFormat) -> Self {
        Self {
            format,
            quiet: false,
            file_writer: None,
        }
    }

    /// Logger that writes nothing to the console
    pub fn quiet() -> Self {
        Self {
            format: LogFormat::default(),
            quiet: true,
            file_writer: None,
        }
    }

    /// Create a logger with file output in addition to console
    pub fn with_file(format: LogFormat, log_path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_path)?;

        Ok(Self {
            format,
            quiet: false,
            file_writer: Some(Mutex::new(file)),
        })
    }

    pub fn format(&self) -> LogFormat {
        self.format
    }

    pub fn log(&self, event: &LogEvent) {
        // File output is always JSON
        if let Some(ref writer) = self.file_writer {
            if let Ok(mut file) = writer.lock() {
                let json = event.with_timestamp();
                let _ = writeln!(file, "{}", json);
            }
        }

        if self.quiet {
            return;
        }

        match self.format {
            LogFormat::Json => self.log_json(event),
            LogFormat::Pretty => self.log_pretty(event),
            LogFormat::Compact => self.log_compact(event),
        }
    }

    fn log_json(&self, event: &LogEvent) {
        if let Ok(json) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{}", json);
        }
    }

    fn log_pretty(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        match event {
            LogEvent::PolishStarted {
                preset,
                text_preview,
                word_count,
            } => {
                let _ = writeln!(stderr);
                let _ = writeln!(
                    stderr,
                    "{} {}",
                    "▶".bright_blue(),
                    "Analyzing and refining...".bold()
                );
                if let Some(preset) = preset {
                    let _ = writeln!(stderr, "    {} {}", "Preset:".dimmed(), preset.dimmed());
                }
                let _ = writeln!(
                    stderr,
                    "    {} {} ({} {})",
                    "Text:".dimmed(),
                    Self::truncate(text_preview, 60).dimmed(),
                    word_count,
                    if *word_count == 1 { "word" } else { "words" }
                );
            }
            LogEvent::CritiqueCompleted { issues, summary } => {
                if *issues == 0 {
                    let _ = writeln!(stderr, "    {} Critique: {}", "✓".bright_green(), summary);
                } else {
                    let _ = writeln!(
                        stderr,
                        "    {} Critique: {}",
                        "→".bright_yellow(),
                        summary.bright_yellow()
                    );
                }
            }
            LogEvent::CorrectionStarted { corrector } => {
                let _ = writeln!(
                    stderr,
                    "    {} {}",
                    "Corrector:".dimmed(),
                    corrector.bright_cyan()
                );
            }
            LogEvent::RefineCompleted { duration_secs, .. } => {
                let _ = writeln!(
                    stderr,
                    "    {} Refined ({:.2}s)",
                    "✓".bright_green(),
                    duration_secs
                );
            }
            LogEvent::PolishCompleted { .. } => {
                // Results are printed by the caller
                let _ = writeln!(stderr);
            }
            LogEvent::ErrorEncountered { error } => {
                let _ = writeln!(stderr, "{} {}", "✗".bright_red(), error.bright_red());
            }
        }
    }

    fn log_compact(&self, event: &LogEvent) {
        let mut stderr = std::io::stderr();
        let timestamp = chrono::Utc::now().format("%H:%M:%S");
        let msg = match event {
            LogEvent::PolishStarted {
                preset, word_count, ..
            } => format!(
                "[{}] polish:start preset={} words={}",
                timestamp,
                preset.as_deref().unwrap_or("-"),
                word_count
            ),
            LogEvent::CritiqueCompleted { issues, .. } => {
                format!("[{}] critique:done issues={}", timestamp, issues)
            }
            LogEvent::CorrectionStarted { corrector } => {
                format!("[{}] correct:start {}", timestamp, corrector)
            }
            LogEvent::RefineCompleted {
                input_chars,
                output_chars,
                duration_secs,
            } => format!(
                "[{}] refine:done {}->{} chars {:.2}s",
                timestamp, input_chars, output_chars, duration_secs
            ),
            LogEvent::PolishCompleted { duration_secs } => {
                format!("[{}] polish:done {:.2}s", timestamp, duration_secs)
            }
            LogEvent::ErrorEncountered { error } => format!("[{}] error:{}", timestamp, error),
        };
        let _ = writeln!(stderr, "{}", msg);
    }

    fn truncate(s: &str, max_chars: usize) -> String {
        if s.chars().count() > max_chars {
            let head: String = s.chars().take(max_chars.saturating_sub(3)).collect();
            format!("{}...", head)
        } else {
            s.to_string()
        }
    }
}
