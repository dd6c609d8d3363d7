//! Configuration file support for rccr.
//!
//! Loads the global config from `<config_dir>/rccr/config.toml` and the
//! project config from `rccr.toml` in the working directory. Project values
//! win over global ones; command-line flags win over both.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rccr_core::TaskPreset;
use rccr_corrector::{CorrectorSettings, CorrectorType};

/// The project config file name
pub const CONFIG_FILE_NAME: &str = "rccr.toml";
/// Directory under the user config dir holding the global config
pub const GLOBAL_CONFIG_DIR: &str = "rccr";
pub const GLOBAL_CONFIG_FILE: &str = "config.toml";

/// Configuration loaded from a TOML file
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RccrConfig {
    #[serde(default)]
    pub corrector: CorrectorConfig,
    /// Extra task presets, registered after the built-in ones
    #[serde(default)]
    pub presets: Vec<PresetConfig>,
}

/// Spelling corrector selection
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CorrectorConfig {
    /// dictionary | command | none
    pub kind: Option<String>,
    /// Word frequency list for the dictionary corrector
    pub dictionary: Option<PathBuf>,
    /// Program run by the command corrector
    pub command: Option<PathBuf>,
    pub args: Option<Vec<String>>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PresetConfig {
    pub name: String,
    pub role: String,
    #[serde(default)]
    pub constraints: String,
}

impl From<PresetConfig> for TaskPreset {
    fn from(preset: PresetConfig) -> Self {
        TaskPreset::new(preset.name, preset.role, preset.constraints)
    }
}

impl RccrConfig {
    /// Load the project config from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        Self::load_from(&working_dir.join(CONFIG_FILE_NAME))
    }

    /// Load the global config, if there is one
    pub fn load_global() -> Result<Option<Self>> {
        match Self::global_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(None),
        }
    }

    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(GLOBAL_CONFIG_DIR).join(GLOBAL_CONFIG_FILE))
    }

    /// Load a config file. Relative dictionary paths are resolved against
    /// the directory holding the file.
    pub fn load_from(config_path: &Path) -> Result<Option<Self>> {
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let mut config: RccrConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        if let (Some(dictionary), Some(base)) =
            (config.corrector.dictionary.as_ref(), config_path.parent())
        {
            if dictionary.is_relative() {
                let resolved = base.join(dictionary);
                config.corrector.dictionary = Some(resolved);
            }
        }

        Ok(Some(config))
    }

    /// Combine a global and a project config. Project corrector fields
    /// override global ones; presets from both are kept, global first.
    pub fn merge(global: Option<Self>, project: Option<Self>) -> Self {
        match (global, project) {
            (None, None) => Self::default(),
            (Some(config), None) | (None, Some(config)) => config,
            (Some(global), Some(project)) => {
                let corrector = CorrectorConfig {
                    kind: project.corrector.kind.or(global.corrector.kind),
                    dictionary: project.corrector.dictionary.or(global.corrector.dictionary),
                    command: project.corrector.command.or(global.corrector.command),
                    args: project.corrector.args.or(global.corrector.args),
                    timeout_secs: project
                        .corrector
                        .timeout_secs
                        .or(global.corrector.timeout_secs),
                };
                let mut presets = global.presets;
                presets.extend(project.presets);
                Self { corrector, presets }
            }
        }
    }

    /// Presets to register after the built-in ones
    pub fn task_presets(&self) -> Vec<TaskPreset> {
        self.presets.iter().cloned().map(TaskPreset::from).collect()
    }

    /// Build corrector settings, letting the command line override the kind
    /// and dictionary.
    pub fn corrector_settings(
        &self,
        kind_override: Option<CorrectorType>,
        dictionary_override: Option<PathBuf>,
    ) -> Result<CorrectorSettings> {
        let kind = match kind_override {
            Some(kind) => kind,
            None => match self.corrector.kind.as_deref() {
                Some(kind) => kind.parse::<CorrectorType>().map_err(anyhow::Error::msg)?,
                None => CorrectorType::default(),
            },
        };

        let mut settings = CorrectorSettings::new(kind);
        if let Some(dictionary) = dictionary_override.or_else(|| self.corrector.dictionary.clone())
        {
            settings = settings.with_dictionary(dictionary);
        }
        if let Some(ref command) = self.corrector.command {
            settings = settings.with_command(
                command.clone(),
                self.corrector.args.clone().unwrap_or_default(),
            );
        }
        if let Some(secs) = self.corrector.timeout_secs {
            settings = settings.with_timeout(Duration::from_secs(secs));
        }
        Ok(settings)
    }
}

/// Load and merge the global and project configs
pub fn load_config(working_dir: &Path) -> Result<RccrConfig> {
    let global = RccrConfig::load_global()?;
    let project = RccrConfig::load(working_dir)?;
    Ok(RccrConfig::merge(global, project))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        assert!(RccrConfig::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_parses_full_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"
[corrector]
kind = "command"
command = "spellfix"
args = ["--stdin"]
timeout_secs = 5

[[presets]]
name = "Release Notes"
role = "A release manager."
constraints = "- List breaking changes first."
"#,
        )
        .unwrap();

        let config = RccrConfig::load(dir.path()).unwrap().unwrap();
        let settings = config.corrector_settings(None, None).unwrap();

        assert_eq!(settings.corrector_type, CorrectorType::Command);
        assert_eq!(settings.command, Some(PathBuf::from("spellfix")));
        assert_eq!(settings.args, vec!["--stdin".to_string()]);
        assert_eq!(settings.timeout, Some(Duration::from_secs(5)));

        let presets = config.task_presets();
        assert_eq!(presets.len(), 1);
        assert_eq!(presets[0].name, "Release Notes");
    }

    #[test]
    fn test_unknown_fields_rejected() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[corrector]\nlanguage = \"en\"\n",
        )
        .unwrap();
        assert!(RccrConfig::load(dir.path()).is_err());
    }

    #[test]
    fn test_relative_dictionary_resolved_against_config_dir() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "[corrector]\ndictionary = \"words.txt\"\n",
        )
        .unwrap();

        let config = RccrConfig::load(dir.path()).unwrap().unwrap();
        assert_eq!(
            config.corrector.dictionary,
            Some(dir.path().join("words.txt"))
        );
    }

    #[test]
    fn test_invalid_kind_is_error() {
        let config = RccrConfig {
            corrector: CorrectorConfig {
                kind: Some("aspell".into()),
                ..Default::default()
            },
            presets: vec![],
        };
        assert!(config.corrector_settings(None, None).is_err());
    }

    #[test]
    fn test_cli_overrides_config() {
        let config = RccrConfig {
            corrector: CorrectorConfig {
                kind: Some("command".into()),
                dictionary: Some(PathBuf::from("/etc/words")),
                ..Default::default()
            },
            presets: vec![],
        };
        let settings = config
            .corrector_settings(
                Some(CorrectorType::Dictionary),
                Some(PathBuf::from("/tmp/words")),
            )
            .unwrap();
        assert_eq!(settings.corrector_type, CorrectorType::Dictionary);
        assert_eq!(settings.dictionary, Some(PathBuf::from("/tmp/words")));
    }

    #[test]
    fn test_project_overrides_global() {
        let global = RccrConfig {
            corrector: CorrectorConfig {
                kind: Some("command".into()),
                command: Some(PathBuf::from("spellfix")),
                timeout_secs: Some(30),
                ..Default::default()
            },
            presets: vec![PresetConfig {
                name: "Global".into(),
                role: "r".into(),
                constraints: String::new(),
            }],
        };
        let project = RccrConfig {
            corrector: CorrectorConfig {
                kind: Some("none".into()),
                ..Default::default()
            },
            presets: vec![PresetConfig {
                name: "Project".into(),
                role: "r".into(),
                constraints: String::new(),
            }],
        };

        let merged = RccrConfig::merge(Some(global), Some(project));
        assert_eq!(merged.corrector.kind.as_deref(), Some("none"));
        assert_eq!(merged.corrector.command, Some(PathBuf::from("spellfix")));
        assert_eq!(merged.corrector.timeout_secs, Some(30));
        let names: Vec<&str> = merged.presets.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Global", "Project"]);
    }

    #[test]
    fn test_default_is_builtin_dictionary() {
        let settings = RccrConfig::default().corrector_settings(None, None).unwrap();
        assert_eq!(settings.corrector_type, CorrectorType::Dictionary);
        assert!(settings.dictionary.is_none());
    }
}
