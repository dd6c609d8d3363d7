use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use thiserror::Error;

lazy_static! {
    static ref BUILTIN: PresetCatalog = PresetCatalog {
        presets: vec![
            TaskPreset::new(
                "Customer Support Email",
                "A professional and empathetic customer support assistant.",
                "- Acknowledge user's frustration.\n- Include a specific commitment to action.\n- Keep it under 4 sentences.",
            ),
            TaskPreset::new(
                "Git Commit Message",
                "A clear and concise software developer documenting a change.",
                "- Follow conventional commit format (`type: description`).\n- Must include an issue ID.\n- State the 'what' and 'why'.",
            ),
        ],
    };
}

/// A task type with the role and constraints used to pre-fill a request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPreset {
    pub name: String,
    pub role: String,
    pub constraints: String,
}

impl TaskPreset {
    pub fn new(
        name: impl Into<String>,
        role: impl Into<String>,
        constraints: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            constraints: constraints.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PresetError {
    #[error("Unknown task preset: {0}")]
    NotFound(String),

    #[error("Task preset already registered: {0}")]
    Duplicate(String),

    #[error("Task preset names must not be empty")]
    InvalidName,
}

/// Read-only registry of task presets, kept in registration order
#[derive(Debug, Clone)]
pub struct PresetCatalog {
    presets: Vec<TaskPreset>,
}

impl PresetCatalog {
    /// The process-wide catalog of built-in presets
    pub fn builtin() -> &'static PresetCatalog {
        &BUILTIN
    }

    /// Built-in presets followed by `extra`, in the order given.
    pub fn with_presets(
        extra: impl IntoIterator<Item = TaskPreset>,
    ) -> Result<PresetCatalog, PresetError> {
        let mut presets = BUILTIN.presets.clone();
        for preset in extra {
            if preset.name.trim().is_empty() {
                return Err(PresetError::InvalidName);
            }
            if presets.iter().any(|p| p.name == preset.name) {
                return Err(PresetError::Duplicate(preset.name));
            }
            presets.push(preset);
        }
        Ok(PresetCatalog { presets })
    }

    pub fn get(&self, name: &str) -> Result<&TaskPreset, PresetError> {
        self.presets
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| PresetError::NotFound(name.to_string()))
    }

    /// Preset names in registration order
    pub fn keys(&self) -> Vec<&str> {
        self.presets.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.presets.iter().any(|p| p.name == name)
    }

    /// The first registered preset
    pub fn first(&self) -> Option<&TaskPreset> {
        self.presets.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskPreset> {
        self.presets.iter()
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_keys_in_registration_order() {
        assert_eq!(
            PresetCatalog::builtin().keys(),
            vec!["Customer Support Email", "Git Commit Message"]
        );
    }

    #[test]
    fn test_get_customer_support_email() {
        let preset = PresetCatalog::builtin()
            .get("Customer Support Email")
            .unwrap();
        assert_eq!(
            preset.role,
            "A professional and empathetic customer support assistant."
        );
        assert_eq!(
            preset.constraints,
            "- Acknowledge user's frustration.\n- Include a specific commitment to action.\n- Keep it under 4 sentences."
        );
    }

    #[test]
    fn test_get_git_commit_message() {
        let preset = PresetCatalog::builtin().get("Git Commit Message").unwrap();
        assert_eq!(
            preset.role,
            "A clear and concise software developer documenting a change."
        );
        assert!(preset
            .constraints
            .starts_with("- Follow conventional commit format (`type: description`)."));
        assert!(preset.constraints.ends_with("- State the 'what' and 'why'."));
    }

    #[test]
    fn test_get_unknown_preset() {
        let result = PresetCatalog::builtin().get("nonexistent");
        assert_eq!(result, Err(PresetError::NotFound("nonexistent".to_string())));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(PresetCatalog::builtin()
            .get("git commit message")
            .is_err());
    }

    #[test]
    fn test_with_presets_appends_after_builtins() {
        let catalog = PresetCatalog::with_presets(vec![TaskPreset::new(
            "Release Notes",
            "A release manager.",
            "- List breaking changes first.",
        )])
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.keys()[2], "Release Notes");
        assert_eq!(catalog.first().unwrap().name, "Customer Support Email");
        assert!(catalog.contains("Release Notes"));
        // The static catalog is untouched
        assert_eq!(PresetCatalog::builtin().len(), 2);
    }

    #[test]
    fn test_with_presets_rejects_duplicates() {
        let result = PresetCatalog::with_presets(vec![TaskPreset::new(
            "Git Commit Message",
            "Someone else.",
            "",
        )]);
        assert_eq!(
            result.unwrap_err(),
            PresetError::Duplicate("Git Commit Message".to_string())
        );
    }

    #[test]
    fn test_with_presets_rejects_blank_names() {
        let result = PresetCatalog::with_presets(vec![TaskPreset::new("  ", "role", "")]);
        assert_eq!(result.unwrap_err(), PresetError::InvalidName);
    }
}
