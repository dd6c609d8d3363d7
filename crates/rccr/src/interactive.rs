//! Interactive form: pick a preset, adjust role and constraints, enter text.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Confirm, Editor, Input, Select};

use rccr_core::{PolishRequest, PresetCatalog};

/// Walk the user through building a polish request.
///
/// `preset` preselects a preset by name; an unknown name is an error.
/// `role` and `constraints` replace the preset's values as the prefilled
/// answers.
pub fn collect_request(
    catalog: &PresetCatalog,
    preset: Option<&str>,
    role: Option<&str>,
    constraints: Option<&str>,
) -> Result<PolishRequest> {
    let keys = catalog.keys();
    if keys.is_empty() {
        anyhow::bail!("No task presets registered");
    }

    let default_index = match preset {
        Some(name) => {
            catalog.get(name)?;
            keys.iter().position(|k| *k == name).unwrap_or(0)
        }
        None => 0,
    };

    let selection = Select::new()
        .with_prompt("Select a task type")
        .items(&keys)
        .default(default_index)
        .interact()?;
    let preset = catalog.get(keys[selection])?;

    let role: String = Input::new()
        .with_prompt("Role")
        .with_initial_text(prefill(&preset.role, role))
        .interact_text()?;

    let initial_constraints = prefill(&preset.constraints, constraints);
    eprintln!("{}", "Constraints:".dimmed());
    for line in initial_constraints.lines() {
        eprintln!("  {}", line);
    }
    let constraints = if Confirm::new()
        .with_prompt("Edit constraints?")
        .default(false)
        .interact()?
    {
        Editor::new()
            .edit(initial_constraints)?
            .unwrap_or_else(|| initial_constraints.to_string())
    } else {
        initial_constraints.to_string()
    };

    let raw_text: String = Input::new()
        .with_prompt("Enter your raw text")
        .allow_empty(true)
        .interact_text()?;

    Ok(PolishRequest::from_preset(preset, raw_text)
        .with_role(role)
        .with_constraints(constraints))
}

/// The value shown for editing: the command-line override when given,
/// otherwise the preset's own value
fn prefill<'a>(preset_value: &'a str, override_value: Option<&'a str>) -> &'a str {
    override_value.unwrap_or(preset_value)
}
