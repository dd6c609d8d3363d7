//! Interactive initialization for rccr.
//!
//! Sets up the global config file with the user's preferred corrector.

use anyhow::Result;
use colored::Colorize;
use dialoguer::{Input, Select};
use std::fs;

use rccr_corrector::{CommandCorrector, CorrectorType, TextCorrector};

use crate::config::{GLOBAL_CONFIG_DIR, GLOBAL_CONFIG_FILE};

/// Corrector info for display and config
struct CorrectorInfo {
    display_name: &'static str,
    corrector_type: CorrectorType,
}

const CORRECTORS: &[CorrectorInfo] = &[
    CorrectorInfo {
        display_name: "Built-in dictionary",
        corrector_type: CorrectorType::Dictionary,
    },
    CorrectorInfo {
        display_name: "External command",
        corrector_type: CorrectorType::Command,
    },
    CorrectorInfo {
        display_name: "None (substitutions and punctuation only)",
        corrector_type: CorrectorType::Passthrough,
    },
];

pub fn handle_init() -> Result<()> {
    eprintln!("{}", "Setting up rccr...".bold());
    eprintln!();

    let items: Vec<&str> = CORRECTORS.iter().map(|c| c.display_name).collect();
    let selection = Select::new()
        .with_prompt("Select your spelling corrector")
        .items(&items)
        .default(0)
        .interact()?;
    let info = &CORRECTORS[selection];

    let corrector_section = match info.corrector_type {
        CorrectorType::Command => {
            let command: String = Input::new()
                .with_prompt("Command that reads text on stdin and prints the correction")
                .interact_text()?;
            let corrector = CommandCorrector::new(command.clone().into());
            if !corrector.is_available() {
                eprintln!(
                    "{} '{}' was not found in PATH",
                    "⚠".bright_yellow(),
                    command
                );
            }
            format!(
                "kind = \"{}\"\ncommand = \"{}\"\n# args = []\n# timeout_secs = 10\n",
                info.corrector_type,
                command.replace('\\', "\\\\").replace('"', "\\\"")
            )
        }
        kind => format!(
            "kind = \"{}\"\n# dictionary = \"/path/to/words.txt\"  # optional frequency list\n",
            kind
        ),
    };

    let config_content = format!(
        r#"[corrector]
{}
# Add your own task presets:
# [[presets]]
# name = "Release Notes"
# role = "A release manager summarising changes for users."
# constraints = "- List breaking changes first."
"#,
        corrector_section
    );

    let config_dir = dirs::config_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
        .join(GLOBAL_CONFIG_DIR);

    fs::create_dir_all(&config_dir)?;

    let config_path = config_dir.join(GLOBAL_CONFIG_FILE);

    if config_path.exists() {
        eprintln!(
            "{} Config already exists at {}",
            "⚠".bright_yellow(),
            config_path.display()
        );

        let overwrite = Select::new()
            .with_prompt("Overwrite existing config?")
            .items(&["No, keep existing", "Yes, replace it"])
            .default(0)
            .interact()?;

        if overwrite == 0 {
            eprintln!();
            eprintln!("Keeping existing config. Edit it manually if needed:");
            eprintln!("  {}", config_path.display().to_string().dimmed());
            return Ok(());
        }
    }

    fs::write(&config_path, &config_content)?;

    eprintln!();
    eprintln!(
        "{} Config saved to {}",
        "✓".bright_green(),
        config_path.display()
    );

    print_getting_started();

    Ok(())
}

/// Print the getting started guide
pub fn print_getting_started() {
    eprintln!();
    eprintln!("{}", "Getting started:".bold());
    eprintln!("  {} List presets: {}", "1.".dimmed(), "rccr presets".bright_cyan());
    eprintln!(
        "  {} Polish text: {}",
        "2.".dimmed(),
        "rccr polish --text \"hi pls check the featur\"".bright_cyan()
    );
    eprintln!(
        "  {} Or just run {} for the interactive form",
        "3.".dimmed(),
        "rccr".bright_cyan()
    );
}
